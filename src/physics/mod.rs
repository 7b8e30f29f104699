//! Physics module for the wshift controller
//!
//! Custom kinematic collision implementation, built from scratch without an
//! external physics library. The controller is a specialized character
//! controller, not a rigid-body simulation: every query is a sphere against
//! a set of static, phase-gated axis-aligned boxes.
//!
//! # Unit System
//!
//! **1 unit = 1 meter** (SI units throughout)
//!
//! - Distances in meters
//! - Velocities in m/s
//! - Accelerations in m/s²
//!
//! # Submodules
//!
//! - [`collision`] - Sphere/AABB overlap, penetration resolution, step
//!   traversal and support-height sampling

pub mod collision;

pub use collision::{CollisionBody, sphere_overlaps};
