//! World Module
//!
//! Provides the static obstacle model for the controller: axis-aligned
//! boxes with a phase-gating window along the auxiliary w axis.
//!
//! # Components
//!
//! - [`Obstacle`] - Immutable axis-aligned box with phase metadata
//! - [`ObstacleSet`] - Level-authoring registry (placement calls + clear)
//! - [`BoxOptions`] - Optional placement flags (visibility, phase, climbable)

pub mod obstacle;

pub use obstacle::{BoxOptions, Obstacle, ObstacleSet};
