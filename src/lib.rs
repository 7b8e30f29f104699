//! wshift engine: a first-person kinematic character controller with a
//! fourth movement axis.
//!
//! The player moves through ordinary 3D space plus a phase coordinate
//! `w`. Obstacles occupy a window on the phase axis; shifting `w` moves
//! them in and out of solidity, which is the core traversal mechanic.
//! On top of that sit climbing, dashing, sprinting, wall jumps and a
//! shared stamina economy.
//!
//! # Architecture
//!
//! - [`world`] — axis-aligned box obstacles and level assembly.
//! - [`physics`] — sphere-vs-box collision, penetration resolution,
//!   support queries and step traversal.
//! - [`input`] — the per-tick input intent the host feeds the simulation.
//! - [`player`] — configuration, stamina, dash, climb, and the
//!   [`player::PlayerController`] tick that drives everything.
//! - [`save`] — progress snapshots and spawn points.
//!
//! The simulation is deterministic: a controller fed the same intents at
//! the same timesteps produces the same trajectory. The host owns the
//! obstacle list and passes it into each call; the controller never
//! retains references into it.

pub mod input;
pub mod physics;
pub mod player;
pub mod save;
pub mod world;

pub use input::InputIntent;
pub use player::{KinematicConfig, MovementFlags, PlayerController, PlayerUpdate};
pub use save::{SaveData, SpawnPoint};
pub use world::{BoxOptions, Obstacle, ObstacleSet};
