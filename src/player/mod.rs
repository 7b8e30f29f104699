//! Player simulation: configuration, stamina, dashing, climbing and the
//! kinematic controller that ties them together.

pub mod climb;
pub mod config;
pub mod controller;
pub mod dash;
pub mod stamina;

pub use climb::{ClimbSurface, Face, clamp_to_surface, find_climbable_surface};
pub use config::{KinematicConfig, MAX_TICK_DT};
pub use controller::{MovementFlags, PlayerController, PlayerUpdate};
pub use dash::{DashController, SprintTracker};
pub use stamina::StaminaPool;
