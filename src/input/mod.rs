//! Input Module
//!
//! The boundary between the external input aggregator (keyboard, touch
//! joystick, swipe gestures, look controller) and the simulation. The
//! aggregator merges its sources into one [`InputIntent`] per tick; the
//! controller consumes the sanitized intent and nothing else.

pub mod intent;

pub use intent::InputIntent;
