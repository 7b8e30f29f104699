//! Save-game serialization.
//!
//! A save is a small JSON payload: current level, camera pose and the
//! phase coordinate. Older saves omit the rotation field; loading falls
//! back to the level's spawn rotation for those.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Where a level places a freshly spawned player.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnPoint {
    pub position: Vec3,
    pub rotation_y: f32,
}

impl Default for SpawnPoint {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 1.6, -8.0),
            rotation_y: std::f32::consts::PI,
        }
    }
}

/// Serialized progress snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SaveData {
    pub level: u32,
    pub position: Vec3,
    /// Absent in saves written before the rotation field existed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation_y: Option<f32>,
    #[serde(default)]
    pub w: f32,
}

impl SaveData {
    /// Serializes to the JSON payload format.
    pub fn to_json(&self) -> String {
        // Serialization of plain numeric fields cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Parses a payload, returning `None` (with a warning) for malformed
    /// input rather than propagating the corruption.
    pub fn from_json(raw: &str) -> Option<Self> {
        match serde_json::from_str(raw) {
            Ok(save) => Some(save),
            Err(err) => {
                log::warn!("discarding malformed save payload: {err}");
                None
            }
        }
    }
}
