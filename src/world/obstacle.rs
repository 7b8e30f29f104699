//! Static Obstacle Model
//!
//! Obstacles are axis-aligned boxes in 3D space plus a solidity window along
//! the auxiliary phase axis (w). An obstacle is only solid for queries whose
//! phase value lies within `phase_half + query_radius` of `phase_center`;
//! outside that window it is transparent to collision entirely.
//!
//! Obstacles are immutable once placed. A level build replaces the whole set
//! through [`ObstacleSet::clear`] followed by placement calls; the controller
//! only ever borrows the set read-only for the duration of one tick.
//!
//! # Usage
//!
//! ```rust,ignore
//! use wshift_engine::world::{BoxOptions, ObstacleSet};
//!
//! let mut set = ObstacleSet::new();
//! set.place_bounds(20.0, 8.0, 1.0);
//! set.place_cube(0.0, 0.0, -4.0, 1.5, BoxOptions::always_active());
//! set.place_box(0.0, 0.0, -9.0, 8.0, 4.0, 1.0, BoxOptions {
//!     phase_size: Some(2.0),
//!     ..BoxOptions::default()
//! });
//! ```

use glam::Vec3;

/// An immutable axis-aligned obstacle with phase-gating metadata.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    /// Minimum corner of the bounding box
    pub min: Vec3,
    /// Maximum corner of the bounding box
    pub max: Vec3,
    /// Center of the solidity window on the phase axis
    pub phase_center: f32,
    /// Half extent of the solidity window; `f32::INFINITY` = always active.
    /// Never zero or negative.
    pub phase_half: f32,
    /// Whether the vertical faces of this obstacle can be climbed
    pub climbable: bool,
    /// Rendering hint only; invisible obstacles still collide
    pub visible: bool,
}

impl Obstacle {
    /// Y coordinate of the obstacle's top face.
    pub fn top(&self) -> f32 {
        self.max.y
    }

    /// Phase filter: is this obstacle solid for a query sphere at phase `w`?
    ///
    /// Returns `false` when `phase_half` is finite and the phase distance
    /// between the query and the obstacle exceeds `phase_half + radius`.
    /// Always-active obstacles (`phase_half == INFINITY`) return `true`.
    ///
    /// The test is symmetric in query and obstacle: swapping which side
    /// carries the window produces the same answer.
    pub fn phase_active(&self, w: f32, radius: f32) -> bool {
        !(self.phase_half.is_finite() && (w - self.phase_center).abs() > self.phase_half + radius)
    }

    /// Does the obstacle's horizontal footprint, inflated by `radius`,
    /// contain the column at (x, z)?
    pub fn footprint_contains(&self, x: f32, z: f32, radius: f32) -> bool {
        x + radius >= self.min.x
            && x - radius <= self.max.x
            && z + radius >= self.min.z
            && z - radius <= self.max.z
    }
}

/// Optional placement flags for [`ObstacleSet::place_box`].
///
/// `phase_size` is the *full* window size along the phase axis; the stored
/// half extent is `phase_size / 2`. `None` defaults to the obstacle's largest
/// dimension (so a box is roughly "as thick" in w as in space), and an
/// explicitly infinite size marks the obstacle always active.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxOptions {
    /// Rendering hint; collision ignores it
    pub visible: bool,
    /// Center of the phase window
    pub phase_center: f32,
    /// Full phase window size; `None` = largest dimension
    pub phase_size: Option<f32>,
    /// Whether vertical faces are climbable
    pub climbable: bool,
}

impl Default for BoxOptions {
    fn default() -> Self {
        Self {
            visible: true,
            phase_center: 0.0,
            phase_size: None,
            climbable: false,
        }
    }
}

impl BoxOptions {
    /// Options for an obstacle that is solid at every phase value.
    pub fn always_active() -> Self {
        Self {
            phase_size: Some(f32::INFINITY),
            ..Self::default()
        }
    }

    /// Options for a climbable obstacle with default phase gating.
    pub fn climbable() -> Self {
        Self {
            climbable: true,
            ..Self::default()
        }
    }
}

/// Level-authoring registry of obstacles.
///
/// Level definitions drive this through placement calls; the finished slice
/// is handed to the controller each tick via [`ObstacleSet::obstacles`].
/// Non-positive dimensions are a caller error and are not validated here -
/// levels are static content, checked once by their authors.
#[derive(Debug, Clone, Default)]
pub struct ObstacleSet {
    obstacles: Vec<Obstacle>,
}

impl ObstacleSet {
    /// Create an empty obstacle set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a box obstacle.
    ///
    /// The box is centered on (x, z) with its base resting at y:
    /// it spans `x +/- width/2`, `y .. y + height`, `z +/- depth/2`.
    pub fn place_box(
        &mut self,
        x: f32,
        y: f32,
        z: f32,
        width: f32,
        height: f32,
        depth: f32,
        options: BoxOptions,
    ) {
        let phase_size = options
            .phase_size
            .unwrap_or_else(|| width.max(height).max(depth));
        let phase_half = if phase_size.is_finite() {
            phase_size / 2.0
        } else {
            f32::INFINITY
        };
        self.obstacles.push(Obstacle {
            min: Vec3::new(x - width / 2.0, y, z - depth / 2.0),
            max: Vec3::new(x + width / 2.0, y + height, z + depth / 2.0),
            phase_center: options.phase_center,
            phase_half,
            climbable: options.climbable,
            visible: options.visible,
        });
    }

    /// Place a cube obstacle (width = height = depth = size).
    pub fn place_cube(&mut self, x: f32, y: f32, z: f32, size: f32, options: BoxOptions) {
        self.place_box(x, y, z, size, size, size, options);
    }

    /// Place four invisible, always-active boundary walls forming a square
    /// arena of half size `half_size`.
    pub fn place_bounds(&mut self, half_size: f32, height: f32, thickness: f32) {
        let span = half_size * 2.0 + thickness;
        let wall = BoxOptions {
            visible: false,
            phase_size: Some(f32::INFINITY),
            ..BoxOptions::default()
        };
        // Along X (left/right)
        self.place_box(-half_size - thickness / 2.0, 0.0, 0.0, thickness, height, span, wall);
        self.place_box(half_size + thickness / 2.0, 0.0, 0.0, thickness, height, span, wall);
        // Along Z (front/back)
        self.place_box(0.0, 0.0, -half_size - thickness / 2.0, span, height, thickness, wall);
        self.place_box(0.0, 0.0, half_size + thickness / 2.0, span, height, thickness, wall);
    }

    /// Remove every obstacle. Called at the start of a level (re)build.
    pub fn clear(&mut self) {
        self.obstacles.clear();
    }

    /// Read-only view of the placed obstacles, in placement order.
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// Number of placed obstacles.
    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    /// Returns true if no obstacles are placed.
    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }
}
