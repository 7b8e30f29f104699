//! Climbable surface detection and attachment.
//!
//! Climbing attaches to one of the four vertical faces of an axis-aligned
//! climbable box. The search runs against the body sphere center, applies
//! the same phase filter as collision, and returns the nearest face within
//! attach range. While attached the controller pins the body center just
//! outside the face so friction-free vertical movement does not drift into
//! the wall.

use glam::Vec3;

use crate::world::Obstacle;

use super::config::KinematicConfig;

/// Which vertical face of the box the climb is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    XMin,
    XMax,
    ZMin,
    ZMax,
}

/// A climbable face within attach range.
#[derive(Debug, Clone, Copy)]
pub struct ClimbSurface {
    /// Distance from the body center to the face plane.
    pub distance: f32,
    /// Outward face normal.
    pub normal: Vec3,
    pub face: Face,
    pub box_min: Vec3,
    pub box_max: Vec3,
}

/// Finds the nearest climbable face within attach range of the body
/// center, or `None`. Boxes whose top is at or below the feet (minus a
/// small tolerance) are skipped so standing on a climbable box does not
/// re-attach.
pub fn find_climbable_surface(
    pos: Vec3,
    w: f32,
    obstacles: &[Obstacle],
    config: &KinematicConfig,
) -> Option<ClimbSurface> {
    let center = pos + config.body_offset();
    let feet_y = pos.y - config.eye_height;
    let attach = config.climb_attach_distance();
    let radius = config.player_radius;
    let mut best: Option<ClimbSurface> = None;

    for obstacle in obstacles {
        if !obstacle.climbable || !obstacle.phase_active(w, radius) {
            continue;
        }
        if feet_y >= obstacle.max.y - 0.05 {
            continue;
        }
        let within_y =
            center.y >= obstacle.min.y - 0.4 && center.y <= obstacle.max.y + config.eye_height;
        let within_x = center.x >= obstacle.min.x - radius && center.x <= obstacle.max.x + radius;
        let within_z = center.z >= obstacle.min.z - radius && center.z <= obstacle.max.z + radius;
        if !within_y || (!within_x && !within_z) {
            continue;
        }

        let mut candidates: [Option<(f32, Vec3, Face)>; 4] = [None; 4];
        if within_z {
            candidates[0] = Some(((center.x - obstacle.min.x).abs(), Vec3::NEG_X, Face::XMin));
            candidates[1] = Some(((center.x - obstacle.max.x).abs(), Vec3::X, Face::XMax));
        }
        if within_x {
            candidates[2] = Some(((center.z - obstacle.min.z).abs(), Vec3::NEG_Z, Face::ZMin));
            candidates[3] = Some(((center.z - obstacle.max.z).abs(), Vec3::Z, Face::ZMax));
        }

        for candidate in candidates.into_iter().flatten() {
            let (distance, normal, face) = candidate;
            // Slightly looser than the attach distance so a face right at
            // the limit still competes for nearest.
            if distance > attach + 0.05 {
                continue;
            }
            let closer = best.map(|b| distance < b.distance).unwrap_or(true);
            if closer {
                best = Some(ClimbSurface {
                    distance,
                    normal,
                    face,
                    box_min: obstacle.min,
                    box_max: obstacle.max,
                });
            }
        }
    }

    best.filter(|surface| surface.distance <= attach)
}

/// Pins the body center just outside the attached face. No-op once the
/// feet have reached the top of the box.
pub fn clamp_to_surface(pos: &mut Vec3, surface: &ClimbSurface, config: &KinematicConfig) {
    let epsilon = 0.01;
    let feet_y = pos.y - config.eye_height;
    if feet_y >= surface.box_max.y - 0.05 {
        return;
    }
    let offset = config.body_offset();
    let mut center = *pos + offset;
    let radius = config.player_radius;
    match surface.face {
        Face::XMin => {
            if surface.box_min.x - center.x < radius {
                center.x = surface.box_min.x - radius - epsilon;
            }
        }
        Face::XMax => {
            if center.x - surface.box_max.x < radius {
                center.x = surface.box_max.x + radius + epsilon;
            }
        }
        Face::ZMin => {
            if surface.box_min.z - center.z < radius {
                center.z = surface.box_min.z - radius - epsilon;
            }
        }
        Face::ZMax => {
            if center.z - surface.box_max.z < radius {
                center.z = surface.box_max.z + radius + epsilon;
            }
        }
    }
    *pos = center - offset;
}
