//! Player Tests - Full-Tick Movement Scenarios
//!
//! End-to-end tests driving the controller through whole ticks against
//! small hand-built worlds: landing and jumping, phase walls, the dash
//! economy, climbing and wall jumps, ledge traversal and save restore.

use glam::Vec3;
use wshift_engine::input::InputIntent;
use wshift_engine::player::{KinematicConfig, PlayerController};
use wshift_engine::save::{SaveData, SpawnPoint};
use wshift_engine::world::{BoxOptions, ObstacleSet};

const TICK: f32 = 1.0 / 60.0;

fn player() -> PlayerController {
    PlayerController::new(KinematicConfig::default())
}

fn run(player: &mut PlayerController, set: &ObstacleSet, intent: &InputIntent, ticks: usize) {
    for _ in 0..ticks {
        player.update(TICK, set.obstacles(), intent);
    }
}

// ============================================================================
// Landing and Jumping
// ============================================================================

#[test]
fn test_fall_onto_cube_then_jump() {
    let mut set = ObstacleSet::new();
    set.place_cube(0.0, 0.0, 0.0, 1.5, BoxOptions::default());

    let mut player = player();
    // Feet at 3.5, two meters above the cube top.
    player.reset_player(Vec3::new(0.0, 3.5 + 1.6, 0.0), 0.0);
    run(&mut player, &set, &InputIntent::neutral(), 120);

    assert!(player.grounded());
    let feet = player.position().y - 1.6;
    assert!((feet - 1.5).abs() < 1.0e-3, "feet at {feet}");

    assert!(player.attempt_jump(set.obstacles()));
    assert_eq!(player.vertical_velocity(), 9.0);
    assert!(!player.grounded());
}

#[test]
fn test_landing_settles_without_oscillation() {
    let mut set = ObstacleSet::new();
    set.place_cube(0.0, 0.0, 0.0, 1.5, BoxOptions::default());

    let mut player = player();
    player.reset_player(Vec3::new(0.0, 3.5 + 1.6, 0.0), 0.0);
    run(&mut player, &set, &InputIntent::neutral(), 120);

    // Once at rest on the box top the pose must be a fixed point of the
    // tick, not alternate between a lifted and a dropped height.
    let settled = player.position();
    for _ in 0..30 {
        player.update(TICK, set.obstacles(), &InputIntent::neutral());
        assert_eq!(player.position(), settled);
        assert!(player.grounded());
        assert_eq!(player.vertical_velocity(), 0.0);
    }
}

#[test]
fn test_never_sinks_below_base_ground() {
    let mut player = player();
    player.reset_player(Vec3::new(0.0, 20.0, 0.0), 0.0);
    let set = ObstacleSet::new();
    for _ in 0..300 {
        player.update(TICK, set.obstacles(), &InputIntent::neutral());
        assert!(player.position().y >= 1.6 - 1.0e-4);
    }
    assert!(player.grounded());
}

// ============================================================================
// Phase Walls
// ============================================================================

fn phase_wall_world() -> ObstacleSet {
    let mut set = ObstacleSet::new();
    // Wall at z in [-3.25, -2.75], solid only near w = 0.
    set.place_box(
        0.0,
        0.0,
        -3.0,
        6.0,
        3.0,
        0.5,
        BoxOptions {
            phase_size: Some(1.0),
            ..BoxOptions::default()
        },
    );
    set
}

#[test]
fn test_phase_wall_blocks_at_aligned_w() {
    let set = phase_wall_world();
    let mut player = player();
    player.reset_player(Vec3::new(0.0, 1.6, 0.0), 0.0);
    let forward = InputIntent {
        move_z: 1.0,
        ..InputIntent::neutral()
    };
    run(&mut player, &set, &forward, 240);
    // Stopped at the near face: body radius away from z = -2.75.
    assert!(player.position().z > -2.75);
}

#[test]
fn test_phase_wall_passes_when_shifted() {
    let set = phase_wall_world();
    let mut player = player();
    player.reset_player(Vec3::new(0.0, 1.6, 0.0), 0.0);
    player.set_player_w(3.0);
    let forward = InputIntent {
        move_z: 1.0,
        ..InputIntent::neutral()
    };
    run(&mut player, &set, &forward, 240);
    assert!(player.position().z < -3.25);
    assert_eq!(player.player_w(), 3.0);
}

#[test]
fn test_phase_gate_rejects_shift_into_wall() {
    let set = phase_wall_world();
    let mut player = player();
    // Standing inside the wall's column, transparent at w = 3.
    player.reset_player(Vec3::new(0.0, 1.6, -3.0), 0.0);
    player.set_player_w(3.0);
    let shift_down = InputIntent {
        phase_axis: -1.0,
        ..InputIntent::neutral()
    };
    run(&mut player, &set, &shift_down, 300);
    // The wall is solid for |w| <= 0.5 + body radius; w must stop short.
    assert!(player.player_w() > 0.8);
    assert!(player.player_w() < 1.0);
    // The spatial pose was never disturbed.
    assert!((player.position().z - -3.0).abs() < 1.0e-3);
}

#[test]
fn test_phase_shift_flips_which_wall_is_solid() {
    let mut set = ObstacleSet::new();
    // Two walls with offset phase windows: solid near w = 0 and w = 3.
    set.place_box(
        0.0,
        0.0,
        -3.0,
        6.0,
        3.0,
        0.5,
        BoxOptions {
            phase_size: Some(2.0),
            ..BoxOptions::default()
        },
    );
    set.place_box(
        0.0,
        0.0,
        -6.0,
        6.0,
        3.0,
        0.5,
        BoxOptions {
            phase_center: 3.0,
            phase_size: Some(2.0),
            ..BoxOptions::default()
        },
    );

    let mut player = player();
    player.reset_player(Vec3::new(0.0, 1.6, 0.0), 0.0);
    let body = *player.collision_body();
    let near = Vec3::new(0.0, 1.6, -3.0);
    let far = Vec3::new(0.0, 1.6, -6.0);

    assert!(body.collides(near, 0.0, set.obstacles()));
    assert!(!body.collides(far, 0.0, set.obstacles()));

    // Drive the phase axis up to w = 3, then coast to a stop.
    let shift = InputIntent {
        phase_axis: 1.0,
        ..InputIntent::neutral()
    };
    let mut ticks = 0;
    while player.player_w() < 3.0 && ticks < 600 {
        player.update(TICK, set.obstacles(), &shift);
        ticks += 1;
    }
    run(&mut player, &set, &InputIntent::neutral(), 60);

    let w = player.player_w();
    assert!(w >= 3.0 && w < 4.0, "w at {w}");
    assert!(!body.collides(near, w, set.obstacles()));
    assert!(body.collides(far, w, set.obstacles()));
}

// ============================================================================
// Dash Economy
// ============================================================================

#[test]
fn test_dash_chain_spends_exact_stamina() {
    let mut player = player();
    player.reset_player(Vec3::new(0.0, 1.6, 0.0), 0.0);
    let set = ObstacleSet::new();
    // Settle onto the ground first.
    run(&mut player, &set, &InputIntent::neutral(), 5);

    let neutral = InputIntent::neutral();
    for expected in [75.0, 50.0, 25.0] {
        assert!(player.start_dash(Vec3::NEG_Z, false));
        assert_eq!(player.stamina().value(), expected);
        // Seven 90 ms ticks cover the 0.6 s cooldown; the regen delay
        // keeps recovery from slipping in between dashes.
        for _ in 0..7 {
            player.update(0.09, set.obstacles(), &neutral);
        }
        assert_eq!(player.stamina().value(), expected);
    }
}

#[test]
fn test_fourth_dash_blocked_by_cooldown() {
    let mut player = player();
    player.reset_player(Vec3::new(0.0, 1.6, 0.0), 0.0);
    let set = ObstacleSet::new();
    run(&mut player, &set, &InputIntent::neutral(), 5);

    assert!(player.start_dash(Vec3::NEG_Z, false));
    assert!(!player.start_dash(Vec3::NEG_Z, false));
    assert_eq!(player.stamina().value(), 75.0);
}

// ============================================================================
// Climbing and Wall Jumps
// ============================================================================

fn climb_world() -> ObstacleSet {
    let mut set = ObstacleSet::new();
    // Climbable wall: x in [-2, 2], y in [0, 6], z in [-2.5, -1.5].
    set.place_box(0.0, 0.0, -2.0, 4.0, 6.0, 1.0, BoxOptions::climbable());
    set
}

#[test]
fn test_climb_ascends_and_drains_stamina() {
    let set = climb_world();
    let mut player = player();
    player.reset_player(Vec3::new(0.0, 1.6, -1.0), 0.0);
    let climb = InputIntent {
        climb_held: true,
        move_z: 1.0,
        ..InputIntent::neutral()
    };
    run(&mut player, &set, &climb, 30);

    assert!(player.is_climbing());
    assert!(!player.grounded());
    // Half a second at 6 m/s upward, 32 stamina per second drained.
    let feet = player.position().y - 1.6;
    assert!((feet - 3.0).abs() < 0.01, "feet at {feet}");
    assert!((player.stamina().value() - 84.0).abs() < 0.01);
}

#[test]
fn test_wall_jump_during_grace_window() {
    let set = climb_world();
    let mut player = player();
    player.reset_player(Vec3::new(0.0, 1.6, -1.0), 0.0);
    let climb = InputIntent {
        climb_held: true,
        move_z: 1.0,
        ..InputIntent::neutral()
    };
    run(&mut player, &set, &climb, 30);
    assert!(player.is_climbing());

    // Release the climb; the grace window keeps the wall jump valid.
    player.update(TICK, set.obstacles(), &InputIntent::neutral());
    assert!(!player.is_climbing());
    assert!(player.attempt_jump(set.obstacles()));
    assert_eq!(player.vertical_velocity(), 11.0);

    // The push is along the wall's outward normal (+z here).
    let start_z = player.position().z;
    run(&mut player, &set, &InputIntent::neutral(), 10);
    assert!(player.position().z > start_z);
}

#[test]
fn test_wall_jump_refused_after_grace_expires() {
    let set = climb_world();
    let mut player = player();
    player.reset_player(Vec3::new(0.0, 1.6, -1.0), 0.0);
    let climb = InputIntent {
        climb_held: true,
        move_z: 1.0,
        ..InputIntent::neutral()
    };
    run(&mut player, &set, &climb, 30);

    // Release and wait out the 0.16 s grace while falling.
    run(&mut player, &set, &InputIntent::neutral(), 12);
    assert!(!player.grounded());
    assert!(!player.attempt_jump(set.obstacles()));
}

#[test]
fn test_empty_stamina_forces_detach_and_blocks_reattach() {
    let set = climb_world();
    let config = KinematicConfig {
        stamina_max: 10.0,
        ..KinematicConfig::default()
    };
    let mut player = PlayerController::new(config);
    player.reset_player(Vec3::new(0.0, 1.6, -1.0), 0.0);
    let climb = InputIntent {
        climb_held: true,
        move_z: 1.0,
        ..InputIntent::neutral()
    };
    // 10 stamina at 32/s lasts about 0.31 s.
    run(&mut player, &set, &climb, 30);
    assert!(player.stamina().is_empty());
    assert!(!player.is_climbing());

    // Still holding: an empty pool cannot re-attach.
    run(&mut player, &set, &climb, 3);
    assert!(!player.is_climbing());
}

// ============================================================================
// Ledge Traversal
// ============================================================================

#[test]
fn test_walks_onto_low_ledge() {
    let mut set = ObstacleSet::new();
    // Curb-height ledge: x in [1, 3], top at 0.15.
    set.place_box(2.0, 0.0, 0.0, 2.0, 0.15, 2.0, BoxOptions::default());

    let mut player = player();
    player.reset_player(Vec3::new(0.0, 1.6, 0.0), 0.0);
    let strafe_right = InputIntent {
        move_x: 1.0,
        ..InputIntent::neutral()
    };
    run(&mut player, &set, &strafe_right, 60);

    assert!(player.grounded());
    let feet = player.position().y - 1.6;
    assert!((feet - 0.15).abs() < 1.0e-3, "feet at {feet}");
    assert!(player.position().x > 1.0);
}

// ============================================================================
// Determinism and Invariants
// ============================================================================

#[test]
fn test_zero_dt_is_a_no_op() {
    let set = climb_world();
    let mut player = player();
    player.reset_player(Vec3::new(0.0, 1.6, 0.0), 0.0);
    run(&mut player, &set, &InputIntent::neutral(), 10);

    let position = player.position();
    let w = player.player_w();
    let stamina = player.stamina().value();
    player.update(0.0, set.obstacles(), &InputIntent::neutral());
    assert_eq!(player.position(), position);
    assert_eq!(player.player_w(), w);
    assert_eq!(player.stamina().value(), stamina);
}

#[test]
fn test_stamina_stays_in_bounds_under_abuse() {
    let set = climb_world();
    let mut player = player();
    player.reset_player(Vec3::new(0.0, 1.6, -1.0), 0.0);

    for i in 0..600 {
        let intent = InputIntent {
            move_x: if i % 3 == 0 { 1.0 } else { -1.0 },
            move_z: 1.0,
            climb_held: i % 7 < 4,
            sprint_held: i % 5 < 2,
            phase_axis: if i % 2 == 0 { 1.0 } else { -1.0 },
            jump_pressed: i % 11 == 0,
            ..InputIntent::neutral()
        };
        if i % 13 == 0 {
            player.start_dash(Vec3::NEG_Z, false);
        }
        player.update(TICK, set.obstacles(), &intent);
        let value = player.stamina().value();
        assert!((0.0..=100.0).contains(&value), "stamina at {value}");
        assert!(player.position().is_finite());
    }
}

#[test]
fn test_identical_runs_are_deterministic() {
    let set = climb_world();
    let intent = InputIntent {
        move_z: 1.0,
        climb_held: true,
        ..InputIntent::neutral()
    };
    let mut a = player();
    let mut b = player();
    a.reset_player(Vec3::new(0.0, 1.6, -1.0), 0.0);
    b.reset_player(Vec3::new(0.0, 1.6, -1.0), 0.0);
    run(&mut a, &set, &intent, 120);
    run(&mut b, &set, &intent, 120);
    assert_eq!(a.position(), b.position());
    assert_eq!(a.player_w(), b.player_w());
    assert_eq!(a.stamina().value(), b.stamina().value());
}

// ============================================================================
// Save Restore
// ============================================================================

#[test]
fn test_save_round_trip_through_controller() {
    let mut player = player();
    player.reset_player(Vec3::new(2.0, 1.6, -4.0), 1.0);
    player.set_player_w(1.5);

    let save = SaveData {
        level: 4,
        position: player.position(),
        rotation_y: Some(player.rotation_y()),
        w: player.player_w(),
    };
    let restored = SaveData::from_json(&save.to_json()).unwrap();

    let mut other = PlayerController::new(KinematicConfig::default());
    other.restore(&restored, &SpawnPoint::default());
    assert_eq!(other.position(), player.position());
    assert_eq!(other.rotation_y(), player.rotation_y());
    assert_eq!(other.player_w(), player.player_w());
}
