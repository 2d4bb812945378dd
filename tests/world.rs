// Integration tests (native) for the `dino-dash` crate.
// These tests avoid wasm-specific functionality and exercise the pure
// simulation so they can run under `cargo test` on the host.

use dino_dash::runner::world::{
    rects_overlap, CactusKind, Obstacle, Rect, World, CACTUS_COLORS, CANVAS_WIDTH, DINO_REST_Y,
    MILESTONE_INTERVAL, START_SPEED,
};

fn overlapping_obstacle() -> Obstacle {
    // A large cactus parked on the player's x: overlaps the grounded hitbox.
    Obstacle {
        kind: CactusKind::Large,
        x: dino_dash::runner::world::DINO_X,
        color: CACTUS_COLORS[0],
    }
}

#[test]
fn collision_is_true_iff_boxes_overlap() {
    let a = Rect {
        x: 0.0,
        y: 0.0,
        w: 10.0,
        h: 10.0,
    };
    let apart = Rect {
        x: 20.0,
        y: 0.0,
        w: 5.0,
        h: 5.0,
    };
    let inside = Rect {
        x: 3.0,
        y: 3.0,
        w: 2.0,
        h: 2.0,
    };
    let edge = Rect {
        x: 10.0,
        y: 0.0,
        w: 5.0,
        h: 5.0,
    };
    let above = Rect {
        x: 0.0,
        y: 30.0,
        w: 10.0,
        h: 10.0,
    };
    assert!(!rects_overlap(&a, &apart));
    assert!(!rects_overlap(&a, &above));
    assert!(rects_overlap(&a, &inside));
    assert!(rects_overlap(&inside, &a));
    // Edge contact counts as a hit (strict separating checks).
    assert!(rects_overlap(&a, &edge));
}

#[test]
fn score_increments_once_per_tick_while_running() {
    let mut world = World::new(1);
    for expected in 1..=100u64 {
        world.tick();
        world.obstacles.clear(); // keep the run collision-free
        assert_eq!(world.score, expected);
    }
    assert_eq!(world.high_score, 100);
}

#[test]
fn score_freezes_during_game_over() {
    let mut world = World::new(1);
    world.obstacles.push(overlapping_obstacle());
    let outcome = world.tick();
    assert!(outcome.collided);
    assert!(world.game_over);
    let frozen = world.score;
    for _ in 0..10 {
        let out = world.tick();
        assert_eq!(out, Default::default());
        assert_eq!(world.score, frozen);
    }
}

#[test]
fn obstacles_are_removed_once_fully_off_screen() {
    let mut world = World::new(1);
    world.obstacles.push(Obstacle {
        kind: CactusKind::Small,
        x: -CactusKind::Small.width() + 1.0,
        color: CACTUS_COLORS[0],
    });
    world.tick();
    assert!(
        world.obstacles.iter().all(|o| o.x > -o.kind.width()),
        "no fully off-screen obstacle may survive a tick"
    );
}

#[test]
fn obstacles_spawn_and_scroll_left() {
    let mut world = World::new(9);
    world.tick();
    assert_eq!(world.obstacles.len(), 1);
    let x0 = world.obstacles[0].x;
    assert_eq!(x0, CANVAS_WIDTH - world.speed);
    world.tick();
    assert!(world.obstacles[0].x < x0);
    // No second cactus until the first clears the spawn gap.
    assert_eq!(world.obstacles.len(), 1);
}

#[test]
fn clouds_drift_and_stay_in_band() {
    let mut world = World::new(1234);
    for _ in 0..300 {
        world.tick();
        world.obstacles.clear();
    }
    assert!(!world.clouds.is_empty());
    for cloud in &world.clouds {
        assert!((30.0..70.0).contains(&cloud.y));
        assert!((1.0..2.0).contains(&cloud.speed));
        assert!(cloud.x >= -dino_dash::runner::world::CLOUD_WIDTH);
    }
}

#[test]
fn speed_and_night_flip_at_milestones() {
    let mut world = World::new(1);
    for _ in 0..MILESTONE_INTERVAL {
        let out = world.tick();
        world.obstacles.clear();
        if world.score < MILESTONE_INTERVAL {
            assert!(!out.night_toggled);
        } else {
            assert!(out.night_toggled);
        }
    }
    assert!(world.night);
    assert_eq!(world.speed, START_SPEED + 0.5);
    assert_eq!(world.display_score(), 50);

    for _ in 0..MILESTONE_INTERVAL {
        world.tick();
        world.obstacles.clear();
    }
    assert!(!world.night, "night flips back at the next milestone");
    assert_eq!(world.speed, START_SPEED + 1.0);
}

#[test]
fn restart_resets_run_state_and_keeps_high_score() {
    let mut world = World::new(1);
    for _ in 0..42 {
        world.tick();
        world.obstacles.clear();
    }
    world.obstacles.push(overlapping_obstacle());
    world.tick();
    assert!(world.game_over);
    let high = world.high_score;
    assert!(high > 0);

    world.restart();
    assert!(!world.game_over);
    assert_eq!(world.score, 0);
    assert_eq!(world.speed, START_SPEED);
    assert!(!world.night);
    assert!(world.obstacles.is_empty());
    assert!(world.clouds.is_empty());
    assert_eq!(world.dino.y, DINO_REST_Y);
    assert!(!world.dino.jumping);
    assert_eq!(world.high_score, high, "high score survives a restart");

    // And the world ticks again afterwards.
    world.tick();
    assert_eq!(world.score, 1);
}

#[test]
fn display_score_is_a_tenth_of_raw() {
    let mut world = World::new(1);
    for _ in 0..37 {
        world.tick();
        world.obstacles.clear();
    }
    assert_eq!(world.score, 37);
    assert_eq!(world.display_score(), 3);
}
