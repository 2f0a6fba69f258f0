//! Whole-run invariants checked over seeded random chases.

use chase_core::behavior::{nearest_sheep, sheep_move, wolf_move};
use chase_core::{census, Chase, ChaseConfig, ChaseState, EventKind, Position, Sheep, Wolf};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const EPSILON: f64 = 1e-9;

fn seeds() -> impl Iterator<Item = u64> {
    [1_u64, 42, 0xC0FFEE, 0xDEAD_BEEF, 2024].into_iter()
}

#[test]
fn test_population_size_is_constant_and_census_never_grows() {
    for seed in seeds() {
        let config = ChaseConfig {
            sheep_count: 12,
            init_pos_limit: 4.0,
            max_rounds: 200,
            ..ChaseConfig::default()
        };
        let mut chase = Chase::new(config, ChaCha8Rng::seed_from_u64(seed));
        let mut previous = chase.alive();

        while let Some(report) = chase.step() {
            assert_eq!(chase.herd().len(), 12);
            assert_eq!(report.snapshot.sheep.len(), 12);
            assert!(report.alive <= previous);
            assert_eq!(report.alive, census(chase.herd()));
            assert!(report.snapshot.wolf.is_finite());
            previous = report.alive;
        }
    }
}

#[test]
fn test_dead_slots_stay_dead() {
    let config = ChaseConfig {
        sheep_count: 8,
        init_pos_limit: 3.0,
        max_rounds: 100,
        ..ChaseConfig::default()
    };
    let mut chase = Chase::new(config, ChaCha8Rng::seed_from_u64(99));
    let mut dead = vec![false; 8];

    while let Some(report) = chase.step() {
        for (index, slot) in report.snapshot.sheep.iter().enumerate() {
            if dead[index] {
                assert!(slot.is_none(), "sheep {index} came back to life");
            }
            dead[index] = slot.is_none();
        }
    }
}

#[test]
fn test_each_living_sheep_moves_exactly_one_step() {
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let step = 0.75;
    let mut herd: Vec<Sheep> = (0..50)
        .map(|i| {
            if i % 7 == 0 {
                Sheep::Dead
            } else {
                Sheep::new(Position::new(i as f64, -(i as f64)))
            }
        })
        .collect();
    let before = herd.clone();

    sheep_move(&mut herd, step, &mut rng);

    for (old, new) in before.iter().zip(herd.iter()) {
        match (old.position(), new.position()) {
            (None, None) => {}
            (Some(a), Some(b)) => {
                let dx = (b.x - a.x).abs();
                let dy = (b.y - a.y).abs();
                assert!(
                    (dx == step && dy == 0.0) || (dx == 0.0 && dy == step),
                    "unexpected step {a:?} -> {b:?}"
                );
            }
            _ => panic!("movement changed a slot's lifecycle"),
        }
    }
}

#[test]
fn test_locator_returns_a_minimum() {
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    for _ in 0..50 {
        let (_, mut herd) = chase_core::initialize(20, 10.0, &mut rng);
        for sheep in herd.iter_mut().step_by(3) {
            sheep.kill();
        }
        let wolf = Wolf::new(Position::new(1.5, -2.5));

        let nearest = nearest_sheep(&herd, &wolf).unwrap();
        for (index, sheep) in herd.iter().enumerate() {
            if let Some(position) = sheep.position() {
                let distance = wolf.position.distance(&position);
                assert!(nearest.distance <= distance);
                if distance == nearest.distance {
                    assert!(nearest.index <= index);
                }
            }
        }
    }
}

#[test]
fn test_capture_and_pursuit_laws() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let wolf_step = 1.0;
    for _ in 0..100 {
        let (_, mut herd) = chase_core::initialize(6, 5.0, &mut rng);
        let mut wolf = Wolf::new(Position::new(0.3, -0.2));
        let nearest = nearest_sheep(&herd, &wolf).unwrap();
        let target = herd[nearest.index].position().unwrap();

        let event = wolf_move(&mut herd, &mut wolf, wolf_step).unwrap();
        assert_eq!(event.index, nearest.index);

        if nearest.distance <= wolf_step {
            assert_eq!(event.kind, EventKind::Captured);
            assert_eq!(herd[nearest.index], Sheep::Dead);
            assert_eq!(wolf.position, target);
        } else {
            assert_eq!(event.kind, EventKind::Pursued);
            assert!(herd[nearest.index].is_alive());
            let remaining = wolf.position.distance(&target);
            assert!((remaining - (nearest.distance - wolf_step)).abs() < EPSILON);
        }
    }
}

#[test]
fn test_scheduler_respects_round_limit() {
    for seed in seeds() {
        let config = ChaseConfig {
            sheep_count: 3,
            init_pos_limit: 2.0,
            max_rounds: 7,
            ..ChaseConfig::default()
        };
        let mut chase = Chase::new(config, ChaCha8Rng::seed_from_u64(seed));
        let mut expected_round = 1;
        while let Some(report) = chase.step() {
            assert_eq!(report.snapshot.round, expected_round);
            expected_round += 1;
        }

        assert!(chase.round() <= 7);
        match chase.state() {
            ChaseState::Terminated(_) => {}
            ChaseState::Running => panic!("scheduler returned None while running"),
        }
        if chase.round() < 7 {
            assert_eq!(chase.alive(), 0);
        }
    }
}

#[test]
fn test_same_seed_same_run() {
    let config = ChaseConfig::default();
    let a: Vec<_> = Chase::new(config, ChaCha8Rng::seed_from_u64(8)).collect();
    let b: Vec<_> = Chase::new(config, ChaCha8Rng::seed_from_u64(8)).collect();
    assert_eq!(a, b);
}
