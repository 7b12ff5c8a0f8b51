//! Tick-level properties over seeded random runs.

use colony_core::{Cell, Error, FruitConfig, SimulationConfig, WorldConfig};
use colony_world::Simulation;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;

fn config(seed: u64, width: i32, height: i32) -> SimulationConfig {
    SimulationConfig {
        world: WorldConfig {
            width,
            height,
            ..Default::default()
        },
        fruit: FruitConfig::default(),
        seed: Some(seed),
    }
}

/// Construction may legitimately fail on an unlucky draw; those seeds are skipped
fn build(config: &SimulationConfig) -> Option<Simulation> {
    match Simulation::from_config(config) {
        Ok(sim) => Some(sim),
        Err(err) => {
            assert!(err.is_retryable(), "unexpected construction error: {}", err);
            None
        }
    }
}

/// First seed from `start` whose random grid holds both ants and fruit
fn constructible(start: u64, width: i32, height: i32) -> SimulationConfig {
    (start..start + 1000)
        .map(|seed| config(seed, width, height))
        .find(|config| build(config).is_some())
        .expect("no constructible seed in range")
}

#[test]
fn test_identical_seeds_produce_identical_runs() {
    let config = constructible(1234, 20, 20);
    let mut a = Simulation::from_config(&config).unwrap();
    let mut b = Simulation::from_config(&config).unwrap();

    for _ in 0..50 {
        a.advance();
        b.advance();
        assert_eq!(a.grid(), b.grid());
        assert_eq!(a.last_report(), b.last_report());
    }

    assert_eq!(a.ants(), b.ants());
    assert_eq!(a.fruits(), b.fruits());
    assert_eq!(a.frame().to_string(), b.frame().to_string());
}

#[test]
fn test_injected_rng_matches_configured_seed() {
    let config = constructible(77, 20, 20);
    let seed = config.seed.unwrap();
    let mut seeded = Simulation::from_config(&config).unwrap();
    let mut injected = Simulation::new(&config, ChaCha8Rng::seed_from_u64(seed)).unwrap();

    for _ in 0..20 {
        seeded.advance();
        injected.advance();
    }

    assert_eq!(seeded.grid(), injected.grid());
}

#[test]
fn test_one_by_one_without_rates_never_constructs() {
    for seed in 0..20 {
        let config = SimulationConfig {
            world: WorldConfig {
                width: 1,
                height: 1,
                ant_rate: 0.0,
                fruit_rate: 0.0,
                space_rate: 0.6,
            },
            seed: Some(seed),
            ..Default::default()
        };
        assert!(matches!(Simulation::from_config(&config), Err(Error::NoAnts)));
    }
}

#[test]
fn test_long_run_fills_grid() {
    let mut sim = Simulation::from_config(&constructible(9, 8, 8)).unwrap();

    for _ in 0..500 {
        sim.advance();
        sim.check_invariants().unwrap();
    }

    // Ants never die, so the colony ends up covering most of the board
    assert!(sim.ants().len() > 32);
    assert_eq!(sim.stats().ticks, 500);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_tick_invariants_hold(seed in any::<u64>(), width in 4..14i32, height in 4..14i32) {
        let config = config(seed, width, height);
        let Some(mut sim) = build(&config) else {
            return Ok(());
        };
        prop_assert!(sim.check_invariants().is_ok());

        for _ in 0..40 {
            let ants_before = sim.ants().len();
            let fruits_before = sim.fruits().len();
            let ant_cells_before: HashSet<_> =
                sim.ants().iter().map(|ant| ant.position).collect();
            let positions_before: Vec<_> = sim.ants().iter().map(|ant| ant.position).collect();

            sim.advance();

            prop_assert!(sim.check_invariants().is_ok());

            let grid = sim.grid();
            prop_assert_eq!(
                grid.count(Cell::Empty) + grid.count(Cell::Ant) + grid.count(Cell::Fruit),
                (width * height) as usize
            );

            // Population never shrinks and fruit grows by at most one
            prop_assert!(sim.ants().len() >= ants_before);
            prop_assert!(sim.fruits().len() <= fruits_before + 1);

            // Nothing lands on a cell an ant held before the tick
            for (index, ant) in sim.ants().iter().enumerate() {
                let moved = positions_before
                    .get(index)
                    .map_or(true, |before| *before != ant.position);
                if moved {
                    prop_assert!(!ant_cells_before.contains(&ant.position));
                }
            }

            let report = sim.last_report();
            prop_assert_eq!(report.proposed, ants_before);
            prop_assert_eq!(sim.ants().len(), ants_before + report.births);
            prop_assert_eq!(
                report.moves + report.births + report.rejected_conflict + report.rejected_placement,
                report.proposed
            );
        }
    }

    #[test]
    fn prop_fruit_stays_below_max(seed in any::<u64>()) {
        let config = config(seed, 10, 10);
        let Some(mut sim) = build(&config) else {
            return Ok(());
        };
        let max_fruit = sim.fruit_config().max_fruit;
        let start = sim.fruits().len();

        for _ in 0..60 {
            sim.advance();
            // Spawn only adds while below the maximum
            prop_assert!(sim.fruits().len() <= start.max(max_fruit));
        }
    }
}
