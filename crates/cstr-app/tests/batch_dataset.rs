//! Batch dataset generation end to end.

use cstr_app::batch::{self, BatchOptions};
use cstr_app::{BoxMuller, CSV_HEADER, NoiseSource, SimulationService, simulate_ensemble};
use cstr_sim::ReactorState;
use proptest::prelude::*;

/// Noise source that never perturbs.
struct Silent;

impl NoiseSource for Silent {
    fn standard_normal(&mut self) -> f64 {
        0.0
    }
}

#[test]
fn one_second_at_tenth_step_emits_eleven_rows() {
    let service = SimulationService::new();
    let mut config = ReactorState::default();
    config.operation.time_step = 0.1;

    let report = service.batch_simulate(&config, 1).unwrap();
    assert_eq!(report.len(), 11);

    let csv = report.to_csv();
    assert_eq!(csv.lines().count(), 12);
    assert_eq!(csv.lines().next().unwrap(), CSV_HEADER);

    let times: Vec<f64> = report.records.iter().map(|r| r.time).collect();
    for (i, t) in times.iter().enumerate() {
        assert_eq!(*t, i as f64 * 0.1);
    }
}

#[test]
fn zero_feed_concentration_reports_zero_conversion() {
    let service = SimulationService::new();
    let mut config = ReactorState::default();
    config.operation.inlet_concentration = 0.0;
    config.operation.current_concentration = 0.4;

    let report = service.batch_simulate_seeded(&config, 5, 3).unwrap();
    assert_eq!(report.len(), 51);
    for record in &report.records {
        assert_eq!(record.inlet_concentration, 0.0);
        assert_eq!(record.conversion, 0.0);
        assert_eq!(record.next_conversion, 0.0);
    }
}

#[test]
fn silent_batch_replays_live_trajectory() {
    let config = ReactorState::default();
    let report = batch::simulate(&config, 3.0, &BatchOptions::default(), &mut Silent, None).unwrap();

    let mut live = SimulationService::with_state(config.clone()).unwrap();
    let dt = config.operation.time_step;
    for record in &report.records[..report.len() - 1] {
        assert_eq!(record.concentration, live.state().operation.current_concentration);
        assert_eq!(record.temperature, live.state().operation.current_temperature);
        let next = live.step(dt).unwrap();
        assert_eq!(record.next_concentration, next.operation.current_concentration);
        assert_eq!(record.next_temperature, next.operation.current_temperature);
        assert_eq!(record.inlet_flowrate, config.operation.inlet_flowrate);
    }
}

#[test]
fn batch_leaves_live_state_untouched() {
    let mut service = SimulationService::new();
    service.step(0.1).unwrap();
    let before = service.state().clone();

    let report = service.batch_simulate(&before, 10).unwrap();
    assert_eq!(report.len(), 101);
    assert_eq!(service.state(), &before);
}

#[test]
fn seeded_batches_are_reproducible() {
    let service = SimulationService::new();
    let config = ReactorState::default();
    let a = service.batch_simulate_seeded(&config, 10, 99).unwrap();
    let b = service.batch_simulate_seeded(&config, 10, 99).unwrap();
    let c = service.batch_simulate_seeded(&config, 10, 100).unwrap();
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn perturbations_compound() {
    let config = ReactorState::default();
    let mut noise = BoxMuller::seeded(5);
    let report = batch::simulate(&config, 2.0, &BatchOptions::default(), &mut noise, None).unwrap();

    // First row carries the configured inputs, later rows drift away from them
    let first = report.records[0];
    assert_eq!(first.inlet_temperature, config.operation.inlet_temperature);
    let drifted = report.records[1..]
        .iter()
        .filter(|r| r.inlet_temperature != config.operation.inlet_temperature)
        .count();
    assert_eq!(drifted, report.len() - 1);
}

#[test]
fn invalid_time_step_is_rejected() {
    let service = SimulationService::new();
    let mut config = ReactorState::default();
    config.operation.time_step = 0.0;
    assert!(service.batch_simulate(&config, 1).is_err());
}

#[test]
fn step_limit_is_enforced() {
    let mut service = SimulationService::new();
    service.set_batch_options(BatchOptions {
        max_steps: 50,
        ..BatchOptions::default()
    });
    let config = ReactorState::default();
    assert!(service.batch_simulate(&config, 5).is_ok());
    assert!(service.batch_simulate(&config, 6).is_err());
}

#[test]
fn ensemble_matches_individual_runs_in_seed_order() {
    let config = ReactorState::default();
    let options = BatchOptions::default();
    let seeds = [1, 2, 1];
    let results = simulate_ensemble(&config, 2.0, &options, &seeds);
    assert_eq!(results.len(), 3);

    let reports: Vec<_> = results.into_iter().map(|r| r.unwrap()).collect();
    assert_eq!(reports[0], reports[2]);
    assert_ne!(reports[0], reports[1]);

    let mut noise = BoxMuller::seeded(2);
    let single = batch::simulate(&config, 2.0, &options, &mut noise, None).unwrap();
    assert_eq!(reports[1], single);
}

proptest! {
    #[test]
    fn perturbed_inputs_stay_within_bounds(seed in any::<u64>()) {
        let service = SimulationService::new();
        let report = service
            .batch_simulate_seeded(&ReactorState::default(), 5, seed)
            .unwrap();
        for r in &report.records {
            prop_assert!((0.0..=1.0).contains(&r.inlet_flowrate));
            prop_assert!((0.0..=15.0).contains(&r.inlet_concentration));
            prop_assert!((271.0..=500.0).contains(&r.inlet_temperature));
            prop_assert!((271.0..=500.0).contains(&r.coolant_temperature));
            if r.conversion.is_finite() {
                prop_assert!((0.0..=1.0).contains(&r.conversion));
            }
        }
    }
}
