//! Regression fixture: one Euler step from a hot, partially converted reactor.

use cstr_core::{Tolerances, nearly_equal};
use cstr_sim::{Fluid, Geometry, Operation, Reaction, ReactorState, advance, derivatives};
use proptest::prelude::*;

fn fixture() -> ReactorState {
    ReactorState {
        geometry: Geometry {
            volume: 100.0,
            heat_transfer_coefficient: 500.0,
            heat_transfer_area: 5.0,
        },
        fluid: Fluid {
            density: 1000.0,
            specific_heat: 4180.0,
            thermal_conductivity: 0.6,
        },
        reaction: Reaction {
            reaction_enthalpy: -50_000.0,
            activation_energy: 75_000.0,
            pre_exponential_factor: 1e10,
            reaction_order: 1.0,
            universal_gas_constant: 8.314,
        },
        operation: Operation {
            inlet_flowrate: 0.0278,
            inlet_concentration: 10.0,
            inlet_temperature: 300.0,
            coolant_temperature: 290.0,
            current_concentration: 0.5,
            current_temperature: 350.0,
            time_step: 0.1,
            current_time: 0.0,
        },
    }
}

const TOL: Tolerances = Tolerances {
    abs: 1e-14,
    rel: 1e-12,
};

#[test]
fn canonical_step_reproduces_balances() {
    let mut state = fixture();
    let dt = 0.1;

    let k = 1e10 * (-75_000.0_f64 / (8.314 * 350.0)).exp();
    let rate = k * 0.5;
    let dc = 0.0278 / 100.0 * (10.0 - 0.5) - rate;
    let dtemp = 0.0278 / 100.0 * (300.0 - 350.0)
        + (50_000.0 / (1000.0 * 4180.0)) * rate
        + (500.0 * 5.0 / (100.0 * 1000.0 * 4180.0)) * (290.0 - 350.0);

    let d = derivatives(&state);
    assert!(nearly_equal(d.rate_constant, k, TOL));
    assert!(nearly_equal(d.reaction_rate, rate, TOL));
    assert!(nearly_equal(d.d_concentration, dc, TOL));
    assert!(nearly_equal(d.d_temperature, dtemp, TOL));

    advance(&mut state, dt);

    assert!(nearly_equal(
        state.operation.current_concentration,
        0.5 + dc * dt,
        TOL
    ));
    assert!(nearly_equal(
        state.operation.current_temperature,
        350.0 + dtemp * dt,
        TOL
    ));
    assert_eq!(state.operation.current_time, 0.1);
}

#[test]
fn canonical_rate_constant_magnitude() {
    let d = derivatives(&fixture());
    // exp(-25.77...) * 1e10
    assert!(d.rate_constant > 0.06 && d.rate_constant < 0.07);
    // Consumption outruns the feed surplus at this temperature
    assert!(d.d_concentration < 0.0);
}

#[test]
fn long_run_stays_finite_at_small_step() {
    let mut state = fixture();
    for _ in 0..10_000 {
        advance(&mut state, 0.1);
    }
    assert!(state.operation.current_concentration.is_finite());
    assert!(state.operation.current_temperature.is_finite());
    assert!((state.operation.current_time - 1000.0).abs() < 1e-6);
}

proptest! {
    #[test]
    fn time_advances_by_exactly_dt(dts in prop::collection::vec(1e-4_f64..1.0, 1..50)) {
        let mut state = fixture();
        for dt in dts {
            let before = state.operation.current_time;
            advance(&mut state, dt);
            prop_assert!(state.operation.current_time > before);
            prop_assert_eq!(state.operation.current_time, before + dt);
        }
    }
}
