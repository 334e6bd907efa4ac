//! Fixed-step time integration.

use crate::model::TransientModel;
use crate::reactor::CstrModel;
use crate::state::ReactorState;

/// Trait for time integrators.
pub trait Integrator {
    /// Advance state by one time step using the transient model.
    fn step<M: TransientModel>(&self, model: &M, t: f64, x: &M::State, dt: f64) -> M::State;
}

/// Forward Euler (explicit, 1st order).
///
/// Conditionally stable: a `dt` large against the reaction or thermal time
/// constants diverges, and the divergence is returned as-is.
#[derive(Clone, Copy, Debug, Default)]
pub struct ForwardEuler;

impl Integrator for ForwardEuler {
    fn step<M: TransientModel>(&self, model: &M, t: f64, x: &M::State, dt: f64) -> M::State {
        let xdot = model.rhs(t, x);
        model.add(x, &model.scale(&xdot, dt))
    }
}

/// Advance the reactor by one explicit Euler step of `dt` seconds.
///
/// Writes `currentConcentration`, `currentTemperature` and `currentTime`
/// and nothing else.
pub fn advance(state: &mut ReactorState, dt: f64) {
    let model = CstrModel::new(state);
    let x = model.initial_state();
    let next = ForwardEuler.step(&model, state.operation.current_time, &x, dt);

    state.operation.current_concentration = next.concentration;
    state.operation.current_temperature = next.temperature;
    state.operation.current_time += dt;
}
