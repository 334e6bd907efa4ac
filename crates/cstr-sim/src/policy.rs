//! Input policies: strategies that adjust operating inputs before a live step.
//!
//! A policy sees the full reactor state read-only and may rewrite only the
//! four [`OperatingInputs`]. Concentration, temperature and time stay owned by
//! the integrator.

use crate::state::{OperatingInputs, ReactorState};

/// Capability run ahead of integration when optimization is enabled.
pub trait InputPolicy: Send {
    /// Short name for diagnostics.
    fn name(&self) -> &str;

    /// Adjust `inputs` for the step about to be taken from `state`.
    fn adjust_inputs(&mut self, state: &ReactorState, inputs: &mut OperatingInputs);
}

/// Leaves inputs as they are.
#[derive(Debug, Clone, Copy, Default)]
pub struct HoldInputs;

impl InputPolicy for HoldInputs {
    fn name(&self) -> &str {
        "hold"
    }

    fn adjust_inputs(&mut self, _state: &ReactorState, _inputs: &mut OperatingInputs) {}
}

impl<P: InputPolicy + ?Sized> InputPolicy for Box<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn adjust_inputs(&mut self, state: &ReactorState, inputs: &mut OperatingInputs) {
        (**self).adjust_inputs(state, inputs)
    }
}
