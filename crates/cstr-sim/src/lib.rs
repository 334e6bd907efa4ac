//! Transient simulation core for a cooled, exothermic CSTR.
//!
//! Provides:
//! - Reactor state model (geometry, fluid, kinetics, operation)
//! - Mass and energy balance right-hand side
//! - Fixed-step forward Euler integrator
//! - Input policy hook run before each live step

pub mod error;
pub mod integrator;
pub mod model;
pub mod policy;
pub mod reactor;
pub mod state;

pub use error::{SimError, SimResult};
pub use integrator::{ForwardEuler, Integrator, advance};
pub use model::TransientModel;
pub use policy::{HoldInputs, InputPolicy};
pub use reactor::{CstrModel, Derivatives, DynamicState, HeatTerms, derivatives};
pub use state::{
    Fluid, Geometry, Operation, OperatingInputs, Reaction, ReactorState, validate_inputs,
};
