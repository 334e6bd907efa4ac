//! Live simulation service.
//!
//! Owns one reactor state and the optimization switch. Mutating operations
//! take `&mut self`; a transport layer that serves concurrent requests
//! wraps the service in a `Mutex` so steps never interleave.

use cstr_sim::{HoldInputs, InputPolicy, ReactorState, SimError, advance, validate_inputs};
use tracing::{debug, info, warn};

use crate::batch::{self, BatchOptions, BatchReport};
use crate::error::AppResult;
use crate::noise::BoxMuller;

pub struct SimulationService {
    state: ReactorState,
    optimization_enabled: bool,
    policy: Box<dyn InputPolicy>,
    batch_options: BatchOptions,
}

impl Default for SimulationService {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SimulationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulationService")
            .field("state", &self.state)
            .field("optimization_enabled", &self.optimization_enabled)
            .field("policy", &self.policy.name())
            .field("batch_options", &self.batch_options)
            .finish()
    }
}

impl SimulationService {
    /// Service holding the default reactor with optimization off.
    pub fn new() -> Self {
        Self {
            state: ReactorState::default(),
            optimization_enabled: false,
            policy: Box::new(HoldInputs),
            batch_options: BatchOptions::default(),
        }
    }

    /// Service holding `state`, which must validate.
    pub fn with_state(state: ReactorState) -> AppResult<Self> {
        let mut service = Self::new();
        service.initialize(state)?;
        Ok(service)
    }

    /// Install the policy run before each step while optimization is enabled.
    pub fn with_policy<P: InputPolicy + 'static>(mut self, policy: P) -> Self {
        self.set_policy(Box::new(policy));
        self
    }

    pub fn set_policy(&mut self, policy: Box<dyn InputPolicy>) {
        info!(policy = policy.name(), "Input policy installed");
        self.policy = policy;
    }

    pub fn policy_name(&self) -> &str {
        self.policy.name()
    }

    pub fn batch_options(&self) -> &BatchOptions {
        &self.batch_options
    }

    pub fn set_batch_options(&mut self, options: BatchOptions) {
        self.batch_options = options;
    }

    /// Replace the live state wholesale.
    pub fn initialize(&mut self, config: ReactorState) -> AppResult<()> {
        config.validate()?;
        info!(
            volume = config.geometry.volume,
            time_step = config.operation.time_step,
            concentration = config.operation.current_concentration,
            temperature = config.operation.current_temperature,
            "Reactor initialized"
        );
        self.state = config;
        Ok(())
    }

    /// Copy the input fields of `config` into the live state.
    ///
    /// Concentration, temperature and time keep their live values.
    pub fn update_inputs(&mut self, config: &ReactorState) -> AppResult<()> {
        config.validate_parameters()?;
        self.state.apply_inputs_from(config);
        debug!(inputs = ?self.state.inputs(), "Inputs updated");
        Ok(())
    }

    /// Advance the live reactor by `dt` seconds.
    pub fn step(&mut self, dt: f64) -> AppResult<&ReactorState> {
        self.step_inner(dt, None)
    }

    /// Apply `config` through [`update_inputs`](Self::update_inputs), then step.
    ///
    /// Nothing is applied if either the inputs or `dt` are rejected.
    pub fn step_with_inputs(&mut self, dt: f64, config: &ReactorState) -> AppResult<&ReactorState> {
        self.step_inner(dt, Some(config))
    }

    fn step_inner(&mut self, dt: f64, config: Option<&ReactorState>) -> AppResult<&ReactorState> {
        if !(dt.is_finite() && dt > 0.0) {
            return Err(SimError::InvalidArg {
                what: "dt must be positive and finite",
            }
            .into());
        }
        if let Some(config) = config {
            config.validate_parameters()?;
        }

        let mut next = self.state.clone();
        if let Some(config) = config {
            next.apply_inputs_from(config);
        }
        next.operation.time_step = dt;

        if self.optimization_enabled {
            let mut inputs = next.inputs();
            self.policy.adjust_inputs(&next, &mut inputs);
            validate_inputs(&inputs)?;
            next.set_inputs(inputs);
        }

        advance(&mut next, dt);
        self.state = next;

        let op = &self.state.operation;
        debug!(
            t = op.current_time,
            concentration = op.current_concentration,
            temperature = op.current_temperature,
            "Step"
        );
        if !(op.current_concentration.is_finite() && op.current_temperature.is_finite()) {
            warn!(
                t = op.current_time,
                dt, "Reactor state diverged; reduce the time step"
            );
        }
        Ok(&self.state)
    }

    /// The live state. It changes with every mutating call.
    pub fn state(&self) -> &ReactorState {
        &self.state
    }

    pub fn optimization_enabled(&self) -> bool {
        self.optimization_enabled
    }

    /// Flip the optimization switch.
    pub fn toggle_optimization(&mut self) {
        self.optimization_enabled = !self.optimization_enabled;
        info!(
            enabled = self.optimization_enabled,
            policy = self.policy.name(),
            "Optimization toggled"
        );
    }

    /// Generate a noisy dataset from `config`, leaving the live state alone.
    pub fn batch_simulate(&self, config: &ReactorState, duration_s: u64) -> AppResult<BatchReport> {
        let mut noise = BoxMuller::from_entropy();
        batch::simulate(
            config,
            duration_s as f64,
            &self.batch_options,
            &mut noise,
            None,
        )
    }

    /// [`batch_simulate`](Self::batch_simulate) with a reproducible noise stream.
    pub fn batch_simulate_seeded(
        &self,
        config: &ReactorState,
        duration_s: u64,
        seed: u64,
    ) -> AppResult<BatchReport> {
        let mut noise = BoxMuller::seeded(seed);
        batch::simulate(
            config,
            duration_s as f64,
            &self.batch_options,
            &mut noise,
            None,
        )
    }
}
