//! Reactor state: fixed vessel/fluid/kinetic parameters plus live operation.
//!
//! The serialized shape is four groups (`geometry`, `fluid`, `reaction`,
//! `operation`) with camelCase field names. Dashboards and file exports key
//! on these names, so they must not drift.

use cstr_core::constants::GAS_CONSTANT;
use cstr_core::{ensure_finite, ensure_non_negative, ensure_positive};
use serde::{Deserialize, Serialize};

use crate::error::SimResult;

/// Vessel properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Geometry {
    /// Liquid volume (L)
    pub volume: f64,
    /// Jacket heat transfer coefficient (W/m²K)
    pub heat_transfer_coefficient: f64,
    /// Jacket heat transfer area (m²)
    pub heat_transfer_area: f64,
}

/// Fluid properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fluid {
    /// Density (kg/L)
    pub density: f64,
    /// Specific heat (J/kgK)
    pub specific_heat: f64,
    /// Thermal conductivity (W/mK). Carried with the model; the balances do not use it.
    pub thermal_conductivity: f64,
}

/// Arrhenius kinetics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reaction {
    /// Reaction enthalpy (J/mol), negative = exothermic
    pub reaction_enthalpy: f64,
    /// Activation energy (J/mol)
    pub activation_energy: f64,
    /// Pre-exponential factor (1/s)
    pub pre_exponential_factor: f64,
    /// Reaction order in the reactant concentration
    pub reaction_order: f64,
    /// J/(mol K)
    #[serde(default = "default_gas_constant")]
    pub universal_gas_constant: f64,
}

fn default_gas_constant() -> f64 {
    GAS_CONSTANT
}

/// Operating inputs, live dynamic state and simulation bookkeeping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    /// L/s
    pub inlet_flowrate: f64,
    /// mol/L
    pub inlet_concentration: f64,
    /// K
    pub inlet_temperature: f64,
    /// K
    pub coolant_temperature: f64,
    /// mol/L
    pub current_concentration: f64,
    /// K
    pub current_temperature: f64,
    /// s
    pub time_step: f64,
    /// s
    pub current_time: f64,
}

/// The four manipulable inputs of the Operation group.
///
/// This is the only view an [`InputPolicy`](crate::InputPolicy) can write to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatingInputs {
    pub inlet_flowrate: f64,
    pub inlet_concentration: f64,
    pub inlet_temperature: f64,
    pub coolant_temperature: f64,
}

/// Complete reactor state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactorState {
    #[serde(alias = "Geometry")]
    pub geometry: Geometry,
    #[serde(alias = "Fluid")]
    pub fluid: Fluid,
    #[serde(alias = "Reaction")]
    pub reaction: Reaction,
    #[serde(alias = "Operation")]
    pub operation: Operation,
}

impl Default for ReactorState {
    fn default() -> Self {
        Self {
            geometry: Geometry {
                volume: 100.0,
                heat_transfer_coefficient: 1000.0,
                heat_transfer_area: 5.0,
            },
            fluid: Fluid {
                density: 1.0,
                specific_heat: 4180.0,
                thermal_conductivity: 0.6,
            },
            reaction: Reaction {
                reaction_enthalpy: -50_000.0,
                activation_energy: 72_750.0,
                pre_exponential_factor: 7.2e10,
                reaction_order: 1.0,
                universal_gas_constant: GAS_CONSTANT,
            },
            operation: Operation {
                inlet_flowrate: 0.0278,
                inlet_concentration: 1.0,
                inlet_temperature: 350.0,
                coolant_temperature: 300.0,
                current_concentration: 0.0,
                current_temperature: 350.0,
                time_step: 0.1,
                current_time: 0.0,
            },
        }
    }
}

impl ReactorState {
    /// Snapshot of the four operating inputs.
    pub fn inputs(&self) -> OperatingInputs {
        OperatingInputs {
            inlet_flowrate: self.operation.inlet_flowrate,
            inlet_concentration: self.operation.inlet_concentration,
            inlet_temperature: self.operation.inlet_temperature,
            coolant_temperature: self.operation.coolant_temperature,
        }
    }

    /// Overwrite the four operating inputs.
    pub fn set_inputs(&mut self, inputs: OperatingInputs) {
        self.operation.inlet_flowrate = inputs.inlet_flowrate;
        self.operation.inlet_concentration = inputs.inlet_concentration;
        self.operation.inlet_temperature = inputs.inlet_temperature;
        self.operation.coolant_temperature = inputs.coolant_temperature;
    }

    /// Copy every input field from `config`, leaving concentration,
    /// temperature and time untouched.
    ///
    /// Input fields are all of Geometry, Fluid and Reaction plus the four
    /// operating inputs and `timeStep`.
    pub fn apply_inputs_from(&mut self, config: &ReactorState) {
        self.geometry = config.geometry.clone();
        self.fluid = config.fluid.clone();
        self.reaction = config.reaction.clone();
        self.set_inputs(config.inputs());
        self.operation.time_step = config.operation.time_step;
    }

    /// Reject configurations that would make a step numerically meaningless.
    pub fn validate(&self) -> SimResult<()> {
        self.validate_parameters()?;

        let op = &self.operation;
        ensure_non_negative(op.current_concentration, "operation.currentConcentration")?;
        ensure_positive(op.current_temperature, "operation.currentTemperature")?;
        ensure_non_negative(op.current_time, "operation.currentTime")?;
        Ok(())
    }

    /// Validate only the fields [`apply_inputs_from`](Self::apply_inputs_from) copies.
    pub fn validate_parameters(&self) -> SimResult<()> {
        let g = &self.geometry;
        ensure_positive(g.volume, "geometry.volume")?;
        ensure_non_negative(g.heat_transfer_coefficient, "geometry.heatTransferCoefficient")?;
        ensure_non_negative(g.heat_transfer_area, "geometry.heatTransferArea")?;

        let f = &self.fluid;
        ensure_positive(f.density, "fluid.density")?;
        ensure_positive(f.specific_heat, "fluid.specificHeat")?;
        ensure_non_negative(f.thermal_conductivity, "fluid.thermalConductivity")?;

        let r = &self.reaction;
        ensure_finite(r.reaction_enthalpy, "reaction.reactionEnthalpy")?;
        ensure_non_negative(r.activation_energy, "reaction.activationEnergy")?;
        ensure_non_negative(r.pre_exponential_factor, "reaction.preExponentialFactor")?;
        ensure_positive(r.reaction_order, "reaction.reactionOrder")?;
        ensure_positive(r.universal_gas_constant, "reaction.universalGasConstant")?;

        validate_inputs(&self.inputs())?;
        ensure_positive(self.operation.time_step, "operation.timeStep")?;
        Ok(())
    }
}

/// Validate the four operating inputs on their own.
pub fn validate_inputs(inputs: &OperatingInputs) -> SimResult<()> {
    ensure_non_negative(inputs.inlet_flowrate, "operation.inletFlowrate")?;
    ensure_non_negative(inputs.inlet_concentration, "operation.inletConcentration")?;
    ensure_positive(inputs.inlet_temperature, "operation.inletTemperature")?;
    ensure_positive(inputs.coolant_temperature, "operation.coolantTemperature")?;
    Ok(())
}
