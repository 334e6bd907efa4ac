//! Mass and energy balances of a cooled CSTR with Arrhenius kinetics.
//!
//! ```text
//! k     = A exp(-Ea / (R T))
//! rate  = k C^n
//! dC/dt = F/V (C_in - C) - rate
//! dT/dt = F/V (T_in - T) + (-dH / (rho Cp)) rate + (U A_ht / (V rho Cp)) (T_c - T)
//! ```

use crate::model::TransientModel;
use crate::state::{Reaction, ReactorState};

/// Dynamic part of the reactor state: the two integrated variables.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DynamicState {
    /// mol/L
    pub concentration: f64,
    /// K
    pub temperature: f64,
}

/// Terms of the energy balance, each in K/s.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeatTerms {
    /// Convective exchange with the feed: F/V (T_in - T)
    pub flow: f64,
    /// Heat released by reaction: (-dH / (rho Cp)) rate
    pub reaction: f64,
    /// Jacket exchange: (U A_ht / (V rho Cp)) (T_c - T)
    pub cooling: f64,
}

impl HeatTerms {
    pub fn total(&self) -> f64 {
        self.flow + self.reaction + self.cooling
    }
}

/// Kinetics and balance gradients evaluated at one state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Derivatives {
    /// 1/s
    pub rate_constant: f64,
    /// mol/(L s)
    pub reaction_rate: f64,
    /// mol/(L s)
    pub d_concentration: f64,
    /// K/s
    pub d_temperature: f64,
}

/// Arrhenius rate constant at `temperature`.
pub fn rate_constant(reaction: &Reaction, temperature: f64) -> f64 {
    reaction.pre_exponential_factor
        * (-reaction.activation_energy / (reaction.universal_gas_constant * temperature)).exp()
}

/// Reaction rate `k C^n`.
pub fn reaction_rate(rate_constant: f64, concentration: f64, order: f64) -> f64 {
    if order == 1.0 {
        rate_constant * concentration
    } else {
        rate_constant * concentration.powf(order)
    }
}

/// CSTR right-hand side over the parameters of a borrowed [`ReactorState`].
#[derive(Clone, Copy, Debug)]
pub struct CstrModel<'a> {
    params: &'a ReactorState,
}

impl<'a> CstrModel<'a> {
    pub fn new(params: &'a ReactorState) -> Self {
        Self { params }
    }

    /// Evaluate kinetics and both gradients at `x`.
    pub fn evaluate(&self, x: &DynamicState) -> Derivatives {
        let k = rate_constant(&self.params.reaction, x.temperature);
        let rate = reaction_rate(k, x.concentration, self.params.reaction.reaction_order);
        Derivatives {
            rate_constant: k,
            reaction_rate: rate,
            d_concentration: self.concentration_gradient(x, rate),
            d_temperature: self.heat_terms(x, rate).total(),
        }
    }

    fn concentration_gradient(&self, x: &DynamicState, rate: f64) -> f64 {
        let f = self.params.operation.inlet_flowrate;
        let v = self.params.geometry.volume;
        let c_in = self.params.operation.inlet_concentration;

        f / v * (c_in - x.concentration) - rate
    }

    /// Split the energy balance into its three contributions.
    pub fn heat_terms(&self, x: &DynamicState, rate: f64) -> HeatTerms {
        let p = self.params;
        let f = p.operation.inlet_flowrate;
        let v = p.geometry.volume;
        let t_in = p.operation.inlet_temperature;
        let h = p.reaction.reaction_enthalpy;
        let rho = p.fluid.density;
        let cp = p.fluid.specific_heat;
        let ua = p.geometry.heat_transfer_coefficient * p.geometry.heat_transfer_area;
        let t_c = p.operation.coolant_temperature;
        let t = x.temperature;

        HeatTerms {
            flow: f / v * (t_in - t),
            reaction: (-h / (rho * cp)) * rate,
            cooling: (ua / (v * rho * cp)) * (t_c - t),
        }
    }
}

impl TransientModel for CstrModel<'_> {
    type State = DynamicState;

    fn initial_state(&self) -> DynamicState {
        DynamicState {
            concentration: self.params.operation.current_concentration,
            temperature: self.params.operation.current_temperature,
        }
    }

    fn rhs(&self, _t: f64, x: &DynamicState) -> DynamicState {
        let d = self.evaluate(x);
        DynamicState {
            concentration: d.d_concentration,
            temperature: d.d_temperature,
        }
    }

    fn add(&self, a: &DynamicState, b: &DynamicState) -> DynamicState {
        DynamicState {
            concentration: a.concentration + b.concentration,
            temperature: a.temperature + b.temperature,
        }
    }

    fn scale(&self, a: &DynamicState, scale: f64) -> DynamicState {
        DynamicState {
            concentration: a.concentration * scale,
            temperature: a.temperature * scale,
        }
    }
}

/// Kinetics and gradients at the state's current concentration and temperature.
pub fn derivatives(state: &ReactorState) -> Derivatives {
    let model = CstrModel::new(state);
    model.evaluate(&model.initial_state())
}
