//! Derived reactor read-outs.
//!
//! Residence time, conversion and the split of the energy balance, computed
//! from a single reactor state.

use cstr_core::{Time, conversion_fraction, liters, lps, minutes, residence_time};
use cstr_sim::{CstrModel, ReactorState, TransientModel};
use serde::{Deserialize, Serialize};

/// Key performance indicators of the reactor at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReactorKpis {
    /// mol/L
    pub concentration: f64,
    /// K
    pub temperature: f64,
    /// Fraction of the feed converted, in [0, 1]
    pub conversion: f64,
    /// V/F in seconds; None without through-flow
    pub residence_time_s: Option<f64>,
    /// 1/s
    pub rate_constant: f64,
    /// mol/(L s)
    pub reaction_rate: f64,
    /// Feed exchange term of dT/dt (K/s)
    pub feed_exchange_k_per_s: f64,
    /// Reaction heat term of dT/dt (K/s)
    pub heat_generation_k_per_s: f64,
    /// Jacket term of dT/dt (K/s), negative when the jacket cools
    pub jacket_exchange_k_per_s: f64,
}

impl ReactorKpis {
    pub fn from_state(state: &ReactorState) -> Self {
        let op = &state.operation;
        let model = CstrModel::new(state);
        let x = model.initial_state();
        let d = model.evaluate(&x);
        let heat = model.heat_terms(&x, d.reaction_rate);
        let tau = residence_time(liters(state.geometry.volume), lps(op.inlet_flowrate));

        Self {
            concentration: op.current_concentration,
            temperature: op.current_temperature,
            conversion: conversion_fraction(op.inlet_concentration, op.current_concentration),
            residence_time_s: tau.map(|t| t.value),
            rate_constant: d.rate_constant,
            reaction_rate: d.reaction_rate,
            feed_exchange_k_per_s: heat.flow,
            heat_generation_k_per_s: heat.reaction,
            jacket_exchange_k_per_s: heat.cooling,
        }
    }

    pub fn residence_time(&self) -> Option<Time> {
        self.residence_time_s.map(cstr_core::s)
    }

    pub fn residence_time_min(&self) -> Option<f64> {
        self.residence_time().map(minutes)
    }

    /// Net dT/dt (K/s).
    pub fn net_heating_k_per_s(&self) -> f64 {
        self.feed_exchange_k_per_s + self.heat_generation_k_per_s + self.jacket_exchange_k_per_s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cstr_sim::derivatives;

    #[test]
    fn default_reactor_kpis() {
        let state = ReactorState::default();
        let kpis = ReactorKpis::from_state(&state);

        // 100 L at 0.0278 L/s
        let tau_min = kpis.residence_time_min().unwrap();
        assert!((tau_min - 100.0 / 0.0278 / 60.0).abs() < 1e-9);
        // Empty reactor, fresh feed
        assert_eq!(kpis.conversion, 1.0);
        assert_eq!(kpis.reaction_rate, 0.0);
        assert_eq!(kpis.net_heating_k_per_s(), derivatives(&state).d_temperature);
    }

    #[test]
    fn no_flow_has_no_residence_time() {
        let mut state = ReactorState::default();
        state.operation.inlet_flowrate = 0.0;
        let kpis = ReactorKpis::from_state(&state);
        assert!(kpis.residence_time_s.is_none());
        assert!(kpis.residence_time_min().is_none());
        assert_eq!(kpis.feed_exchange_k_per_s, 0.0);
    }

    #[test]
    fn zero_feed_concentration_has_zero_conversion() {
        let mut state = ReactorState::default();
        state.operation.inlet_concentration = 0.0;
        state.operation.current_concentration = 0.3;
        assert_eq!(ReactorKpis::from_state(&state).conversion, 0.0);
    }
}
