//! Synthetic dataset generation.
//!
//! A batch run steps a private copy of the reactor with the live
//! integrator and, after every emitted record, replaces each operating input
//! by `value + N(0, (fraction * value)²)` clamped to its bounds. Noise is
//! drawn fresh each step and applied to the previous step's perturbed
//! inputs, so the inputs follow a random walk rather than jittering around
//! the starting point.

use std::io::Write;

use cstr_core::conversion_fraction;
use cstr_sim::{OperatingInputs, ReactorState, SimError, advance};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{AppError, AppResult};
use crate::noise::{BoxMuller, NoiseSource};
use crate::progress::BatchProgress;

/// Knobs of the dataset generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchOptions {
    /// Noise standard deviation as a fraction of the current value
    pub noise_fraction: f64,
    /// L/s
    pub flowrate_bounds: (f64, f64),
    /// mol/L
    pub concentration_bounds: (f64, f64),
    /// K, applied to inlet and coolant temperature
    pub temperature_bounds: (f64, f64),
    /// Safety limit on the number of integration steps
    pub max_steps: u64,
    /// Emit a progress event every N records
    pub progress_interval: u64,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            noise_fraction: 0.1,
            flowrate_bounds: (0.0, 1.0),
            concentration_bounds: (0.0, 15.0),
            temperature_bounds: (271.0, 500.0),
            max_steps: 10_000_000,
            progress_interval: 1_000,
        }
    }
}

impl BatchOptions {
    fn validate(&self) -> AppResult<()> {
        let bounds = [
            ("flowrate_bounds", self.flowrate_bounds),
            ("concentration_bounds", self.concentration_bounds),
            ("temperature_bounds", self.temperature_bounds),
        ];
        for (name, (lo, hi)) in bounds {
            if !(lo.is_finite() && hi.is_finite() && lo <= hi) {
                return Err(AppError::InvalidInput(format!(
                    "{name} must be finite with min <= max, got ({lo}, {hi})"
                )));
            }
        }
        if !(self.noise_fraction.is_finite() && self.noise_fraction >= 0.0) {
            return Err(AppError::InvalidInput(format!(
                "noise_fraction must be finite and non-negative, got {}",
                self.noise_fraction
            )));
        }
        if self.max_steps == 0 {
            return Err(AppError::InvalidInput(
                "max_steps must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// One row of a batch dataset: the state before a step, the inputs it was
/// taken with, and the state after it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchRecord {
    /// s
    pub time: f64,
    pub concentration: f64,
    pub temperature: f64,
    pub conversion: f64,
    pub inlet_flowrate: f64,
    pub inlet_concentration: f64,
    pub inlet_temperature: f64,
    pub coolant_temperature: f64,
    pub next_concentration: f64,
    pub next_temperature: f64,
    pub next_conversion: f64,
}

pub const CSV_HEADER: &str = "time,concentration,temperature,conversion,inletFlowrate,\
inletConcentration,inletTemperature,coolantTemperature,nextConcentration,nextTemperature,\
nextConversion";

impl BatchRecord {
    pub fn to_csv_row(&self) -> String {
        format!(
            "{:.3},{:.4},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.4},{:.2},{:.2}",
            self.time,
            self.concentration,
            self.temperature,
            self.conversion,
            self.inlet_flowrate,
            self.inlet_concentration,
            self.inlet_temperature,
            self.coolant_temperature,
            self.next_concentration,
            self.next_temperature,
            self.next_conversion,
        )
    }
}

/// Output of one batch run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub records: Vec<BatchRecord>,
}

impl BatchReport {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Header plus one comma-separated row per record.
    pub fn to_csv(&self) -> String {
        let mut csv = String::with_capacity(64 * (self.records.len() + 1));
        csv.push_str(CSV_HEADER);
        csv.push('\n');
        for record in &self.records {
            csv.push_str(&record.to_csv_row());
            csv.push('\n');
        }
        csv
    }

    pub fn write_csv<W: Write>(&self, mut out: W) -> std::io::Result<()> {
        writeln!(out, "{CSV_HEADER}")?;
        for record in &self.records {
            writeln!(out, "{}", record.to_csv_row())?;
        }
        out.flush()
    }
}

/// Write several runs as one CSV, tagging each row with its run index.
pub fn write_ensemble_csv<W: Write>(reports: &[BatchReport], mut out: W) -> std::io::Result<()> {
    writeln!(out, "run,{CSV_HEADER}")?;
    for (run, report) in reports.iter().enumerate() {
        for record in &report.records {
            writeln!(out, "{run},{}", record.to_csv_row())?;
        }
    }
    out.flush()
}

/// Number of integration steps in `duration_s`: `floor(duration_s / time_step)`.
pub fn total_steps(duration_s: f64, time_step: f64, max_steps: u64) -> AppResult<u64> {
    if !(duration_s.is_finite() && duration_s >= 0.0) {
        return Err(SimError::InvalidArg {
            what: "batch duration must be finite and non-negative",
        }
        .into());
    }
    if !(time_step.is_finite() && time_step > 0.0) {
        return Err(SimError::InvalidArg {
            what: "timeStep must be positive",
        }
        .into());
    }
    let steps = (duration_s / time_step).floor();
    if steps > max_steps as f64 {
        return Err(AppError::InvalidInput(format!(
            "batch of {steps} steps exceeds the limit of {max_steps}"
        )));
    }
    Ok(steps as u64)
}

/// Perturb each input with proportional Gaussian noise, then clamp.
pub fn perturb_inputs<N: NoiseSource + ?Sized>(
    inputs: &OperatingInputs,
    options: &BatchOptions,
    noise: &mut N,
) -> OperatingInputs {
    let mut jitter = |value: f64, (lo, hi): (f64, f64)| {
        noise
            .gaussian(value, options.noise_fraction * value)
            .clamp(lo, hi)
    };
    OperatingInputs {
        inlet_flowrate: jitter(inputs.inlet_flowrate, options.flowrate_bounds),
        inlet_concentration: jitter(inputs.inlet_concentration, options.concentration_bounds),
        inlet_temperature: jitter(inputs.inlet_temperature, options.temperature_bounds),
        coolant_temperature: jitter(inputs.coolant_temperature, options.temperature_bounds),
    }
}

/// Run one batch from `config` for `duration_s` seconds.
///
/// `config` is copied; the caller's state is never touched. Emits
/// `total_steps + 1` records, the last of which repeats its pre-step values
/// as post-step values.
pub fn simulate<N: NoiseSource + ?Sized>(
    config: &ReactorState,
    duration_s: f64,
    options: &BatchOptions,
    noise: &mut N,
    mut progress_cb: Option<&mut dyn FnMut(BatchProgress)>,
) -> AppResult<BatchReport> {
    config.validate()?;
    options.validate()?;

    let dt = config.operation.time_step;
    let total = total_steps(duration_s, dt, options.max_steps)?;
    info!(
        duration_s,
        dt,
        total_steps = total,
        "Starting batch dataset generation"
    );

    let mut work = config.clone();
    let mut records = Vec::with_capacity(total as usize + 1);
    let interval = options.progress_interval.max(1);

    for i in 0..=total {
        let op = &work.operation;
        let time = i as f64 * dt;
        let concentration = op.current_concentration;
        let temperature = op.current_temperature;
        let conversion = conversion_fraction(op.inlet_concentration, concentration);
        let inputs = work.inputs();

        let (next_concentration, next_temperature, next_conversion) = if i < total {
            advance(&mut work, dt);
            let op = &work.operation;
            (
                op.current_concentration,
                op.current_temperature,
                conversion_fraction(op.inlet_concentration, op.current_concentration),
            )
        } else {
            (concentration, temperature, conversion)
        };

        records.push(BatchRecord {
            time,
            concentration,
            temperature,
            conversion,
            inlet_flowrate: inputs.inlet_flowrate,
            inlet_concentration: inputs.inlet_concentration,
            inlet_temperature: inputs.inlet_temperature,
            coolant_temperature: inputs.coolant_temperature,
            next_concentration,
            next_temperature,
            next_conversion,
        });

        if i < total {
            let perturbed = perturb_inputs(&work.inputs(), options, noise);
            work.set_inputs(perturbed);
        }

        if i % interval == 0 || i == total {
            if let Some(cb) = progress_cb.as_deref_mut() {
                cb(BatchProgress::new(i, total, dt));
            }
        }
    }

    if let Some(last) = records.last() {
        if !(last.next_concentration.is_finite() && last.next_temperature.is_finite()) {
            warn!("Batch trajectory diverged; non-finite values were recorded");
        }
    }
    info!(records = records.len(), "Batch dataset generation finished");
    Ok(BatchReport { records })
}

/// Run one independent batch per seed in parallel. Results are in seed order.
pub fn simulate_ensemble(
    config: &ReactorState,
    duration_s: f64,
    options: &BatchOptions,
    seeds: &[u64],
) -> Vec<AppResult<BatchReport>> {
    seeds
        .par_iter()
        .map(|&seed| {
            let mut noise = BoxMuller::seeded(seed);
            simulate(config, duration_s, options, &mut noise, None)
        })
        .collect()
}
