//! Application service layer for the CSTR simulator.
//!
//! Wraps the simulation core with the operations a transport or CLI
//! exposes: live initialize/step/query, the optimization switch, batch
//! dataset generation, configuration files and derived read-outs.

pub mod batch;
pub mod config;
pub mod error;
pub mod metrics;
pub mod noise;
pub mod progress;
pub mod service;

pub use batch::{
    BatchOptions, BatchRecord, BatchReport, CSV_HEADER, simulate_ensemble, write_ensemble_csv,
};
pub use config::{ConfigFormat, load_config, save_config};
pub use error::{AppError, AppResult};
pub use metrics::ReactorKpis;
pub use noise::{BoxMuller, NoiseSource};
pub use progress::BatchProgress;
pub use service::SimulationService;
