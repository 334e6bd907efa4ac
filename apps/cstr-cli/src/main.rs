use clap::{Parser, Subcommand};
use cstr_app::batch::{self, BatchReport};
use cstr_app::{
    AppResult, BatchOptions, BatchProgress, BoxMuller, ReactorKpis, SimulationService, load_config,
    save_config, simulate_ensemble, write_ensemble_csv,
};
use cstr_sim::ReactorState;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

#[derive(Parser)]
#[command(name = "cstr-cli")]
#[command(about = "CSTR simulator - jacketed stirred tank reactor dynamics", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the default reactor configuration
    Init {
        /// Output path (.yaml, .yml or .json)
        config_path: PathBuf,
    },
    /// Validate a reactor configuration
    Validate {
        /// Path to the configuration file
        config_path: PathBuf,
    },
    /// Step the reactor live and print the trajectory
    Run {
        /// Path to the configuration file
        config_path: PathBuf,
        /// Number of steps
        #[arg(long)]
        steps: u64,
        /// Time step in seconds (defaults to the configured timeStep)
        #[arg(long)]
        dt: Option<f64>,
        /// Enable the input policy before each step
        #[arg(long)]
        optimize: bool,
        /// Print a row every K steps
        #[arg(long, default_value_t = 1)]
        every: u64,
    },
    /// Generate a noisy training dataset
    Batch {
        /// Path to the configuration file
        config_path: PathBuf,
        /// Simulated duration in seconds
        #[arg(long)]
        duration: u64,
        /// Seed for a reproducible noise stream
        #[arg(long)]
        seed: Option<u64>,
        /// Number of independent runs
        #[arg(long, default_value_t = 1)]
        runs: u64,
        /// Output CSV file path (optional, defaults to stdout; ensembles
        /// then share one table with a leading `run` column)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> AppResult<()> {
    // Logs go to stderr so CSV on stdout stays clean
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { config_path } => cmd_init(&config_path),
        Commands::Validate { config_path } => cmd_validate(&config_path),
        Commands::Run {
            config_path,
            steps,
            dt,
            optimize,
            every,
        } => cmd_run(&config_path, steps, dt, optimize, every),
        Commands::Batch {
            config_path,
            duration,
            seed,
            runs,
            output,
        } => cmd_batch(&config_path, duration, seed, runs, output.as_deref()),
    }
}

fn cmd_init(config_path: &Path) -> AppResult<()> {
    save_config(config_path, &ReactorState::default())?;
    println!("✓ Wrote default configuration to {}", config_path.display());
    Ok(())
}

fn cmd_validate(config_path: &Path) -> AppResult<()> {
    println!("Validating configuration: {}", config_path.display());
    let state = load_config(config_path)?;
    println!("✓ Configuration is valid");
    print_kpis(&ReactorKpis::from_state(&state));
    Ok(())
}

fn cmd_run(
    config_path: &Path,
    steps: u64,
    dt: Option<f64>,
    optimize: bool,
    every: u64,
) -> AppResult<()> {
    let state = load_config(config_path)?;
    let dt = dt.unwrap_or(state.operation.time_step);
    let every = every.max(1);

    let mut service = SimulationService::with_state(state)?;
    if optimize {
        service.toggle_optimization();
    }

    println!("Running {} steps, dt = {:.3} s", steps, dt);
    println!(
        "{:>10}  {:>12}  {:>10}  {:>10}",
        "t [s]", "C [mol/L]", "T [K]", "X [-]"
    );
    print_row(&ReactorKpis::from_state(service.state()), 0.0);

    let started = Instant::now();
    for i in 1..=steps {
        let state = service.step(dt)?;
        if i % every == 0 || i == steps {
            print_row(&ReactorKpis::from_state(state), state.operation.current_time);
        }
    }

    println!(
        "✓ Simulation completed in {:.3}s",
        started.elapsed().as_secs_f64()
    );
    print_kpis(&ReactorKpis::from_state(service.state()));
    Ok(())
}

fn cmd_batch(
    config_path: &Path,
    duration: u64,
    seed: Option<u64>,
    runs: u64,
    output: Option<&Path>,
) -> AppResult<()> {
    let config = load_config(config_path)?;
    let options = BatchOptions::default();

    if runs <= 1 {
        let mut noise = match seed {
            Some(seed) => BoxMuller::seeded(seed),
            None => BoxMuller::from_entropy(),
        };
        let report = if output.is_some() {
            let mut last_emit = Instant::now();
            let report = batch::simulate(
                &config,
                duration as f64,
                &options,
                &mut noise,
                Some(&mut |event: BatchProgress| {
                    if event.is_complete() || last_emit.elapsed().as_millis() >= 100 {
                        render_cli_progress(&event);
                        last_emit = Instant::now();
                    }
                }),
            )?;
            clear_progress_line();
            report
        } else {
            batch::simulate(&config, duration as f64, &options, &mut noise, None)?
        };
        return write_report(&report, output);
    }

    let base = seed.unwrap_or_else(rand::random);
    let seeds: Vec<u64> = (0..runs).map(|k| base.wrapping_add(k)).collect();
    info!(runs, base_seed = base, "Running batch ensemble");

    let reports = simulate_ensemble(&config, duration as f64, &options, &seeds)
        .into_iter()
        .collect::<AppResult<Vec<BatchReport>>>()?;

    match output {
        Some(path) => {
            for (k, report) in reports.iter().enumerate() {
                write_report(report, Some(&run_path(path, k)))?;
            }
        }
        None => write_ensemble_csv(&reports, io::stdout().lock())?,
    }
    Ok(())
}

/// `data.csv` -> `data_3.csv`
fn run_path(path: &Path, k: usize) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match path.extension() {
        Some(ext) => format!("{}_{}.{}", stem, k, ext.to_string_lossy()),
        None => format!("{}_{}", stem, k),
    };
    path.with_file_name(name)
}

fn write_report(report: &BatchReport, output: Option<&Path>) -> AppResult<()> {
    // Write to file or stdout
    if let Some(path) = output {
        let file = std::fs::File::create(path)?;
        report.write_csv(io::BufWriter::new(file))?;
        println!("✓ Exported {} records to {}", report.len(), path.display());
    } else {
        report.write_csv(io::stdout().lock())?;
    }
    Ok(())
}

fn print_row(kpis: &ReactorKpis, t: f64) {
    println!(
        "{:>10.3}  {:>12.4}  {:>10.2}  {:>10.4}",
        t, kpis.concentration, kpis.temperature, kpis.conversion
    );
}

fn print_kpis(kpis: &ReactorKpis) {
    println!("\nReactor KPIs:");
    println!("  Concentration:  {:.4} mol/L", kpis.concentration);
    println!("  Temperature:    {:.2} K", kpis.temperature);
    println!("  Conversion:     {:.1}%", kpis.conversion * 100.0);
    match kpis.residence_time_min() {
        Some(tau) => println!("  Residence time: {:.2} min", tau),
        None => println!("  Residence time: n/a (no feed)"),
    }
    println!("  Rate constant:  {:.4e} 1/s", kpis.rate_constant);
    println!("  Reaction rate:  {:.4e} mol/(L s)", kpis.reaction_rate);
    println!("  Heat balance:");
    println!("    Feed:     {:+.4e} K/s", kpis.feed_exchange_k_per_s);
    println!("    Reaction: {:+.4e} K/s", kpis.heat_generation_k_per_s);
    println!("    Jacket:   {:+.4e} K/s", kpis.jacket_exchange_k_per_s);
    println!("    Net:      {:+.4e} K/s", kpis.net_heating_k_per_s());
}

fn clear_progress_line() {
    print!("\r{}\r", " ".repeat(120));
    let _ = io::stdout().flush();
}

fn render_cli_progress(event: &BatchProgress) {
    let width = 28usize;
    let filled = ((event.fraction_complete * width as f64).round() as usize).min(width);
    let bar = format!(
        "{}{}",
        "#".repeat(filled),
        "-".repeat(width.saturating_sub(filled))
    );
    print!(
        "\r[{}] {:>6.2}%  t={:.3}s  step={}/{}",
        bar,
        event.fraction_complete * 100.0,
        event.sim_time_s,
        event.step,
        event.total_steps
    );
    let _ = io::stdout().flush();
}
