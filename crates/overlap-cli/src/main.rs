//! overlap: convolution, correlation and DFT of sampled signals from the
//! command line.

mod config;
mod orchestrator;
mod output;
mod samples;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use config::{JobConfig, Operation, OutputConfig, SignalConfig, SignalSource};
use lib_dsp::{DynamicSignal, OverlapMode};
use lib_sample::SampleRate;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "overlap")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Text => "txt",
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Convolve a signal with a set of taps
    Convolve(OverlapArgs),

    /// Cross-correlate a signal with a set of taps
    Correlate(OverlapArgs),

    /// Run a job described by a configuration file
    Run {
        /// Path to the job configuration file (TOML or JSON)
        #[arg(short, long)]
        config: PathBuf,

        /// Output directory for results
        #[arg(short, long, default_value = "output")]
        output: PathBuf,
    },

    /// Compute the DFT magnitude spectrum of a signal
    Dft {
        /// Path to the signal CSV file
        signal: PathBuf,

        /// Samples per unit time
        #[arg(short = 'r', long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
        sample_rate: u32,
    },

    /// Print a signal summary and its XML rendering
    Render {
        /// Path to the signal CSV file
        signal: PathBuf,

        /// Samples per unit time
        #[arg(short = 'r', long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
        sample_rate: u32,

        /// Write the XML document here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args)]
struct OverlapArgs {
    /// Path to the signal CSV file
    #[arg(short, long)]
    signal: PathBuf,

    /// Taps as a comma-separated list, or a path to a CSV file
    #[arg(short, long, allow_hyphen_values = true)]
    taps: String,

    /// Boundary handling: full, valid or same
    #[arg(short, long, default_value = "valid")]
    mode: OverlapMode,

    /// Samples per unit time
    #[arg(short = 'r', long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
    sample_rate: u32,

    /// Also compute the magnitude spectrum of the result
    #[arg(long)]
    spectrum: bool,

    /// Write results into this directory instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    match cli.command {
        Commands::Convolve(args) => run_overlap(Operation::Convolve, args, cli.format)?,
        Commands::Correlate(args) => run_overlap(Operation::Correlate, args, cli.format)?,
        Commands::Run { config, output } => run_job(&config, &output, cli.format)?,
        Commands::Dft { signal, sample_rate } => compute_dft(&signal, sample_rate, cli.format)?,
        Commands::Render { signal, sample_rate, output } => {
            render_signal(&signal, sample_rate, output.as_deref())?
        }
    }

    Ok(())
}

fn run_overlap(operation: Operation, args: OverlapArgs, format: OutputFormat) -> Result<()> {
    let name = args
        .signal
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("signal")
        .to_string();

    let config = JobConfig {
        name,
        operation,
        mode: args.mode,
        signal: SignalConfig {
            sample_rate: sample_rate(args.sample_rate)?,
            source: SignalSource::Csv { path: args.signal },
        },
        taps: samples::parse_taps(&args.taps)?,
        output: OutputConfig {
            spectrum: args.spectrum,
            xml: false,
        },
    };

    let results = orchestrator::Orchestrator::new(config)?.run()?;

    match args.output {
        Some(dir) => {
            std::fs::create_dir_all(&dir)?;
            output::write_results(&results, &dir, format)?;
        }
        None => output::print_results(&results, format)?,
    }

    Ok(())
}

fn run_job(config_path: &Path, output_dir: &Path, format: OutputFormat) -> Result<()> {
    tracing::info!("Loading configuration from {:?}", config_path);

    let config = config::load_config(config_path)?;
    let orchestrator = orchestrator::Orchestrator::new(config)?;
    let results = orchestrator.run()?;

    // Create output directory
    std::fs::create_dir_all(output_dir)?;

    output::write_results(&results, output_dir, format)?;

    tracing::info!("Job complete. Results written to {:?}", output_dir);
    Ok(())
}

fn compute_dft(signal_path: &Path, rate: u32, format: OutputFormat) -> Result<()> {
    let signal = load_signal(signal_path, rate)?;
    tracing::info!("Computing {}-point DFT", signal.size());

    let spectrum = orchestrator::summarize_spectrum(&signal)?;
    output::print_spectrum(&spectrum, format)
}

fn render_signal(signal_path: &Path, rate: u32, output: Option<&Path>) -> Result<()> {
    let signal = load_signal(signal_path, rate)?;

    println!("{}", signal);

    match output {
        Some(path) => {
            let f = std::fs::File::create(path)
                .with_context(|| format!("Failed to create {:?}", path))?;
            signal.write_xml(std::io::BufWriter::new(f))?;
            println!("Written to: {:?}", path);
        }
        None => {
            println!();
            signal.write_xml(std::io::stdout().lock())?;
        }
    }

    Ok(())
}

fn load_signal(path: &Path, rate: u32) -> Result<DynamicSignal<f64>> {
    let samples = samples::read_samples(path)?;
    Ok(DynamicSignal::from_vec(samples, sample_rate(rate)?.get())?)
}

fn sample_rate(rate: u32) -> Result<SampleRate> {
    SampleRate::new(rate).context("Sample rate must be positive")
}
