//! Job orchestration.

use crate::config::{validate_config, JobConfig, Operation, SignalSource};
use crate::samples::read_samples;
use anyhow::{Context, Result};
use lib_dsp::{convolve, correlate, DynamicSignal, OverlapMode, Vandermonde};
use serde::Serialize;
use std::f64::consts::PI;

/// Job orchestrator.
pub struct Orchestrator {
    config: JobConfig,
}

/// Everything a job produced.
#[derive(Clone, Debug, Serialize)]
pub struct JobResults {
    pub name: String,
    pub operation: Operation,
    pub mode: OverlapMode,
    pub sample_rate: u32,
    pub input_len: usize,
    pub taps_len: usize,

    /// Storage summary of the input signal.
    pub summary: String,

    /// Output samples, already cut to the result range.
    pub samples: Vec<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub spectrum: Option<SpectrumSummary>,

    #[serde(skip)]
    pub xml: Option<String>,
}

/// Magnitude spectrum of a real signal.
#[derive(Clone, Debug, Serialize)]
pub struct SpectrumSummary {
    pub resolution: f64,
    pub peak_bin: Option<usize>,
    pub bins: Vec<SpectrumBin>,
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct SpectrumBin {
    pub frequency: f64,
    pub magnitude: f64,
}

impl Orchestrator {
    /// Create a new orchestrator.
    pub fn new(config: JobConfig) -> Result<Self> {
        validate_config(&config)?;
        Ok(Self { config })
    }

    /// Run the job.
    pub fn run(&self) -> Result<JobResults> {
        let config = &self.config;
        tracing::info!("Starting job: {}", config.name);

        let mut signal = self.load_signal()?;
        if signal.size() <= config.taps.len() {
            anyhow::bail!(
                "Signal must be longer than the taps (got {} samples, {} taps)",
                signal.size(),
                config.taps.len()
            );
        }

        let summary = signal.to_string();
        let input_len = signal.size();
        tracing::debug!(%summary, "loaded signal");

        let range = match config.operation {
            Operation::Convolve => convolve(&mut signal, &config.taps, config.mode),
            Operation::Correlate => {
                let mut taps = config.taps.clone();
                correlate(&mut signal, &mut taps, config.mode)
            }
        }
        .with_context(|| format!("{} failed", config.operation))?;

        let samples = signal.as_slice()[range].to_vec();
        tracing::info!(
            operation = %config.operation,
            mode = %config.mode,
            outputs = samples.len(),
            "overlap complete"
        );

        let output = DynamicSignal::from_vec(samples.clone(), signal.sample_rate())?;

        let spectrum = if config.output.spectrum {
            Some(summarize_spectrum(&output)?)
        } else {
            None
        };

        let xml = config.output.xml.then(|| output.to_xml());

        Ok(JobResults {
            name: config.name.clone(),
            operation: config.operation,
            mode: config.mode,
            sample_rate: signal.sample_rate(),
            input_len,
            taps_len: config.taps.len(),
            summary,
            samples,
            spectrum,
            xml,
        })
    }

    /// Build the input signal from its configured source.
    fn load_signal(&self) -> Result<DynamicSignal<f64>> {
        let rate = self.config.signal.sample_rate.get();

        let signal = match &self.config.signal.source {
            SignalSource::Csv { path } => {
                tracing::info!("Loading signal from {:?}", path);
                DynamicSignal::from_vec(read_samples(path)?, rate)?
            }
            SignalSource::Inline { samples } => DynamicSignal::from_slice(samples, samples.len(), rate)?,
            SignalSource::Tone { len, cycles, amplitude } => {
                let step = 2.0 * PI * cycles / *len as f64;
                DynamicSignal::from_fn(|i| amplitude * (step * i as f64).cos(), *len, rate)?
            }
        };

        Ok(signal)
    }
}

/// Magnitude spectrum of `signal` through a DFT matrix of its own length.
pub fn summarize_spectrum(signal: &DynamicSignal<f64>) -> Result<SpectrumSummary> {
    let dft = Vandermonde::<f64>::dynamic(signal.size())?;
    let spectrum = dft.apply(signal)?;

    let bins = spectrum
        .magnitudes()
        .into_iter()
        .enumerate()
        .map(|(k, magnitude)| SpectrumBin {
            frequency: spectrum.frequency_at(k),
            magnitude,
        })
        .collect();

    Ok(SpectrumSummary {
        resolution: spectrum.resolution(),
        peak_bin: spectrum.peak_bin(),
        bins,
    })
}
