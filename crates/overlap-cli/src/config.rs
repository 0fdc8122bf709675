//! Job configuration loading and validation.

use anyhow::{Context, Result};
use lib_dsp::OverlapMode;
use lib_sample::SampleRate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level job configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JobConfig {
    /// Job name/description.
    #[serde(default = "default_name")]
    pub name: String,

    /// Convolution or correlation.
    #[serde(default)]
    pub operation: Operation,

    /// Boundary handling.
    #[serde(default)]
    pub mode: OverlapMode,

    /// Input signal.
    pub signal: SignalConfig,

    /// Filter coefficients, strictly fewer than the signal samples.
    pub taps: Vec<f64>,

    /// Extra outputs.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Which overlap operation to run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    #[default]
    Convolve,
    Correlate,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Convolve => f.write_str("convolve"),
            Operation::Correlate => f.write_str("correlate"),
        }
    }
}

/// Input signal configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SignalConfig {
    /// Samples per unit time.
    #[serde(default = "default_sample_rate")]
    pub sample_rate: SampleRate,

    /// Where the samples come from.
    ///
    /// # Examples
    ///
    /// ```toml
    /// source = { type = "csv", path = "input.csv" }
    /// source = { type = "inline", samples = [1.0, 2.0, 3.0] }
    /// source = { type = "tone", len = 64, cycles = 4.0 }
    /// ```
    pub source: SignalSource,
}

/// Sample source for the input signal.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SignalSource {
    /// One value per line, or `index,value` rows.
    Csv { path: PathBuf },

    /// Samples listed in the config itself.
    Inline { samples: Vec<f64> },

    /// Generated cosine with a whole number of `cycles` over `len` samples.
    Tone {
        len: usize,
        cycles: f64,
        #[serde(default = "default_amplitude")]
        amplitude: f64,
    },
}

/// Output configuration.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Also compute the magnitude spectrum of the result.
    #[serde(default)]
    pub spectrum: bool,

    /// Also write the result as an XML signal document.
    #[serde(default)]
    pub xml: bool,
}

fn default_name() -> String { "overlap".to_string() }
fn default_amplitude() -> f64 { 1.0 }

fn default_sample_rate() -> SampleRate { SampleRate::UNIT }

/// Load configuration from a file.
pub fn load_config(path: &Path) -> Result<JobConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: JobConfig = if path.extension().map_or(false, |e| e == "json") {
        serde_json::from_str(&content)?
    } else {
        // Assume TOML
        toml::from_str(&content)
            .with_context(|| "Failed to parse config as TOML")?
    };

    validate_config(&config)?;

    Ok(config)
}

/// Validate configuration.
pub fn validate_config(config: &JobConfig) -> Result<()> {
    if config.taps.is_empty() {
        anyhow::bail!("Job '{}' has no taps", config.name);
    }

    if config.taps.iter().any(|t| !t.is_finite()) {
        anyhow::bail!("Job '{}' has non-finite taps", config.name);
    }

    match &config.signal.source {
        SignalSource::Csv { path } => {
            if !path.exists() {
                anyhow::bail!("Signal file not found: {:?}", path);
            }
        }
        SignalSource::Inline { samples } => {
            if samples.len() <= config.taps.len() {
                anyhow::bail!(
                    "Signal must be longer than the taps (got {} samples, {} taps)",
                    samples.len(),
                    config.taps.len()
                );
            }
        }
        SignalSource::Tone { len, cycles, .. } => {
            if *len <= config.taps.len() {
                anyhow::bail!(
                    "Tone length {} must exceed the number of taps {}",
                    len,
                    config.taps.len()
                );
            }
            if !cycles.is_finite() {
                anyhow::bail!("Tone cycles must be finite");
            }
        }
    }

    Ok(())
}
