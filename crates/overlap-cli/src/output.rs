//! Result output formatting and writing.

use crate::orchestrator::{JobResults, SpectrumSummary};
use crate::OutputFormat;
use anyhow::Result;
use std::io::Write;
use std::path::Path;

/// Write job results to an output directory.
pub fn write_results(results: &JobResults, output_dir: &Path, format: OutputFormat) -> Result<()> {
    let samples_path = output_dir.join(format!("{}.{}", results.name, format.extension()));
    let f = std::fs::File::create(&samples_path)?;
    render_samples(results, format, f)?;
    tracing::info!("Wrote {} output samples to {:?}", results.samples.len(), samples_path);

    if let Some(spectrum) = &results.spectrum {
        let spectrum_path = output_dir.join(format!("{}_spectrum.{}", results.name, format.extension()));
        let f = std::fs::File::create(&spectrum_path)?;
        render_spectrum(spectrum, format, f)?;
        tracing::info!("Wrote spectrum to {:?}", spectrum_path);
    }

    if let Some(xml) = &results.xml {
        let xml_path = output_dir.join(format!("{}.xml", results.name));
        std::fs::write(&xml_path, xml)?;
        tracing::info!("Wrote XML signal to {:?}", xml_path);
    }

    let summary_path = output_dir.join("summary.txt");
    let mut f = std::fs::File::create(&summary_path)?;
    writeln!(f, "Overlap Job Summary")?;
    writeln!(f, "===================")?;
    writeln!(f)?;
    write_header(results, &mut f)?;
    tracing::info!("Wrote summary to {:?}", summary_path);

    Ok(())
}

/// Print results to stdout.
pub fn print_results(results: &JobResults, format: OutputFormat) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    render_samples(results, format, &mut out)?;
    if let Some(spectrum) = &results.spectrum {
        if matches!(format, OutputFormat::Text) {
            writeln!(out)?;
        }
        render_spectrum(spectrum, format, &mut out)?;
    }
    Ok(())
}

/// Print a spectrum to stdout.
pub fn print_spectrum(spectrum: &SpectrumSummary, format: OutputFormat) -> Result<()> {
    let stdout = std::io::stdout();
    render_spectrum(spectrum, format, stdout.lock())
}

fn write_header<W: Write>(results: &JobResults, mut out: W) -> Result<()> {
    writeln!(out, "Job:         {}", results.name)?;
    writeln!(out, "Operation:   {} ({})", results.operation, results.mode)?;
    writeln!(out, "Sample rate: {}", results.sample_rate)?;
    writeln!(out, "Input:       {} samples, {} taps", results.input_len, results.taps_len)?;
    writeln!(out, "Output:      {} samples", results.samples.len())?;
    writeln!(out)?;
    writeln!(out, "{}", results.summary)?;
    Ok(())
}

/// Output samples in the requested format.
pub fn render_samples<W: Write>(results: &JobResults, format: OutputFormat, mut out: W) -> Result<()> {
    match format {
        OutputFormat::Text => {
            write_header(results, &mut out)?;
            writeln!(out)?;
            for (i, v) in results.samples.iter().enumerate() {
                writeln!(out, "{:>6}  {:.8}", i, v)?;
            }
        }
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(results)?)?;
        }
        OutputFormat::Csv => {
            writeln!(out, "sample,value")?;
            for (i, v) in results.samples.iter().enumerate() {
                writeln!(out, "{},{}", i, v)?;
            }
        }
    }
    Ok(())
}

/// Spectrum bins in the requested format.
pub fn render_spectrum<W: Write>(spectrum: &SpectrumSummary, format: OutputFormat, mut out: W) -> Result<()> {
    match format {
        OutputFormat::Text => {
            writeln!(out, "Spectrum ({} bins, resolution {:.6})", spectrum.bins.len(), spectrum.resolution)?;
            if let Some(k) = spectrum.peak_bin {
                writeln!(out, "Peak bin:  {} ({:.6})", k, spectrum.bins[k].frequency)?;
            }
            for (k, bin) in spectrum.bins.iter().enumerate() {
                writeln!(out, "{:>6}  {:>14.6}  {:.8}", k, bin.frequency, bin.magnitude)?;
            }
        }
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(spectrum)?)?;
        }
        OutputFormat::Csv => {
            writeln!(out, "bin,frequency,magnitude")?;
            for (k, bin) in spectrum.bins.iter().enumerate() {
                writeln!(out, "{},{},{}", k, bin.frequency, bin.magnitude)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Operation;
    use crate::orchestrator::SpectrumBin;
    use lib_dsp::OverlapMode;

    fn results() -> JobResults {
        JobResults {
            name: "smooth".to_string(),
            operation: Operation::Convolve,
            mode: OverlapMode::Valid,
            sample_rate: 4,
            input_len: 4,
            taps_len: 2,
            summary: "Signal Data is dynamically allocated: Supports 4 samples.".to_string(),
            samples: vec![1.5, 2.5, 3.5],
            spectrum: Some(SpectrumSummary {
                resolution: 4.0 / 3.0,
                peak_bin: Some(0),
                bins: vec![
                    SpectrumBin { frequency: 0.0, magnitude: 7.5 },
                    SpectrumBin { frequency: 4.0 / 3.0, magnitude: 1.0 },
                    SpectrumBin { frequency: 8.0 / 3.0, magnitude: 1.0 },
                ],
            }),
            xml: Some("<Signal/>".to_string()),
        }
    }

    #[test]
    fn test_csv_samples() {
        let mut buf = Vec::new();
        render_samples(&results(), OutputFormat::Csv, &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "sample,value\n0,1.5\n1,2.5\n2,3.5\n");
    }

    #[test]
    fn test_json_samples() {
        let mut buf = Vec::new();
        render_samples(&results(), OutputFormat::Json, &mut buf).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["mode"], "valid");
        assert_eq!(value["operation"], "convolve");
        assert_eq!(value["samples"][2], 3.5);
        assert_eq!(value["spectrum"]["peak_bin"], 0);
        assert!(value.get("xml").is_none());
    }

    #[test]
    fn test_text_spectrum_names_peak() {
        let mut buf = Vec::new();
        render_spectrum(results().spectrum.as_ref().unwrap(), OutputFormat::Text, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("Spectrum (3 bins"));
        assert!(text.contains("Peak bin:  0"));
    }

    #[test]
    fn test_write_results_files() {
        let dir = tempfile::tempdir().unwrap();
        write_results(&results(), dir.path(), OutputFormat::Csv).unwrap();

        assert!(dir.path().join("smooth.csv").exists());
        assert!(dir.path().join("smooth_spectrum.csv").exists());
        assert_eq!(std::fs::read_to_string(dir.path().join("smooth.xml")).unwrap(), "<Signal/>");

        let summary = std::fs::read_to_string(dir.path().join("summary.txt")).unwrap();
        assert!(summary.contains("Operation:   convolve (valid)"));
    }
}
