//! Plain-text sample readers.

use anyhow::{Context, Result};
use std::path::Path;

/// Read samples from a CSV file.
///
/// Accepts one value per line or `index,value` rows; the last field of each
/// row is the sample. A non-numeric first row is treated as a header. Blank
/// lines and lines starting with `#` are skipped.
pub fn read_samples(path: &Path) -> Result<Vec<f64>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read signal file: {:?}", path))?;
    parse_samples(&content).with_context(|| format!("Invalid signal file: {:?}", path))
}

/// Parse CSV text as described in [`read_samples`].
pub fn parse_samples(content: &str) -> Result<Vec<f64>> {
    let mut samples = Vec::new();
    let mut first_row = true;

    for (line_no, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let field = line.rsplit(',').next().unwrap_or(line).trim();
        match field.parse::<f64>() {
            Ok(v) => samples.push(v),
            // Header
            Err(_) if first_row => {}
            Err(e) => {
                anyhow::bail!("line {}: cannot parse {:?} as a sample: {}", line_no + 1, field, e)
            }
        }
        first_row = false;
    }

    if samples.is_empty() {
        anyhow::bail!("no samples found");
    }

    Ok(samples)
}

/// Parse taps from a comma-separated list, or read them from a file when
/// `arg` names one.
pub fn parse_taps(arg: &str) -> Result<Vec<f64>> {
    let path = Path::new(arg);
    if path.is_file() {
        return read_samples(path);
    }

    arg.split(',')
        .map(|t| {
            t.trim()
                .parse::<f64>()
                .with_context(|| format!("Invalid tap value: {:?}", t))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_single_column() {
        let samples = parse_samples("1.0\n2.5\n\n-3\n").unwrap();
        assert_eq!(samples, vec![1.0, 2.5, -3.0]);
    }

    #[test]
    fn test_indexed_rows_with_header() {
        let text = "# exported\nsample,value\n0,0.5\n1,0.25\n";
        assert_eq!(parse_samples(text).unwrap(), vec![0.5, 0.25]);
    }

    #[test]
    fn test_garbage_after_data_is_an_error() {
        assert!(parse_samples("1.0\nabc\n").is_err());
        assert!(parse_samples("value\n").is_err());
    }

    #[test]
    fn test_read_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "t,v").unwrap();
        writeln!(file, "0,1").unwrap();
        writeln!(file, "1,2").unwrap();
        assert_eq!(read_samples(file.path()).unwrap(), vec![1.0, 2.0]);
    }

    #[test]
    fn test_taps_inline_and_file() {
        assert_eq!(parse_taps("0.5, 0.5").unwrap(), vec![0.5, 0.5]);
        assert!(parse_taps("0.5,x").is_err());

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "1\n-1").unwrap();
        let arg = file.path().to_str().unwrap().to_string();
        assert_eq!(parse_taps(&arg).unwrap(), vec![1.0, -1.0]);
    }
}
