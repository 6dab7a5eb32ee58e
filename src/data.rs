//! Sample and report files.
//!
//! Samples are stored either as MessagePack-encoded sequences of floats (files
//! ending in `.msgpack`) or as plain text with whitespace separated numbers, where
//! lines starting with `#` are comments.

use crate::analysis::Report;
use anyhow::{Context, Result, bail};
use rmp_serde::{decode, encode};
use std::{
    fs::{self, File},
    io::{BufReader, BufWriter, Write},
    path::Path,
};

/// Read a sample from a MessagePack or text file, based on its extension.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed, or if any value is not finite.
pub fn read_sample<P: AsRef<Path>>(file: P) -> Result<Vec<f64>> {
    let file = file.as_ref();
    let sample = if is_msgpack(file) {
        let reader = File::open(file).with_context(|| format!("failed to open {file:?}"))?;
        let reader = BufReader::new(reader);
        decode::from_read(reader).context("failed to deserialize sample")?
    } else {
        let contents =
            fs::read_to_string(file).with_context(|| format!("failed to read {file:?}"))?;
        parse_text(&contents).context("failed to parse sample")?
    };

    if let Some(idx) = sample.iter().position(|val: &f64| !val.is_finite()) {
        bail!("value {idx} is not finite");
    }
    log::info!("read {} values from {file:?}", sample.len());

    Ok(sample)
}

/// Write a sample to a MessagePack or text file, based on its extension.
pub fn write_sample<P: AsRef<Path>>(file: P, sample: &[f64]) -> Result<()> {
    let file = file.as_ref();
    let writer = File::create(file).with_context(|| format!("failed to create {file:?}"))?;
    let mut writer = BufWriter::new(writer);

    if is_msgpack(file) {
        encode::write(&mut writer, &sample).context("failed to serialize sample")?;
    } else {
        for val in sample {
            writeln!(writer, "{val:e}").context("failed to write value")?;
        }
    }

    writer.flush().context("failed to flush writer stream")?;

    Ok(())
}

/// Save an analysis report to a MessagePack file.
pub fn save_report<P: AsRef<Path>>(file: P, report: &Report) -> Result<()> {
    let file = file.as_ref();
    let writer = File::create(file).with_context(|| format!("failed to create {file:?}"))?;
    let mut writer = BufWriter::new(writer);
    encode::write_named(&mut writer, report).context("failed to serialize report")?;
    writer.flush().context("failed to flush writer stream")?;
    Ok(())
}

/// Load an analysis report from a MessagePack file.
pub fn load_report<P: AsRef<Path>>(file: P) -> Result<Report> {
    let file = file.as_ref();
    let reader = File::open(file).with_context(|| format!("failed to open {file:?}"))?;
    let reader = BufReader::new(reader);
    let report = decode::from_read(reader).context("failed to deserialize report")?;
    Ok(report)
}

fn is_msgpack(file: &Path) -> bool {
    file.extension().is_some_and(|ext| ext == "msgpack")
}

fn parse_text(contents: &str) -> Result<Vec<f64>> {
    let mut sample = Vec::new();
    for (i_line, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.starts_with('#') {
            continue;
        }
        for word in line.split_whitespace() {
            let val = word
                .parse::<f64>()
                .with_context(|| format!("invalid value {word:?} on line {}", i_line + 1))?;
            sample.push(val);
        }
    }
    Ok(sample)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_parsing_skips_comments() {
        let sample = parse_text("# energy\n1.5 2\n\n  # more\n-3e-1\n").unwrap();
        assert_eq!(sample, vec![1.5, 2.0, -0.3]);

        let err = parse_text("1.0\n2.0 abc\n").unwrap_err();
        assert!(format!("{err:#}").contains("line 2"));
    }
}
