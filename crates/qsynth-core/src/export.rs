//! Tabular and JSON export of a generated dataset, plus a content fingerprint.
//!
//! CSV layouts:
//! - Rabi: one row per grid point.
//! - Decay: one row per grid point, `t1_` and `t2_` columns side by side.
//! - Bell: one row per basis.

use std::io::Write;

use sha2::{Digest, Sha256};

use crate::result::{ExperimentResult, Measurements};

/// Write the dataset as CSV.
pub fn write_csv<W: Write>(result: &ExperimentResult, out: &mut W) -> std::io::Result<()> {
    match &result.measurements {
        Measurements::Rabi(points) => {
            writeln!(out, "time,theory_prob,measured_prob,ones_count,zeros_count")?;
            for p in points {
                writeln!(
                    out,
                    "{},{},{},{},{}",
                    p.time, p.theory_prob, p.measured_prob, p.ones_count, p.zeros_count
                )?;
            }
        }
        Measurements::Decay {
            t1_decay,
            t2_coherence,
        } => {
            let columns = ["time", "theory_signal", "measured_signal", "ones_count", "zeros_count"];
            let header: Vec<String> = ["t1", "t2"]
                .iter()
                .flat_map(|prefix| columns.iter().map(move |c| format!("{prefix}_{c}")))
                .collect();
            writeln!(out, "{}", header.join(","))?;
            for (a, b) in t1_decay.iter().zip(t2_coherence) {
                writeln!(
                    out,
                    "{},{},{},{},{},{},{},{},{},{}",
                    a.time,
                    a.theory_signal,
                    a.measured_signal,
                    a.ones_count,
                    a.zeros_count,
                    b.time,
                    b.theory_signal,
                    b.measured_signal,
                    b.ones_count,
                    b.zeros_count
                )?;
            }
        }
        Measurements::Bell(bases) => {
            writeln!(
                out,
                "basis,count_00,count_01,count_10,count_11,theory_correlation,measured_correlation"
            )?;
            for (basis, m) in bases {
                writeln!(
                    out,
                    "{},{},{},{},{},{},{}",
                    basis,
                    m.count_00,
                    m.count_01,
                    m.count_10,
                    m.count_11,
                    m.theory_correlation,
                    m.measured_correlation
                )?;
            }
        }
    }
    Ok(())
}

/// CSV as a string.
pub fn to_csv(result: &ExperimentResult) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = write_csv(result, &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}

/// Write the full envelope as JSON.
pub fn write_json<W: Write>(
    result: &ExperimentResult,
    out: &mut W,
    pretty: bool,
) -> std::io::Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, result)?;
    } else {
        serde_json::to_writer(&mut *out, result)?;
    }
    writeln!(out)
}

/// Lowercase hex SHA-256 of the compact JSON envelope.
///
/// Two datasets generated from the same parameters and seed share a fingerprint.
pub fn fingerprint(result: &ExperimentResult) -> String {
    let json = result.to_json().to_string();
    let digest: [u8; 32] = Sha256::digest(json.as_bytes()).into();
    hex_encode(&digest)
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
