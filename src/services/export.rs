use crate::models::MatchResult;
use std::io::Write;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to finalize CSV: {0}")]
    Finalize(String),
}

/// Write a result set as delimited text, one row per match.
/// Columns: `city,distance_km,overlap_pct,total_score`.
pub fn write_csv<W: Write>(writer: W, results: &[MatchResult]) -> Result<(), ExportError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["city", "distance_km", "overlap_pct", "total_score"])?;

    for result in results {
        wtr.write_record([
            result.city_label.as_str(),
            &format!("{:.1}", result.distance_km),
            &format!("{:.1}", result.overlap_pct),
            &format!("{:.3}", result.total_score),
        ])?;
    }

    wtr.flush().map_err(|e| ExportError::Finalize(e.to_string()))
}

/// Render a result set to an in-memory CSV document (for HTTP download)
pub fn to_csv_string(results: &[MatchResult]) -> Result<String, ExportError> {
    let mut buf = Vec::new();
    write_csv(&mut buf, results)?;
    String::from_utf8(buf).map_err(|e| ExportError::Finalize(e.to_string()))
}
