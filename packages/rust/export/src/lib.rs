//! CSV export sink for job records.
//!
//! Thin shell around the pipeline output: records are written unchanged,
//! one row per record (error stubs included), with multi-value fields
//! joined into flat display cells.

use std::io::Write;
use std::path::Path;

use tracing::info;

use joblens_shared::{JobRecord, JoblensError, Result};

/// Column headers, in output order.
const HEADERS: [&str; 14] = [
    "URL",
    "Title",
    "Description",
    "Skills",
    "Budget",
    "Client Name",
    "Client Profile",
    "Location",
    "Payment Verified",
    "Hire Rate",
    "High Trust Job",
    "Emails",
    "Profile Links",
    "Error",
];

/// Write `records` as CSV to `path`.
pub fn write_csv(records: &[JobRecord], path: &Path) -> Result<()> {
    let file = std::fs::File::create(path).map_err(|e| JoblensError::io(path, e))?;
    write_csv_to(records, file)?;
    info!(?path, rows = records.len(), "records exported");
    Ok(())
}

/// Write `records` as CSV to any writer. One header row plus one row
/// per record, in batch order.
pub fn write_csv_to<W: Write>(records: &[JobRecord], writer: W) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADERS)
        .map_err(|e| JoblensError::Export(e.to_string()))?;

    for record in records {
        wtr.write_record(record_row(record))
            .map_err(|e| JoblensError::Export(e.to_string()))?;
    }

    wtr.flush()
        .map_err(|e| JoblensError::Export(e.to_string()))?;
    Ok(())
}

/// Flatten one record into display cells.
fn record_row(record: &JobRecord) -> Vec<String> {
    vec![
        record.url.clone(),
        record.title.clone().unwrap_or_default(),
        record.description.clone().unwrap_or_default(),
        record.skills.join(", "),
        record.budget.clone().unwrap_or_default(),
        record.client_name.clone().unwrap_or_default(),
        record.client_profile_url.clone().unwrap_or_default(),
        record.client_location.clone().unwrap_or_default(),
        record.payment_verified.to_string(),
        record
            .hire_rate_percent
            .map(|r| r.to_string())
            .unwrap_or_default(),
        record.is_high_trust.to_string(),
        record.emails.join(", "),
        record.profile_links.join(", "),
        record.error.clone().unwrap_or_default(),
    ]
}
