//! CSV report writer.
//!
//! The extraction core hands over the merged in-memory result set once,
//! at the very end of the run; this module persists it as a spreadsheet
//! friendly artifact.

use std::path::Path;

use crate::domain::entities::LinkMatch;
use crate::error::AppError;

const HEADER: [&str; 4] = ["shop_id", "flow_id", "action_template_id", "link"];

/// Writes all matches to `path`, one row per link, with a header row.
///
/// Returns the number of data rows written. An existing file at `path`
/// is overwritten.
///
/// # Errors
///
/// Returns [`AppError::Report`] on CSV/IO failures.
pub fn write_report(path: &Path, matches: &[LinkMatch]) -> Result<usize, AppError> {
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_path(path)?;

    writer.write_record(HEADER)?;
    for m in matches {
        writer.serialize(m)?;
    }
    writer.flush()?;

    Ok(matches.len())
}
