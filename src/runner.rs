//! Run wiring: store client, extraction service, report output.

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::application::services::ExtractionService;
use crate::config::Config;
use crate::infrastructure::firestore::FirestoreStore;
use crate::infrastructure::report::write_report;
use crate::utils::link_extractor::LinkExtractor;

/// Runs one extraction with the given configuration.
///
/// Initializes:
/// - The Firestore store client
/// - The link extractor with the configured pattern
/// - The extraction service and its worker pool
///
/// and writes the merged result set to the configured output path.
///
/// # Errors
///
/// Returns an error if the store client or extractor cannot be built, or
/// if the report cannot be written. Extraction itself is fail-soft and
/// never errors here.
pub async fn run(config: Config) -> Result<()> {
    let store = Arc::new(
        FirestoreStore::new(&config.project_id, &config.access_token)
            .context("Failed to build store client")?,
    );
    tracing::info!("Store client ready for project {}", config.project_id);

    let extractor =
        LinkExtractor::new(&config.link_pattern).context("Failed to compile link pattern")?;

    let service = ExtractionService::new(store, extractor, config.extraction_settings());
    let matches = service.run().await;

    let written = write_report(&config.output_path, &matches)
        .with_context(|| format!("Failed to write {}", config.output_path.display()))?;
    tracing::info!("Wrote {} rows to {}", written, config.output_path.display());

    Ok(())
}
