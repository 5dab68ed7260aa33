//! Top-level extraction driver.

use std::sync::Arc;

use futures::StreamExt;
use futures::stream;

use crate::domain::entities::{LinkMatch, TemplateIdPolicy};
use crate::domain::store::{DocumentStore, StoreError};
use crate::pagination::Paginator;
use crate::utils::link_extractor::LinkExtractor;
use crate::utils::retry::RetryPolicy;

/// Tuning knobs for an extraction run.
#[derive(Debug, Clone)]
pub struct ExtractionSettings {
    /// Page size for all three collection levels.
    pub batch_size: usize,
    /// Width of the per-page shop worker pool.
    pub worker_count: usize,
    pub retry: RetryPolicy,
    pub template_policy: TemplateIdPolicy,
}

impl Default for ExtractionSettings {
    fn default() -> Self {
        Self {
            batch_size: 10,
            worker_count: 5,
            retry: RetryPolicy::default(),
            template_policy: TemplateIdPolicy::default(),
        }
    }
}

/// Pages through the shop collection and fans each page out to a bounded
/// worker pool of [`super::ShopProcessor`] tasks.
///
/// Shop pages are processed strictly in cursor order; within a page,
/// completion order is unspecified and results are merged as workers
/// finish. Tasks for the next page are not submitted until the current
/// page has fully completed.
pub struct ExtractionService<S: DocumentStore> {
    store: Arc<S>,
    processor: super::ShopProcessor<S>,
    settings: ExtractionSettings,
}

impl<S: DocumentStore + 'static> ExtractionService<S> {
    pub fn new(store: Arc<S>, extractor: LinkExtractor, settings: ExtractionSettings) -> Self {
        let processor = super::ShopProcessor::new(
            Arc::clone(&store),
            extractor,
            settings.batch_size,
            settings.retry,
            settings.template_policy,
        );
        Self {
            store,
            processor,
            settings,
        }
    }

    /// Runs the extraction to completion and returns the merged matches.
    ///
    /// This never fails: a shop whose processing errors is logged and
    /// dropped, deadline exhaustion degrades to partial results inside
    /// the paginator, and a non-transient failure in the shop pagination
    /// itself stops the loop with whatever has been merged so far.
    pub async fn run(&self) -> Vec<LinkMatch> {
        let mut merged: Vec<LinkMatch> = Vec::new();
        let mut shops_seen = 0usize;
        let mut shops_failed = 0usize;

        let mut shop_pages = Paginator::new(
            {
                let store = Arc::clone(&self.store);
                move |cursor, limit| {
                    let store = Arc::clone(&store);
                    async move { store.list_shops(limit, cursor).await }
                }
            },
            self.settings.batch_size,
            self.settings.retry,
        );

        loop {
            let page = match shop_pages.next_page().await {
                Ok(Some(page)) => page,
                Ok(None) => break,
                Err(e) => {
                    tracing::error!("stopping shop pagination: {e}");
                    break;
                }
            };

            shops_seen += page.len();
            tracing::info!("processing page of {} shops", page.len());

            let results: Vec<(String, Result<Vec<LinkMatch>, StoreError>)> = stream::iter(page)
                .map(|shop| async move {
                    let result = self.processor.process(&shop.id).await;
                    (shop.id, result)
                })
                .buffer_unordered(self.settings.worker_count)
                .collect()
                .await;

            for (shop_id, result) in results {
                match result {
                    Ok(matches) => {
                        tracing::info!("shop {shop_id}: {} links", matches.len());
                        merged.extend(matches);
                    }
                    Err(e) => {
                        shops_failed += 1;
                        tracing::warn!("dropping shop {shop_id}: {e}");
                    }
                }
            }
        }

        tracing::info!(
            "extraction finished: {} links from {} shops ({} dropped)",
            merged.len(),
            shops_seen,
            shops_failed
        );

        merged
    }
}
