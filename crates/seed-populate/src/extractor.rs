//! Market price import: document path resolution and the extractor seam.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::SeedError;
use crate::store::{SeedStore, UpsertCounts};

/// Candidate document paths, container mount first.
pub const PRICE_LIST_PATHS: &[&str] = &[
    "/app/tests/price2568.pdf",
    "../../backend/tests/price2568.pdf",
];

/// First existing candidate. An explicit override is used as-is when it
/// exists and is reported as the only tried path otherwise.
pub fn resolve_price_list(override_path: Option<&Path>) -> Result<PathBuf, SeedError> {
    let candidates: Vec<PathBuf> = match override_path {
        Some(path) => vec![path.to_path_buf()],
        None => PRICE_LIST_PATHS.iter().map(PathBuf::from).collect(),
    };

    let found = candidates.iter().find(|path| path.exists()).cloned();
    found.ok_or(SeedError::DocumentNotFound(candidates))
}

/// Imports a price document into the store.
#[async_trait]
pub trait MarketPriceExtractor: Send + Sync {
    async fn import(
        &self,
        path: &Path,
        store: &mut dyn SeedStore,
    ) -> Result<UpsertCounts, SeedError>;
}

/// Extracts with `pdftotext` and the price-list parser, then upserts.
#[derive(Debug, Default)]
pub struct PdfTextExtractor;

#[async_trait]
impl MarketPriceExtractor for PdfTextExtractor {
    async fn import(
        &self,
        path: &Path,
        store: &mut dyn SeedStore,
    ) -> Result<UpsertCounts, SeedError> {
        let list = market_price::extract_price_list(path).await?;
        if list.prices.is_empty() {
            info!("No market price records found in {}", path.display());
            return Ok(UpsertCounts::default());
        }
        store.upsert_market_prices(&list.prices).await
    }
}
