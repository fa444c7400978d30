use tracing::info;

use crate::error::SeedError;
use crate::extractor::resolve_price_list;
use crate::seeder::Seeder;
use crate::store::SeedStore;
use crate::summary::MarketPriceSummary;

impl<S: SeedStore> Seeder<S> {
    /// Import the market price list into `market_price`, updating rows
    /// that already exist for the same brand, model, sub-model and years.
    pub async fn seed_market_prices(&mut self) -> Result<MarketPriceSummary, SeedError> {
        let path = resolve_price_list(self.options.market_price_pdf.as_deref())?;
        info!("Using price list {}", path.display());

        let counts = self.extractor.import(&path, &mut self.store).await?;
        let summary = MarketPriceSummary {
            path,
            inserted: counts.inserted,
            updated: counts.updated,
        };

        info!("{summary}");
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use market_price::parse_price_list;
    use std::path::Path;

    use crate::error::SeedError;
    use crate::extractor::MarketPriceExtractor;
    use crate::memory::MemoryStore;
    use crate::phases::testing::seeder;
    use crate::seeder::SeedOptions;
    use crate::store::{SeedStore, UpsertCounts};

    /// Reads the document as already-extracted text.
    struct TextExtractor;

    #[async_trait]
    impl MarketPriceExtractor for TextExtractor {
        async fn import(
            &self,
            path: &Path,
            store: &mut dyn SeedStore,
        ) -> Result<UpsertCounts, SeedError> {
            let text = tokio::fs::read_to_string(path)
                .await
                .map_err(|e| SeedError::Connection(e.to_string()))?;
            store.upsert_market_prices(&parse_price_list(&text).prices).await
        }
    }

    fn price_text() -> String {
        let mut text = "cover\n\u{c}\n".repeat(7);
        text.push_str("TOYOTA\nCOROLLA ALTIS 1.6 G 2019 - 2022 550,000 - 650,000\n");
        text
    }

    #[tokio::test]
    async fn test_rerun_updates_instead_of_duplicating() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prices.txt");
        std::fs::write(&path, price_text()).unwrap();

        let options = SeedOptions {
            market_price_pdf: Some(path.clone()),
            ..SeedOptions::default()
        };
        let mut seeder =
            seeder(MemoryStore::new(), options).with_extractor(Box::new(TextExtractor));

        let first = seeder.seed_market_prices().await.unwrap();
        let second = seeder.seed_market_prices().await.unwrap();

        assert_eq!(first.path, path);
        assert_eq!((first.inserted, first.updated), (1, 0));
        assert_eq!((second.inserted, second.updated), (0, 1));
        assert_eq!(seeder.store().market_prices.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_document_fails() {
        let options = SeedOptions {
            market_price_pdf: Some("/nonexistent/price2568.pdf".into()),
            ..SeedOptions::default()
        };
        let mut seeder =
            seeder(MemoryStore::new(), options).with_extractor(Box::new(TextExtractor));

        let err = seeder.seed_market_prices().await.unwrap_err();
        assert!(matches!(err, SeedError::DocumentNotFound(_)));
    }
}
