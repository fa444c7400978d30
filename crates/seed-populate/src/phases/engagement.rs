use chrono::Utc;
use tracing::{info, warn};

use crate::error::SeedError;
use crate::seeder::Seeder;
use crate::store::SeedStore;
use crate::summary::EngagementSummary;

impl<S: SeedStore> Seeder<S> {
    async fn engagement_inputs(&mut self) -> Result<(Vec<i32>, Vec<i32>), SeedError> {
        let buyers = self.store.buyer_ids().await?;
        if buyers.is_empty() {
            return Err(SeedError::missing("buyers", "users"));
        }
        let cars = self.store.active_car_ids().await?;
        if cars.is_empty() {
            return Err(SeedError::missing("cars", "cars"));
        }
        Ok((buyers, cars))
    }

    /// Give every buyer a handful of favorite cars. Pairs that already
    /// exist are left alone.
    pub async fn seed_favorites(&mut self) -> Result<EngagementSummary, SeedError> {
        let (buyers, cars) = self.engagement_inputs().await?;
        let now = Utc::now();
        let mut summary = EngagementSummary {
            buyers: buyers.len() as u32,
            ..EngagementSummary::default()
        };

        for buyer_id in buyers {
            for favorite in self.generator.favorites(buyer_id, &cars, now) {
                match self.store.insert_favorite(&favorite).await {
                    Ok(true) => summary.inserted += 1,
                    Ok(false) => summary.ignored += 1,
                    Err(e) => {
                        warn!(
                            "Failed to add favorite (buyer {buyer_id}, car {}): {e}",
                            favorite.car_id
                        );
                        summary.failed += 1;
                    }
                }
            }
        }

        info!("Favorites: {summary}");
        Ok(summary)
    }

    /// Record view history for every buyer, including repeat visits.
    /// Views landing in an already recorded minute are ignored.
    pub async fn seed_recent_views(&mut self) -> Result<EngagementSummary, SeedError> {
        let (buyers, cars) = self.engagement_inputs().await?;
        let now = Utc::now();
        let mut summary = EngagementSummary {
            buyers: buyers.len() as u32,
            ..EngagementSummary::default()
        };

        for buyer_id in buyers {
            for view in self.generator.recent_views(buyer_id, &cars, now) {
                match self.store.insert_recent_view(&view).await {
                    Ok(true) => summary.inserted += 1,
                    Ok(false) => summary.ignored += 1,
                    Err(e) => {
                        warn!(
                            "Failed to add recent view (buyer {buyer_id}, car {}): {e}",
                            view.car_id
                        );
                        summary.failed += 1;
                    }
                }
            }
        }

        info!("Recent views: {summary}");
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use crate::phases::testing::{populated, provinces, seeder};
    use crate::seeder::SeedOptions;
    use std::collections::HashSet;

    #[tokio::test]
    async fn test_favorites_only_for_buyers() {
        let store = populated(8, 6).await;
        let mut seeder = seeder(store, SeedOptions::default());
        let summary = seeder.seed_favorites().await.unwrap();

        assert_eq!(summary.buyers, 6);
        assert!(summary.inserted > 0);
        let store = seeder.store();
        assert_eq!(store.favorites.len() as u32, summary.inserted);
        assert!(store
            .favorites
            .keys()
            .all(|(buyer, car)| store.buyers.contains_key(buyer) && store.cars.contains_key(car)));
    }

    #[tokio::test]
    async fn test_favorites_rerun_adds_no_duplicates() {
        let store = populated(8, 3).await;
        let mut seeder = seeder(store, SeedOptions::default());
        seeder.seed_favorites().await.unwrap();
        let second = seeder.seed_favorites().await.unwrap();

        let store = seeder.store();
        let pairs: HashSet<_> = store.favorites.keys().collect();
        assert_eq!(pairs.len(), store.favorites.len());
        // Three cars and at least two favorites each: most pairs repeat.
        assert!(second.ignored > 0);
        assert_eq!(second.failed, 0);
    }

    #[tokio::test]
    async fn test_recent_views_are_unique_per_minute() {
        let store = populated(8, 5).await;
        let mut seeder = seeder(store, SeedOptions::default());
        seeder.seed_recent_views().await.unwrap();
        seeder.seed_recent_views().await.unwrap();

        let store = seeder.store();
        let keys: HashSet<_> = store.recent_views.iter().map(|v| v.minute_key()).collect();
        assert_eq!(keys.len(), store.recent_views.len());
        assert!(store.recent_views.len() >= 6 * 2);
    }

    #[tokio::test]
    async fn test_engagement_without_buyers_fails() {
        let mut seeder = seeder(provinces(), SeedOptions::default());
        let err = seeder.seed_favorites().await.unwrap_err();
        assert_eq!(err.to_string(), "no buyers found - seed users first");

        let err = seeder.seed_recent_views().await.unwrap_err();
        assert_eq!(err.to_string(), "no buyers found - seed users first");
    }
}
