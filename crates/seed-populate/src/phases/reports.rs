use chrono::Utc;
use seed_generator::{ReportContext, ReportTarget};
use tracing::{info, warn};

use crate::error::SeedError;
use crate::seeder::Seeder;
use crate::store::SeedStore;
use crate::summary::ReportsSummary;

impl<S: SeedStore> Seeder<S> {
    /// File `report_count` reports against active cars and sellers.
    ///
    /// Needs accounts, active cars and at least one seller. Reviewed
    /// reports are attributed to the first admin when one exists.
    pub async fn seed_reports(&mut self) -> Result<ReportsSummary, SeedError> {
        let reporters = self.store.user_ids().await?;
        if reporters.is_empty() {
            return Err(SeedError::missing("users", "users"));
        }
        let cars = self.store.active_car_ids().await?;
        if cars.is_empty() {
            return Err(SeedError::missing("cars", "cars"));
        }
        let sellers = self.store.seller_ids().await?;
        if sellers.is_empty() {
            return Err(SeedError::missing("sellers", "users"));
        }
        let admin_id = self.store.first_admin_id().await?;
        if admin_id.is_none() {
            info!("No admin found, reviewed reports will have no reviewer");
        }

        let ctx = ReportContext {
            reporters: &reporters,
            cars: &cars,
            sellers: &sellers,
            admin_id,
        };
        let now = Utc::now();
        let mut summary = ReportsSummary::default();

        for index in 1..=self.options.report_count {
            let report = self.generator.report(&ctx, now)?;

            match self.store.insert_report(&report).await {
                Ok(report_id) => {
                    match report.target {
                        ReportTarget::Car(_) => summary.car_reports += 1,
                        ReportTarget::Seller(_) => summary.seller_reports += 1,
                    }
                    info!(
                        "Created report {index} (ID: {report_id}): {} [{}]",
                        report.topic,
                        report.status.as_str()
                    );
                }
                Err(e) => {
                    warn!("Failed to create report {index}: {e}");
                    summary.failed += 1;
                }
            }
        }

        info!("{summary}");
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use crate::error::SeedError;
    use crate::memory::MemoryStore;
    use crate::phases::testing::{populated, seeder};
    use crate::seeder::SeedOptions;

    fn options(report_count: u32) -> SeedOptions {
        SeedOptions {
            report_count,
            ..SeedOptions::default()
        }
    }

    #[tokio::test]
    async fn test_reports_reference_existing_rows() {
        let store = populated(8, 4).await.with_admin(500);
        let mut seeder = seeder(store, options(40));
        let summary = seeder.seed_reports().await.unwrap();

        assert_eq!(summary.created(), 40);
        assert_eq!(summary.failed, 0);
        assert!(summary.car_reports > 0);
        assert!(summary.seller_reports > 0);

        for report in seeder.store().reports.values() {
            match &report.review {
                None => assert!(report.status.is_pending()),
                Some(review) => {
                    assert!(!report.status.is_pending());
                    assert_eq!(review.admin_id, Some(500));
                    assert!(review.reviewed_at > report.created_at);
                }
            }
        }
    }

    #[tokio::test]
    async fn test_reports_without_users_fail() {
        let mut seeder = seeder(MemoryStore::new(), options(5));
        let err = seeder.seed_reports().await.unwrap_err();

        assert!(matches!(
            err,
            SeedError::MissingPrerequisite {
                missing: "users",
                ..
            }
        ));
        assert_eq!(err.to_string(), "no users found - seed users first");
        assert!(seeder.store().reports.is_empty());
    }

    #[tokio::test]
    async fn test_reports_without_cars_fail() {
        let mut seeder = seeder(crate::phases::testing::provinces(), SeedOptions {
            user_count: 4,
            report_count: 5,
            ..SeedOptions::default()
        });
        seeder.seed_users().await.unwrap();
        let err = seeder.seed_reports().await.unwrap_err();

        assert_eq!(err.to_string(), "no cars found - seed cars first");
        assert!(seeder.store().reports.is_empty());
    }

    #[tokio::test]
    async fn test_reviews_without_admin_have_no_reviewer() {
        let store = populated(4, 2).await;
        let mut seeder = seeder(store, options(30));
        seeder.seed_reports().await.unwrap();

        assert!(seeder
            .store()
            .reports
            .values()
            .filter_map(|r| r.review.as_ref())
            .all(|review| review.admin_id.is_none()));
    }
}
