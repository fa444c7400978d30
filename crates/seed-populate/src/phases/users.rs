use chrono::Utc;
use seed_generator::Profile;
use tracing::{info, warn};

use crate::error::SeedError;
use crate::seeder::Seeder;
use crate::store::SeedStore;
use crate::summary::UsersSummary;

impl<S: SeedStore> Seeder<S> {
    /// Create `user_count` demo accounts. Every account shares one password
    /// hash; an account that fails to write is logged and skipped.
    pub async fn seed_users(&mut self) -> Result<UsersSummary, SeedError> {
        let password_hash = self.hasher.hash(&self.options.password)?;
        let provinces = self.store.province_names().await?;
        info!("Loaded {} provinces", provinces.len());

        let now = Utc::now();
        let mut summary = UsersSummary::default();

        for index in 1..=self.options.user_count {
            let account = self
                .generator
                .account(index, &provinces, &password_hash, now);

            match self.store.create_account(&account).await {
                Ok(user_id) => {
                    match account.profile {
                        Profile::Seller(_) => summary.sellers += 1,
                        Profile::Buyer(_) => summary.buyers += 1,
                    }
                    info!("Created {} (ID: {user_id})", account.username);
                }
                Err(e) => {
                    warn!("Failed to create {}: {e}", account.username);
                    summary.failed += 1;
                }
            }
        }

        info!("{summary}");
        Ok(summary)
    }
}
