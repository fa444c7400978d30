use chrono::Utc;
use seed_generator::{VehiclePlan, DEMO_SELLER_EMAIL};
use std::path::Path;
use tracing::{info, warn};

use crate::error::SeedError;
use crate::images::{load_images, resolve_images_dir};
use crate::seeder::Seeder;
use crate::store::SeedStore;
use crate::summary::CarsSummary;

impl<S: SeedStore> Seeder<S> {
    /// Id of the demo seller, creating it when missing.
    ///
    /// An account with the demo email but no seller profile is left over
    /// from an interrupted run; it is deleted and created again.
    pub async fn ensure_demo_seller(&mut self) -> Result<i32, SeedError> {
        let existing = self.store.find_user_by_email(DEMO_SELLER_EMAIL).await?;
        if let Some(user_id) = existing {
            if self.store.has_seller_profile(user_id).await? {
                info!("Demo seller already exists (ID: {user_id})");
                return Ok(user_id);
            }
        }

        let password_hash = self.hasher.hash(&self.options.password)?;
        let account = self.generator.demo_seller(&password_hash, Utc::now());
        let user_id = match existing {
            Some(stale_id) => {
                warn!("Demo seller {stale_id} has no seller profile, recreating it");
                self.store.recreate_account(stale_id, &account).await?
            }
            None => self.store.create_account(&account).await?,
        };
        info!("Created demo seller (ID: {user_id})");
        Ok(user_id)
    }

    /// List `car_count` cars under the demo seller.
    pub async fn seed_cars(&mut self) -> Result<CarsSummary, SeedError> {
        let seller_id = self.ensure_demo_seller().await?;
        let provinces = self.store.province_ids().await?;
        info!("Loaded {} provinces", provinces.len());

        let images_dir = resolve_images_dir(self.options.images_dir.as_deref());
        info!("Reading car images from {}", images_dir.display());

        let mut summary = CarsSummary {
            seller_id,
            ..CarsSummary::default()
        };

        for index in 1..=self.options.car_count {
            let plan = self.generator.vehicle(seller_id, index, &provinces)?;

            let car_id = match self.store.insert_car(&plan.car).await {
                Ok(car_id) => car_id,
                Err(e) => {
                    warn!("Failed to create car {index}: {e}");
                    summary.failed += 1;
                    continue;
                }
            };

            match self.write_car_details(car_id, &plan, &images_dir).await {
                Ok((attached, skipped)) => {
                    summary.created += 1;
                    summary.images += attached;
                    summary.images_skipped += skipped;
                    info!(
                        "Created car {index} (ID: {car_id}): {} {} {}",
                        plan.car.year, plan.car.brand_name, plan.car.model_name
                    );
                }
                Err(e) => {
                    warn!("Car {index} (ID: {car_id}) is incomplete: {e}");
                    summary.incomplete += 1;
                }
            }
        }

        info!("{summary}");
        Ok(summary)
    }

    /// Fuels, colors, images and inspection in that order. The first
    /// failure stops the remaining writes for this car.
    async fn write_car_details(
        &mut self,
        car_id: i32,
        plan: &VehiclePlan,
        images_dir: &Path,
    ) -> Result<(u32, u32), SeedError> {
        for fuel_type in &plan.fuel_types {
            self.store.insert_car_fuel(car_id, fuel_type).await?;
        }
        for (position, color) in plan.colors.iter().enumerate() {
            self.store
                .insert_car_color(car_id, color, position as i32)
                .await?;
        }

        let (images, skipped) = load_images(images_dir, &plan.image_files).await;
        for image in &images {
            self.store.insert_car_image(car_id, image).await?;
        }

        self.store.insert_inspection(car_id, &plan.inspection).await?;
        Ok((images.len() as u32, skipped as u32))
    }
}

#[cfg(test)]
mod tests {
    use crate::error::SeedError;
    use crate::memory::MemoryStore;
    use crate::phases::testing::{provinces, seeder};
    use crate::seeder::SeedOptions;
    use crate::store::SeedStore;
    use seed_generator::DEMO_SELLER_EMAIL;
    use std::path::PathBuf;

    fn options(car_count: u32, images_dir: PathBuf) -> SeedOptions {
        SeedOptions {
            car_count,
            images_dir: Some(images_dir),
            ..SeedOptions::default()
        }
    }

    fn image_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for name in ["alphard.jpg", "audi.png", "bmw.png", "benz.png", "fortuner.png"] {
            std::fs::write(dir.path().join(name), b"\x89PNG fake").unwrap();
        }
        dir
    }

    #[tokio::test]
    async fn test_cars_are_listed_under_demo_seller() {
        let dir = image_dir();
        let mut seeder = seeder(provinces(), options(5, dir.path().to_path_buf()));
        let summary = seeder.seed_cars().await.unwrap();

        assert_eq!(summary.created, 5);
        assert_eq!(summary.failed, 0);
        assert_eq!(summary.incomplete, 0);

        let store = seeder.store();
        assert_eq!(store.users_with_email(DEMO_SELLER_EMAIL), 1);
        assert_eq!(store.cars.len(), 5);
        assert!(store.cars.values().all(|c| c.seller_id == summary.seller_id));
        assert!(store.cars.values().all(|c| c.status == "active"));
        assert_eq!(store.inspections.len(), 5);
        assert_eq!(store.car_images.len() as u32, summary.images);
        assert!(summary.images_skipped > 0);

        for car_id in store.cars.keys() {
            let fuels = store.car_fuels.iter().filter(|(id, _)| id == car_id).count();
            assert!((1..=2).contains(&fuels));
            let colors: Vec<i32> = store
                .car_colors
                .iter()
                .filter(|(id, _, _)| id == car_id)
                .map(|(_, _, position)| *position)
                .collect();
            assert_eq!(colors, (0..colors.len() as i32).collect::<Vec<_>>());
        }
    }

    #[tokio::test]
    async fn test_existing_demo_seller_is_reused() {
        let dir = image_dir();
        let mut seeder = seeder(provinces(), options(2, dir.path().to_path_buf()));
        let first = seeder.ensure_demo_seller().await.unwrap();
        let second = seeder.ensure_demo_seller().await.unwrap();

        assert_eq!(first, second);
        assert_eq!(seeder.store().users_with_email(DEMO_SELLER_EMAIL), 1);
    }

    #[tokio::test]
    async fn test_demo_seller_without_profile_is_recreated() {
        let mut store = provinces();
        let stale = seed_generator::generators::demo_seller("old", chrono::Utc::now());
        let stale_id = store.create_account(&stale).await.unwrap();
        store.sellers.remove(&stale_id);

        let dir = image_dir();
        let mut seeder = seeder(store, options(1, dir.path().to_path_buf()));
        let seller_id = seeder.ensure_demo_seller().await.unwrap();

        assert_ne!(seller_id, stale_id);
        let store = seeder.store();
        assert_eq!(store.users_with_email(DEMO_SELLER_EMAIL), 1);
        assert!(!store.users.contains_key(&stale_id));
        let profile = &store.sellers[&seller_id];
        assert_eq!(profile.contacts.len(), 2);
    }

    #[tokio::test]
    async fn test_failed_demo_seller_recreate_keeps_old_account() {
        let mut store = provinces();
        let stale = seed_generator::generators::demo_seller("old", chrono::Utc::now());
        let stale_id = store.create_account(&stale).await.unwrap();
        store.sellers.remove(&stale_id);
        store.reject_writes_to("sellers");

        let dir = image_dir();
        let mut seeder = seeder(store, options(1, dir.path().to_path_buf()));
        let err = seeder.ensure_demo_seller().await.unwrap_err();
        assert!(matches!(err, SeedError::Rejected("sellers")));

        let store = seeder.store();
        assert_eq!(store.users_with_email(DEMO_SELLER_EMAIL), 1);
        assert_eq!(store.users[&stale_id].password_hash, "old");
        assert!(store.sellers.is_empty());
    }

    #[tokio::test]
    async fn test_failed_sub_record_keeps_car_row() {
        let dir = image_dir();
        let mut store = provinces();
        store.reject_writes_to("car_colors");
        let mut seeder = seeder(store, options(3, dir.path().to_path_buf()));
        let summary = seeder.seed_cars().await.unwrap();

        assert_eq!(summary.created, 0);
        assert_eq!(summary.incomplete, 3);
        let store = seeder.store();
        assert_eq!(store.cars.len(), 3);
        assert!(!store.car_fuels.is_empty());
        assert!(store.car_images.is_empty());
        assert!(store.inspections.is_empty());
    }

    #[tokio::test]
    async fn test_rejected_car_rows_are_counted_and_skipped() {
        let dir = image_dir();
        let mut store = MemoryStore::new();
        store.reject_writes_to("cars");
        let mut seeder = seeder(store, options(4, dir.path().to_path_buf()));
        let summary = seeder.seed_cars().await.unwrap();

        assert_eq!(summary.failed, 4);
        assert!(seeder.store().cars.is_empty());
    }

    #[tokio::test]
    async fn test_rerun_skips_duplicate_chassis() {
        let dir = image_dir();
        let mut seeder = seeder(provinces(), options(3, dir.path().to_path_buf()));
        seeder.seed_cars().await.unwrap();
        let before = seeder.store().cars.len();
        let second = seeder.seed_cars().await.unwrap();

        assert_eq!(second.created + second.failed, 3);
        assert_eq!(seeder.store().cars.len() as u32, before as u32 + second.created);
    }
}
