//! Round trip against a migrated CarJai database.
//!
//! Run with `POSTGRESQL_TEST_URL=postgres://... cargo test -- --ignored`.

use seed_catalog::Catalog;
use seed_generator::{SeedGenerator, DEMO_SELLER_EMAIL};
use seed_populate::{
    CredentialHasher, PasswordError, PostgreSQLStore, SeedOptions, SeedStore, Seeder,
};

struct PlainHasher;

impl CredentialHasher for PlainHasher {
    fn hash(&self, plaintext: &str) -> Result<String, PasswordError> {
        Ok(format!("plain${plaintext}"))
    }
}

#[tokio::test]
#[ignore]
async fn test_postgresql_seed_round_trip() -> Result<(), Box<dyn std::error::Error>> {
    let url = std::env::var("POSTGRESQL_TEST_URL")?;
    let config: tokio_postgres::Config = url.parse()?;
    let store = PostgreSQLStore::connect(&config).await?;

    let images = tempfile::tempdir()?;
    let options = SeedOptions {
        user_count: 4,
        car_count: 2,
        report_count: 3,
        images_dir: Some(images.path().to_path_buf()),
        ..SeedOptions::default()
    };
    let generator = SeedGenerator::new(Catalog::builtin()?, 2024);
    let mut seeder = Seeder::new(store, generator, options).with_hasher(Box::new(PlainHasher));

    seeder.seed_cars().await?;
    let seller_id = seeder.ensure_demo_seller().await?;
    let found = seeder.store_mut().find_user_by_email(DEMO_SELLER_EMAIL).await?;
    assert_eq!(found, Some(seller_id));

    let cars = seeder.store_mut().active_car_ids().await?;
    assert!(!cars.is_empty());

    seeder.seed_users().await?;
    let favorites = seeder.seed_favorites().await?;
    let again = seeder.seed_favorites().await?;
    assert_eq!(favorites.failed + again.failed, 0);

    Ok(())
}
