//! Phase writers for the CarJai demo data seeder.
//!
//! A [`Seeder`] pairs a [`SeedStore`] with a [`SeedGenerator`](seed_generator::SeedGenerator)
//! and runs one phase per method:
//!
//! | phase          | method                          | needs              |
//! |----------------|---------------------------------|--------------------|
//! | users          | [`Seeder::seed_users`]          | -                  |
//! | cars           | [`Seeder::seed_cars`]           | -                  |
//! | market prices  | [`Seeder::seed_market_prices`]  | price list PDF     |
//! | reports        | [`Seeder::seed_reports`]        | users, cars        |
//! | favorites      | [`Seeder::seed_favorites`]      | buyers, cars       |
//! | recent views   | [`Seeder::seed_recent_views`]   | buyers, cars       |
//!
//! [`PostgreSQLStore`] writes to the CarJai schema; [`MemoryStore`] keeps
//! everything in process and is what the tests run against.
//!
//! ```
//! use seed_catalog::Catalog;
//! use seed_generator::SeedGenerator;
//! use seed_populate::{MemoryStore, SeedOptions, Seeder};
//!
//! # tokio_test::block_on(async {
//! let generator = SeedGenerator::new(Catalog::builtin().unwrap(), 1);
//! let store = MemoryStore::new().with_provinces(["Bangkok"]);
//! let options = SeedOptions { user_count: 4, ..SeedOptions::default() };
//! let mut seeder = Seeder::new(store, generator, options)
//!     .with_hasher(seed_populate::PasswordScheme::Argon2.hasher());
//!
//! let summary = seeder.seed_users().await.unwrap();
//! assert_eq!((summary.sellers, summary.buyers), (1, 3));
//! # });
//! ```

pub mod args;
pub mod credentials;
pub mod error;
pub mod extractor;
pub mod images;
pub mod memory;
mod phases;
pub mod postgresql;
pub mod seeder;
pub mod store;
pub mod summary;

pub use args::SeedArgs;
pub use credentials::{CredentialHasher, PasswordError, PasswordScheme};
pub use error::SeedError;
pub use extractor::{MarketPriceExtractor, PdfTextExtractor};
pub use memory::MemoryStore;
pub use postgresql::PostgreSQLStore;
pub use seeder::{SeedOptions, Seeder};
pub use store::{SeedStore, UpsertCounts};
pub use summary::{
    CarsSummary, EngagementSummary, MarketPriceSummary, ReportsSummary, UsersSummary,
};
