//! Row generators for the CarJai demo data seeder.
//!
//! The [`SeedGenerator`] owns a validated [`seed_catalog::Catalog`] and a
//! seeded RNG. Every draw goes through that RNG, so a run can be replayed by
//! passing the same seed.
//!
//! # Architecture
//!
//! ```text
//!   Catalog (YAML) + seed
//!            │
//!            ▼
//!   ┌──────────────────┐
//!   │  SeedGenerator   │
//!   │  - catalog       │
//!   │  - rng (StdRng)  │
//!   └────────┬─────────┘
//!            │
//!            ▼
//!   NewAccount / VehiclePlan / NewReport / NewFavorite / NewRecentView
//! ```
//!
//! Generated rows carry no database ids of their own; the writer supplies
//! foreign keys from rows already persisted.
//!
//! # Example
//!
//! ```rust
//! use chrono::Utc;
//! use seed_catalog::Catalog;
//! use seed_generator::SeedGenerator;
//!
//! let mut generator = SeedGenerator::new(Catalog::builtin().unwrap(), 42);
//! let plan = generator.vehicle(1, 1, &[]).unwrap();
//! assert!(plan.car.chassis_number.starts_with("DEMO"));
//!
//! let account = generator.account(4, &[], "hash", Utc::now());
//! assert_eq!(account.email, "seller4@demo.com");
//! ```

pub mod generator;
pub mod generators;
pub mod inspection;
pub mod model;
pub mod random;

pub use generator::{GeneratorError, SeedGenerator};
pub use generators::account::DEMO_SELLER_EMAIL;
pub use generators::ReportContext;
pub use inspection::{InspectionCheck, InspectionResult, INSPECTION_STATION};
pub use model::{
    session_token, BuyerProfile, CarImage, Contact, NewAccount, NewCar, NewFavorite,
    NewRecentView, NewReport, NewSession, Profile, ReportStatus, ReportTarget, Review, Role,
    SellerProfile, VehiclePlan,
};
