//! Reference catalog for the CarJai demo data seeder.
//!
//! The generators never hard-code a categorical distribution. Brands and
//! their models, submodels, body type seat/door options, color and fuel
//! pools, report topics and every numeric range come from a versioned YAML
//! catalog:
//!
//! ```text
//! reference/carjai_v1.yaml  (embedded)     --catalog <path>  (override)
//!            │                                     │
//!            └──────────────┬──────────────────────┘
//!                           ▼
//!                   Catalog::validate()
//!                           │
//!                           ▼
//!                   seed-generator
//! ```
//!
//! # Example
//!
//! ```rust
//! use seed_catalog::Catalog;
//!
//! let catalog = Catalog::builtin().unwrap();
//! assert_eq!(catalog.vehicles.seat_options("VAN"), vec![7, 8, 9, 12]);
//! ```

pub mod catalog;

pub use catalog::{
    AccountCatalog, BodyType, Catalog, CatalogError, EngagementCatalog, IntRange, ReportCatalog,
    TopicPool, VehicleCatalog, VehicleRanges, CATALOG_VERSION,
};
