//! Per-entity generators.
//!
//! Each generator is a free function over an explicit RNG and the slice of
//! the catalog it needs. [`crate::SeedGenerator`] wires them to one seeded
//! RNG.

pub mod account;
pub mod engagement;
pub mod report;
pub mod vehicle;

pub use account::{buyer_budget, demo_seller, generate_account, role_for};
pub use engagement::{plan_favorites, plan_recent_views};
pub use report::{describe_report, generate_report, ReportContext};
pub use vehicle::{chassis_number, describe, generate_vehicle};
