//! CarJai demo data seeder.
//!
//! Populates the CarJai PostgreSQL schema with linked demo data: accounts
//! with sessions, cars with their fuels, colors, images and inspections,
//! market prices, reports, favorites and recent views.
//!
//! Phases always run in dependency order:
//!
//! ```text
//! Users -> Cars -> MarketPrice -> Reports -> Favorites -> RecentViews
//! ```
//!
//! The phase bodies live in [`seed_populate`]; this crate adds the CLI
//! surface, connection settings and the orchestration loop.

pub mod config;
pub mod orchestrator;
pub mod phase;

pub use config::{ConfigError, DatabaseArgs};
pub use orchestrator::{run_phases, PhaseError, PhaseSummary, RunSummary};
pub use phase::{Phase, PhaseFlags};
