//! Runs the selected phases in order and stops at the first failure.

use seed_populate::{
    CarsSummary, EngagementSummary, MarketPriceSummary, ReportsSummary, SeedError, SeedStore,
    Seeder, UsersSummary,
};
use thiserror::Error;
use tracing::{error, info};

use crate::phase::Phase;

#[derive(Error, Debug)]
#[error("{phase} phase failed: {source}")]
pub struct PhaseError {
    pub phase: Phase,
    #[source]
    pub source: SeedError,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhaseSummary {
    Users(UsersSummary),
    Cars(CarsSummary),
    MarketPrice(MarketPriceSummary),
    Reports(ReportsSummary),
    Favorites(EngagementSummary),
    RecentViews(EngagementSummary),
}

impl PhaseSummary {
    pub fn phase(&self) -> Phase {
        match self {
            PhaseSummary::Users(_) => Phase::Users,
            PhaseSummary::Cars(_) => Phase::Cars,
            PhaseSummary::MarketPrice(_) => Phase::MarketPrice,
            PhaseSummary::Reports(_) => Phase::Reports,
            PhaseSummary::Favorites(_) => Phase::Favorites,
            PhaseSummary::RecentViews(_) => Phase::RecentViews,
        }
    }
}

/// Summaries of the phases that ran, in run order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub phases: Vec<PhaseSummary>,
}

impl RunSummary {
    pub fn ran(&self) -> Vec<Phase> {
        self.phases.iter().map(PhaseSummary::phase).collect()
    }
}

async fn run_phase<S: SeedStore>(
    seeder: &mut Seeder<S>,
    phase: Phase,
) -> Result<PhaseSummary, SeedError> {
    Ok(match phase {
        Phase::Users => PhaseSummary::Users(seeder.seed_users().await?),
        Phase::Cars => PhaseSummary::Cars(seeder.seed_cars().await?),
        Phase::MarketPrice => PhaseSummary::MarketPrice(seeder.seed_market_prices().await?),
        Phase::Reports => PhaseSummary::Reports(seeder.seed_reports().await?),
        Phase::Favorites => PhaseSummary::Favorites(seeder.seed_favorites().await?),
        Phase::RecentViews => PhaseSummary::RecentViews(seeder.seed_recent_views().await?),
    })
}

/// Run `phases` in dependency order, whatever order they were given in.
pub async fn run_phases<S: SeedStore>(
    seeder: &mut Seeder<S>,
    phases: &[Phase],
) -> Result<RunSummary, PhaseError> {
    let mut summary = RunSummary::default();

    for phase in Phase::ordered(phases) {
        info!("=== Seeding {phase} ===");
        match run_phase(seeder, phase).await {
            Ok(result) => summary.phases.push(result),
            Err(source) => {
                error!("{phase} phase failed: {source}");
                return Err(PhaseError { phase, source });
            }
        }
    }

    info!("Seeding complete ({} phases)", summary.phases.len());
    Ok(summary)
}
