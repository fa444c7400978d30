//! Phase identities, their fixed order and the CLI selectors.

use clap::Args;
use std::fmt;

/// Seeding phases in dependency order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    Users,
    Cars,
    MarketPrice,
    Reports,
    Favorites,
    RecentViews,
}

impl Phase {
    /// Every phase, in the order they run.
    pub const ORDER: [Phase; 6] = [
        Phase::Users,
        Phase::Cars,
        Phase::MarketPrice,
        Phase::Reports,
        Phase::Favorites,
        Phase::RecentViews,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Phase::Users => "Users",
            Phase::Cars => "Cars",
            Phase::MarketPrice => "Market Prices",
            Phase::Reports => "Reports",
            Phase::Favorites => "Favorites",
            Phase::RecentViews => "Recent Views",
        }
    }

    /// Distinct phases of `requested`, reordered to run order.
    pub fn ordered(requested: &[Phase]) -> Vec<Phase> {
        Phase::ORDER
            .into_iter()
            .filter(|phase| requested.contains(phase))
            .collect()
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Phase selectors
#[derive(Args, Clone, Debug, Default)]
pub struct PhaseFlags {
    /// Seed everything (users, cars, market prices, reports, favorites, recent views)
    #[arg(long)]
    pub all: bool,

    /// Seed demo users (sellers and buyers)
    #[arg(long)]
    pub users: bool,

    /// Seed demo cars under the demo seller
    #[arg(long)]
    pub cars: bool,

    /// Seed moderation reports
    #[arg(long)]
    pub reports: bool,

    /// Seed buyer favorites
    #[arg(long)]
    pub favorites: bool,

    /// Seed buyer recent views
    #[arg(long)]
    pub recent_views: bool,

    /// Import market prices from the price list PDF
    #[arg(long)]
    pub market_price: bool,
}

impl PhaseFlags {
    /// Selected phases in run order. Empty when no selector was given.
    pub fn selection(&self) -> Vec<Phase> {
        if self.all {
            return Phase::ORDER.to_vec();
        }

        let mut requested = Vec::new();
        if self.users {
            requested.push(Phase::Users);
        }
        if self.cars {
            requested.push(Phase::Cars);
        }
        if self.reports {
            requested.push(Phase::Reports);
        }
        if self.favorites {
            requested.push(Phase::Favorites);
        }
        if self.recent_views {
            requested.push(Phase::RecentViews);
        }
        if self.market_price {
            requested.push(Phase::MarketPrice);
        }
        Phase::ordered(&requested)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_selects_every_phase_in_order() {
        let flags = PhaseFlags {
            all: true,
            users: true,
            ..PhaseFlags::default()
        };
        assert_eq!(flags.selection(), Phase::ORDER.to_vec());
    }

    #[test]
    fn test_subset_runs_in_dependency_order() {
        let flags = PhaseFlags {
            recent_views: true,
            market_price: true,
            users: true,
            ..PhaseFlags::default()
        };
        assert_eq!(
            flags.selection(),
            vec![Phase::Users, Phase::MarketPrice, Phase::RecentViews]
        );
    }

    #[test]
    fn test_no_selector_is_empty() {
        assert!(PhaseFlags::default().selection().is_empty());
    }

    #[test]
    fn test_ordered_drops_duplicates() {
        let phases = Phase::ordered(&[Phase::Reports, Phase::Cars, Phase::Reports]);
        assert_eq!(phases, vec![Phase::Cars, Phase::Reports]);
    }
}
