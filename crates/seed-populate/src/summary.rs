//! Per-phase totals.

use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsersSummary {
    pub sellers: u32,
    pub buyers: u32,
    pub failed: u32,
}

impl UsersSummary {
    pub fn created(&self) -> u32 {
        self.sellers + self.buyers
    }
}

impl fmt::Display for UsersSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Total Users: {} (Sellers: {}, Buyers: {}, Failed: {})",
            self.created(),
            self.sellers,
            self.buyers,
            self.failed
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CarsSummary {
    pub seller_id: i32,
    /// Cars written with every sub-record.
    pub created: u32,
    /// Cars whose row exists but a later sub-record failed.
    pub incomplete: u32,
    /// Cars whose row could not be written.
    pub failed: u32,
    pub images: u32,
    pub images_skipped: u32,
}

impl fmt::Display for CarsSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Total Cars: {} (Seller: {}, Incomplete: {}, Failed: {}, Images: {}, Images skipped: {})",
            self.created, self.seller_id, self.incomplete, self.failed, self.images, self.images_skipped
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportsSummary {
    pub car_reports: u32,
    pub seller_reports: u32,
    pub failed: u32,
}

impl ReportsSummary {
    pub fn created(&self) -> u32 {
        self.car_reports + self.seller_reports
    }
}

impl fmt::Display for ReportsSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Total Reports: {} (Car: {}, Seller: {}, Failed: {})",
            self.created(),
            self.car_reports,
            self.seller_reports,
            self.failed
        )
    }
}

/// Totals for insert-or-ignore phases.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngagementSummary {
    pub buyers: u32,
    pub inserted: u32,
    /// Rows that already existed.
    pub ignored: u32,
    pub failed: u32,
}

impl fmt::Display for EngagementSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} inserted for {} buyers (Ignored: {}, Failed: {})",
            self.inserted, self.buyers, self.ignored, self.failed
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarketPriceSummary {
    pub path: PathBuf,
    pub inserted: u64,
    pub updated: u64,
}

impl fmt::Display for MarketPriceSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Market prices from {}: Inserted: {}, Updated: {}",
            self.path.display(),
            self.inserted,
            self.updated
        )
    }
}
