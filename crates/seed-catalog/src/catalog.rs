//! Reference catalog definitions.
//!
//! The catalog is the single source for every categorical pool and numeric
//! range the generators draw from. It is deserialized from YAML, validated
//! once, and then only read.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Catalog format version understood by this crate.
pub const CATALOG_VERSION: u32 = 1;

/// Upper bound for any backdating window, in days.
pub const MAX_BACKDATE_DAYS: i64 = 3650;
/// Upper bound for the delay between a report and its review, in hours.
pub const MAX_REVIEW_DELAY_HOURS: i64 = 24 * 365;
/// Upper bound for the gap between repeat views, in minutes.
pub const MAX_REPEAT_GAP_MINUTES: i64 = 24 * 60;
/// Upper bound for any per-item count drawn from the catalog.
pub const MAX_COUNT: i64 = 1000;

/// The catalog shipped with the seeder.
const BUILTIN_CATALOG: &str = include_str!("../reference/carjai_v1.yaml");

// ============================================================================
// Error Types
// ============================================================================

/// Error type for catalog operations.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Error reading catalog file
    #[error("Failed to read catalog file: {0}")]
    IoError(#[from] std::io::Error),

    /// Error parsing YAML
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Catalog written for another format version
    #[error("Unsupported catalog version {found} (expected {CATALOG_VERSION})")]
    UnsupportedVersion { found: u32 },

    /// A pool the generators draw from is empty
    #[error("Catalog pool '{0}' is empty")]
    EmptyPool(String),

    /// A range has min > max
    #[error("Catalog range '{name}' is inverted ({min} > {max})")]
    InvertedRange { name: String, min: i64, max: i64 },

    /// A value below the smallest value the generators accept
    #[error("Catalog value '{name}' must be at least {minimum}, got {value}")]
    BelowMinimum { name: String, minimum: i64, value: i64 },

    /// A value above the largest value the generators accept
    #[error("Catalog value '{name}' must be at most {maximum}, got {value}")]
    AboveMaximum { name: String, maximum: i64, value: i64 },

    /// A pool smaller than the number of distinct draws required from it
    #[error("Catalog pool '{name}' has {len} entries, needs at least {required}")]
    PoolTooSmall { name: String, len: usize, required: i64 },

    /// A probability outside [0, 1]
    #[error("Catalog probability '{name}' must be within [0, 1], got {value}")]
    InvalidProbability { name: String, value: f64 },
}

// ============================================================================
// Shared Types
// ============================================================================

/// Inclusive integer range.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct IntRange {
    pub min: i64,
    pub max: i64,
}

impl IntRange {
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    /// Whether `value` lies inside the range (bounds included).
    pub fn contains(&self, value: i64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    fn check(&self, name: &str) -> Result<(), CatalogError> {
        if self.min > self.max {
            return Err(CatalogError::InvertedRange {
                name: name.to_string(),
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

// ============================================================================
// Accounts
// ============================================================================

/// Settings for generated accounts and buyer profiles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountCatalog {
    pub email_domain: String,
    /// Every `seller_every`-th account (1-based) is a seller.
    pub seller_every: u32,
    pub backdate_days: i64,
    pub budget_min: IntRange,
    /// Smallest allowed distance between budget min and max.
    pub budget_gap: i64,
    pub budget_ceiling: i64,
}

// ============================================================================
// Vehicles
// ============================================================================

/// Numeric ranges for vehicle attributes and sub-record counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleRanges {
    pub year: IntRange,
    pub mileage: IntRange,
    pub price_thousands: IntRange,
    pub engine_cc: IntRange,
    pub condition: IntRange,
    pub plate_number: IntRange,
    pub fuel_count: IntRange,
    pub color_count: IntRange,
    pub image_count: IntRange,
}

/// Seat and door options for one body type code.
///
/// An empty list means "use the catalog default".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BodyType {
    pub code: String,
    #[serde(default)]
    pub seats: Vec<i32>,
    #[serde(default)]
    pub doors: Vec<i32>,
}

/// Everything the vehicle generator draws from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleCatalog {
    pub ranges: VehicleRanges,
    pub body_types: Vec<BodyType>,
    pub default_seats: i32,
    pub default_doors: i32,
    pub transmissions: Vec<String>,
    pub drivetrains: Vec<String>,
    pub fuel_types: Vec<String>,
    pub colors: Vec<String>,
    pub plate_prefixes: Vec<String>,
    /// Brand -> models. Ordered so a seeded run is reproducible.
    pub brands: BTreeMap<String, Vec<String>>,
    /// Model -> submodels. Models without an entry have no submodel.
    #[serde(default)]
    pub submodels: BTreeMap<String, Vec<String>>,
    pub image_files: Vec<String>,
}

impl VehicleCatalog {
    /// Look up the body type entry for `code`.
    pub fn body_type(&self, code: &str) -> Option<&BodyType> {
        self.body_types.iter().find(|b| b.code == code)
    }

    /// Seat options for a body type, falling back to the default.
    pub fn seat_options(&self, code: &str) -> Vec<i32> {
        match self.body_type(code) {
            Some(body) if !body.seats.is_empty() => body.seats.clone(),
            _ => vec![self.default_seats],
        }
    }

    /// Door options for a body type, falling back to the default.
    pub fn door_options(&self, code: &str) -> Vec<i32> {
        match self.body_type(code) {
            Some(body) if !body.doors.is_empty() => body.doors.clone(),
            _ => vec![self.default_doors],
        }
    }

    /// Submodel pool for a model, if any.
    pub fn submodels_for(&self, model: &str) -> Option<&[String]> {
        self.submodels
            .get(model)
            .map(Vec::as_slice)
            .filter(|pool| !pool.is_empty())
    }
}

// ============================================================================
// Reports
// ============================================================================

/// A report topic with its canned descriptions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TopicPool {
    pub topic: String,
    #[serde(default)]
    pub descriptions: Vec<String>,
}

/// Everything the report generator draws from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportCatalog {
    /// Probability that a report targets a vehicle rather than a seller.
    pub vehicle_share: f64,
    pub sub_topics: Vec<String>,
    pub sub_topic_count: IntRange,
    pub review_delay_hours: IntRange,
    pub vehicle_topics: Vec<TopicPool>,
    pub seller_topics: Vec<TopicPool>,
}

// ============================================================================
// Engagement
// ============================================================================

/// Favorites and recent-view volume per buyer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngagementCatalog {
    pub favorites_per_buyer: IntRange,
    pub views_per_buyer: IntRange,
    pub repeat_views: IntRange,
    pub repeat_gap_minutes: IntRange,
    pub backdate_days: i64,
}

// ============================================================================
// Catalog
// ============================================================================

/// Full reference catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    pub version: u32,
    pub accounts: AccountCatalog,
    pub vehicles: VehicleCatalog,
    pub reports: ReportCatalog,
    pub engagement: EngagementCatalog,
}

impl Catalog {
    /// The catalog embedded in the binary.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_yaml(BUILTIN_CATALOG)
    }

    /// Load and validate a catalog from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse and validate a catalog from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = serde_yaml::from_str(yaml)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Check every invariant the generators rely on, including the count
    /// and time-offset bounds that keep draws and timestamps in range.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.version != CATALOG_VERSION {
            return Err(CatalogError::UnsupportedVersion {
                found: self.version,
            });
        }

        let accounts = &self.accounts;
        if accounts.seller_every == 0 {
            return Err(CatalogError::EmptyPool("accounts.seller_every".into()));
        }
        at_least("accounts.backdate_days", 1, accounts.backdate_days)?;
        at_most("accounts.backdate_days", MAX_BACKDATE_DAYS, accounts.backdate_days)?;
        at_least("accounts.budget_gap", 1, accounts.budget_gap)?;
        accounts.budget_min.check("accounts.budget_min")?;
        IntRange::new(
            accounts.budget_min.max + accounts.budget_gap,
            accounts.budget_ceiling,
        )
        .check("accounts.budget_ceiling")?;

        let vehicles = &self.vehicles;
        let ranges = &vehicles.ranges;
        for (name, range) in [
            ("vehicles.ranges.year", ranges.year),
            ("vehicles.ranges.mileage", ranges.mileage),
            ("vehicles.ranges.price_thousands", ranges.price_thousands),
            ("vehicles.ranges.engine_cc", ranges.engine_cc),
            ("vehicles.ranges.condition", ranges.condition),
            ("vehicles.ranges.plate_number", ranges.plate_number),
            ("vehicles.ranges.fuel_count", ranges.fuel_count),
            ("vehicles.ranges.color_count", ranges.color_count),
            ("vehicles.ranges.image_count", ranges.image_count),
        ] {
            range.check(name)?;
        }
        // Every seeded car carries at least one fuel, one color and six images.
        counted(
            &vehicles.fuel_types,
            "vehicles.fuel_types",
            ranges.fuel_count,
            "vehicles.ranges.fuel_count",
            1,
        )?;
        counted(
            &vehicles.colors,
            "vehicles.colors",
            ranges.color_count,
            "vehicles.ranges.color_count",
            1,
        )?;
        counted(
            &vehicles.image_files,
            "vehicles.image_files",
            ranges.image_count,
            "vehicles.ranges.image_count",
            6,
        )?;
        non_empty("vehicles.body_types", &vehicles.body_types)?;
        non_empty("vehicles.transmissions", &vehicles.transmissions)?;
        non_empty("vehicles.drivetrains", &vehicles.drivetrains)?;
        non_empty("vehicles.fuel_types", &vehicles.fuel_types)?;
        non_empty("vehicles.colors", &vehicles.colors)?;
        non_empty("vehicles.plate_prefixes", &vehicles.plate_prefixes)?;
        non_empty("vehicles.image_files", &vehicles.image_files)?;
        if vehicles.brands.is_empty() {
            return Err(CatalogError::EmptyPool("vehicles.brands".into()));
        }
        for (brand, models) in &vehicles.brands {
            non_empty(&format!("vehicles.brands.{brand}"), models)?;
        }

        let reports = &self.reports;
        if !(0.0..=1.0).contains(&reports.vehicle_share) {
            return Err(CatalogError::InvalidProbability {
                name: "reports.vehicle_share".into(),
                value: reports.vehicle_share,
            });
        }
        reports.sub_topic_count.check("reports.sub_topic_count")?;
        at_least("reports.sub_topic_count.min", 0, reports.sub_topic_count.min)?;
        at_most("reports.sub_topic_count.max", MAX_COUNT, reports.sub_topic_count.max)?;
        reports.review_delay_hours.check("reports.review_delay_hours")?;
        at_least(
            "reports.review_delay_hours.min",
            1,
            reports.review_delay_hours.min,
        )?;
        at_most(
            "reports.review_delay_hours.max",
            MAX_REVIEW_DELAY_HOURS,
            reports.review_delay_hours.max,
        )?;
        non_empty("reports.vehicle_topics", &reports.vehicle_topics)?;
        non_empty("reports.seller_topics", &reports.seller_topics)?;

        let engagement = &self.engagement;
        at_least("engagement.backdate_days", 1, engagement.backdate_days)?;
        at_most("engagement.backdate_days", MAX_BACKDATE_DAYS, engagement.backdate_days)?;
        bounded("engagement.favorites_per_buyer", engagement.favorites_per_buyer, 0, MAX_COUNT)?;
        bounded("engagement.views_per_buyer", engagement.views_per_buyer, 0, MAX_COUNT)?;
        bounded("engagement.repeat_views", engagement.repeat_views, 1, MAX_COUNT)?;
        bounded(
            "engagement.repeat_gap_minutes",
            engagement.repeat_gap_minutes,
            1,
            MAX_REPEAT_GAP_MINUTES,
        )?;

        Ok(())
    }
}

fn at_least(name: &str, minimum: i64, value: i64) -> Result<(), CatalogError> {
    if value < minimum {
        return Err(CatalogError::BelowMinimum {
            name: name.to_string(),
            minimum,
            value,
        });
    }
    Ok(())
}

fn at_most(name: &str, maximum: i64, value: i64) -> Result<(), CatalogError> {
    if value > maximum {
        return Err(CatalogError::AboveMaximum {
            name: name.to_string(),
            maximum,
            value,
        });
    }
    Ok(())
}

/// Ordered range with `minimum <= min` and `max <= maximum`.
fn bounded(name: &str, range: IntRange, minimum: i64, maximum: i64) -> Result<(), CatalogError> {
    range.check(name)?;
    at_least(&format!("{name}.min"), minimum, range.min)?;
    at_most(&format!("{name}.max"), maximum, range.max)
}

/// A count range for distinct draws from `pool`: at least `minimum`, and the
/// pool must hold enough entries to satisfy the smallest draw.
fn counted<T>(
    pool: &[T],
    pool_name: &str,
    count: IntRange,
    count_name: &str,
    minimum: i64,
) -> Result<(), CatalogError> {
    bounded(count_name, count, minimum, MAX_COUNT)?;
    if (pool.len() as i64) < count.min {
        return Err(CatalogError::PoolTooSmall {
            name: pool_name.to_string(),
            len: pool.len(),
            required: count.min,
        });
    }
    Ok(())
}

fn non_empty<T>(name: &str, pool: &[T]) -> Result<(), CatalogError> {
    if pool.is_empty() {
        return Err(CatalogError::EmptyPool(name.to_string()));
    }
    Ok(())
}
