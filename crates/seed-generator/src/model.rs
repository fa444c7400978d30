//! Rows produced by the generators, ready to be written by a store.
//!
//! These carry no database identifiers of their own. Foreign keys (seller,
//! buyer, car, admin) are filled in from rows already persisted.

use chrono::{DateTime, DurationRound, SecondsFormat, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::inspection::InspectionResult;

// =============================================================================
// Accounts
// =============================================================================

/// Role of a seeded account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Seller,
    Buyer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Seller => "seller",
            Role::Buyer => "buyer",
        }
    }
}

/// A seller contact channel (`seller_contacts`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub contact_type: String,
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SellerProfile {
    pub display_name: String,
    pub about: String,
    pub map_link: Option<String>,
    pub contacts: Vec<Contact>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuyerProfile {
    pub province: Option<String>,
    pub budget_min: i32,
    pub budget_max: i32,
}

/// Exactly one profile per account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Profile {
    Seller(SellerProfile),
    Buyer(BuyerProfile),
}

impl Profile {
    pub fn role(&self) -> Role {
        match self {
            Profile::Seller(_) => Role::Seller,
            Profile::Buyer(_) => Role::Buyer,
        }
    }
}

/// Session issued alongside an account. Its creation time is the account's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSession {
    pub ip_address: String,
    pub user_agent: String,
    pub expires_at: DateTime<Utc>,
}

/// An account with its profile and optional session, written as one unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAccount {
    pub email: String,
    pub username: String,
    pub name: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub profile: Profile,
    pub session: Option<NewSession>,
}

impl NewAccount {
    pub fn role(&self) -> Role {
        self.profile.role()
    }
}

/// Session token for a freshly inserted account.
///
/// The account id is only known after insert, so the token is derived at
/// write time rather than generation time.
pub fn session_token(account_id: i32, created_at: DateTime<Utc>) -> String {
    format!(
        "demo-session-token-{}-{}",
        account_id,
        created_at.to_rfc3339_opts(SecondsFormat::Nanos, true)
    )
}

// =============================================================================
// Vehicles
// =============================================================================

pub const CAR_STATUS_ACTIVE: &str = "active";

/// A `cars` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCar {
    pub seller_id: i32,
    pub body_type_code: String,
    pub transmission_code: String,
    pub drivetrain_code: String,
    pub brand_name: String,
    pub model_name: String,
    pub submodel_name: Option<String>,
    pub chassis_number: String,
    pub year: i32,
    pub mileage: i32,
    pub engine_cc: i32,
    pub seats: i32,
    pub doors: i32,
    pub plate_prefix: String,
    pub plate_number: String,
    pub province_id: Option<i32>,
    pub description: String,
    pub price: i32,
    pub is_flooded: bool,
    pub is_heavily_damaged: bool,
    pub status: String,
    pub condition_rating: i32,
}

/// A car plus everything attached to it.
///
/// Image entries are catalog file names; the writer loads bytes from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehiclePlan {
    pub car: NewCar,
    pub fuel_types: Vec<String>,
    pub colors: Vec<String>,
    pub image_files: Vec<String>,
    pub inspection: InspectionResult,
}

/// A `car_images` row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarImage {
    pub data: Vec<u8>,
    pub mime_type: &'static str,
    pub display_order: i32,
}

impl CarImage {
    pub fn new(file_name: &str, data: Vec<u8>, display_order: i32) -> Self {
        Self {
            data,
            mime_type: image_mime_type(file_name),
            display_order,
        }
    }

    pub fn size(&self) -> i32 {
        i32::try_from(self.data.len()).unwrap_or(i32::MAX)
    }
}

/// `image/png` for `.png` files, `image/jpeg` for everything else.
pub fn image_mime_type(file_name: &str) -> &'static str {
    if file_name.to_ascii_lowercase().ends_with(".png") {
        "image/png"
    } else {
        "image/jpeg"
    }
}

// =============================================================================
// Reports
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Pending,
    Reviewed,
    Resolved,
    Dismissed,
}

impl ReportStatus {
    pub const ALL: [ReportStatus; 4] = [
        ReportStatus::Pending,
        ReportStatus::Reviewed,
        ReportStatus::Resolved,
        ReportStatus::Dismissed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Pending => "pending",
            ReportStatus::Reviewed => "reviewed",
            ReportStatus::Resolved => "resolved",
            ReportStatus::Dismissed => "dismissed",
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, ReportStatus::Pending)
    }
}

/// What a report is about. Exactly one of car or seller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportTarget {
    Car(i32),
    Seller(i32),
}

impl ReportTarget {
    /// Value of the `report_type` column.
    pub fn kind(&self) -> &'static str {
        match self {
            ReportTarget::Car(_) => "car",
            ReportTarget::Seller(_) => "seller",
        }
    }

    pub fn car_id(&self) -> Option<i32> {
        match self {
            ReportTarget::Car(id) => Some(*id),
            ReportTarget::Seller(_) => None,
        }
    }

    pub fn seller_id(&self) -> Option<i32> {
        match self {
            ReportTarget::Seller(id) => Some(*id),
            ReportTarget::Car(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub reviewed_at: DateTime<Utc>,
    pub admin_id: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReport {
    pub reporter_id: i32,
    pub target: ReportTarget,
    pub topic: String,
    pub sub_topics: Vec<String>,
    pub description: String,
    pub status: ReportStatus,
    pub created_at: DateTime<Utc>,
    /// Present iff `status` is not pending.
    pub review: Option<Review>,
}

impl NewReport {
    /// Sub-topics as stored in the JSON `sub_topics` column.
    pub fn sub_topics_json(&self) -> Value {
        Value::from(self.sub_topics.clone())
    }
}

// =============================================================================
// Engagement
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NewFavorite {
    pub buyer_id: i32,
    pub car_id: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NewRecentView {
    pub buyer_id: i32,
    pub car_id: i32,
    pub viewed_at: DateTime<Utc>,
}

impl NewRecentView {
    /// Key under which duplicate views collapse: same buyer, car and minute.
    pub fn minute_key(&self) -> (i32, i32, DateTime<Utc>) {
        (self.buyer_id, self.car_id, truncate_to_minute(self.viewed_at))
    }
}

pub fn truncate_to_minute(ts: DateTime<Utc>) -> DateTime<Utc> {
    ts.duration_trunc(TimeDelta::minutes(1)).unwrap_or(ts)
}
