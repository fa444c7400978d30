//! Storage trait the seeding phases write through.
//!
//! Two write policies apply:
//!
//! - **Atomic entity creation**: [`SeedStore::create_account`] writes an
//!   account, its profile, any seller contacts and its session as one unit.
//!   Either every row lands or none does. [`SeedStore::recreate_account`]
//!   extends the same unit to the delete of the account it replaces.
//! - **Best-effort sibling creation**: a car and each of its fuels, colors,
//!   images and inspection are separate writes. A failed sibling leaves the
//!   rows written before it in place.

use async_trait::async_trait;
use market_price::MarketPrice;
use seed_generator::{
    CarImage, InspectionResult, NewAccount, NewCar, NewFavorite, NewRecentView, NewReport,
};

use crate::error::SeedError;

/// Outcome of an upsert batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpsertCounts {
    pub inserted: u64,
    pub updated: u64,
}

impl UpsertCounts {
    pub fn total(&self) -> u64 {
        self.inserted + self.updated
    }
}

/// Storage backend for seeded rows.
///
/// Identifier lists are returned in ascending id order.
#[async_trait]
pub trait SeedStore: Send {
    // Reference data

    async fn province_names(&mut self) -> Result<Vec<String>, SeedError>;
    async fn province_ids(&mut self) -> Result<Vec<i32>, SeedError>;
    async fn user_ids(&mut self) -> Result<Vec<i32>, SeedError>;
    async fn seller_ids(&mut self) -> Result<Vec<i32>, SeedError>;
    async fn buyer_ids(&mut self) -> Result<Vec<i32>, SeedError>;
    async fn active_car_ids(&mut self) -> Result<Vec<i32>, SeedError>;
    /// Lowest admin id, if any admin exists.
    async fn first_admin_id(&mut self) -> Result<Option<i32>, SeedError>;

    // Accounts

    async fn find_user_by_email(&mut self, email: &str) -> Result<Option<i32>, SeedError>;
    async fn has_seller_profile(&mut self, user_id: i32) -> Result<bool, SeedError>;
    /// Atomically create the account, its profile and session. Returns the
    /// new account id.
    async fn create_account(&mut self, account: &NewAccount) -> Result<i32, SeedError>;
    /// Delete `user_id` with everything that cascades from it and create
    /// `account` in its place, as one unit. On failure the old account is
    /// left untouched.
    async fn recreate_account(
        &mut self,
        user_id: i32,
        account: &NewAccount,
    ) -> Result<i32, SeedError>;

    // Cars

    async fn insert_car(&mut self, car: &NewCar) -> Result<i32, SeedError>;
    async fn insert_car_fuel(&mut self, car_id: i32, fuel_type: &str) -> Result<(), SeedError>;
    async fn insert_car_color(
        &mut self,
        car_id: i32,
        color: &str,
        position: i32,
    ) -> Result<(), SeedError>;
    async fn insert_car_image(&mut self, car_id: i32, image: &CarImage) -> Result<(), SeedError>;
    async fn insert_inspection(
        &mut self,
        car_id: i32,
        inspection: &InspectionResult,
    ) -> Result<(), SeedError>;

    // Moderation and engagement

    async fn insert_report(&mut self, report: &NewReport) -> Result<i32, SeedError>;
    /// Returns `false` when the (buyer, car) pair already existed.
    async fn insert_favorite(&mut self, favorite: &NewFavorite) -> Result<bool, SeedError>;
    /// Returns `false` when a view for the same buyer, car and minute exists.
    async fn insert_recent_view(&mut self, view: &NewRecentView) -> Result<bool, SeedError>;

    // Market prices

    /// Insert-or-update every price in one transaction.
    async fn upsert_market_prices(
        &mut self,
        prices: &[MarketPrice],
    ) -> Result<UpsertCounts, SeedError>;
}
