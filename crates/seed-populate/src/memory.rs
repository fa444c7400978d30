//! In-memory [`SeedStore`] used by tests and dry runs.
//!
//! Enforces the same uniqueness and reference rules the CarJai schema
//! does, so phase behaviour can be checked without a database. Writes to a
//! table can be refused with [`MemoryStore::reject_writes_to`] to exercise
//! the failure paths.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use market_price::MarketPrice;
use seed_generator::{
    session_token, BuyerProfile, CarImage, InspectionResult, NewAccount, NewCar, NewFavorite,
    NewRecentView, NewReport, Profile, ReportTarget, SellerProfile,
};
use std::collections::{BTreeMap, BTreeSet, HashSet};

use crate::error::SeedError;
use crate::store::{SeedStore, UpsertCounts};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRow {
    pub email: String,
    pub username: String,
    pub name: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRow {
    pub user_id: i32,
    pub token: String,
    pub ip_address: String,
    pub user_agent: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

type PriceKey = (String, String, String, i32, i32);

#[derive(Debug, Default)]
pub struct MemoryStore {
    next_id: i32,
    pub provinces: BTreeMap<i32, Option<String>>,
    pub admins: BTreeSet<i32>,
    pub users: BTreeMap<i32, UserRow>,
    pub sellers: BTreeMap<i32, SellerProfile>,
    pub buyers: BTreeMap<i32, BuyerProfile>,
    pub sessions: Vec<SessionRow>,
    pub cars: BTreeMap<i32, NewCar>,
    pub car_fuels: Vec<(i32, String)>,
    pub car_colors: Vec<(i32, String, i32)>,
    pub car_images: Vec<(i32, CarImage)>,
    pub inspections: BTreeMap<i32, InspectionResult>,
    pub reports: BTreeMap<i32, NewReport>,
    pub favorites: BTreeMap<(i32, i32), DateTime<Utc>>,
    pub recent_views: Vec<NewRecentView>,
    pub market_prices: BTreeMap<PriceKey, (i64, i64)>,
    rejected: HashSet<&'static str>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the `provinces` reference table with ids starting at 1.
    pub fn with_provinces<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for (offset, name) in names.into_iter().enumerate() {
            self.provinces.insert(offset as i32 + 1, Some(name.into()));
        }
        self
    }

    pub fn with_admin(mut self, admin_id: i32) -> Self {
        self.admins.insert(admin_id);
        self
    }

    /// Refuse every subsequent write to `table`.
    pub fn reject_writes_to(&mut self, table: &'static str) {
        self.rejected.insert(table);
    }

    pub fn accept_writes_to(&mut self, table: &'static str) {
        self.rejected.remove(table);
    }

    pub fn users_with_email(&self, email: &str) -> usize {
        self.users.values().filter(|u| u.email == email).count()
    }

    fn check(&self, table: &'static str) -> Result<(), SeedError> {
        if self.rejected.contains(table) {
            Err(SeedError::Rejected(table))
        } else {
            Ok(())
        }
    }

    fn allocate_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    fn require_car(&self, table: &'static str, car_id: i32) -> Result<(), SeedError> {
        if self.cars.contains_key(&car_id) {
            Ok(())
        } else {
            Err(SeedError::MissingReference {
                table,
                referenced: "car",
                id: car_id,
            })
        }
    }

    fn require_user(&self, table: &'static str, user_id: i32) -> Result<(), SeedError> {
        if self.users.contains_key(&user_id) {
            Ok(())
        } else {
            Err(SeedError::MissingReference {
                table,
                referenced: "user",
                id: user_id,
            })
        }
    }

    /// Refuse `account` before any row is touched, so a failure leaves no
    /// partial writes. `replacing` is an account about to be deleted.
    fn validate_account(
        &self,
        account: &NewAccount,
        replacing: Option<i32>,
    ) -> Result<(), SeedError> {
        self.check("users")?;
        match &account.profile {
            Profile::Seller(seller) => {
                self.check("sellers")?;
                if !seller.contacts.is_empty() {
                    self.check("seller_contacts")?;
                }
            }
            Profile::Buyer(_) => self.check("buyers")?,
        }
        if account.session.is_some() {
            self.check("user_sessions")?;
        }
        if self
            .users
            .iter()
            .any(|(id, u)| Some(*id) != replacing && u.email == account.email)
        {
            return Err(SeedError::Duplicate {
                table: "users",
                key: account.email.clone(),
            });
        }
        Ok(())
    }

    fn write_account(&mut self, account: &NewAccount) -> i32 {
        let user_id = self.allocate_id();
        self.users.insert(
            user_id,
            UserRow {
                email: account.email.clone(),
                username: account.username.clone(),
                name: account.name.clone(),
                password_hash: account.password_hash.clone(),
                created_at: account.created_at,
            },
        );
        match &account.profile {
            Profile::Seller(seller) => {
                self.sellers.insert(user_id, seller.clone());
            }
            Profile::Buyer(buyer) => {
                self.buyers.insert(user_id, buyer.clone());
            }
        }
        if let Some(session) = &account.session {
            self.sessions.push(SessionRow {
                user_id,
                token: session_token(user_id, account.created_at),
                ip_address: session.ip_address.clone(),
                user_agent: session.user_agent.clone(),
                expires_at: session.expires_at,
                created_at: account.created_at,
            });
        }

        user_id
    }

    /// Delete a user and everything that cascades from it.
    pub fn remove_user(&mut self, user_id: i32) {
        let owned_cars: Vec<i32> = self
            .cars
            .iter()
            .filter(|(_, car)| car.seller_id == user_id)
            .map(|(id, _)| *id)
            .collect();
        for car_id in owned_cars {
            self.remove_car(car_id);
        }

        self.users.remove(&user_id);
        self.sellers.remove(&user_id);
        self.buyers.remove(&user_id);
        self.sessions.retain(|s| s.user_id != user_id);
        self.favorites.retain(|(buyer, _), _| *buyer != user_id);
        self.recent_views.retain(|v| v.buyer_id != user_id);
        self.reports.retain(|_, r| {
            r.reporter_id != user_id && r.target != ReportTarget::Seller(user_id)
        });
    }

    fn remove_car(&mut self, car_id: i32) {
        self.cars.remove(&car_id);
        self.car_fuels.retain(|(id, _)| *id != car_id);
        self.car_colors.retain(|(id, _, _)| *id != car_id);
        self.car_images.retain(|(id, _)| *id != car_id);
        self.inspections.remove(&car_id);
        self.favorites.retain(|(_, car), _| *car != car_id);
        self.recent_views.retain(|v| v.car_id != car_id);
        self.reports
            .retain(|_, r| r.target != ReportTarget::Car(car_id));
    }
}

#[async_trait]
impl SeedStore for MemoryStore {
    async fn province_names(&mut self) -> Result<Vec<String>, SeedError> {
        Ok(self.provinces.values().flatten().cloned().collect())
    }

    async fn province_ids(&mut self) -> Result<Vec<i32>, SeedError> {
        Ok(self.provinces.keys().copied().collect())
    }

    async fn user_ids(&mut self) -> Result<Vec<i32>, SeedError> {
        Ok(self.users.keys().copied().collect())
    }

    async fn seller_ids(&mut self) -> Result<Vec<i32>, SeedError> {
        Ok(self.sellers.keys().copied().collect())
    }

    async fn buyer_ids(&mut self) -> Result<Vec<i32>, SeedError> {
        Ok(self.buyers.keys().copied().collect())
    }

    async fn active_car_ids(&mut self) -> Result<Vec<i32>, SeedError> {
        Ok(self
            .cars
            .iter()
            .filter(|(_, car)| car.status == "active")
            .map(|(id, _)| *id)
            .collect())
    }

    async fn first_admin_id(&mut self) -> Result<Option<i32>, SeedError> {
        Ok(self.admins.iter().next().copied())
    }

    async fn find_user_by_email(&mut self, email: &str) -> Result<Option<i32>, SeedError> {
        Ok(self
            .users
            .iter()
            .find(|(_, user)| user.email == email)
            .map(|(id, _)| *id))
    }

    async fn has_seller_profile(&mut self, user_id: i32) -> Result<bool, SeedError> {
        Ok(self.sellers.contains_key(&user_id))
    }

    async fn create_account(&mut self, account: &NewAccount) -> Result<i32, SeedError> {
        self.validate_account(account, None)?;
        Ok(self.write_account(account))
    }

    async fn recreate_account(
        &mut self,
        user_id: i32,
        account: &NewAccount,
    ) -> Result<i32, SeedError> {
        self.validate_account(account, Some(user_id))?;
        self.remove_user(user_id);
        Ok(self.write_account(account))
    }

    async fn insert_car(&mut self, car: &NewCar) -> Result<i32, SeedError> {
        self.check("cars")?;
        if !self.sellers.contains_key(&car.seller_id) {
            return Err(SeedError::MissingReference {
                table: "cars",
                referenced: "seller",
                id: car.seller_id,
            });
        }
        if self
            .cars
            .values()
            .any(|c| c.chassis_number == car.chassis_number)
        {
            return Err(SeedError::Duplicate {
                table: "cars",
                key: car.chassis_number.clone(),
            });
        }

        let car_id = self.allocate_id();
        self.cars.insert(car_id, car.clone());
        Ok(car_id)
    }

    async fn insert_car_fuel(&mut self, car_id: i32, fuel_type: &str) -> Result<(), SeedError> {
        self.check("car_fuel")?;
        self.require_car("car_fuel", car_id)?;
        if self
            .car_fuels
            .iter()
            .any(|(id, fuel)| *id == car_id && fuel == fuel_type)
        {
            return Err(SeedError::Duplicate {
                table: "car_fuel",
                key: format!("{car_id}/{fuel_type}"),
            });
        }
        self.car_fuels.push((car_id, fuel_type.to_string()));
        Ok(())
    }

    async fn insert_car_color(
        &mut self,
        car_id: i32,
        color: &str,
        position: i32,
    ) -> Result<(), SeedError> {
        self.check("car_colors")?;
        self.require_car("car_colors", car_id)?;
        self.car_colors.push((car_id, color.to_string(), position));
        Ok(())
    }

    async fn insert_car_image(&mut self, car_id: i32, image: &CarImage) -> Result<(), SeedError> {
        self.check("car_images")?;
        self.require_car("car_images", car_id)?;
        self.car_images.push((car_id, image.clone()));
        Ok(())
    }

    async fn insert_inspection(
        &mut self,
        car_id: i32,
        inspection: &InspectionResult,
    ) -> Result<(), SeedError> {
        self.check("car_inspection_results")?;
        self.require_car("car_inspection_results", car_id)?;
        self.inspections.insert(car_id, inspection.clone());
        Ok(())
    }

    async fn insert_report(&mut self, report: &NewReport) -> Result<i32, SeedError> {
        self.check("reports")?;
        self.require_user("reports", report.reporter_id)?;
        match report.target {
            ReportTarget::Car(car_id) => self.require_car("reports", car_id)?,
            ReportTarget::Seller(seller_id) => {
                if !self.sellers.contains_key(&seller_id) {
                    return Err(SeedError::MissingReference {
                        table: "reports",
                        referenced: "seller",
                        id: seller_id,
                    });
                }
            }
        }

        let report_id = self.allocate_id();
        self.reports.insert(report_id, report.clone());
        Ok(report_id)
    }

    async fn insert_favorite(&mut self, favorite: &NewFavorite) -> Result<bool, SeedError> {
        self.check("favourites")?;
        self.require_user("favourites", favorite.buyer_id)?;
        self.require_car("favourites", favorite.car_id)?;

        let key = (favorite.buyer_id, favorite.car_id);
        if self.favorites.contains_key(&key) {
            return Ok(false);
        }
        self.favorites.insert(key, favorite.created_at);
        Ok(true)
    }

    async fn insert_recent_view(&mut self, view: &NewRecentView) -> Result<bool, SeedError> {
        self.check("recent_views")?;
        self.require_user("recent_views", view.buyer_id)?;
        self.require_car("recent_views", view.car_id)?;

        let key = view.minute_key();
        if self.recent_views.iter().any(|v| v.minute_key() == key) {
            return Ok(false);
        }
        self.recent_views.push(*view);
        Ok(true)
    }

    async fn upsert_market_prices(
        &mut self,
        prices: &[MarketPrice],
    ) -> Result<UpsertCounts, SeedError> {
        self.check("market_price")?;

        let mut counts = UpsertCounts::default();
        for price in prices {
            let key = (
                price.brand.clone(),
                price.model.clone(),
                price.sub_model.clone(),
                price.year_start,
                price.year_end,
            );
            if self
                .market_prices
                .insert(key, (price.price_min, price.price_max))
                .is_some()
            {
                counts.updated += 1;
            } else {
                counts.inserted += 1;
            }
        }
        Ok(counts)
    }
}
