//! PostgreSQL implementation of [`SeedStore`].
//!
//! One owned [`Client`] serves the whole run. Parameters carry explicit
//! casts so the server coerces them to whatever integer or timestamp width
//! the CarJai schema declares.

use async_trait::async_trait;
use market_price::MarketPrice;
use seed_generator::{
    session_token, CarImage, InspectionResult, NewAccount, NewCar, NewFavorite, NewRecentView,
    NewReport, Profile,
};
use tokio_postgres::{Client, Config, NoTls, Row, Transaction};
use tracing::{debug, info};

use crate::error::SeedError;
use crate::store::{SeedStore, UpsertCounts};

const INSERT_CAR: &str = "
    INSERT INTO cars (
        seller_id, body_type_code, transmission_code, drivetrain_code,
        brand_name, model_name, submodel_name, chassis_number, year, mileage, engine_cc,
        seats, doors, prefix, number, province_id, description, price,
        is_flooded, is_heavily_damaged, status, condition_rating
    ) VALUES (
        $1::int, $2::text, $3::text, $4::text, $5::text, $6::text, $7::text, $8::text,
        $9::int, $10::int, $11::int, $12::int, $13::int, $14::text, $15::text, $16::int,
        $17::text, $18::int, $19::bool, $20::bool, $21::text, $22::int
    ) RETURNING id";

const INSERT_REPORT: &str = "
    INSERT INTO reports (
        report_type, car_id, seller_id, reporter_id, topic, sub_topics, description,
        status, created_at, reviewed_at, reviewed_by_admin_id
    ) VALUES (
        $1::text, $2::int, $3::int, $4::int, $5::text, $6::jsonb, $7::text,
        $8::text, $9::timestamptz, $10::timestamptz, $11::int
    ) RETURNING id";

const UPSERT_MARKET_PRICE: &str = "
    INSERT INTO market_price (
        brand, model, sub_model, year_start, year_end,
        price_min_thb, price_max_thb, created_at, updated_at
    ) VALUES (
        $1::text, $2::text, $3::text, $4::int, $5::int,
        $6::bigint, $7::bigint, $8::timestamptz, $8::timestamptz
    )
    ON CONFLICT (brand, model, sub_model, year_start, year_end)
    DO UPDATE SET
        price_min_thb = EXCLUDED.price_min_thb,
        price_max_thb = EXCLUDED.price_max_thb,
        updated_at = EXCLUDED.updated_at
    RETURNING (xmax = 0) AS inserted";

/// PostgreSQL-backed store.
pub struct PostgreSQLStore {
    client: Client,
}

impl PostgreSQLStore {
    /// Connect and ping.
    pub async fn connect(config: &Config) -> Result<Self, SeedError> {
        let (client, connection) = config.connect(NoTls).await?;

        // Spawn the connection task
        tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::error!("PostgreSQL connection error: {}", e);
            }
        });

        // Test connection
        client.simple_query("SELECT 1").await?;
        info!("Connected to PostgreSQL");

        Ok(Self { client })
    }

    /// Wrap an already connected client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    async fn ids(&self, sql: &str) -> Result<Vec<i32>, SeedError> {
        let rows = self.client.query(sql, &[]).await?;
        rows.iter().map(first_i32).collect()
    }
}

fn first_i32(row: &Row) -> Result<i32, SeedError> {
    Ok(row.try_get(0)?)
}

/// Insert the account, its profile, contacts and session on `tx`.
async fn insert_account(tx: &Transaction<'_>, account: &NewAccount) -> Result<i32, SeedError> {
    let row = tx
        .query_one(
            "INSERT INTO users (email, password_hash, username, name, created_at, updated_at)
             VALUES ($1::text, $2::text, $3::text, $4::text, $5::timestamptz, $5::timestamptz)
             RETURNING id",
            &[
                &account.email,
                &account.password_hash,
                &account.username,
                &account.name,
                &account.created_at,
            ],
        )
        .await?;
    let user_id = first_i32(&row)?;

    match &account.profile {
        Profile::Seller(seller) => {
            tx.execute(
                "INSERT INTO sellers (id, display_name, about, map_link)
                 VALUES ($1::int, $2::text, $3::text, $4::text)",
                &[&user_id, &seller.display_name, &seller.about, &seller.map_link],
            )
            .await?;
            for contact in &seller.contacts {
                tx.execute(
                    "INSERT INTO seller_contacts (seller_id, contact_type, value, label)
                     VALUES ($1::int, $2::text, $3::text, $4::text)",
                    &[
                        &user_id,
                        &contact.contact_type,
                        &contact.value,
                        &contact.label,
                    ],
                )
                .await?;
            }
        }
        Profile::Buyer(buyer) => {
            tx.execute(
                "INSERT INTO buyers (id, province, budget_min, budget_max)
                 VALUES ($1::int, $2::text, $3::int, $4::int)",
                &[&user_id, &buyer.province, &buyer.budget_min, &buyer.budget_max],
            )
            .await?;
        }
    }

    if let Some(session) = &account.session {
        let token = session_token(user_id, account.created_at);
        tx.execute(
            "INSERT INTO user_sessions (user_id, token, ip_address, user_agent, expires_at, created_at)
             VALUES ($1::int, $2::text, $3::text, $4::text, $5::timestamptz, $6::timestamptz)",
            &[
                &user_id,
                &token,
                &session.ip_address,
                &session.user_agent,
                &session.expires_at,
                &account.created_at,
            ],
        )
        .await?;
    }

    Ok(user_id)
}

#[async_trait]
impl SeedStore for PostgreSQLStore {
    async fn province_names(&mut self) -> Result<Vec<String>, SeedError> {
        let rows = self
            .client
            .query(
                "SELECT name_th FROM provinces WHERE name_th IS NOT NULL ORDER BY id",
                &[],
            )
            .await?;
        rows.iter()
            .map(|row| row.try_get(0).map_err(SeedError::from))
            .collect()
    }

    async fn province_ids(&mut self) -> Result<Vec<i32>, SeedError> {
        self.ids("SELECT id FROM provinces ORDER BY id").await
    }

    async fn user_ids(&mut self) -> Result<Vec<i32>, SeedError> {
        self.ids("SELECT id FROM users ORDER BY id").await
    }

    async fn seller_ids(&mut self) -> Result<Vec<i32>, SeedError> {
        self.ids("SELECT id FROM sellers ORDER BY id").await
    }

    async fn buyer_ids(&mut self) -> Result<Vec<i32>, SeedError> {
        self.ids("SELECT id FROM buyers ORDER BY id").await
    }

    async fn active_car_ids(&mut self) -> Result<Vec<i32>, SeedError> {
        self.ids("SELECT id FROM cars WHERE status = 'active' ORDER BY id")
            .await
    }

    async fn first_admin_id(&mut self) -> Result<Option<i32>, SeedError> {
        let row = self
            .client
            .query_opt("SELECT id FROM admins ORDER BY id LIMIT 1", &[])
            .await?;
        row.as_ref().map(first_i32).transpose()
    }

    async fn find_user_by_email(&mut self, email: &str) -> Result<Option<i32>, SeedError> {
        let row = self
            .client
            .query_opt("SELECT id FROM users WHERE email = $1::text", &[&email])
            .await?;
        row.as_ref().map(first_i32).transpose()
    }

    async fn has_seller_profile(&mut self, user_id: i32) -> Result<bool, SeedError> {
        let row = self
            .client
            .query_one(
                "SELECT EXISTS(SELECT 1 FROM sellers WHERE id = $1::int)",
                &[&user_id],
            )
            .await?;
        Ok(row.try_get(0)?)
    }

    async fn create_account(&mut self, account: &NewAccount) -> Result<i32, SeedError> {
        // Dropping the transaction without commit rolls it back.
        let tx = self.client.transaction().await?;
        let user_id = insert_account(&tx, account).await?;
        tx.commit().await?;
        debug!("Committed account {} (ID: {})", account.email, user_id);
        Ok(user_id)
    }

    async fn recreate_account(
        &mut self,
        user_id: i32,
        account: &NewAccount,
    ) -> Result<i32, SeedError> {
        let tx = self.client.transaction().await?;
        tx.execute("DELETE FROM users WHERE id = $1::int", &[&user_id])
            .await?;
        let new_id = insert_account(&tx, account).await?;
        tx.commit().await?;
        debug!(
            "Replaced account {} (ID: {} -> {})",
            account.email, user_id, new_id
        );
        Ok(new_id)
    }

    async fn insert_car(&mut self, car: &NewCar) -> Result<i32, SeedError> {
        let row = self
            .client
            .query_one(
                INSERT_CAR,
                &[
                    &car.seller_id,
                    &car.body_type_code,
                    &car.transmission_code,
                    &car.drivetrain_code,
                    &car.brand_name,
                    &car.model_name,
                    &car.submodel_name,
                    &car.chassis_number,
                    &car.year,
                    &car.mileage,
                    &car.engine_cc,
                    &car.seats,
                    &car.doors,
                    &car.plate_prefix,
                    &car.plate_number,
                    &car.province_id,
                    &car.description,
                    &car.price,
                    &car.is_flooded,
                    &car.is_heavily_damaged,
                    &car.status,
                    &car.condition_rating,
                ],
            )
            .await?;
        first_i32(&row)
    }

    async fn insert_car_fuel(&mut self, car_id: i32, fuel_type: &str) -> Result<(), SeedError> {
        self.client
            .execute(
                "INSERT INTO car_fuel (car_id, fuel_type_code) VALUES ($1::int, $2::text)",
                &[&car_id, &fuel_type],
            )
            .await?;
        Ok(())
    }

    async fn insert_car_color(
        &mut self,
        car_id: i32,
        color: &str,
        position: i32,
    ) -> Result<(), SeedError> {
        self.client
            .execute(
                "INSERT INTO car_colors (car_id, color_code, position) VALUES ($1::int, $2::text, $3::int)",
                &[&car_id, &color, &position],
            )
            .await?;
        Ok(())
    }

    async fn insert_car_image(&mut self, car_id: i32, image: &CarImage) -> Result<(), SeedError> {
        self.client
            .execute(
                "INSERT INTO car_images (car_id, image_data, image_type, image_size, display_order)
                 VALUES ($1::int, $2::bytea, $3::text, $4::int, $5::int)",
                &[
                    &car_id,
                    &image.data,
                    &image.mime_type,
                    &image.size(),
                    &image.display_order,
                ],
            )
            .await?;
        Ok(())
    }

    async fn insert_inspection(
        &mut self,
        car_id: i32,
        inspection: &InspectionResult,
    ) -> Result<(), SeedError> {
        let (columns, outcomes): (Vec<&str>, Vec<bool>) = inspection.columns().unzip();
        let placeholders: Vec<String> = (0..outcomes.len())
            .map(|i| format!("${}::bool", i + 4))
            .collect();
        let sql = format!(
            "INSERT INTO car_inspection_results (car_id, station, overall_pass, {})
             VALUES ($1::int, $2::text, $3::bool, {})",
            columns.join(", "),
            placeholders.join(", ")
        );

        let overall = inspection.overall_pass();
        let mut params: Vec<&(dyn tokio_postgres::types::ToSql + Sync)> =
            vec![&car_id, &inspection.station, &overall];
        params.extend(
            outcomes
                .iter()
                .map(|o| o as &(dyn tokio_postgres::types::ToSql + Sync)),
        );

        self.client.execute(sql.as_str(), &params).await?;
        Ok(())
    }

    async fn insert_report(&mut self, report: &NewReport) -> Result<i32, SeedError> {
        let kind = report.target.kind();
        let car_id = report.target.car_id();
        let seller_id = report.target.seller_id();
        let sub_topics = report.sub_topics_json();
        let status = report.status.as_str();
        let reviewed_at = report.review.as_ref().map(|r| r.reviewed_at);
        let reviewer = report.review.as_ref().and_then(|r| r.admin_id);

        let row = self
            .client
            .query_one(
                INSERT_REPORT,
                &[
                    &kind,
                    &car_id,
                    &seller_id,
                    &report.reporter_id,
                    &report.topic,
                    &sub_topics,
                    &report.description,
                    &status,
                    &report.created_at,
                    &reviewed_at,
                    &reviewer,
                ],
            )
            .await?;
        first_i32(&row)
    }

    async fn insert_favorite(&mut self, favorite: &NewFavorite) -> Result<bool, SeedError> {
        let written = self
            .client
            .execute(
                "INSERT INTO favourites (user_id, car_id, created_at)
                 VALUES ($1::int, $2::int, $3::timestamptz)
                 ON CONFLICT (user_id, car_id) DO NOTHING",
                &[&favorite.buyer_id, &favorite.car_id, &favorite.created_at],
            )
            .await?;
        Ok(written > 0)
    }

    async fn insert_recent_view(&mut self, view: &NewRecentView) -> Result<bool, SeedError> {
        let written = self
            .client
            .execute(
                "INSERT INTO recent_views (user_id, car_id, viewed_at)
                 VALUES ($1::int, $2::int, $3::timestamptz)
                 ON CONFLICT (user_id, car_id, DATE_TRUNC('minute', viewed_at)) DO NOTHING",
                &[&view.buyer_id, &view.car_id, &view.viewed_at],
            )
            .await?;
        Ok(written > 0)
    }

    async fn upsert_market_prices(
        &mut self,
        prices: &[MarketPrice],
    ) -> Result<UpsertCounts, SeedError> {
        if prices.is_empty() {
            return Ok(UpsertCounts::default());
        }

        let tx = self.client.transaction().await?;
        let statement = tx.prepare(UPSERT_MARKET_PRICE).await?;
        let now = chrono::Utc::now();
        let mut counts = UpsertCounts::default();

        for price in prices {
            let row = tx
                .query_one(
                    &statement,
                    &[
                        &price.brand,
                        &price.model,
                        &price.sub_model,
                        &price.year_start,
                        &price.year_end,
                        &price.price_min,
                        &price.price_max,
                        &now,
                    ],
                )
                .await?;
            let inserted: bool = row.try_get(0)?;
            if inserted {
                counts.inserted += 1;
            } else {
                counts.updated += 1;
            }
        }

        tx.commit().await?;
        info!(
            "Committed {} market prices (inserted: {}, updated: {})",
            counts.total(),
            counts.inserted,
            counts.updated
        );
        Ok(counts)
    }
}
