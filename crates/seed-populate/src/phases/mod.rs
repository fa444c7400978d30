//! Seeding phases. Each one reads its prerequisites from the store, fails
//! fast when they are missing, and logs per-item failures without stopping.

mod cars;
mod engagement;
mod market_prices;
mod reports;
mod users;
