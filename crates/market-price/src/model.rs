use serde::{Deserialize, Serialize};

/// One appraised price band from the published price list.
///
/// `(brand, model, sub_model, year_start, year_end)` identifies a row;
/// re-importing the same key updates its prices.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MarketPrice {
    pub brand: String,
    pub model: String,
    pub sub_model: String,
    pub year_start: i32,
    pub year_end: i32,
    #[serde(rename = "price_min_thb")]
    pub price_min: i64,
    #[serde(rename = "price_max_thb")]
    pub price_max: i64,
}

impl MarketPrice {
    pub fn key(&self) -> (&str, &str, &str, i32, i32) {
        (
            &self.brand,
            &self.model,
            &self.sub_model,
            self.year_start,
            self.year_end,
        )
    }
}
