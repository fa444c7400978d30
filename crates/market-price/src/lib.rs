//! Market price list extraction.
//!
//! Converts the published appraisal price list (a PDF) into
//! [`MarketPrice`] rows. Text is pulled out with `pdftotext` and then fed
//! line by line through [`PriceListParser`].
//!
//! # Example
//!
//! ```rust
//! use market_price::parse_price_list;
//!
//! // Price entries start on page 8; earlier pages are skipped.
//! let mut text = "\u{c}\n".repeat(7);
//! text.push_str("HONDA\nCIVIC 1.5 TURBO 2020 - 2023 900,000 - 1,100,000\n");
//!
//! let list = parse_price_list(&text);
//! assert_eq!(list.prices[0].model, "CIVIC");
//! assert_eq!(list.prices[0].price_max, 1_100_000);
//! ```

pub mod brands;
pub mod error;
pub mod model;
pub mod parse;
pub mod pdftotext;

pub use error::ExtractError;
pub use model::MarketPrice;
pub use parse::{parse_price_list, parse_price_range, parse_year_range, PriceList, PriceListParser};
pub use pdftotext::{extract_price_list, pdf_to_text};
