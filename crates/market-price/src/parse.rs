//! Line-oriented parser for the text layout of the appraisal price list.
//!
//! The list is laid out as brand headings followed by entries. An entry is
//! either a single line (`SUB MODEL  YYYY - YYYY  PRICE`) or spread over
//! several lines: optional model heading, sub-model (possibly wrapped),
//! year range, price range. A small state machine tracks which piece is
//! expected next.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::brands::{is_brand, is_junk_heading, next_brand, split_model};
use crate::error::ExtractError;
use crate::model::MarketPrice;

/// Pages before this one hold the cover and table of contents.
pub const FIRST_PRICE_PAGE: u32 = 8;

static DATA_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.+?)\s+(\d{4}\s*-\s*\d{4})\s+(.+)$").expect("valid regex"));
static YEAR_RANGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})\s*-\s*(\d{4})$").expect("valid regex"));
static PRICE_RANGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\d,\s-]+$").expect("valid regex"));
static PAGE_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,3}|\d{4})$").expect("valid regex"));
static TABLE_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(แบบ\s*/\s*รุ่น|ปีผลิต|ราคาประเมิน|สารบัญ|แบบ/รุ่น\s*อื่นๆ)")
        .expect("valid regex")
});

pub fn parse_year_range(text: &str) -> Result<(i32, i32), ExtractError> {
    let caps = YEAR_RANGE
        .captures(text)
        .ok_or_else(|| ExtractError::InvalidYear(text.to_string()))?;
    let start = caps[1]
        .parse()
        .map_err(|_| ExtractError::InvalidYear(text.to_string()))?;
    let end = caps[2]
        .parse()
        .map_err(|_| ExtractError::InvalidYear(text.to_string()))?;
    Ok((start, end))
}

/// Parse `"550,000 - 650,000"`, `"550000-650000"` or a single price.
///
/// Returns `(min, max)` with `min <= max`.
pub fn parse_price_range(text: &str) -> Result<(i64, i64), ExtractError> {
    let invalid = || ExtractError::InvalidPrice(text.to_string());

    if !PRICE_RANGE.is_match(text) {
        return Err(invalid());
    }

    let cleaned: String = text.chars().filter(|c| *c != ',' && *c != '$').collect();
    let parts: Vec<&str> = if cleaned.contains(' ') {
        cleaned.split_whitespace().collect()
    } else if cleaned.contains('-') {
        cleaned.split('-').filter(|p| !p.is_empty()).collect()
    } else {
        vec![cleaned.as_str()]
    };

    let (first, last) = match (parts.first(), parts.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return Err(invalid()),
    };
    let min: i64 = first.parse().map_err(|_| invalid())?;
    let max: i64 = last.parse().map_err(|_| invalid())?;

    Ok(if min > max { (max, min) } else { (min, max) })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    HeaderOrSubModel,
    YearOrSubModel,
    Year,
    Price,
}

/// An entry seen before any brand heading. It is resolved when the next
/// brand heading appears.
#[derive(Debug, Clone)]
struct Unbranded {
    sub_model: String,
    heading: Option<String>,
    years: (i32, i32),
    prices: (i64, i64),
}

/// Result of parsing one document.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PriceList {
    pub prices: Vec<MarketPrice>,
    /// Model headings detected in multi-line entries.
    pub model_headings: Vec<String>,
    /// Entries dropped because no brand heading ever followed them.
    pub unassigned: usize,
}

pub struct PriceListParser {
    page: u32,
    line_no: usize,
    state: State,
    brand: Option<String>,
    model: Option<String>,
    pending_line: Option<String>,
    sub_model: String,
    years: (i32, i32),
    unbranded: Vec<Unbranded>,
    out: PriceList,
}

impl Default for PriceListParser {
    fn default() -> Self {
        Self::new()
    }
}

impl PriceListParser {
    pub fn new() -> Self {
        Self {
            page: 1,
            line_no: 0,
            state: State::HeaderOrSubModel,
            brand: None,
            model: None,
            pending_line: None,
            sub_model: String::new(),
            years: (0, 0),
            unbranded: Vec::new(),
            out: PriceList::default(),
        }
    }

    /// Feed one line of `pdftotext` output.
    pub fn feed(&mut self, raw: &str) {
        self.line_no += 1;

        // A form feed starts a new page; the line carrying it is dropped.
        if raw.contains('\u{c}') {
            self.page += 1;
            self.reset();
            return;
        }

        let line = raw.trim().trim_matches(',');
        if line.is_empty() || self.page < FIRST_PRICE_PAGE {
            return;
        }

        if is_brand(line) {
            self.switch_brand(line);
            return;
        }

        if TABLE_HEADER.is_match(line) || PAGE_NUMBER.is_match(line) {
            if self.state != State::HeaderOrSubModel {
                tracing::trace!(page = self.page, line = self.line_no, "Reset on skip line: {line}");
                self.reset();
            }
            return;
        }

        if self.try_data_line(line) {
            return;
        }

        match self.state {
            State::HeaderOrSubModel => {
                if YEAR_RANGE.is_match(line) || PRICE_RANGE.is_match(line) {
                    tracing::debug!(
                        page = self.page,
                        line = self.line_no,
                        "Expected heading or sub-model, skipping: {line}"
                    );
                } else {
                    self.pending_line = Some(line.to_string());
                    self.state = State::YearOrSubModel;
                }
            }
            State::YearOrSubModel => {
                if YEAR_RANGE.is_match(line) {
                    if let Ok(years) = parse_year_range(line) {
                        self.sub_model = self.pending_line.take().unwrap_or_default();
                        self.years = years;
                        self.state = State::Price;
                    }
                } else if !PRICE_RANGE.is_match(line) {
                    let pending = self.pending_line.take().unwrap_or_default();
                    if is_junk_heading(&pending) {
                        self.pending_line = Some(line.to_string());
                    } else {
                        self.out.model_headings.push(pending.clone());
                        self.model = Some(pending);
                        self.sub_model = line.to_string();
                        self.state = State::Year;
                    }
                } else {
                    tracing::debug!(
                        page = self.page,
                        line = self.line_no,
                        "Expected year or text, got price: {line}"
                    );
                    self.reset();
                }
            }
            State::Year => match parse_year_range(line) {
                Ok(years) => {
                    self.years = years;
                    self.state = State::Price;
                }
                Err(_) => {
                    self.sub_model.push(' ');
                    self.sub_model.push_str(line);
                }
            },
            State::Price => match parse_price_range(line) {
                Ok(prices) => {
                    let sub_model = std::mem::take(&mut self.sub_model);
                    self.emit(sub_model, self.years, prices);
                    self.reset();
                }
                Err(_) => {
                    tracing::debug!(
                        page = self.page,
                        line = self.line_no,
                        "Expected price, got: {line}"
                    );
                    self.reset();
                }
            },
        }
    }

    pub fn finish(mut self) -> PriceList {
        self.out.unassigned = self.unbranded.len();
        if self.out.unassigned > 0 {
            tracing::warn!(
                "{} price entries appeared before any brand heading and were dropped",
                self.out.unassigned
            );
        }
        self.out
    }

    fn try_data_line(&mut self, line: &str) -> bool {
        let Some(caps) = DATA_LINE.captures(line) else {
            return false;
        };
        let sub_model = caps[1].trim();
        let (Ok(years), Ok(prices)) = (
            parse_year_range(caps[2].trim()),
            parse_price_range(caps[3].trim()),
        ) else {
            return false;
        };
        if sub_model.is_empty() {
            return false;
        }

        if let Some(pending) = self.pending_line.take() {
            if !is_junk_heading(&pending) {
                self.model = Some(pending);
            }
        }
        self.emit(sub_model.to_string(), years, prices);
        self.reset();
        true
    }

    fn switch_brand(&mut self, heading: &str) {
        let brand = next_brand(self.brand.as_deref(), heading);
        tracing::trace!(page = self.page, "Switched brand to {brand}");

        for entry in std::mem::take(&mut self.unbranded) {
            let (model, sub_model) = match entry.heading {
                Some(heading) => (heading, entry.sub_model),
                None => split_model(&entry.sub_model, &brand),
            };
            self.out.prices.push(MarketPrice {
                brand: brand.clone(),
                model,
                sub_model,
                year_start: entry.years.0,
                year_end: entry.years.1,
                price_min: entry.prices.0,
                price_max: entry.prices.1,
            });
        }

        self.brand = Some(brand);
        self.model = None;
        self.reset();
    }

    fn emit(&mut self, sub_model: String, years: (i32, i32), prices: (i64, i64)) {
        let Some(brand) = self.brand.clone() else {
            self.unbranded.push(Unbranded {
                sub_model,
                heading: self.model.clone(),
                years,
                prices,
            });
            return;
        };

        let (model, sub_model) = match &self.model {
            Some(model) => (model.clone(), sub_model),
            None => split_model(&sub_model, &brand),
        };
        self.out.prices.push(MarketPrice {
            brand,
            model,
            sub_model,
            year_start: years.0,
            year_end: years.1,
            price_min: prices.0,
            price_max: prices.1,
        });
    }

    fn reset(&mut self) {
        self.state = State::HeaderOrSubModel;
        self.pending_line = None;
        self.sub_model.clear();
    }
}

/// Parse the full text of a price list.
pub fn parse_price_list(text: &str) -> PriceList {
    let mut parser = PriceListParser::new();
    for line in text.lines() {
        parser.feed(line);
    }
    parser.finish()
}
