//! The seeder: a store, a generator and the knobs every phase reads.
//!
//! Each phase lives in [`crate::phases`] as an `impl` block on [`Seeder`].

use seed_generator::SeedGenerator;
use std::path::PathBuf;

use crate::credentials::{CredentialHasher, PasswordScheme};
use crate::extractor::{MarketPriceExtractor, PdfTextExtractor};
use crate::store::SeedStore;

pub const DEFAULT_USER_COUNT: u32 = 60;
pub const DEFAULT_CAR_COUNT: u32 = 30;
pub const DEFAULT_REPORT_COUNT: u32 = 50;
pub const DEFAULT_PASSWORD: &str = "Demo1234";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedOptions {
    pub user_count: u32,
    pub car_count: u32,
    pub report_count: u32,
    pub password: String,
    pub images_dir: Option<PathBuf>,
    pub market_price_pdf: Option<PathBuf>,
}

impl Default for SeedOptions {
    fn default() -> Self {
        Self {
            user_count: DEFAULT_USER_COUNT,
            car_count: DEFAULT_CAR_COUNT,
            report_count: DEFAULT_REPORT_COUNT,
            password: DEFAULT_PASSWORD.to_string(),
            images_dir: None,
            market_price_pdf: None,
        }
    }
}

pub struct Seeder<S: SeedStore> {
    pub(crate) store: S,
    pub(crate) generator: SeedGenerator,
    pub(crate) hasher: Box<dyn CredentialHasher>,
    pub(crate) extractor: Box<dyn MarketPriceExtractor>,
    pub(crate) options: SeedOptions,
}

impl<S: SeedStore> Seeder<S> {
    /// Seeder with the default password scheme and the `pdftotext` extractor.
    pub fn new(store: S, generator: SeedGenerator, options: SeedOptions) -> Self {
        Self {
            store,
            generator,
            hasher: PasswordScheme::default().hasher(),
            extractor: Box::new(PdfTextExtractor),
            options,
        }
    }

    pub fn with_hasher(mut self, hasher: Box<dyn CredentialHasher>) -> Self {
        self.hasher = hasher;
        self
    }

    pub fn with_extractor(mut self, extractor: Box<dyn MarketPriceExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn seed(&self) -> u64 {
        self.generator.seed()
    }

    pub fn options(&self) -> &SeedOptions {
        &self.options
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
