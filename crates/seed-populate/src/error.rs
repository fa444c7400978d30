//! Error types for the seeding phases.

use std::path::PathBuf;
use thiserror::Error;

use crate::credentials::PasswordError;

/// Errors that can occur while seeding.
#[derive(Error, Debug)]
pub enum SeedError {
    /// PostgreSQL connection or query error.
    #[error("PostgreSQL error: {0}")]
    PostgreSQL(#[from] tokio_postgres::Error),

    /// Connection error.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Generator error.
    #[error("Generator error: {0}")]
    Generator(#[from] seed_generator::GeneratorError),

    /// Catalog error.
    #[error("Catalog error: {0}")]
    Catalog(#[from] seed_catalog::CatalogError),

    /// Password hashing error.
    #[error("Password hashing failed: {0}")]
    Password(#[from] PasswordError),

    /// Market price extraction error.
    #[error("Extraction failed: {0}")]
    Extract(#[from] market_price::ExtractError),

    /// A phase ran before the rows it references exist.
    #[error("no {missing} found - seed {phase} first")]
    MissingPrerequisite {
        missing: &'static str,
        phase: &'static str,
    },

    /// None of the candidate price list paths exist.
    #[error("Market price document not found. Tried paths: {0:?}")]
    DocumentNotFound(Vec<PathBuf>),

    /// A write violated a uniqueness rule.
    #[error("Duplicate {table} row: {key}")]
    Duplicate { table: &'static str, key: String },

    /// A write referenced a row that does not exist.
    #[error("{table} references missing {referenced} {id}")]
    MissingReference {
        table: &'static str,
        referenced: &'static str,
        id: i32,
    },

    /// A write was refused by the store.
    #[error("Write to {0} rejected")]
    Rejected(&'static str),
}

impl SeedError {
    pub fn missing(missing: &'static str, phase: &'static str) -> Self {
        SeedError::MissingPrerequisite { missing, phase }
    }
}
