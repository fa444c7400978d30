//! Password hashing for seeded accounts.

use argon2::password_hash::{PasswordHasher as _, SaltString};
use argon2::Argon2;
use clap::ValueEnum;
use rand::RngCore;
use thiserror::Error;

/// Cost used by the CarJai backend when it hashes passwords itself.
pub const BCRYPT_COST: u32 = 12;

#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("bcrypt: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),

    #[error("argon2: {0}")]
    Argon2(String),
}

/// Turns a plaintext password into an opaque stored hash.
pub trait CredentialHasher: Send + Sync {
    fn hash(&self, plaintext: &str) -> Result<String, PasswordError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum PasswordScheme {
    /// bcrypt, verifiable by the CarJai backend
    #[default]
    Bcrypt,
    /// Argon2id in PHC string format
    Argon2,
}

impl PasswordScheme {
    pub fn hasher(self) -> Box<dyn CredentialHasher> {
        match self {
            PasswordScheme::Bcrypt => Box::new(BcryptHasher::new(BCRYPT_COST)),
            PasswordScheme::Argon2 => Box::new(Argon2Hasher),
        }
    }
}

pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl CredentialHasher for BcryptHasher {
    fn hash(&self, plaintext: &str) -> Result<String, PasswordError> {
        Ok(bcrypt::hash(plaintext, self.cost)?)
    }
}

#[derive(Debug, Default)]
pub struct Argon2Hasher;

impl CredentialHasher for Argon2Hasher {
    fn hash(&self, plaintext: &str) -> Result<String, PasswordError> {
        let mut salt_bytes = [0u8; 16];
        rand::thread_rng().fill_bytes(&mut salt_bytes);
        let salt =
            SaltString::encode_b64(&salt_bytes).map_err(|e| PasswordError::Argon2(e.to_string()))?;

        Argon2::default()
            .hash_password(plaintext.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::Argon2(e.to_string()))
    }
}
