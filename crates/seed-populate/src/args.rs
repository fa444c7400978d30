//! CLI argument definitions for the seeding phases.

use clap::Args;
use std::path::PathBuf;

use crate::credentials::PasswordScheme;
use crate::seeder::SeedOptions;

/// Volume and input arguments shared by every phase.
#[derive(Args, Clone, Debug)]
pub struct SeedArgs {
    /// Number of demo accounts to create (every 4th one is a seller)
    #[arg(long, default_value = "60")]
    pub user_count: u32,

    /// Number of demo cars to list under the demo seller
    #[arg(long, default_value = "30")]
    pub car_count: u32,

    /// Number of moderation reports to file
    #[arg(long, default_value = "50")]
    pub report_count: u32,

    /// Random seed for reproducible data (same seed = same data). A fresh
    /// seed is drawn and logged when omitted.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Path to a catalog YAML file replacing the built-in catalog
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Directory holding the car image files
    #[arg(long, env = "SEED_IMAGES_DIR")]
    pub images_dir: Option<PathBuf>,

    /// Path to the market price list PDF
    #[arg(long, env = "SEED_MARKET_PRICE_PDF")]
    pub market_price_pdf: Option<PathBuf>,

    /// Plaintext password given to every demo account
    #[arg(long, default_value = "Demo1234")]
    pub password: String,

    /// Hash scheme for demo account passwords
    #[arg(long, value_enum, default_value_t = PasswordScheme::Bcrypt)]
    pub password_scheme: PasswordScheme,
}

impl SeedArgs {
    pub fn options(&self) -> SeedOptions {
        SeedOptions {
            user_count: self.user_count,
            car_count: self.car_count,
            report_count: self.report_count,
            password: self.password.clone(),
            images_dir: self.images_dir.clone(),
            market_price_pdf: self.market_price_pdf.clone(),
        }
    }
}
