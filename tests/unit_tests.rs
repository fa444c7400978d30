use carjai_seed::{DatabaseArgs, Phase, PhaseFlags};
use clap::Parser;
use seed_populate::{PasswordScheme, SeedArgs};

#[derive(Parser)]
struct TestCli {
    #[command(flatten)]
    phases: PhaseFlags,

    #[command(flatten)]
    database: DatabaseArgs,

    #[command(flatten)]
    seed: SeedArgs,
}

#[test]
fn test_default_volumes() {
    let cli = TestCli::try_parse_from(["carjai-seed", "--users"]).unwrap();
    let options = cli.seed.options();

    assert_eq!(options.user_count, 60);
    assert_eq!(options.car_count, 30);
    assert_eq!(options.report_count, 50);
    assert_eq!(options.password, "Demo1234");
    assert_eq!(cli.seed.password_scheme, PasswordScheme::Bcrypt);
    assert!(cli.seed.seed.is_none());
}

#[test]
fn test_phase_flags_parse_in_any_order() {
    let cli = TestCli::try_parse_from([
        "carjai-seed",
        "--recent-views",
        "--market-price",
        "--cars",
    ])
    .unwrap();

    assert_eq!(
        cli.phases.selection(),
        vec![Phase::Cars, Phase::MarketPrice, Phase::RecentViews]
    );
}

#[test]
fn test_overrides() {
    let cli = TestCli::try_parse_from([
        "carjai-seed",
        "--all",
        "--user-count",
        "8",
        "--seed",
        "42",
        "--password-scheme",
        "argon2",
        "--db-host",
        "db",
        "--db-port",
        "5433",
    ])
    .unwrap();

    assert_eq!(cli.phases.selection().len(), 6);
    assert_eq!(cli.seed.options().user_count, 8);
    assert_eq!(cli.seed.seed, Some(42));
    assert_eq!(cli.seed.password_scheme, PasswordScheme::Argon2);
    assert_eq!(cli.database.db_host.as_deref(), Some("db"));
    assert_eq!(cli.database.db_port.as_deref(), Some("5433"));
}

#[test]
fn test_no_phase_selected() {
    let cli = TestCli::try_parse_from(["carjai-seed"]).unwrap();
    assert!(cli.phases.selection().is_empty());
}
