//! Demo accounts: every Nth index is a seller, the rest are buyers.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use seed_catalog::{AccountCatalog, IntRange};

use crate::model::{BuyerProfile, Contact, NewAccount, NewSession, Profile, Role, SellerProfile};
use crate::random::{backdated, int_in, pick};

pub const SESSION_IP: &str = "127.0.0.1";
pub const SESSION_USER_AGENT: &str = "demo-seeder";
pub const SESSION_LIFETIME_DAYS: i64 = 30;

pub const SELLER_ABOUT: &str = "Demo seller account created by seeder";

pub const DEMO_SELLER_EMAIL: &str = "seller@demo.com";
pub const DEMO_SELLER_USERNAME: &str = "seller";
pub const DEMO_SELLER_NAME: &str = "Demo Seller";
pub const DEMO_SELLER_ABOUT: &str = "Demo seller for testing";
pub const DEMO_SELLER_MAP_LINK: &str = "https://maps.google.com";

/// Role for the 1-based account `index`.
pub fn role_for(index: u32, seller_every: u32) -> Role {
    if seller_every != 0 && index % seller_every == 0 {
        Role::Seller
    } else {
        Role::Buyer
    }
}

/// Build the account for `index`. Buyers get a province from `provinces`
/// when any are known, and `None` otherwise.
pub fn generate_account<R: Rng + ?Sized>(
    rng: &mut R,
    catalog: &AccountCatalog,
    index: u32,
    provinces: &[String],
    password_hash: &str,
    now: DateTime<Utc>,
) -> NewAccount {
    let role = role_for(index, catalog.seller_every);
    let username = format!("{}{}", role.as_str(), index);
    let email = format!("{}@{}", username, catalog.email_domain);
    let created_at = backdated(rng, now, catalog.backdate_days);

    let (name, profile) = match role {
        Role::Seller => {
            let name = format!("Demo Seller {index}");
            let profile = Profile::Seller(SellerProfile {
                display_name: name.clone(),
                about: SELLER_ABOUT.to_string(),
                map_link: None,
                contacts: Vec::new(),
            });
            (name, profile)
        }
        Role::Buyer => {
            let province = pick(rng, provinces).cloned();
            let (budget_min, budget_max) = buyer_budget(rng, catalog);
            let profile = Profile::Buyer(BuyerProfile {
                province,
                budget_min,
                budget_max,
            });
            (format!("Demo Buyer {index}"), profile)
        }
    };

    NewAccount {
        email,
        username,
        name,
        password_hash: password_hash.to_string(),
        created_at,
        profile,
        session: Some(session_for(now)),
    }
}

/// `(min, max)` with `max >= min + budget_gap`, capped by the ceiling.
pub fn buyer_budget<R: Rng + ?Sized>(rng: &mut R, catalog: &AccountCatalog) -> (i32, i32) {
    let min = int_in(rng, catalog.budget_min);
    let floor = min + catalog.budget_gap;
    let max = int_in(rng, IntRange::new(floor, catalog.budget_ceiling.max(floor)));
    (clamp_i32(min), clamp_i32(max))
}

/// The fixed demo seller with its two contact channels.
pub fn demo_seller(password_hash: &str, now: DateTime<Utc>) -> NewAccount {
    NewAccount {
        email: DEMO_SELLER_EMAIL.to_string(),
        username: DEMO_SELLER_USERNAME.to_string(),
        name: DEMO_SELLER_NAME.to_string(),
        password_hash: password_hash.to_string(),
        created_at: now,
        profile: Profile::Seller(SellerProfile {
            display_name: DEMO_SELLER_NAME.to_string(),
            about: DEMO_SELLER_ABOUT.to_string(),
            map_link: Some(DEMO_SELLER_MAP_LINK.to_string()),
            contacts: vec![
                Contact {
                    contact_type: "phone".to_string(),
                    value: "0812345678".to_string(),
                    label: "Call".to_string(),
                },
                Contact {
                    contact_type: "line".to_string(),
                    value: "@democar".to_string(),
                    label: "LINE".to_string(),
                },
            ],
        }),
        session: None,
    }
}

fn session_for(now: DateTime<Utc>) -> NewSession {
    NewSession {
        ip_address: SESSION_IP.to_string(),
        user_agent: SESSION_USER_AGENT.to_string(),
        expires_at: now + Duration::days(SESSION_LIFETIME_DAYS),
    }
}

fn clamp_i32(value: i64) -> i32 {
    i32::try_from(value).unwrap_or(if value < 0 { i32::MIN } else { i32::MAX })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use seed_catalog::Catalog;

    #[test]
    fn test_role_cadence() {
        let sellers: Vec<u32> = (1..=60)
            .filter(|i| role_for(*i, 4) == Role::Seller)
            .collect();
        assert_eq!(sellers.len(), 15);
        assert_eq!(sellers[0], 4);
        assert_eq!(role_for(1, 4), Role::Buyer);
        assert_eq!(role_for(5, 0), Role::Buyer);
    }

    #[test]
    fn test_seller_account_shape() {
        let catalog = Catalog::builtin().unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let now = Utc::now();

        let account = generate_account(&mut rng, &catalog.accounts, 8, &[], "hash", now);

        assert_eq!(account.email, "seller8@demo.com");
        assert_eq!(account.username, "seller8");
        assert_eq!(account.name, "Demo Seller 8");
        assert_eq!(account.password_hash, "hash");
        assert!(account.created_at <= now);
        match &account.profile {
            Profile::Seller(seller) => assert_eq!(seller.about, SELLER_ABOUT),
            other => panic!("expected seller profile, got {other:?}"),
        }
        let session = account.session.unwrap();
        assert_eq!(session.expires_at, now + Duration::days(30));
        assert_eq!(session.ip_address, "127.0.0.1");
    }

    #[test]
    fn test_buyer_account_shape() {
        let catalog = Catalog::builtin().unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let provinces = vec!["กรุงเทพมหานคร".to_string()];

        let account = generate_account(&mut rng, &catalog.accounts, 3, &provinces, "h", Utc::now());

        assert_eq!(account.email, "buyer3@demo.com");
        assert_eq!(account.name, "Demo Buyer 3");
        match account.profile {
            Profile::Buyer(buyer) => {
                assert_eq!(buyer.province.as_deref(), Some("กรุงเทพมหานคร"));
                assert!(buyer.budget_min < buyer.budget_max);
            }
            other => panic!("expected buyer profile, got {other:?}"),
        }
    }

    #[test]
    fn test_buyer_without_provinces() {
        let catalog = Catalog::builtin().unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        let account = generate_account(&mut rng, &catalog.accounts, 1, &[], "h", Utc::now());
        match account.profile {
            Profile::Buyer(buyer) => assert!(buyer.province.is_none()),
            other => panic!("expected buyer profile, got {other:?}"),
        }
    }

    #[test]
    fn test_budget_bounds() {
        let catalog = Catalog::builtin().unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..1000 {
            let (min, max) = buyer_budget(&mut rng, &catalog.accounts);
            assert!((200_000..=800_000).contains(&min));
            assert!(max >= min + 100_000);
            assert!(max <= 2_000_000);
        }
    }

    #[test]
    fn test_demo_seller_contacts() {
        let account = demo_seller("h", Utc::now());
        assert_eq!(account.email, DEMO_SELLER_EMAIL);
        assert!(account.session.is_none());
        match account.profile {
            Profile::Seller(seller) => {
                assert_eq!(seller.map_link.as_deref(), Some(DEMO_SELLER_MAP_LINK));
                let channels: Vec<_> = seller
                    .contacts
                    .iter()
                    .map(|c| (c.contact_type.as_str(), c.value.as_str(), c.label.as_str()))
                    .collect();
                assert_eq!(
                    channels,
                    vec![("phone", "0812345678", "Call"), ("line", "@democar", "LINE")]
                );
            }
            other => panic!("expected seller profile, got {other:?}"),
        }
    }
}
