//! Buyer favorites and recent-view history.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use seed_catalog::EngagementCatalog;

use crate::model::{NewFavorite, NewRecentView};
use crate::random::{backdated, int_in, pick_many};

/// Distinct cars for one buyer, sized by `per_buyer` and capped by the
/// number of cars.
fn sample_cars<R: Rng + ?Sized>(rng: &mut R, cars: &[i32], count: i64) -> Vec<i32> {
    let count = usize::try_from(count).unwrap_or(0).min(cars.len());
    pick_many(rng, cars, count)
}

pub fn plan_favorites<R: Rng + ?Sized>(
    rng: &mut R,
    catalog: &EngagementCatalog,
    buyer_id: i32,
    cars: &[i32],
    now: DateTime<Utc>,
) -> Vec<NewFavorite> {
    let count = int_in(rng, catalog.favorites_per_buyer);
    sample_cars(rng, cars, count)
        .into_iter()
        .map(|car_id| NewFavorite {
            buyer_id,
            car_id,
            created_at: backdated(rng, now, catalog.backdate_days),
        })
        .collect()
}

/// Views for one buyer. Each sampled car gets one or more events spaced by
/// whole minutes from a backdated start.
pub fn plan_recent_views<R: Rng + ?Sized>(
    rng: &mut R,
    catalog: &EngagementCatalog,
    buyer_id: i32,
    cars: &[i32],
    now: DateTime<Utc>,
) -> Vec<NewRecentView> {
    let count = int_in(rng, catalog.views_per_buyer);
    let mut views = Vec::new();

    for car_id in sample_cars(rng, cars, count) {
        let repeats = int_in(rng, catalog.repeat_views);
        for j in 0..repeats {
            let start = backdated(rng, now, catalog.backdate_days);
            let gap = int_in(rng, catalog.repeat_gap_minutes);
            views.push(NewRecentView {
                buyer_id,
                car_id,
                viewed_at: start + Duration::minutes(j * gap),
            });
        }
    }

    views
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use seed_catalog::Catalog;
    use std::collections::HashSet;

    fn catalog() -> EngagementCatalog {
        Catalog::builtin().unwrap().engagement
    }

    #[test]
    fn test_favorites_are_distinct_and_bounded() {
        let catalog = catalog();
        let mut rng = StdRng::seed_from_u64(42);
        let cars: Vec<i32> = (1..=30).collect();

        for _ in 0..200 {
            let favorites = plan_favorites(&mut rng, &catalog, 5, &cars, Utc::now());
            assert!((2..=8).contains(&favorites.len()));

            let distinct: HashSet<_> = favorites.iter().map(|f| f.car_id).collect();
            assert_eq!(distinct.len(), favorites.len());
            assert!(favorites.iter().all(|f| f.buyer_id == 5));
        }
    }

    #[test]
    fn test_favorites_capped_by_car_count() {
        let catalog = catalog();
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..50 {
            let favorites = plan_favorites(&mut rng, &catalog, 1, &[7], Utc::now());
            assert_eq!(favorites.len(), 1);
            assert_eq!(favorites[0].car_id, 7);
        }
        assert!(plan_favorites(&mut rng, &catalog, 1, &[], Utc::now()).is_empty());
    }

    #[test]
    fn test_recent_views_per_car() {
        let catalog = catalog();
        let mut rng = StdRng::seed_from_u64(9);
        let cars: Vec<i32> = (1..=30).collect();
        let now = Utc::now();

        for _ in 0..100 {
            let views = plan_recent_views(&mut rng, &catalog, 2, &cars, now);
            let per_car = views.iter().fold(std::collections::HashMap::new(), |mut acc, v| {
                *acc.entry(v.car_id).or_insert(0) += 1;
                acc
            });

            assert!((2..=8).contains(&per_car.len()));
            assert!(per_car.values().all(|n| (1..=3).contains(n)));
            assert!(views.iter().all(|v| v.viewed_at <= now + Duration::minutes(120)));
        }
    }
}
