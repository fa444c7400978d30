//! Random draws from fixed pools and inclusive ranges.
//!
//! Every function takes the RNG explicitly so a seeded run is reproducible.

use chrono::{DateTime, Duration, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use seed_catalog::IntRange;

/// Pick one item uniformly. `None` for an empty pool.
pub fn pick<'a, R: Rng + ?Sized, T>(rng: &mut R, items: &'a [T]) -> Option<&'a T> {
    items.choose(rng)
}

/// Pick `count` distinct items without replacement.
///
/// Asking for at least as many items as the pool holds returns the whole
/// pool in its original order.
pub fn pick_many<R: Rng + ?Sized, T: Clone>(rng: &mut R, items: &[T], count: usize) -> Vec<T> {
    if count >= items.len() {
        return items.to_vec();
    }

    let mut shuffled = items.to_vec();
    shuffled.shuffle(rng);
    shuffled.truncate(count);
    shuffled
}

/// Draw an integer from an inclusive range. A degenerate range yields `min`.
pub fn int_in<R: Rng + ?Sized>(rng: &mut R, range: IntRange) -> i64 {
    if range.min >= range.max {
        return range.min;
    }
    rng.gen_range(range.min..=range.max)
}

/// A timestamp within the last `days` days.
///
/// Days, hours and minutes are drawn independently and subtracted from
/// `now`, so the result is always strictly less than `days` days old.
/// Draw a count from `range`; negative draws count as zero.
pub fn count_in<R: Rng + ?Sized>(rng: &mut R, range: IntRange) -> usize {
    usize::try_from(int_in(rng, range)).unwrap_or(0)
}

pub fn backdated<R: Rng + ?Sized>(rng: &mut R, now: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    let days_ago = rng.gen_range(0..days.max(1));
    let hours_ago = rng.gen_range(0..24);
    let minutes_ago = rng.gen_range(0..60);
    now - Duration::days(days_ago) - Duration::hours(hours_ago) - Duration::minutes(minutes_ago)
}
