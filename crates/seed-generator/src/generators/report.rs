//! Moderation reports against cars and sellers.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use seed_catalog::{ReportCatalog, TopicPool};

use crate::generator::GeneratorError;
use crate::model::{NewReport, ReportStatus, ReportTarget, Review};
use crate::random::{backdated, count_in, int_in, pick, pick_many};

/// Backdating window for report creation.
pub const REPORT_BACKDATE_DAYS: i64 = 30;

/// Rows a report may reference, loaded once per phase.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportContext<'a> {
    pub reporters: &'a [i32],
    pub cars: &'a [i32],
    pub sellers: &'a [i32],
    pub admin_id: Option<i32>,
}

pub fn generate_report<R: Rng + ?Sized>(
    rng: &mut R,
    catalog: &ReportCatalog,
    ctx: &ReportContext<'_>,
    now: DateTime<Utc>,
) -> Result<NewReport, GeneratorError> {
    let reporter_id = *pick(rng, ctx.reporters).ok_or(GeneratorError::NoCandidates("users"))?;

    let (target, topics) = if rng.gen_bool(catalog.vehicle_share) {
        let car = *pick(rng, ctx.cars).ok_or(GeneratorError::NoCandidates("cars"))?;
        (ReportTarget::Car(car), &catalog.vehicle_topics)
    } else {
        let seller = *pick(rng, ctx.sellers).ok_or(GeneratorError::NoCandidates("sellers"))?;
        (ReportTarget::Seller(seller), &catalog.seller_topics)
    };

    let topic = pick(rng, topics)
        .ok_or(GeneratorError::EmptyPool("reports.topics"))?
        .topic
        .clone();
    let sub_topic_count = count_in(rng, catalog.sub_topic_count);
    let sub_topics = pick_many(rng, &catalog.sub_topics, sub_topic_count);
    let description = describe_report(rng, topics, &topic);
    let status = *pick(rng, &ReportStatus::ALL).unwrap_or(&ReportStatus::Pending);
    let created_at = backdated(rng, now, REPORT_BACKDATE_DAYS);

    let review = if status.is_pending() {
        None
    } else {
        let delay = int_in(rng, catalog.review_delay_hours);
        Some(Review {
            reviewed_at: created_at + Duration::hours(delay),
            admin_id: ctx.admin_id,
        })
    };

    Ok(NewReport {
        reporter_id,
        target,
        topic,
        sub_topics,
        description,
        status,
        created_at,
        review,
    })
}

/// A description from the topic's pool, or a generic line for unknown topics.
pub fn describe_report<R: Rng + ?Sized>(rng: &mut R, pools: &[TopicPool], topic: &str) -> String {
    pools
        .iter()
        .find(|pool| pool.topic == topic)
        .and_then(|pool| pick(rng, &pool.descriptions))
        .cloned()
        .unwrap_or_else(|| format!("Report regarding: {topic}"))
}
