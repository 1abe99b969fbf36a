use crate::models::day_summary::DaySummary;
use crate::models::intake::IntakeEvent;
use crate::utils::date::{day_label, local_date_of};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Group events by local calendar day, newest day first.
///
/// Events inside a day keep the newest-first order. `max_days` keeps only the
/// most recent days that have at least one event.
pub fn group_by_day(
    events: &[IntakeEvent],
    today: NaiveDate,
    max_days: Option<usize>,
) -> Vec<DaySummary> {
    let mut by_day: BTreeMap<NaiveDate, Vec<IntakeEvent>> = BTreeMap::new();
    for ev in events {
        by_day
            .entry(local_date_of(ev.timestamp))
            .or_default()
            .push(ev.clone());
    }

    let limit = max_days.unwrap_or(usize::MAX);

    by_day
        .into_iter()
        .rev()
        .take(limit)
        .map(|(date, mut evs)| {
            evs.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
            DaySummary {
                date,
                label: day_label(date, today),
                total_ml: evs
                    .iter()
                    .fold(0i64, |acc, e| acc.saturating_add(e.amount_ml)),
                events: evs,
            }
        })
        .collect()
}
