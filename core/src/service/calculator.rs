use chrono::{Local, NaiveDate};

use crate::model::event::SofEvent;
use crate::model::metrics::{EventMetric, LaytimeOutcome};
use crate::model::terms::LaytimeTerms;
use crate::time::hours_between_on;

// Pure calculation over plain data. Nothing in here touches storage or the
// terminal, and nothing in here can fail: bad timestamps contribute zero
// hours and the computation carries on.

pub fn compute_metrics(events: &[SofEvent], terms: &LaytimeTerms) -> Vec<EventMetric> {
    compute_metrics_on(events, terms, Local::now().date_naive())
}

pub fn compute_metrics_on(
    events: &[SofEvent],
    terms: &LaytimeTerms,
    today: NaiveDate,
) -> Vec<EventMetric> {
    let allowed_hours = terms.allowed_hours();
    let mut cumulative = 0.0;

    // Events keep their sheet order. No re-sorting by timestamp.
    events
        .iter()
        .map(|event| {
            let utilization =
                hours_between_on(event.start.as_deref(), event.end.as_deref(), today);
            cumulative += utilization;
            EventMetric {
                event: event.clone(),
                utilization_hours: utilization,
                cumulative_consumed_hours: cumulative,
                remaining_hours: allowed_hours - cumulative,
            }
        })
        .collect()
}

pub fn compute_cost(total_remaining_hours: f64, terms: &LaytimeTerms) -> LaytimeOutcome {
    if total_remaining_hours < 0.0 {
        LaytimeOutcome {
            demurrage: -total_remaining_hours / 24.0 * terms.demurrage_rate_per_day,
            dispatch: 0.0,
        }
    } else if total_remaining_hours > 0.0 {
        LaytimeOutcome {
            demurrage: 0.0,
            dispatch: total_remaining_hours / 24.0 * terms.dispatch_rate_per_day,
        }
    } else {
        LaytimeOutcome::default()
    }
}

// Legacy mode for sessions without a timeline: laytime used in days,
// approximated from cargo quantity over the daily loading rate. A zero
// rate is clamped to 1 rather than rejected.
pub fn cargo_fallback_days(quantity: f64, rate: f64) -> f64 {
    quantity / rate.max(1.0)
}
