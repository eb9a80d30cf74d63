use serde::{Deserialize, Serialize};

use crate::model::metrics::{EventMetric, LaytimeOutcome};
use crate::model::terms::LaytimeTerms;
use crate::model::vessel::VesselInfo;

// Display rounding only. The metrics themselves stay full precision.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn fmt_hours(hours: f64) -> String {
    format!("{:.2}", hours)
}

// One table row, everything already formatted; missing values show as "-".
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct EventRow {
    pub description: String,
    pub day: String,
    pub start: String,
    pub end: String,
    pub utilization: String,
    pub pct_of_allowed: String,
    pub consumed: String,
    pub remaining: String,
}

impl EventRow {
    pub fn from_metric(metric: &EventMetric, terms: &LaytimeTerms) -> Self {
        let allowed_hours = terms.allowed_hours();
        let pct_of_allowed = if allowed_hours > 0.0 {
            format!("{:.1}%", metric.utilization_hours / allowed_hours * 100.0)
        } else {
            "-".to_string()
        };

        Self {
            description: metric.event.description.clone(),
            day: metric.event.day.clone().unwrap_or_else(|| "-".to_string()),
            start: metric.event.start.clone().unwrap_or_else(|| "-".to_string()),
            end: metric.event.end.clone().unwrap_or_else(|| "-".to_string()),
            utilization: fmt_hours(metric.utilization_hours),
            pct_of_allowed,
            consumed: fmt_hours(metric.cumulative_consumed_hours),
            remaining: fmt_hours(metric.remaining_hours),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LaytimeSummary {
    pub used_days: f64,
    pub allowed_days: f64,
    pub delta_days: f64,
    // Floored at zero for the summary cards.
    pub remaining_days_display: f64,
    // used / allowed, for the utilization gauge. 0 when no laytime allowed.
    pub used_ratio: f64,
    pub on_demurrage: bool,
    pub outcome: LaytimeOutcome,
}

impl LaytimeSummary {
    pub fn demurrage_display(&self) -> f64 {
        round2(self.outcome.demurrage)
    }

    pub fn dispatch_display(&self) -> f64 {
        round2(self.outcome.dispatch)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LaytimeReport {
    pub vessel: VesselInfo,
    pub metrics: Vec<EventMetric>,
    pub rows: Vec<EventRow>,
    pub summary: LaytimeSummary,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::event::SofEvent;

    #[test]
    fn test_round2() {
        assert_eq!(round2(8.333333), 8.33);
        assert_eq!(round2(8.336), 8.34);
        assert_eq!(round2(0.0), 0.0);
    }

    #[test]
    fn test_row_fills_missing_fields() {
        let metric = EventMetric {
            event: SofEvent::new("Awaiting berth".to_string(), None, None),
            utilization_hours: 0.0,
            cumulative_consumed_hours: 5.0,
            remaining_hours: 7.0,
        };
        let terms = LaytimeTerms {
            allowed_laytime_days: 0.5,
            ..Default::default()
        };

        let row = EventRow::from_metric(&metric, &terms);
        assert_eq!(row.day, "-");
        assert_eq!(row.start, "-");
        assert_eq!(row.end, "-");
        assert_eq!(row.utilization, "0.00");
        assert_eq!(row.pct_of_allowed, "0.0%");
        assert_eq!(row.consumed, "5.00");
        assert_eq!(row.remaining, "7.00");
    }

    #[test]
    fn test_pct_without_allowed_laytime() {
        let metric = EventMetric {
            event: SofEvent::new("Loading".to_string(), None, None),
            utilization_hours: 3.0,
            cumulative_consumed_hours: 3.0,
            remaining_hours: -3.0,
        };
        let row = EventRow::from_metric(&metric, &LaytimeTerms::default());
        assert_eq!(row.pct_of_allowed, "-");
    }

    #[test]
    fn test_outcome_display_rounding() {
        let summary = LaytimeSummary {
            used_days: 0.0,
            allowed_days: 0.0,
            delta_days: 0.0,
            remaining_days_display: 0.0,
            used_ratio: 0.0,
            on_demurrage: true,
            outcome: LaytimeOutcome {
                demurrage: 2.0 / 24.0 * 100.0,
                dispatch: 0.0,
            },
        };
        assert_eq!(summary.demurrage_display(), 8.33);
        assert_eq!(summary.dispatch_display(), 0.0);
    }
}
