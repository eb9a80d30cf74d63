use anyhow::Result;
use chrono::{Local, NaiveDate};

use crate::model::session::CalculationSession;
use crate::repository::SessionRepository;
use crate::service::calculator::{cargo_fallback_days, compute_cost, compute_metrics_on};
use crate::service::dto::{EventRow, LaytimeReport, LaytimeSummary};

pub struct StatementUseCase<'a, R: SessionRepository> {
    repo: &'a R,
}

impl<'a, R: SessionRepository> StatementUseCase<'a, R> {
    pub fn new(repo: &'a R) -> Self {
        Self { repo }
    }

    pub fn build_report(&self) -> Result<LaytimeReport> {
        Ok(report_for(&self.repo.load()?))
    }
}

pub fn report_for(session: &CalculationSession) -> LaytimeReport {
    report_for_on(session, Local::now().date_naive())
}

pub fn report_for_on(session: &CalculationSession, today: NaiveDate) -> LaytimeReport {
    let terms = &session.terms;
    let metrics = compute_metrics_on(&session.events, terms, today);

    // Laytime used comes from the timeline when there is one. Only a
    // session without any events falls back to the cargo quantity / rate
    // approximation.
    let used_days = if session.has_events() {
        metrics
            .last()
            .map(|m| m.cumulative_consumed_hours)
            .unwrap_or(0.0)
            / 24.0
    } else {
        cargo_fallback_days(terms.cargo_quantity, terms.loading_rate)
    };

    let remaining_hours = terms.allowed_hours() - used_days * 24.0;
    let outcome = compute_cost(remaining_hours, terms);

    let allowed_days = terms.allowed_laytime_days;
    let summary = LaytimeSummary {
        used_days,
        allowed_days,
        delta_days: (used_days - allowed_days).abs(),
        remaining_days_display: (allowed_days - used_days).max(0.0),
        used_ratio: if allowed_days > 0.0 {
            used_days / allowed_days
        } else {
            0.0
        },
        on_demurrage: remaining_hours < 0.0,
        outcome,
    };

    let rows = metrics
        .iter()
        .map(|m| EventRow::from_metric(m, terms))
        .collect();

    LaytimeReport {
        vessel: session.vessel.clone(),
        metrics,
        rows,
        summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::event::SofEvent;
    use crate::model::terms::LaytimeTerms;

    struct MockSessionRepo {
        session: CalculationSession,
    }

    impl SessionRepository for MockSessionRepo {
        fn load(&self) -> Result<CalculationSession> {
            Ok(self.session.clone())
        }
        fn save(&self, _session: &CalculationSession) -> Result<()> {
            unimplemented!()
        }
        fn clear(&self) -> Result<()> {
            unimplemented!()
        }
    }

    fn anchor() -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 8, 15).unwrap()
    }

    fn session_with_events() -> CalculationSession {
        let mut session = CalculationSession::default();
        session.terms = LaytimeTerms {
            allowed_laytime_days: 0.5,
            demurrage_rate_per_day: 100.0,
            dispatch_rate_per_day: 50.0,
            cargo_quantity: 0.0,
            loading_rate: 0.0,
        };
        session.events = vec![
            SofEvent::new(
                "Loading commenced".to_string(),
                Some("03.08 08.00".to_string()),
                Some("03.08 13.00".to_string()),
            ),
            SofEvent::new(
                "Loading resumed".to_string(),
                Some("04.08 10.00".to_string()),
                Some("04.08 15.00".to_string()),
            ),
        ];
        session
    }

    #[test]
    fn test_event_mode_under_allowed_is_dispatch() {
        let report = report_for_on(&session_with_events(), anchor());

        // 10h used of the allowed 12h.
        assert_eq!(report.metrics[1].cumulative_consumed_hours, 10.0);
        assert_eq!(report.metrics[1].remaining_hours, 2.0);
        assert!((report.summary.used_days - 10.0 / 24.0).abs() < 1e-9);
        assert!(!report.summary.on_demurrage);
        assert_eq!(report.summary.outcome.demurrage, 0.0);
        assert!((report.summary.outcome.dispatch - 2.0 / 24.0 * 50.0).abs() < 1e-9);
        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.rows[1].consumed, "10.00");
        assert_eq!(report.rows[1].remaining, "2.00");
    }

    #[test]
    fn test_event_mode_overrun_is_demurrage() {
        let mut session = session_with_events();
        session.terms.allowed_laytime_days = 1.0 / 3.0; // 8h allowed, 10h used

        let report = report_for_on(&session, anchor());
        assert!(report.summary.on_demurrage);
        // 2h over at 100/day.
        assert!((report.summary.outcome.demurrage - 2.0 / 24.0 * 100.0).abs() < 1e-9);
        assert_eq!(report.summary.demurrage_display(), 8.33);
        assert_eq!(report.summary.outcome.dispatch, 0.0);
        assert_eq!(report.summary.remaining_days_display, 0.0);
    }

    #[test]
    fn test_cargo_fallback_without_events() {
        let mut session = CalculationSession::default();
        session.terms = LaytimeTerms {
            allowed_laytime_days: 21.0,
            demurrage_rate_per_day: 100.0,
            dispatch_rate_per_day: 50.0,
            cargo_quantity: 5000.0,
            loading_rate: 250.0,
        };

        let report = report_for_on(&session, anchor());
        assert_eq!(report.summary.used_days, 20.0);
        assert!(!report.summary.on_demurrage);
        assert_eq!(report.summary.outcome.dispatch, 1.0 * 50.0);
        assert!(report.rows.is_empty());
    }

    #[test]
    fn test_session_with_events_never_falls_back() {
        // Even when every timestamp is unusable the timeline wins over the
        // cargo figures.
        let mut session = CalculationSession::default();
        session.terms.cargo_quantity = 5000.0;
        session.terms.loading_rate = 250.0;
        session
            .events
            .push(SofEvent::new("Garbled entry".to_string(), None, None));

        let report = report_for_on(&session, anchor());
        assert_eq!(report.summary.used_days, 0.0);
    }

    #[test]
    fn test_empty_session_is_all_zero() {
        let report = report_for_on(&CalculationSession::default(), anchor());
        assert!(report.rows.is_empty());
        assert_eq!(report.summary.used_days, 0.0);
        assert_eq!(report.summary.outcome, Default::default());
        assert_eq!(report.summary.used_ratio, 0.0);
    }

    #[test]
    fn test_report_is_idempotent() {
        let session = session_with_events();
        assert_eq!(
            report_for_on(&session, anchor()),
            report_for_on(&session, anchor())
        );
    }

    #[test]
    fn test_use_case_reads_through_repository() {
        let repo = MockSessionRepo {
            session: session_with_events(),
        };
        let report = StatementUseCase::new(&repo).build_report().unwrap();
        assert_eq!(report.rows.len(), 2);
    }
}
