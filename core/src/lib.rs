pub mod model;
pub mod repository;
pub mod input;
pub mod time;
pub mod service;
pub mod usecase;

pub use model::{
    CalculationSession, EventMetric, LaytimeOutcome, LaytimeTerms, SofEvent, VesselInfo,
};
pub use repository::{FileSessionRepository, SessionRepository};
pub use input::{compose_stamp, expand_key, map_extraction, parse_args, parse_extraction, ParsedInput};
pub use time::{hours_between, parse_timestamp, parse_timestamp_on};
pub use service::{
    compute_cost, compute_metrics, round2, EventRow, LaytimeReport, LaytimeSummary, SessionService,
};
pub use usecase::{report_for, StatementUseCase};
