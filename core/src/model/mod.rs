pub mod event;
pub mod metrics;
pub mod session;
pub mod terms;
pub mod vessel;

// Re-export
pub use event::SofEvent;
pub use metrics::{EventMetric, LaytimeOutcome};
pub use session::CalculationSession;
pub use terms::LaytimeTerms;
pub use vessel::VesselInfo;
