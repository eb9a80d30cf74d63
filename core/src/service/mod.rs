pub mod calculator;
pub mod dto;
pub mod session_service;

// Re-export
pub use calculator::{cargo_fallback_days, compute_cost, compute_metrics, compute_metrics_on};
pub use dto::{round2, EventRow, LaytimeReport, LaytimeSummary};
pub use session_service::SessionService;
