use serde::{Deserialize, Serialize};

// Scalar charter-party inputs for the calculation. Quantity and rate are
// only consulted by the legacy cargo fallback when the session carries no
// event timeline.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct LaytimeTerms {
    pub allowed_laytime_days: f64,
    pub demurrage_rate_per_day: f64,
    pub dispatch_rate_per_day: f64,
    pub cargo_quantity: f64,
    pub loading_rate: f64,
}

impl LaytimeTerms {
    pub fn allowed_hours(&self) -> f64 {
        self.allowed_laytime_days * 24.0
    }
}
