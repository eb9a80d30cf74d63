use serde::{Deserialize, Serialize};

use crate::model::event::SofEvent;

// Computed per event, never stored. Hours are kept at full f64 precision;
// rounding happens in the display layer only.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct EventMetric {
    pub event: SofEvent,
    pub utilization_hours: f64,
    pub cumulative_consumed_hours: f64,
    pub remaining_hours: f64,
}

// At most one side is nonzero: demurrage when laytime overran, dispatch
// when it finished early.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct LaytimeOutcome {
    pub demurrage: f64,
    pub dispatch: f64,
}
