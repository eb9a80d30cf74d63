use serde::{Deserialize, Serialize};

use crate::model::event::SofEvent;
use crate::model::terms::LaytimeTerms;
use crate::model::vessel::VesselInfo;

// Everything one calculation works on: vessel header, charter terms and the
// event timeline. The calculator itself never touches storage; callers load
// a session, hand it over and persist whatever they changed.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct CalculationSession {
    pub vessel: VesselInfo,
    pub terms: LaytimeTerms,
    pub events: Vec<SofEvent>,
}

impl CalculationSession {
    pub fn has_events(&self) -> bool {
        !self.events.is_empty()
    }
}
