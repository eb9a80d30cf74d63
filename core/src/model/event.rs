use serde::{Deserialize, Serialize};
use uuid::Uuid;

// One logged occurrence during a port call, as extracted from a Statement
// of Facts. Start/end stay as the raw text the extraction backend produced
// ("20.01.2021 2005", "0930", "N/A", ...); they are only interpreted at
// calculation time, so one garbled timestamp never blocks the rest of the
// sheet.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SofEvent {
    pub id: Uuid,
    pub description: String,
    #[serde(default)]
    pub day: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    #[serde(default)]
    pub remarks: Option<String>,
}

impl SofEvent {
    pub fn new(description: String, start: Option<String>, end: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            description,
            day: None,
            start,
            end,
            remarks: None,
        }
    }
}
