use serde::{Deserialize, Serialize};

// Header block of the statement. Display only; nothing here feeds the
// calculation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct VesselInfo {
    pub vessel_name: Option<String>,
    pub master: Option<String>,
    pub agent: Option<String>,
    pub port_of_loading: Option<String>,
    pub port_of_discharge: Option<String>,
    pub cargo_description: Option<String>,
    pub cargo_quantity: Option<String>,
}
