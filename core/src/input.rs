use std::collections::HashMap;

use anyhow::{anyhow, Result};
use serde_json::Value;

use crate::model::event::SofEvent;
use crate::model::vessel::VesselInfo;

// The extraction backend is not consistent about field names: depending on
// the document and the prompt revision it emits snake_case, Title Case or
// display-style keys. Tolerating that variation is the caller's job, so it
// lives here and never inside the calculator.
const DESCRIPTION_KEYS: [&str; 5] = [
    "event",
    "Events",
    "Event Description",
    "Description",
    "description",
];
const DAY_KEYS: [&str; 2] = ["day", "Day"];
const DATE_KEYS: [&str; 4] = ["start_date", "Start Date", "Date", "date"];
const START_TIME_KEYS: [&str; 2] = ["start_time", "Start Time"];
const END_TIME_KEYS: [&str; 2] = ["end_time", "End Time"];
const REMARKS_KEYS: [&str; 2] = ["remarks", "Remarks"];

pub fn lookup_str(obj: &Value, keys: &[&str]) -> Option<String> {
    let map = obj.as_object()?;
    keys.iter().find_map(|key| value_to_string(map.get(*key)?))
}

fn value_to_string(v: &Value) -> Option<String> {
    let s = match v {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

// "<date> <time>" when both halves exist, else whichever half does. The
// composed text is what parse_timestamp later sees.
pub fn compose_stamp(date: Option<&str>, time: Option<&str>) -> Option<String> {
    match (date, time) {
        (Some(d), Some(t)) => Some(format!("{} {}", d, t)),
        (Some(d), None) => Some(d.to_string()),
        (None, Some(t)) => Some(t.to_string()),
        (None, None) => None,
    }
}

pub fn map_extraction(root: &Value) -> (VesselInfo, Vec<SofEvent>) {
    (extract_vessel(root), extract_events(root))
}

pub fn parse_extraction(raw: &str) -> Result<(VesselInfo, Vec<SofEvent>)> {
    let value: Value = serde_json::from_str(raw)?;
    Ok(map_extraction(&value))
}

pub fn extract_events(root: &Value) -> Vec<SofEvent> {
    locate_events(root)
        .map(|arr| arr.iter().map(map_event).collect())
        .unwrap_or_default()
}

fn locate_events(root: &Value) -> Option<&Vec<Value>> {
    if let Some(arr) = root.as_array() {
        return Some(arr);
    }
    let obj = root.as_object()?;
    for key in ["events", "Events"] {
        if let Some(arr) = obj.get(key).and_then(Value::as_array) {
            return Some(arr);
        }
    }
    if let Some(arr) = obj
        .get("data")
        .and_then(|d| d.get("events"))
        .and_then(Value::as_array)
    {
        return Some(arr);
    }
    // Last resort: take the first array value found anywhere in the object.
    obj.values().find_map(Value::as_array)
}

fn map_event(ev: &Value) -> SofEvent {
    let date = lookup_str(ev, &DATE_KEYS);
    let start_time = lookup_str(ev, &START_TIME_KEYS);
    let end_time = lookup_str(ev, &END_TIME_KEYS);

    let mut event = SofEvent::new(
        lookup_str(ev, &DESCRIPTION_KEYS).unwrap_or_else(|| "-".to_string()),
        compose_stamp(date.as_deref(), start_time.as_deref()),
        compose_stamp(date.as_deref(), end_time.as_deref()),
    );
    event.day = lookup_str(ev, &DAY_KEYS);
    event.remarks = lookup_str(ev, &REMARKS_KEYS);
    event
}

pub fn extract_vessel(root: &Value) -> VesselInfo {
    let block = root
        .get("vessel_info")
        .or_else(|| root.get("data").and_then(|d| d.get("vessel_info")))
        .unwrap_or(root);

    VesselInfo {
        vessel_name: lookup_str(block, &["name_of_vessel", "vessel_name", "Vessel Name"]),
        master: lookup_str(block, &["name_of_master", "master", "Master"]),
        agent: lookup_str(block, &["agent", "Agent"]),
        port_of_loading: lookup_str(
            block,
            &["port_of_loading_cargo", "port_of_loading", "Port of Loading"],
        ),
        port_of_discharge: lookup_str(block, &["port_of_discharge", "Port of Discharge"]),
        cargo_description: lookup_str(block, &["description_of_cargo", "cargo", "Cargo"]),
        cargo_quantity: lookup_str(block, &["quantity_of_cargo", "quantity", "Quantity"]),
    }
}

// Free-form CLI input: plain words become the text, key:value pairs become
// metadata.
#[derive(Debug, PartialEq)]
pub struct ParsedInput {
    pub text: String,
    pub metadata: HashMap<String, String>,
}

pub fn parse_args(args: &[String]) -> ParsedInput {
    let mut text_parts = Vec::new();
    let mut metadata = HashMap::new();

    for arg in args {
        if let Some((key, value)) = arg.split_once(':') {
            if !key.is_empty() {
                metadata.insert(key.to_string(), value.to_string());
                continue;
            }
        }
        text_parts.push(arg.as_str());
    }

    ParsedInput {
        text: text_parts.join(" "),
        metadata,
    }
}

pub fn expand_key(key: &str, candidates: &[&str]) -> Result<String> {
    // 1. Exact match
    if candidates.contains(&key) {
        return Ok(key.to_string());
    }

    // 2. Prefix match
    let matches: Vec<&str> = candidates
        .iter()
        .filter(|&&c| c.starts_with(key))
        .cloned()
        .collect();

    match matches.len() {
        1 => Ok(matches[0].to_string()),
        0 => Err(anyhow!("Unknown key: '{}'", key)),
        _ => Err(anyhow!("Ambiguous key: '{}' matches {:?}", key, matches)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_event_input() {
        let args = vec![
            "Hoses".to_string(),
            "connected".to_string(),
            "date:20.01.2021".to_string(),
            "start:0800".to_string(),
        ];
        let parsed = parse_args(&args);
        assert_eq!(parsed.text, "Hoses connected");
        assert_eq!(parsed.metadata.get("date"), Some(&"20.01.2021".to_string()));
        assert_eq!(parsed.metadata.get("start"), Some(&"0800".to_string()));
    }

    #[test]
    fn test_expand_key() {
        let candidates = vec!["date", "day", "start", "end", "remarks"];

        assert_eq!(expand_key("start", &candidates).unwrap(), "start");
        assert_eq!(expand_key("s", &candidates).unwrap(), "start");
        assert_eq!(expand_key("e", &candidates).unwrap(), "end");
        assert_eq!(expand_key("r", &candidates).unwrap(), "remarks");

        // "da" matches date and day
        assert!(expand_key("da", &candidates).is_err());
        assert!(expand_key("x", &candidates).is_err());
    }

    #[test]
    fn test_map_backend_snake_case() {
        let root = json!({
            "vessel_info": {
                "name_of_vessel": "MV CAPE ASTER",
                "port_of_loading_cargo": "Richards Bay",
                "description_of_cargo": "STEAM COAL IN BULK",
                "quantity_of_cargo": "158,484 MT"
            },
            "events": [
                {
                    "event": "NOTICE OF READINESS TENDERED",
                    "day": "WED",
                    "start_date": "20.01.2021",
                    "start_time": "2005",
                    "end_time": "N/A"
                }
            ]
        });

        let (vessel, events) = map_extraction(&root);
        assert_eq!(vessel.vessel_name.as_deref(), Some("MV CAPE ASTER"));
        assert_eq!(vessel.port_of_loading.as_deref(), Some("Richards Bay"));
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].description, "NOTICE OF READINESS TENDERED");
        assert_eq!(events[0].day.as_deref(), Some("WED"));
        assert_eq!(events[0].start.as_deref(), Some("20.01.2021 2005"));
        // N/A passes through untouched; the parser rejects it later.
        assert_eq!(events[0].end.as_deref(), Some("20.01.2021 N/A"));
    }

    #[test]
    fn test_map_backend_title_case() {
        let root = json!({
            "Events": [
                {
                    "Description": "Loading commenced",
                    "Day": "THU",
                    "Start Date": "21.01.2021",
                    "Start Time": "0615",
                    "End Time": "1200"
                }
            ]
        });

        let events = extract_events(&root);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].description, "Loading commenced");
        assert_eq!(events[0].start.as_deref(), Some("21.01.2021 0615"));
        assert_eq!(events[0].end.as_deref(), Some("21.01.2021 1200"));
    }

    #[test]
    fn test_events_nested_under_data() {
        let root = json!({
            "data": { "events": [ { "event": "Anchored" } ] }
        });
        let events = extract_events(&root);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].description, "Anchored");
        assert_eq!(events[0].start, None);
    }

    #[test]
    fn test_first_array_fallback() {
        let root = json!({
            "whatever": [ { "event": "Shifting to berth" } ]
        });
        let events = extract_events(&root);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].description, "Shifting to berth");
    }

    #[test]
    fn test_no_events_is_empty_not_error() {
        assert!(extract_events(&json!({"message": "ok"})).is_empty());
        assert!(extract_events(&json!(null)).is_empty());
    }

    #[test]
    fn test_time_without_date() {
        let root = json!({
            "events": [ { "event": "Survey", "start_time": "0900", "end_time": "1030" } ]
        });
        let events = extract_events(&root);
        assert_eq!(events[0].start.as_deref(), Some("0900"));
        assert_eq!(events[0].end.as_deref(), Some("1030"));
    }
}
