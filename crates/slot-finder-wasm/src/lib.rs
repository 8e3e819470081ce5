//! WASM bindings for slot-finder.
//!
//! Exposes the group free-slot search to JavaScript via `wasm-bindgen`. Requests and
//! results cross the boundary as JSON strings; errors come back as string `JsValue`s.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p slot-finder-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir packages/slot-finder-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/slot_finder_wasm.wasm
//! ```
//!
//! ## Request shape
//!
//! ```json
//! {
//!   "search_start": "2025-01-06",
//!   "search_end": "2025-01-10",
//!   "min_duration_minutes": 30,
//!   "working_hours_start": "09:00:00",
//!   "working_hours_end": "17:00:00",
//!   "days_of_week": [1, 2, 3, 4, 5],
//!   "busy": [{"start": "2025-01-06T09:00:00Z", "end": "2025-01-06T10:00:00Z"}],
//!   "people": [{"person_id": "alice", "busy": []}]
//! }
//! ```

use serde::{Deserialize, Serialize};
use slot_finder::{PersonCalendar, PrivacyLevel, SearchConstraints, TimeInterval};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly request for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct FindRequest {
    #[serde(flatten)]
    constraints: SearchConstraints,
    #[serde(default)]
    busy: Vec<TimeInterval>,
    #[serde(default)]
    people: Vec<PersonCalendar>,
}

impl FindRequest {
    fn all_busy(&self) -> Vec<TimeInterval> {
        let mut all = self.busy.clone();
        all.extend(slot_finder::flatten_busy(&self.people));
        all
    }

    fn calendars(&self) -> Vec<PersonCalendar> {
        let mut calendars = self.people.clone();
        if !self.busy.is_empty() {
            calendars.push(PersonCalendar::new("unassigned", self.busy.clone()));
        }
        calendars
    }
}

fn parse_request(json: &str) -> Result<FindRequest, JsValue> {
    serde_json::from_str(json)
        .map_err(|e| JsValue::from_str(&format!("Invalid request JSON: {}", e)))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Find every free slot shared by the group.
///
/// Returns a JSON array of `{start, end, duration_minutes, day_of_week}` objects.
#[wasm_bindgen(js_name = "findFreeSlots")]
pub fn find_free_slots(request_json: &str) -> Result<String, JsValue> {
    let request = parse_request(request_json)?;
    let slots = slot_finder::find_free_slots(&request.all_busy(), &request.constraints)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    to_json(&slots)
}

/// Find the earliest free slot. Returns a JSON object, or `null` if none qualifies.
#[wasm_bindgen(js_name = "findFirstFreeSlot")]
pub fn find_first_free_slot(request_json: &str) -> Result<String, JsValue> {
    let request = parse_request(request_json)?;
    let slot = slot_finder::find_first_free_slot(&request.all_busy(), &request.constraints)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    to_json(&slot)
}

/// Merged group busy blocks over the search range.
///
/// `privacy` is `"full"` (include `person_count`) or `"opaque"` (the default when empty).
#[wasm_bindgen(js_name = "groupBusyBlocks")]
pub fn group_busy_blocks(request_json: &str, privacy: &str) -> Result<String, JsValue> {
    let request = parse_request(request_json)?;
    let privacy = match privacy {
        "full" => PrivacyLevel::Full,
        "opaque" | "" => PrivacyLevel::Opaque,
        other => {
            return Err(JsValue::from_str(&format!(
                "Unknown privacy level '{}': expected 'full' or 'opaque'",
                other
            )))
        }
    };
    let blocks =
        slot_finder::group_busy_blocks(&request.calendars(), &request.constraints, privacy)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
    to_json(&blocks)
}
