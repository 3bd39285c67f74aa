//! Action map encoding.
//!
//! The host expects a flat JSON object from unit id to action symbol, with
//! idle units left out.

use crate::board::ActionMap;

/// Formats an action map as a compact JSON object.
pub fn format_actions(actions: &ActionMap) -> Result<String, serde_json::Error> {
    serde_json::to_string(actions)
}
