use anyhow::{Context, Result};

use askchat_types::{Exchange, History, HISTORY_KEY};
use crate::store::KeyValueStore;

/// Read the persisted history.
///
/// Absent, unreadable or malformed data all yield an empty history: the
/// whole snapshot is discarded if any element is not a well-formed exchange.
pub fn load_history(store: &dyn KeyValueStore) -> History {
    let raw = match store.get(HISTORY_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return History::new(),
        Err(e) => {
            eprintln!("[History] could not read saved history: {:#}", e);
            return History::new();
        }
    };

    parse_history(&raw).unwrap_or_default()
}

/// Parse a serialized history; `None` if it is not a valid sequence of exchanges
pub fn parse_history(raw: &str) -> Option<History> {
    let history: History = serde_json::from_str(raw).ok()?;
    if history.iter().all(Exchange::is_well_formed) {
        Some(history)
    } else {
        None
    }
}

/// Replace the persisted history with the given snapshot
pub fn save_history(store: &mut dyn KeyValueStore, history: &[Exchange]) -> Result<()> {
    let json = serde_json::to_string(history).context("Failed to serialize chat history")?;
    store.set(HISTORY_KEY, &json)
}
