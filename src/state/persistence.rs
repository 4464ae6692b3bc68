use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::{PlannerError, Result};
use crate::state::PartySnapshot;

/// Load a party snapshot from a JSON file.
///
/// Every guest needs an id. Guests with duplicate ids are collapsed, first
/// occurrence wins.
pub fn load_party<P: AsRef<Path>>(path: P) -> Result<PartySnapshot> {
    let content = fs::read_to_string(path)?;
    let mut party: PartySnapshot = serde_json::from_str(&content)?;

    if let Some(pos) = party.guests.iter().position(|g| g.id.trim().is_empty()) {
        return Err(PlannerError::InvalidInput(format!(
            "guest #{} ({:?}) has no id",
            pos + 1,
            party.guests[pos].name
        )));
    }

    let before = party.guests.len();
    let mut seen: HashSet<String> = HashSet::new();
    party.guests.retain(|g| seen.insert(g.id.clone()));
    if party.guests.len() < before {
        tracing::warn!(
            dropped = before - party.guests.len(),
            "Ignored guests with duplicate ids"
        );
    }

    Ok(party)
}

/// Save a party snapshot as pretty-printed JSON.
pub fn save_party<P: AsRef<Path>>(path: P, party: &PartySnapshot) -> Result<()> {
    let json = serde_json::to_string_pretty(party)?;
    fs::write(path, json)?;
    Ok(())
}
