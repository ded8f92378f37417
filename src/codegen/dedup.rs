//! Deduplication of event rows by identity.
//!
//! Two rows describe the same event when their [`EventKey`]s match. The first
//! definition wins; later ones are dropped, and a conflict is recorded when
//! their event details disagree.

use indexmap::map::Entry;
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

use crate::codegen::types::{EventKey, EventRow};

/// A dropped row whose event details differ from the retained definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateConflict {
    pub key: EventKey,
    pub kept_details: String,
    pub ignored_details: String,
}

impl fmt::Display for DuplicateConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Conflicting rows for analytics event ({}). \
             Using the first definition and ignoring this row (event_details differ).",
            self.key
        )
    }
}

/// Unique rows plus the conflicts found while collapsing duplicates
#[derive(Debug, Clone, Default)]
pub struct Deduplicated {
    pub rows: Vec<EventRow>,
    pub conflicts: Vec<DuplicateConflict>,
}

/// Collapse rows sharing an identity, preserving first-occurrence order
pub fn deduplicate<I>(rows: I) -> Deduplicated
where
    I: IntoIterator<Item = EventRow>,
{
    let mut by_key: IndexMap<EventKey, EventRow> = IndexMap::new();
    let mut conflicts = Vec::new();

    for row in rows {
        match by_key.entry(row.key()) {
            Entry::Vacant(slot) => {
                slot.insert(row);
            }
            Entry::Occupied(existing) => {
                let kept = existing.get();
                if kept.event_details() != row.event_details() {
                    conflicts.push(DuplicateConflict {
                        key: existing.key().clone(),
                        kept_details: kept.event_details().to_string(),
                        ignored_details: row.event_details().to_string(),
                    });
                }
            }
        }
    }

    Deduplicated {
        rows: by_key.into_values().collect(),
        conflicts,
    }
}
