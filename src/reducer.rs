/// Selection and sync state machine for the saved-tabs page

use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

use serde_json::Value;
use yew::Reducible;

use crate::record::{RecordDelta, TabRecord};

/// Last-known records keyed by id, plus the ids the user has checked.
/// Selected ids without a matching record are inert; derived helpers skip
/// them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TabState {
    pub records: BTreeMap<String, TabRecord>,
    pub selected: BTreeSet<String>,
}

/// One variant per state transition
#[derive(Debug, Clone, PartialEq)]
pub enum TabEvent {
    /// Full replace of the record collection after a fetch
    Load(Vec<TabRecord>),
    /// Reconcile the records a mutation round-trip reported back
    UpdateMerge(Vec<RecordDelta>),
    /// Check or uncheck a set of ids
    ToggleOne { ids: Vec<String>, checked: bool },
    /// Header checkbox: select everything visible, or clear everything
    ToggleAll {
        visible_ids: Vec<String>,
        none_selected: bool,
    },
}

impl TabState {
    pub fn apply(mut self, event: TabEvent) -> TabState {
        match event {
            TabEvent::Load(records) => {
                // Selection survives a reload; only the records are replaced
                self.records = records
                    .into_iter()
                    .map(|record| (record.id.clone(), record))
                    .collect();
                self
            }
            TabEvent::UpdateMerge(deltas) => {
                for delta in deltas {
                    self.selected.remove(&delta.id);
                    self.merge_delta(delta);
                }
                self
            }
            TabEvent::ToggleOne { ids, checked } => {
                if checked {
                    self.selected.extend(ids);
                } else {
                    for id in &ids {
                        self.selected.remove(id);
                    }
                }
                self
            }
            TabEvent::ToggleAll {
                visible_ids,
                none_selected,
            } => {
                // Deselect is a full clear, not a difference against
                // visible_ids: ids selected outside the visible set go too
                self.selected = if none_selected {
                    visible_ids.into_iter().collect()
                } else {
                    BTreeSet::new()
                };
                self
            }
        }
    }

    fn merge_delta(&mut self, delta: RecordDelta) {
        let id = delta.id.clone();
        let incoming = delta.into_value();

        let merged = match self.records.get(&id) {
            Some(existing) => match serde_json::to_value(existing) {
                Ok(mut base) => {
                    merge_values(&mut base, incoming);
                    base
                }
                Err(err) => {
                    log::warn!("could not serialize record {}: {}", id, err);
                    return;
                }
            },
            None => incoming,
        };

        match serde_json::from_value::<TabRecord>(merged) {
            Ok(record) => {
                self.records.insert(id, record);
            }
            Err(err) => {
                log::warn!("discarding unmergeable update for {}: {}", id, err);
            }
        }
    }
}

impl Reducible for TabState {
    type Action = TabEvent;

    fn reduce(self: Rc<Self>, event: TabEvent) -> Rc<Self> {
        Rc::new(self.as_ref().clone().apply(event))
    }
}

/// Merge `incoming` into `base`. Objects merge key by key, recursively;
/// for every other value kind, or on a kind mismatch, the incoming value
/// wins.
pub fn merge_values(base: &mut Value, incoming: Value) {
    match (base, incoming) {
        (Value::Object(base_map), Value::Object(incoming_map)) => {
            for (key, value) in incoming_map {
                match base_map.get_mut(&key) {
                    Some(slot) => merge_values(slot, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (slot, incoming) => *slot = incoming,
    }
}
