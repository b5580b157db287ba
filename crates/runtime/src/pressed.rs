use std::collections::{HashMap, HashSet};

use keyrelay_core::{KeyEventKind, LogicalKey, PhysicalKey};

use crate::responder::EventId;

#[derive(Clone, Copy, Debug)]
struct PressedEntry {
    logical: LogicalKey,
    /// Release that is in flight for this key, if any.
    release_pending: Option<EventId>,
}

/// Physical key → logical key for every key the runtime considers held.
///
/// Updated when an event is dispatched, not when it resolves, so queries made
/// while answers are outstanding already see the new state.
#[derive(Default)]
pub(crate) struct PressedTable {
    entries: HashMap<PhysicalKey, PressedEntry>,
}

impl PressedTable {
    /// Records a press and reports whether it is a fresh press or a repeat.
    ///
    /// A repeat keeps the logical key of the original press.
    pub(crate) fn press(&mut self, physical: PhysicalKey, logical: LogicalKey) -> (KeyEventKind, LogicalKey) {
        match self.entries.get(&physical) {
            Some(entry) if entry.release_pending.is_none() => (KeyEventKind::Repeat, entry.logical),
            _ => {
                self.entries.insert(physical, PressedEntry { logical, release_pending: None });
                (KeyEventKind::Down, logical)
            }
        }
    }

    /// Marks the key as releasing. Returns the logical key it was pressed with,
    /// or `None` for an orphan release.
    pub(crate) fn release(&mut self, physical: PhysicalKey, id: EventId) -> Option<LogicalKey> {
        match self.entries.get_mut(&physical) {
            Some(entry) if entry.release_pending.is_none() => {
                entry.release_pending = Some(id);
                Some(entry.logical)
            }
            _ => None,
        }
    }

    /// Drops the entry once its release resolved, unless the key was pressed
    /// again in the meantime.
    pub(crate) fn finish_release(&mut self, physical: PhysicalKey, id: EventId) -> bool {
        match self.entries.get(&physical) {
            Some(entry) if entry.release_pending == Some(id) => {
                self.entries.remove(&physical);
                true
            }
            _ => false,
        }
    }

    pub(crate) fn snapshot(&self) -> HashMap<PhysicalKey, LogicalKey> {
        self.entries.iter().map(|(physical, entry)| (*physical, entry.logical)).collect()
    }

    /// Keys that are down and not on their way up.
    pub(crate) fn held(&self) -> HashSet<PhysicalKey> {
        self.entries
            .iter()
            .filter(|(_, entry)| entry.release_pending.is_none())
            .map(|(physical, _)| *physical)
            .collect()
    }
}
