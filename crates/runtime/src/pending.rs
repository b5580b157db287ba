use std::collections::HashMap;

use keyrelay_core::KeyEvent;

use crate::responder::{EventId, KeyDispatch};

struct PendingRecord {
    dispatch: KeyDispatch,
    outstanding: usize,
    handled: bool,
    /// Handed back to the host; the record now waits for its replay.
    redispatched: bool,
}

/// Result of feeding one responder answer into the tracker.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Answer {
    /// No record with that id; the event already resolved or was dropped.
    Unknown,
    Waiting { remaining: usize },
    /// Every responder answered. The record stays until it is removed or
    /// its replay returns.
    Complete { handled: bool, dispatch: KeyDispatch },
}

/// Records of fresh events, from dispatch until they resolve as handled or
/// their redispatched copy comes back as a replay.
#[derive(Default)]
pub(crate) struct PendingTracker {
    next_id: u64,
    records: HashMap<EventId, PendingRecord>,
}

impl PendingTracker {
    pub(crate) fn next_id(&mut self) -> EventId {
        self.next_id += 1;
        EventId::new(self.next_id)
    }

    pub(crate) fn insert(&mut self, dispatch: KeyDispatch, outstanding: usize) {
        let record = PendingRecord { outstanding, handled: false, redispatched: false, dispatch };
        self.records.insert(record.dispatch.id, record);
    }

    /// OR-merges `handled` into the record's verdict.
    pub(crate) fn answer(&mut self, id: EventId, handled: bool) -> Answer {
        let Some(record) = self.records.get_mut(&id) else {
            return Answer::Unknown;
        };
        record.handled |= handled;
        record.outstanding = record.outstanding.saturating_sub(1);
        if record.outstanding > 0 {
            return Answer::Waiting { remaining: record.outstanding };
        }
        Answer::Complete { handled: record.handled, dispatch: record.dispatch.clone() }
    }

    /// Flags the record as redispatched. Returns `false` if it already was or
    /// is no longer tracked.
    pub(crate) fn mark_redispatched(&mut self, id: EventId) -> bool {
        match self.records.get_mut(&id) {
            Some(record) if !record.redispatched => {
                record.redispatched = true;
                true
            }
            _ => false,
        }
    }

    /// Removes the oldest redispatched record whose event equals `event`.
    pub(crate) fn take_replay(&mut self, event: &KeyEvent) -> Option<EventId> {
        let id = self
            .records
            .iter()
            .filter(|(_, record)| record.redispatched && record.dispatch.event == *event)
            .map(|(id, _)| *id)
            .min()?;
        self.records.remove(&id);
        Some(id)
    }

    pub(crate) fn remove(&mut self, id: EventId) -> bool {
        self.records.remove(&id).is_some()
    }

    /// Records still waiting for responder answers.
    pub(crate) fn awaiting_len(&self) -> usize {
        self.records.values().filter(|record| !record.redispatched).count()
    }

    /// Records whose replay has not arrived yet.
    pub(crate) fn redispatched_len(&self) -> usize {
        self.records.values().filter(|record| record.redispatched).count()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
