use keyrelay_core::EmbedderKeyEvent;
use serde_json::Value;
use std::fmt::{Debug, Formatter};
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CallKind {
    Embedder,
    Channel,
}

/// One call the coordinator made into the mock host.
///
/// A record taken in record mode still owns the completion; answer it with
/// [`CallRecord::respond`]. Dropping an unanswered record drops the
/// completion, which the coordinator treats as "unhandled".
pub struct CallRecord {
    pub kind: CallKind,
    pub event: Option<EmbedderKeyEvent>,
    pub message: Option<Value>,
    callback: Option<Box<dyn FnOnce(bool) + Send>>,
}

impl CallRecord {
    pub(crate) fn embedder(event: EmbedderKeyEvent, callback: Option<Box<dyn FnOnce(bool) + Send>>) -> Self {
        Self { kind: CallKind::Embedder, event: Some(event), message: None, callback }
    }

    pub(crate) fn channel(message: Value, callback: Option<Box<dyn FnOnce(bool) + Send>>) -> Self {
        Self { kind: CallKind::Channel, event: None, message: Some(message), callback }
    }

    pub fn is_pending(&self) -> bool {
        self.callback.is_some()
    }

    /// Delivers the answer. Returns `false` if the record was already answered
    /// or never carried a completion.
    pub fn respond(&mut self, handled: bool) -> bool {
        match self.callback.take() {
            Some(callback) => {
                callback(handled);
                true
            }
            None => false,
        }
    }

    /// Moves the completion out, e.g. to answer it from another thread.
    pub fn take_callback(&mut self) -> Option<Box<dyn FnOnce(bool) + Send>> {
        self.callback.take()
    }
}

impl Debug for CallRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallRecord")
            .field("kind", &self.kind)
            .field("event", &self.event)
            .field("message", &self.message)
            .field("pending", &self.is_pending())
            .finish()
    }
}

/// Call log shared by the mock view and its messenger so both kinds of call
/// appear in dispatch order.
#[derive(Clone, Default)]
pub(crate) struct CallLog(Arc<Mutex<Vec<CallRecord>>>);

impl CallLog {
    pub(crate) fn push(&self, record: CallRecord) {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).push(record);
    }

    pub(crate) fn take(&self) -> Vec<CallRecord> {
        std::mem::take(&mut *self.0.lock().unwrap_or_else(PoisonError::into_inner))
    }

    pub(crate) fn len(&self) -> usize {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}
