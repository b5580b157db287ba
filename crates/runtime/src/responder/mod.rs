mod channel;
mod embedder;
mod text_input;

use std::fmt::{Display, Formatter};

use keyrelay_core::keys::keyval_to_char;
use keyrelay_core::{EmbedderKeyEvent, KeyEvent, KeyEventKind, LogicalKey, PhysicalKey};

pub use channel::ChannelResponder;
pub use embedder::EmbedderResponder;
pub use text_input::TextInputFilter;

/// Identifies one fresh key event from dispatch until it resolves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventId(u64);

impl EventId {
    pub(crate) const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u64 {
        self.0
    }
}

impl Display for EventId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A key event after physical/logical resolution, as every responder sees it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyDispatch {
    pub event: KeyEvent,
    pub id: EventId,
    pub kind: KeyEventKind,
    pub physical: PhysicalKey,
    pub logical: LogicalKey,
    pub character: Option<String>,
    /// Release whose physical key was not pressed.
    pub orphan_release: bool,
}

impl KeyDispatch {
    pub(crate) fn new(
        event: KeyEvent,
        id: EventId,
        kind: KeyEventKind,
        physical: PhysicalKey,
        logical: LogicalKey,
        orphan_release: bool,
    ) -> Self {
        let character = match kind {
            KeyEventKind::Up => None,
            _ if event.is_synthesized() => None,
            KeyEventKind::Down | KeyEventKind::Repeat => {
                keyval_to_char(event.keyval()).map(String::from)
            }
        };
        Self { event, id, kind, physical, logical, character, orphan_release }
    }

    pub fn to_embedder_event(&self) -> EmbedderKeyEvent {
        EmbedderKeyEvent {
            timestamp: u64::from(self.event.time()) * 1000,
            kind: self.kind,
            physical: self.physical,
            logical: self.logical,
            character: self.character.clone(),
            synthesized: self.event.is_synthesized(),
        }
    }
}

/// Exactly-once answer for one responder and one event.
///
/// Consumed by [`KeyResponse::respond`]. A response dropped without an answer
/// reports "unhandled" so the event still resolves.
#[must_use = "a key response must be answered"]
pub struct KeyResponse {
    responder: &'static str,
    id: EventId,
    callback: Option<Box<dyn FnOnce(bool) + Send>>,
}

impl KeyResponse {
    pub(crate) fn new(
        responder: &'static str,
        id: EventId,
        callback: impl FnOnce(bool) + Send + 'static,
    ) -> Self {
        Self { responder, id, callback: Some(Box::new(callback)) }
    }

    pub fn respond(mut self, handled: bool) {
        if let Some(callback) = self.callback.take() {
            tracing::trace!(responder = self.responder, id = %self.id, handled, "responder answered");
            callback(handled);
        }
    }
}

impl Drop for KeyResponse {
    fn drop(&mut self) {
        if let Some(callback) = self.callback.take() {
            tracing::warn!(
                responder = self.responder,
                id = %self.id,
                "key response dropped without an answer, treating as unhandled"
            );
            callback(false);
        }
    }
}

/// An independent consumer that may claim a key event asynchronously.
pub trait KeyResponder: Send + Sync {
    fn name(&self) -> &'static str;

    /// Evaluates the event and answers `response` exactly once, now or later
    /// from any thread.
    fn handle_event(&self, dispatch: &KeyDispatch, response: KeyResponse);
}
