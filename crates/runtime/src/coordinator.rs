use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use keyrelay_core::keys::physical_key_for_keycode;
use keyrelay_core::platform::{
    BinaryMessenger, KeyLayout, KeyboardViewDelegate, US_LAYOUT, UsLayout, find_key_layout,
};
use keyrelay_core::{KeyEvent, KeyEventKind, LogicalKey, ModifierState, PhysicalKey};
use tracing::{debug, error, info, trace};

use crate::KeyboardSettings;
use crate::keyboard_channel;
use crate::modifiers::plan_modifier_sync;
use crate::pending::{Answer, PendingTracker};
use crate::pressed::PressedTable;
use crate::responder::{
    ChannelResponder, EmbedderResponder, EventId, KeyDispatch, KeyResponder, KeyResponse,
    TextInputFilter,
};

type LayoutCacheKey = (u16, u32, u8);

#[derive(Default)]
struct State {
    pending: PendingTracker,
    pressed: PressedTable,
    logical_cache: HashMap<LayoutCacheKey, LogicalKey>,
}

impl State {
    fn logical_key(&mut self, layout: &dyn KeyLayout, event: &KeyEvent) -> LogicalKey {
        *self
            .logical_cache
            .entry((event.keycode(), event.keyval(), event.group()))
            .or_insert_with(|| layout.lookup_logical_key(event.keycode(), event.keyval(), event.group()))
    }
}

struct Inner {
    delegate: Arc<dyn KeyboardViewDelegate>,
    messenger: Arc<dyn BinaryMessenger>,
    settings: KeyboardSettings,
    layout: Arc<dyn KeyLayout>,
    responders: Vec<Box<dyn KeyResponder>>,
    text_filter: TextInputFilter,
    state: Mutex<State>,
}

impl Inner {
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn handle_event(self: &Arc<Self>, event: &KeyEvent) -> bool {
        let dispatch = {
            let mut state = self.lock();
            if let Some(id) = state.pending.take_replay(event) {
                debug!(%id, %event, "replayed event returned to the host");
                return false;
            }

            let id = state.pending.next_id();
            let physical = physical_key_for_keycode(event.keycode());
            let dispatch = if event.is_press() {
                let logical = state.logical_key(self.layout.as_ref(), event);
                let (kind, logical) = state.pressed.press(physical, logical);
                KeyDispatch::new(event.clone(), id, kind, physical, logical, false)
            } else if let Some(logical) = state.pressed.release(physical, id) {
                KeyDispatch::new(event.clone(), id, KeyEventKind::Up, physical, logical, false)
            } else {
                let logical = state.logical_key(self.layout.as_ref(), event);
                KeyDispatch::new(event.clone(), id, KeyEventKind::Up, physical, logical, true)
            };
            state.pending.insert(dispatch.clone(), self.responders.len());
            dispatch
        };

        debug!(
            id = %dispatch.id,
            kind = ?dispatch.kind,
            physical = %dispatch.physical,
            logical = %dispatch.logical,
            responders = self.responders.len(),
            "dispatching key event"
        );

        if self.responders.is_empty() {
            self.resolve(false, dispatch);
            return true;
        }

        for responder in &self.responders {
            let weak = Arc::downgrade(self);
            let id = dispatch.id;
            let response = KeyResponse::new(responder.name(), id, move |handled| {
                answer(&weak, id, handled);
            });
            responder.handle_event(&dispatch, response);
        }
        true
    }

    fn answer(&self, id: EventId, handled: bool) {
        let answer = self.lock().pending.answer(id, handled);
        match answer {
            Answer::Unknown => trace!(%id, "answer for an event that is no longer tracked"),
            Answer::Waiting { remaining } => trace!(%id, remaining, "waiting for responders"),
            Answer::Complete { handled, dispatch } => self.resolve(handled, dispatch),
        }
    }

    /// Final step once every responder answered. Host calls happen with the
    /// state unlocked.
    ///
    /// An unhandled event is flagged before the host sees it, so a replay that
    /// re-enters `handle_event` from inside `redispatch_event` is recognized.
    fn resolve(&self, handled: bool, dispatch: KeyDispatch) {
        let handled = handled || self.text_filter.filter(&dispatch);
        let id = dispatch.id;

        let redispatch = {
            let mut state = self.lock();
            if dispatch.kind == KeyEventKind::Up {
                state.pressed.finish_release(dispatch.physical, id);
            }
            if handled {
                state.pending.remove(id);
                None
            } else {
                let first = state.pending.mark_redispatched(id);
                debug_assert!(first, "key event {id} redispatched twice");
                if first {
                    Some(dispatch.event)
                } else {
                    error!(%id, "key event already redispatched, skipping");
                    None
                }
            }
        };

        debug!(%id, handled, "key event resolved");
        if let Some(event) = redispatch {
            debug!(%id, %event, "redispatching unhandled key event");
            if !self.delegate.redispatch_event(event) && self.lock().pending.remove(id) {
                debug!(%id, "host did not re-inject the event, no replay expected");
            }
        }
    }

    fn pressed_state(&self) -> HashMap<PhysicalKey, LogicalKey> {
        self.lock().pressed.snapshot()
    }
}

fn answer(inner: &Weak<Inner>, id: EventId, handled: bool) {
    match inner.upgrade() {
        Some(inner) => inner.answer(id, handled),
        None => trace!(%id, handled, "keyboard coordinator disposed, dropping late answer"),
    }
}

/// Configures a [`KeyboardCoordinator`] before it is attached to a view.
pub struct KeyboardCoordinatorBuilder {
    settings: KeyboardSettings,
    layout: Option<Arc<dyn KeyLayout>>,
    extra_responders: Vec<Box<dyn KeyResponder>>,
}

impl KeyboardCoordinatorBuilder {
    pub fn settings(mut self, settings: KeyboardSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Layout used to resolve logical keys. Defaults to the registered `us` layout.
    pub fn layout(mut self, layout: Arc<dyn KeyLayout>) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Adds a responder that is consulted after the built-in ones.
    pub fn responder(mut self, responder: Box<dyn KeyResponder>) -> Self {
        self.extra_responders.push(responder);
        self
    }

    pub fn build(self, delegate: Arc<dyn KeyboardViewDelegate>) -> KeyboardCoordinator {
        let layout: Arc<dyn KeyLayout> = match self.layout {
            Some(layout) => layout,
            None => Arc::new(find_key_layout(UsLayout::NAME).unwrap_or(&US_LAYOUT)),
        };
        let messenger = delegate.messenger();

        let mut responders: Vec<Box<dyn KeyResponder>> = Vec::new();
        if self.settings.embedder_responder {
            responders.push(Box::new(EmbedderResponder::new(Arc::clone(&delegate))));
        }
        if self.settings.channel_responder {
            responders.push(Box::new(ChannelResponder::new(Arc::clone(&messenger), &self.settings)));
        }
        responders.extend(self.extra_responders);

        let inner = Arc::new(Inner {
            text_filter: TextInputFilter::new(
                Arc::clone(&delegate),
                self.settings.text_input_filters_releases,
            ),
            delegate,
            messenger,
            settings: self.settings,
            layout,
            responders,
            state: Mutex::new(State::default()),
        });

        let weak = Arc::downgrade(&inner);
        inner.delegate.subscribe_to_layout_change(Box::new(move || {
            if let Some(inner) = weak.upgrade() {
                let flushed = {
                    let mut state = inner.lock();
                    let flushed = state.logical_cache.len();
                    state.logical_cache.clear();
                    flushed
                };
                info!(flushed, "keyboard layout changed");
            }
        }));

        let weak = Arc::downgrade(&inner);
        inner.messenger.set_message_handler(
            &inner.settings.keyboard_channel,
            Some(Box::new(move |message: &[u8]| match weak.upgrade() {
                Some(inner) => keyboard_channel::handle_message(message, || inner.pressed_state()),
                None => Vec::new(),
            })),
        );

        info!(
            layout = inner.layout.name(),
            responders = inner.responders.len(),
            keyboard_channel = %inner.settings.keyboard_channel,
            "keyboard coordinator attached"
        );
        KeyboardCoordinator { inner }
    }
}

/// Fans key events out to the responders, tracks their answers and hands
/// unclaimed events back to the host exactly once.
///
/// Owned by the host view. Dropping it abandons outstanding events: answers
/// that arrive later are ignored and nothing is redispatched.
pub struct KeyboardCoordinator {
    inner: Arc<Inner>,
}

impl KeyboardCoordinator {
    pub fn builder() -> KeyboardCoordinatorBuilder {
        KeyboardCoordinatorBuilder {
            settings: KeyboardSettings::default(),
            layout: None,
            extra_responders: Vec::new(),
        }
    }

    pub fn new(delegate: Arc<dyn KeyboardViewDelegate>) -> Self {
        Self::builder().build(delegate)
    }

    pub fn settings(&self) -> &KeyboardSettings {
        &self.inner.settings
    }

    /// Offers a toolkit event to the coordinator.
    ///
    /// Returns `true` when the event was taken for asynchronous processing and
    /// `false` when it is the replay of an earlier redispatch, which the host
    /// must handle natively.
    pub fn handle_event(&self, event: &KeyEvent) -> bool {
        self.inner.handle_event(event)
    }

    /// Copy of the physical → logical map of keys currently considered held.
    pub fn get_pressed_state(&self) -> HashMap<PhysicalKey, LogicalKey> {
        self.inner.pressed_state()
    }

    /// Synthesizes modifier presses or releases so the pressed state agrees
    /// with `state`, e.g. after focus returns with a modifier held.
    pub fn sync_modifier_if_needed(&self, state: ModifierState, time: u32) {
        let held = self.inner.lock().pressed.held();
        let planned = plan_modifier_sync(state, &held, time);
        if !planned.is_empty() {
            debug!(state = state.bits(), events = planned.len(), "synchronizing modifier keys");
        }
        for event in &planned {
            self.inner.handle_event(event);
        }
    }

    /// No event awaits an answer and no redispatched event awaits its replay.
    pub fn is_state_clear(&self) -> bool {
        self.inner.lock().pending.is_empty()
    }

    /// Events still waiting for at least one responder.
    pub fn pending_count(&self) -> usize {
        self.inner.lock().pending.awaiting_len()
    }

    /// Events handed back to the host whose replay has not arrived yet.
    pub fn pending_redispatch_count(&self) -> usize {
        self.inner.lock().pending.redispatched_len()
    }
}

impl Drop for KeyboardCoordinator {
    fn drop(&mut self) {
        self.inner.messenger.set_message_handler(&self.inner.settings.keyboard_channel, None);
        let (pending, redispatched) = {
            let state = self.inner.lock();
            (state.pending.awaiting_len(), state.pending.redispatched_len())
        };
        debug!(pending, redispatched, "keyboard coordinator disposed");
    }
}
