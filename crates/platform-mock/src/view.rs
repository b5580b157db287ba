use crate::messenger::{ChannelMode, MockKeyMessenger};
use crate::records::{CallLog, CallRecord};
use keyrelay_core::platform::{
    BinaryMessenger, KeyResponseCallback, KeyboardViewDelegate, LayoutChangeCallback,
};
use keyrelay_core::{EmbedderKeyEvent, KeyEvent};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// How the mock answers events handed to the embedded runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmbedderMode {
    /// Answer immediately without recording.
    Respond(bool),
    /// Record the call and keep the completion for the test.
    Record,
    /// Record the call and answer immediately.
    RespondAndRecord(bool),
}

/// Re-injects a redispatched event the way a toolkit would and returns what
/// the coordinator answered for the replay.
pub type ReplayHook = Arc<dyn Fn(&KeyEvent) -> bool + Send + Sync>;

/// What the mock does with events handed back for redispatch.
#[derive(Clone)]
enum RedispatchMode {
    Queue,
    Refuse { synthesized_only: bool },
    Inline(ReplayHook),
}

/// Mock toolkit view implementing every capability the coordinator needs.
pub struct MockViewDelegate {
    embedder_mode: Mutex<EmbedderMode>,
    redispatch_mode: Mutex<RedispatchMode>,
    text_filter_result: AtomicBool,
    text_filter_calls: AtomicUsize,
    redispatched: Mutex<Vec<KeyEvent>>,
    refused: AtomicUsize,
    inline_replays: Mutex<Vec<(KeyEvent, bool)>>,
    layout_listeners: Mutex<Vec<LayoutChangeCallback>>,
    log: CallLog,
    messenger: Arc<MockKeyMessenger>,
}

impl Default for MockViewDelegate {
    fn default() -> Self {
        Self::new()
    }
}

impl MockViewDelegate {
    /// Every responder answers "unhandled" until told otherwise.
    pub fn new() -> Self {
        let log = CallLog::default();
        Self {
            embedder_mode: Mutex::new(EmbedderMode::Respond(false)),
            redispatch_mode: Mutex::new(RedispatchMode::Queue),
            text_filter_result: AtomicBool::new(false),
            text_filter_calls: AtomicUsize::new(0),
            redispatched: Mutex::new(Vec::new()),
            refused: AtomicUsize::new(0),
            inline_replays: Mutex::new(Vec::new()),
            layout_listeners: Mutex::new(Vec::new()),
            messenger: Arc::new(MockKeyMessenger::with_log(log.clone())),
            log,
        }
    }

    pub fn respond_to_embedder_calls_with(&self, handled: bool) {
        self.set_embedder_mode(EmbedderMode::Respond(handled));
    }

    pub fn record_embedder_calls(&self) {
        self.set_embedder_mode(EmbedderMode::Record);
    }

    pub fn respond_to_embedder_calls_with_and_record(&self, handled: bool) {
        self.set_embedder_mode(EmbedderMode::RespondAndRecord(handled));
    }

    pub fn respond_to_channel_calls_with(&self, handled: bool) {
        self.messenger.set_mode(ChannelMode::Respond(handled));
    }

    pub fn record_channel_calls(&self) {
        self.messenger.set_mode(ChannelMode::Record);
    }

    pub fn set_channel_mode(&self, mode: ChannelMode) {
        self.messenger.set_mode(mode);
    }

    pub fn respond_to_text_input_with(&self, handled: bool) {
        self.text_filter_result.store(handled, Ordering::SeqCst);
    }

    pub fn text_filter_calls(&self) -> usize {
        self.text_filter_calls.load(Ordering::SeqCst)
    }

    /// Takes every recorded call (embedder and channel) in dispatch order.
    pub fn take_records(&self) -> Vec<CallRecord> {
        self.log.take()
    }

    pub fn record_count(&self) -> usize {
        self.log.len()
    }

    /// Queue redispatched events for [`take_redispatched`](Self::take_redispatched). The default.
    pub fn queue_redispatches(&self) {
        self.set_redispatch_mode(RedispatchMode::Queue);
    }

    /// Report every redispatch as not re-injected.
    pub fn refuse_redispatches(&self) {
        self.set_redispatch_mode(RedispatchMode::Refuse { synthesized_only: false });
    }

    /// Like a toolkit that can only re-inject events it delivered itself.
    pub fn refuse_synthesized_redispatches(&self) {
        self.set_redispatch_mode(RedispatchMode::Refuse { synthesized_only: true });
    }

    /// Replay every redispatched event through `hook` before `redispatch_event`
    /// returns, like a toolkit that delivers re-injected events synchronously.
    pub fn replay_redispatches_inline(&self, hook: impl Fn(&KeyEvent) -> bool + Send + Sync + 'static) {
        self.set_redispatch_mode(RedispatchMode::Inline(Arc::new(hook)));
    }

    pub fn refused_redispatch_count(&self) -> usize {
        self.refused.load(Ordering::SeqCst)
    }

    /// Takes every inline replay together with what the coordinator answered.
    pub fn take_inline_replays(&self) -> Vec<(KeyEvent, bool)> {
        std::mem::take(&mut *self.inline_replays.lock().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn take_redispatched(&self) -> Vec<KeyEvent> {
        std::mem::take(&mut *self.redispatched.lock().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn redispatched_count(&self) -> usize {
        self.redispatched.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn key_messenger(&self) -> Arc<MockKeyMessenger> {
        Arc::clone(&self.messenger)
    }

    /// Simulates the toolkit reporting a keyboard layout change.
    pub fn notify_layout_change(&self) {
        let listeners = self.layout_listeners.lock().unwrap_or_else(PoisonError::into_inner);
        for listener in listeners.iter() {
            listener();
        }
    }

    fn set_redispatch_mode(&self, mode: RedispatchMode) {
        *self.redispatch_mode.lock().unwrap_or_else(PoisonError::into_inner) = mode;
    }

    fn set_embedder_mode(&self, mode: EmbedderMode) {
        *self.embedder_mode.lock().unwrap_or_else(PoisonError::into_inner) = mode;
    }
}

impl KeyboardViewDelegate for MockViewDelegate {
    fn send_key_event(&self, event: &EmbedderKeyEvent, callback: KeyResponseCallback) {
        let mode = *self.embedder_mode.lock().unwrap_or_else(PoisonError::into_inner);
        match mode {
            EmbedderMode::Respond(handled) => callback(handled),
            EmbedderMode::Record => self.log.push(CallRecord::embedder(event.clone(), Some(callback))),
            EmbedderMode::RespondAndRecord(handled) => {
                self.log.push(CallRecord::embedder(event.clone(), None));
                callback(handled);
            }
        }
    }

    fn text_filter_key_press(&self, _event: &KeyEvent) -> bool {
        self.text_filter_calls.fetch_add(1, Ordering::SeqCst);
        self.text_filter_result.load(Ordering::SeqCst)
    }

    fn messenger(&self) -> Arc<dyn BinaryMessenger> {
        Arc::clone(&self.messenger) as Arc<dyn BinaryMessenger>
    }

    fn redispatch_event(&self, event: KeyEvent) -> bool {
        let mode = self.redispatch_mode.lock().unwrap_or_else(PoisonError::into_inner).clone();
        match mode {
            RedispatchMode::Refuse { synthesized_only } if !synthesized_only || event.is_synthesized() => {
                tracing::debug!(%event, "mock view refused redispatch");
                self.refused.fetch_add(1, Ordering::SeqCst);
                false
            }
            RedispatchMode::Inline(hook) => {
                let accepted = hook(&event);
                tracing::debug!(%event, accepted, "mock view replayed redispatch inline");
                self.inline_replays.lock().unwrap_or_else(PoisonError::into_inner).push((event, accepted));
                true
            }
            RedispatchMode::Queue | RedispatchMode::Refuse { .. } => {
                tracing::debug!(%event, "mock view received redispatch");
                self.redispatched.lock().unwrap_or_else(PoisonError::into_inner).push(event);
                true
            }
        }
    }

    fn subscribe_to_layout_change(&self, callback: LayoutChangeCallback) {
        self.layout_listeners.lock().unwrap_or_else(PoisonError::into_inner).push(callback);
    }
}
