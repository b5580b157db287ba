use crate::event::{EmbedderKeyEvent, KeyEvent};
use crate::platform::BinaryMessenger;
use std::sync::Arc;

/// Completion for a key event handed to the embedded runtime.
pub type KeyResponseCallback = Box<dyn FnOnce(bool) + Send + 'static>;

/// Invoked by the host whenever the keyboard layout changes.
pub type LayoutChangeCallback = Box<dyn Fn() + Send + Sync + 'static>;

/// Capabilities the keyboard coordinator needs from the view that hosts it.
///
/// One adapter exists per host toolkit. Methods may be called from whichever
/// thread delivers a responder completion, so adapters that need UI-thread
/// affinity must marshal internally.
pub trait KeyboardViewDelegate: Send + Sync {
    /// Hands the event to the embedded runtime. `callback` may run on any thread.
    fn send_key_event(&self, event: &EmbedderKeyEvent, callback: KeyResponseCallback);

    /// Lets the text input plugin (IME) consume the event synchronously.
    ///
    /// Called when an event resolves, on the thread that delivered the last
    /// responder answer. Input method contexts are usually bound to the UI
    /// thread; adapters must marshal there and block until the filter answers.
    fn text_filter_key_press(&self, event: &KeyEvent) -> bool;

    fn messenger(&self) -> Arc<dyn BinaryMessenger>;

    /// Re-injects the original event into the toolkit's event loop.
    ///
    /// Returns `false` when the host cannot re-inject it, typically a
    /// synthesized event without an [`OriginHandle`](crate::OriginHandle). No
    /// replay is expected for such an event. The replay may re-enter the
    /// coordinator before this call returns.
    fn redispatch_event(&self, event: KeyEvent) -> bool;

    fn subscribe_to_layout_change(&self, callback: LayoutChangeCallback);
}
