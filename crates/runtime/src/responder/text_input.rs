use std::sync::Arc;

use keyrelay_core::platform::KeyboardViewDelegate;

use super::KeyDispatch;

/// Synchronous text input (IME) filter, consulted at resolution time for
/// events nobody else claimed.
pub struct TextInputFilter {
    delegate: Arc<dyn KeyboardViewDelegate>,
    filters_releases: bool,
}

impl TextInputFilter {
    pub fn new(delegate: Arc<dyn KeyboardViewDelegate>, filters_releases: bool) -> Self {
        Self { delegate, filters_releases }
    }

    pub fn applies_to(&self, dispatch: &KeyDispatch) -> bool {
        !dispatch.event.is_synthesized() && (dispatch.event.is_press() || self.filters_releases)
    }

    /// Returns whether the filter consumed the event. Events it does not apply
    /// to are never shown to the host.
    pub fn filter(&self, dispatch: &KeyDispatch) -> bool {
        if !self.applies_to(dispatch) {
            return false;
        }
        let handled = self.delegate.text_filter_key_press(&dispatch.event);
        tracing::trace!(id = %dispatch.id, handled, "text input filter answered");
        handled
    }
}
