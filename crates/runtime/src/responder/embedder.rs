use std::sync::Arc;

use keyrelay_core::platform::KeyboardViewDelegate;

use super::{KeyDispatch, KeyResponder, KeyResponse};

/// Forwards events to the embedded runtime through the host's embedder call.
pub struct EmbedderResponder {
    delegate: Arc<dyn KeyboardViewDelegate>,
}

impl EmbedderResponder {
    pub const NAME: &'static str = "embedder";

    pub fn new(delegate: Arc<dyn KeyboardViewDelegate>) -> Self {
        Self { delegate }
    }
}

impl KeyResponder for EmbedderResponder {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn handle_event(&self, dispatch: &KeyDispatch, response: KeyResponse) {
        // The runtime never saw the matching press; claiming the release keeps
        // a stray up event from being replayed into the toolkit.
        if dispatch.orphan_release {
            tracing::debug!(id = %dispatch.id, physical = %dispatch.physical, "ignoring orphan release");
            response.respond(true);
            return;
        }

        let event = dispatch.to_embedder_event();
        self.delegate.send_key_event(&event, Box::new(move |handled| response.respond(handled)));
    }
}
