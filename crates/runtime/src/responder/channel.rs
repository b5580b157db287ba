use std::sync::Arc;

use keyrelay_core::platform::BinaryMessenger;

use super::{KeyDispatch, KeyResponder, KeyResponse};
use crate::KeyboardSettings;
use crate::codec::{KeyEventMessage, KeyEventReply};

/// Sends the legacy key event message and waits for `{"handled": bool}`.
///
/// Any failure on the way counts as unhandled; nothing is retried.
pub struct ChannelResponder {
    messenger: Arc<dyn BinaryMessenger>,
    channel: String,
    keymap: String,
    toolkit: String,
}

impl ChannelResponder {
    pub const NAME: &'static str = "channel";

    pub fn new(messenger: Arc<dyn BinaryMessenger>, settings: &KeyboardSettings) -> Self {
        Self {
            messenger,
            channel: settings.key_event_channel.clone(),
            keymap: settings.keymap.clone(),
            toolkit: settings.toolkit.clone(),
        }
    }
}

impl KeyResponder for ChannelResponder {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn handle_event(&self, dispatch: &KeyDispatch, response: KeyResponse) {
        let message = match KeyEventMessage::new(&dispatch.event, &self.keymap, &self.toolkit).encode()
        {
            Ok(message) => message,
            Err(err) => {
                tracing::warn!(id = %dispatch.id, error = %err, "could not encode key event message");
                response.respond(false);
                return;
            }
        };

        let id = dispatch.id;
        let channel = self.channel.clone();
        self.messenger.send_on_channel(
            &self.channel,
            message,
            Box::new(move |reply| {
                let handled = reply
                    .map_err(crate::KeyboardError::from)
                    .and_then(|bytes| KeyEventReply::decode(&channel, &bytes))
                    .map(|reply| reply.handled);
                match handled {
                    Ok(handled) => response.respond(handled),
                    Err(err) => {
                        tracing::warn!(%id, channel = %channel, error = %err, "key event channel failed, treating as unhandled");
                        response.respond(false);
                    }
                }
            }),
        );
    }
}
