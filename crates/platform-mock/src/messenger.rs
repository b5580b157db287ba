use crate::records::{CallLog, CallRecord};
use keyrelay_core::platform::{
    BinaryMessenger, MessageHandler, MessengerError, MessengerErrorKind, ReplyCallback,
};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// How the mock answers messages sent on a channel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChannelMode {
    /// Reply immediately with `{"handled": <bool>}`.
    Respond(bool),
    /// Log the call and keep the reply until the test answers it.
    Record,
    /// Fail the transport with the given error kind.
    Fail(MessengerErrorKind),
    /// Reply with these exact bytes.
    Raw(Vec<u8>),
}

type SharedHandler = Arc<dyn Fn(&[u8]) -> Vec<u8> + Send + Sync>;

pub struct MockKeyMessenger {
    mode: Mutex<ChannelMode>,
    log: CallLog,
    handlers: Mutex<HashMap<String, SharedHandler>>,
    sent: Mutex<Vec<String>>,
}

impl MockKeyMessenger {
    pub(crate) fn with_log(log: CallLog) -> Self {
        Self {
            mode: Mutex::new(ChannelMode::Respond(false)),
            log,
            handlers: Mutex::new(HashMap::new()),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn set_mode(&self, mode: ChannelMode) {
        *self.mode.lock().unwrap_or_else(PoisonError::into_inner) = mode;
    }

    /// Channel names of every message sent so far.
    pub fn sent_channels(&self) -> Vec<String> {
        self.sent.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn has_handler(&self, channel: &str) -> bool {
        self.handlers.lock().unwrap_or_else(PoisonError::into_inner).contains_key(channel)
    }

    /// Delivers an incoming message to the handler registered for `channel`.
    pub fn receive_message(&self, channel: &str, message: &[u8]) -> Option<Vec<u8>> {
        let handler =
            self.handlers.lock().unwrap_or_else(PoisonError::into_inner).get(channel).cloned();
        handler.map(|handler| handler(message))
    }
}

fn encode_reply(handled: bool) -> Vec<u8> {
    serde_json::to_vec(&json!({ "handled": handled })).unwrap_or_default()
}

impl BinaryMessenger for MockKeyMessenger {
    fn send_on_channel(&self, channel: &str, message: Vec<u8>, reply: ReplyCallback) {
        self.sent.lock().unwrap_or_else(PoisonError::into_inner).push(channel.to_owned());
        let mode = self.mode.lock().unwrap_or_else(PoisonError::into_inner).clone();
        tracing::trace!(channel, ?mode, "mock messenger received message");

        match mode {
            ChannelMode::Respond(handled) => reply(Ok(encode_reply(handled))),
            ChannelMode::Record => {
                let decoded = serde_json::from_slice::<Value>(&message).unwrap_or(Value::Null);
                let callback = Box::new(move |handled: bool| reply(Ok(encode_reply(handled))));
                self.log.push(CallRecord::channel(decoded, Some(callback)));
            }
            ChannelMode::Fail(kind) => {
                reply(Err(MessengerError::new(kind, format!("mock transport failure on {channel}"))));
            }
            ChannelMode::Raw(bytes) => reply(Ok(bytes)),
        }
    }

    fn set_message_handler(&self, channel: &str, handler: Option<MessageHandler>) {
        let mut handlers = self.handlers.lock().unwrap_or_else(PoisonError::into_inner);
        match handler {
            Some(handler) => {
                handlers.insert(channel.to_owned(), Arc::from(handler));
            }
            None => {
                handlers.remove(channel);
            }
        }
    }
}
