//! JSON wire formats of the key event and keyboard channels.

use keyrelay_core::KeyEvent;
use keyrelay_core::keys::keyval_to_char;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::KeyboardError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyEventMessageType {
    #[serde(rename = "keydown")]
    KeyDown,
    #[serde(rename = "keyup")]
    KeyUp,
}

/// Legacy key event message understood by the framework's raw keyboard listener.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyEventMessage {
    #[serde(rename = "type")]
    pub kind: KeyEventMessageType,
    pub keymap: String,
    pub toolkit: String,
    pub scan_code: u16,
    pub key_code: u32,
    pub modifiers: u32,
    /// Unicode scalar of the key symbol, `0` when it produces no character.
    pub unicode_scalar_values: u32,
}

impl KeyEventMessage {
    pub fn new(event: &KeyEvent, keymap: &str, toolkit: &str) -> Self {
        Self {
            kind: if event.is_press() {
                KeyEventMessageType::KeyDown
            } else {
                KeyEventMessageType::KeyUp
            },
            keymap: keymap.to_owned(),
            toolkit: toolkit.to_owned(),
            scan_code: event.keycode(),
            key_code: event.keyval(),
            modifiers: event.state().bits(),
            unicode_scalar_values: keyval_to_char(event.keyval()).map_or(0, u32::from),
        }
    }

    pub fn encode(&self) -> Result<Vec<u8>, KeyboardError> {
        serde_json::to_vec(self)
            .map_err(|source| KeyboardError::Encode { what: "key event message", source })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEventReply {
    pub handled: bool,
}

impl KeyEventReply {
    pub fn decode(channel: &str, bytes: &[u8]) -> Result<Self, KeyboardError> {
        if bytes.is_empty() {
            return Err(KeyboardError::EmptyReply { channel: channel.to_owned() });
        }
        serde_json::from_slice(bytes)
            .map_err(|source| KeyboardError::Decode { what: "key event reply", source })
    }
}

/// Incoming method call `{"method": ..., "args": ...}`. None of the keyboard
/// channel methods take arguments, so `args` is not decoded.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct MethodCall {
    pub method: String,
}

impl MethodCall {
    pub fn decode(bytes: &[u8]) -> Result<Self, KeyboardError> {
        serde_json::from_slice(bytes)
            .map_err(|source| KeyboardError::Decode { what: "method call", source })
    }
}

/// Success envelope: a one-element array holding the result.
pub fn encode_success(result: &impl Serialize) -> Result<Vec<u8>, KeyboardError> {
    serde_json::to_vec(&[result])
        .map_err(|source| KeyboardError::Encode { what: "method result", source })
}

/// Error envelope: `[code, message, details]`.
pub fn encode_error(code: &str, message: &str) -> Result<Vec<u8>, KeyboardError> {
    serde_json::to_vec(&(code, message, Value::Null))
        .map_err(|source| KeyboardError::Encode { what: "method error", source })
}
