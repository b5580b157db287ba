use std::collections::{BTreeMap, HashMap};

use keyrelay_core::{LogicalKey, PhysicalKey};

use crate::KeyboardError;
use crate::codec::{MethodCall, encode_error, encode_success};

pub const GET_KEYBOARD_STATE_METHOD: &str = "getKeyboardState";

/// Answers one raw request on the keyboard channel.
///
/// `pressed` is only invoked for `getKeyboardState`. Unknown methods get an
/// empty reply, undecodable requests a `bad_request` error envelope.
pub(crate) fn handle_message(
    message: &[u8],
    pressed: impl FnOnce() -> HashMap<PhysicalKey, LogicalKey>,
) -> Vec<u8> {
    let reply = MethodCall::decode(message).and_then(|call| {
        if call.method == GET_KEYBOARD_STATE_METHOD {
            encode_success(&keyboard_state(&pressed()))
        } else {
            Err(KeyboardError::UnknownMethod(call.method))
        }
    });

    match reply {
        Ok(reply) => reply,
        Err(KeyboardError::UnknownMethod(method)) => {
            tracing::debug!(method = %method, "keyboard channel method not implemented");
            Vec::new()
        }
        Err(err @ KeyboardError::Decode { .. }) => {
            tracing::warn!(error = %err, "malformed keyboard channel request");
            encode_error("bad_request", &err.to_string()).unwrap_or_default()
        }
        Err(err) => {
            tracing::warn!(error = %err, "keyboard channel reply failed");
            Vec::new()
        }
    }
}

/// Pressed state as sent over the wire: physical keys as decimal strings.
fn keyboard_state(pressed: &HashMap<PhysicalKey, LogicalKey>) -> BTreeMap<String, u64> {
    pressed.iter().map(|(physical, logical)| (physical.value().to_string(), logical.value())).collect()
}
