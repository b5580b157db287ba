use keyrelay_core::platform::MessengerError;
use thiserror::Error;

/// Failures on the channels the coordinator talks over.
///
/// None of these reach the host: the key event path degrades every failure
/// to "unhandled" and the keyboard channel answers with an error envelope.
#[derive(Debug, Error)]
pub enum KeyboardError {
    #[error("failed to encode {what}: {source}")]
    Encode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to decode {what}: {source}")]
    Decode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("messenger failure: {0}")]
    Messenger(#[from] MessengerError),
    #[error("empty reply on channel `{channel}`")]
    EmptyReply { channel: String },
    #[error("unknown method `{0}`")]
    UnknownMethod(String),
}
