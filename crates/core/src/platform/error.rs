use std::error::Error;
use std::fmt::{Display, Formatter};

/// Failure reported by a message channel transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessengerError {
    pub kind: MessengerErrorKind,
    /// Transport specific detail, appended to the kind's description.
    pub message: Option<String>,
}

impl MessengerError {
    pub fn new(kind: MessengerErrorKind, message: impl Into<String>) -> Self {
        Self { kind, message: Some(message.into()) }
    }

    pub fn simple(kind: MessengerErrorKind) -> Self {
        Self { kind, message: None }
    }
}

impl Display for MessengerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.message {
            Some(detail) => write!(f, "{}: {detail}", self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl Error for MessengerError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessengerErrorKind {
    /// The other side never answered.
    NoResponse,
    /// The channel was torn down before a reply arrived.
    ChannelClosed,
    /// The payload could not be encoded or decoded.
    Encoding,
    /// No handler is registered for the channel.
    Unhandled,
}

impl Display for MessengerErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            MessengerErrorKind::NoResponse => "no response on channel",
            MessengerErrorKind::ChannelClosed => "channel closed before reply",
            MessengerErrorKind::Encoding => "message encoding failed",
            MessengerErrorKind::Unhandled => "no handler registered for channel",
        })
    }
}
