use crate::platform::MessengerError;

/// Receives the raw reply of a message sent on a channel.
pub type ReplyCallback = Box<dyn FnOnce(Result<Vec<u8>, MessengerError>) + Send + 'static>;

/// Answers a raw message arriving on a channel. An empty reply means the
/// request is not implemented.
pub type MessageHandler = Box<dyn Fn(&[u8]) -> Vec<u8> + Send + Sync + 'static>;

/// Byte-level transport between the embedder and the embedded runtime.
///
/// Encoding is the caller's business; the messenger only moves bytes. The
/// reply callback may be invoked on any thread but must be invoked exactly
/// once, with an error if the transport gives up.
pub trait BinaryMessenger: Send + Sync {
    fn send_on_channel(&self, channel: &str, message: Vec<u8>, reply: ReplyCallback);

    /// Installs (or with `None` removes) the handler for incoming messages.
    fn set_message_handler(&self, channel: &str, handler: Option<MessageHandler>);
}
