//! In-memory mock host for keyrelay tests and tooling.
//!
//! `MockViewDelegate` stands in for a toolkit view: it records what the
//! coordinator sends to the embedded runtime and to the key event channel,
//! answers immediately or lets the test answer later, and captures every
//! redispatched event. Nothing here is global; each test builds its own host.

mod layout;
mod messenger;
mod records;
mod view;

pub use layout::MockKeyLayout;
pub use messenger::{ChannelMode, MockKeyMessenger};
pub use records::{CallKind, CallRecord};
pub use view::{EmbedderMode, MockViewDelegate, ReplayHook};
