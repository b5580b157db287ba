pub mod codec;
mod coordinator;
mod error;
mod keyboard_channel;
mod modifiers;
mod pending;
mod pressed;
pub mod responder;
mod settings;
#[cfg(test)]
mod test_support;

pub use coordinator::{KeyboardCoordinator, KeyboardCoordinatorBuilder};
pub use error::KeyboardError;
pub use keyboard_channel::GET_KEYBOARD_STATE_METHOD;
pub use modifiers::plan_modifier_sync;
pub use responder::{EventId, KeyDispatch, KeyResponder, KeyResponse};
pub use settings::{KeyboardSettings, SettingsError};
