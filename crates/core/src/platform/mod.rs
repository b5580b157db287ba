mod delegate;
mod error;
mod layout;
mod messenger;

pub use delegate::{KeyResponseCallback, KeyboardViewDelegate, LayoutChangeCallback};
pub use error::{MessengerError, MessengerErrorKind};
pub use layout::{KeyLayout, LayoutRegistration, US_LAYOUT, UsLayout, find_key_layout, key_layouts};
pub use messenger::{BinaryMessenger, MessageHandler, ReplyCallback};

#[macro_export]
macro_rules! register_key_layout {
    ($layout:expr) => {
        inventory::submit! {
            $crate::platform::LayoutRegistration { layout: $layout }
        }
    };
}

pub use register_key_layout;
