//! Core types and traits shared by the keyrelay crates.
//!
//! Key events, physical/logical key identifiers and the static key tables live
//! here together with the traits a host toolkit implements (`platform`).

pub mod event;
pub mod keys;
pub mod platform;

pub use event::{EmbedderKeyEvent, KeyEvent, KeyEventKind, ModifierState, OriginHandle};
pub use keys::{LogicalKey, PhysicalKey};
