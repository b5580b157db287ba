use crate::keys::{LogicalKey, PhysicalKey};
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

bitflags! {
    /// Modifier bits as reported by the toolkit with every key and pointer event.
    ///
    /// Bit positions follow GDK so a host adapter can pass its native state
    /// through unchanged. Unknown bits are retained.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct ModifierState: u32 {
        const SHIFT = 1 << 0;
        const LOCK = 1 << 1;
        const CONTROL = 1 << 2;
        const MOD1 = 1 << 3;
        const MOD2 = 1 << 4;
        const MOD3 = 1 << 5;
        const MOD4 = 1 << 6;
        const MOD5 = 1 << 7;
        const SUPER = 1 << 26;
        const HYPER = 1 << 27;
        const META = 1 << 28;
    }
}

impl ModifierState {
    /// Builds a state from a raw toolkit mask, keeping bits without a name.
    pub const fn from_raw(bits: u32) -> Self {
        Self::from_bits_retain(bits)
    }
}

mod modifier_bits {
    use super::ModifierState;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(state: &ModifierState, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(state.bits())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<ModifierState, D::Error> {
        u32::deserialize(deserializer).map(ModifierState::from_raw)
    }
}

/// Opaque handle a host attaches to an event so it can find its native event
/// again when asked to redispatch it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OriginHandle(u64);

impl OriginHandle {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u64 {
        self.0
    }
}

/// Snapshot of one hardware key transition.
///
/// Events are values: they are cloned whenever they must outlive the call that
/// delivered them and handed over by value on redispatch. Two events compare
/// equal when every field matches, which is what replay detection relies on.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyEvent {
    time: u32,
    is_press: bool,
    keycode: u16,
    keyval: u32,
    #[serde(with = "modifier_bits", default)]
    state: ModifierState,
    #[serde(default)]
    group: u8,
    #[serde(default)]
    synthesized: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    origin: Option<OriginHandle>,
}

impl KeyEvent {
    /// Creates an event as delivered by the toolkit.
    ///
    /// `time` is in milliseconds, `keycode` is the hardware scan code and
    /// `keyval` the toolkit's key symbol after layout and level resolution.
    pub fn new(
        time: u32,
        is_press: bool,
        keycode: u16,
        keyval: u32,
        state: ModifierState,
        group: u8,
    ) -> Self {
        Self { time, is_press, keycode, keyval, state, group, synthesized: false, origin: None }
    }

    /// Creates an event that no hardware delivered, used to repair modifier
    /// state drift.
    pub fn synthesized(
        time: u32,
        is_press: bool,
        keycode: u16,
        keyval: u32,
        state: ModifierState,
    ) -> Self {
        Self { time, is_press, keycode, keyval, state, group: 0, synthesized: true, origin: None }
    }

    pub fn with_origin(mut self, origin: OriginHandle) -> Self {
        self.origin = Some(origin);
        self
    }

    pub fn time(&self) -> u32 {
        self.time
    }

    pub fn is_press(&self) -> bool {
        self.is_press
    }

    pub fn keycode(&self) -> u16 {
        self.keycode
    }

    pub fn keyval(&self) -> u32 {
        self.keyval
    }

    pub fn state(&self) -> ModifierState {
        self.state
    }

    pub fn group(&self) -> u8 {
        self.group
    }

    pub fn is_synthesized(&self) -> bool {
        self.synthesized
    }

    pub fn origin(&self) -> Option<OriginHandle> {
        self.origin
    }
}

impl Display for KeyEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} keycode={:#04x} keyval={:#06x} state={:#x} group={}",
            if self.is_press { "press" } else { "release" },
            self.keycode,
            self.keyval,
            self.state.bits(),
            self.group
        )?;
        if self.synthesized {
            write!(f, " (synthesized)")?;
        }
        Ok(())
    }
}

/// Transition type as seen by the embedded runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyEventKind {
    Down,
    Up,
    Repeat,
}

/// Event handed to the embedded runtime through the embedder callback.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedderKeyEvent {
    /// Microseconds, derived from the toolkit's millisecond timestamp.
    pub timestamp: u64,
    pub kind: KeyEventKind,
    pub physical: PhysicalKey,
    pub logical: LogicalKey,
    pub character: Option<String>,
    pub synthesized: bool,
}
