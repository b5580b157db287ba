mod mapping;
mod modifiers;

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub use mapping::{keyval_to_char, logical_key_for_keyval, physical_key_for_keycode};
pub use modifiers::{MODIFIER_BINDINGS, ModifierBinding, ModifierKey};

/// Plane for values taken verbatim from the toolkit (unknown scan codes or keyvals).
pub const TOOLKIT_PLANE: u64 = 0x0015_0000_0000;
/// Plane for non-printable keys with a well-known name.
pub const UNPRINTABLE_PLANE: u64 = 0x0010_0000_0000;
/// Plane for keys that exist as left/right pairs.
pub const SYNONYM_PLANE: u64 = 0x0020_0000_0000;

/// Layout-independent identifier of a hardware key position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhysicalKey(u64);

impl PhysicalKey {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u64 {
        self.0
    }
}

impl Display for PhysicalKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#011x}", self.0)
    }
}

/// Layout and modifier dependent meaning of a key press.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogicalKey(u64);

impl LogicalKey {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u64 {
        self.0
    }
}

impl Display for LogicalKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#011x}", self.0)
    }
}

/// Physical keys referenced by the built-in tables (USB HID usages).
pub mod physical {
    use super::PhysicalKey;

    pub const KEY_A: PhysicalKey = PhysicalKey::new(0x0007_0004);
    pub const KEY_B: PhysicalKey = PhysicalKey::new(0x0007_0005);
    pub const KEY_Q: PhysicalKey = PhysicalKey::new(0x0007_0014);
    pub const DIGIT_1: PhysicalKey = PhysicalKey::new(0x0007_001e);
    pub const DIGIT_0: PhysicalKey = PhysicalKey::new(0x0007_0027);
    pub const ENTER: PhysicalKey = PhysicalKey::new(0x0007_0028);
    pub const ESCAPE: PhysicalKey = PhysicalKey::new(0x0007_0029);
    pub const BACKSPACE: PhysicalKey = PhysicalKey::new(0x0007_002a);
    pub const TAB: PhysicalKey = PhysicalKey::new(0x0007_002b);
    pub const SPACE: PhysicalKey = PhysicalKey::new(0x0007_002c);
    pub const MINUS: PhysicalKey = PhysicalKey::new(0x0007_002d);
    pub const CAPS_LOCK: PhysicalKey = PhysicalKey::new(0x0007_0039);
    pub const F1: PhysicalKey = PhysicalKey::new(0x0007_003a);
    pub const ARROW_RIGHT: PhysicalKey = PhysicalKey::new(0x0007_004f);
    pub const ARROW_LEFT: PhysicalKey = PhysicalKey::new(0x0007_0050);
    pub const ARROW_DOWN: PhysicalKey = PhysicalKey::new(0x0007_0051);
    pub const ARROW_UP: PhysicalKey = PhysicalKey::new(0x0007_0052);
    pub const CONTROL_LEFT: PhysicalKey = PhysicalKey::new(0x0007_00e0);
    pub const SHIFT_LEFT: PhysicalKey = PhysicalKey::new(0x0007_00e1);
    pub const ALT_LEFT: PhysicalKey = PhysicalKey::new(0x0007_00e2);
    pub const META_LEFT: PhysicalKey = PhysicalKey::new(0x0007_00e3);
    pub const CONTROL_RIGHT: PhysicalKey = PhysicalKey::new(0x0007_00e4);
    pub const SHIFT_RIGHT: PhysicalKey = PhysicalKey::new(0x0007_00e5);
    pub const ALT_RIGHT: PhysicalKey = PhysicalKey::new(0x0007_00e6);
    pub const META_RIGHT: PhysicalKey = PhysicalKey::new(0x0007_00e7);
}

/// Logical keys referenced by the built-in tables.
pub mod logical {
    use super::{LogicalKey, SYNONYM_PLANE, UNPRINTABLE_PLANE};

    pub const KEY_A: LogicalKey = LogicalKey::new(0x61);
    pub const KEY_B: LogicalKey = LogicalKey::new(0x62);
    pub const KEY_Q: LogicalKey = LogicalKey::new(0x71);
    pub const DIGIT_1: LogicalKey = LogicalKey::new(0x31);
    pub const DIGIT_0: LogicalKey = LogicalKey::new(0x30);
    pub const MINUS: LogicalKey = LogicalKey::new(0x2d);
    pub const UNDERSCORE: LogicalKey = LogicalKey::new(0x5f);
    pub const SPACE: LogicalKey = LogicalKey::new(0x20);
    pub const BACKSPACE: LogicalKey = LogicalKey::new(UNPRINTABLE_PLANE | 0x08);
    pub const TAB: LogicalKey = LogicalKey::new(UNPRINTABLE_PLANE | 0x09);
    pub const ENTER: LogicalKey = LogicalKey::new(UNPRINTABLE_PLANE | 0x0d);
    pub const ESCAPE: LogicalKey = LogicalKey::new(UNPRINTABLE_PLANE | 0x1b);
    pub const CAPS_LOCK: LogicalKey = LogicalKey::new(UNPRINTABLE_PLANE | 0x104);
    pub const ARROW_DOWN: LogicalKey = LogicalKey::new(UNPRINTABLE_PLANE | 0x301);
    pub const ARROW_LEFT: LogicalKey = LogicalKey::new(UNPRINTABLE_PLANE | 0x302);
    pub const ARROW_RIGHT: LogicalKey = LogicalKey::new(UNPRINTABLE_PLANE | 0x303);
    pub const ARROW_UP: LogicalKey = LogicalKey::new(UNPRINTABLE_PLANE | 0x304);
    pub const F1: LogicalKey = LogicalKey::new(UNPRINTABLE_PLANE | 0x801);
    pub const CONTROL_LEFT: LogicalKey = LogicalKey::new(SYNONYM_PLANE | 0x100);
    pub const CONTROL_RIGHT: LogicalKey = LogicalKey::new(SYNONYM_PLANE | 0x101);
    pub const SHIFT_LEFT: LogicalKey = LogicalKey::new(SYNONYM_PLANE | 0x102);
    pub const SHIFT_RIGHT: LogicalKey = LogicalKey::new(SYNONYM_PLANE | 0x103);
    pub const ALT_LEFT: LogicalKey = LogicalKey::new(SYNONYM_PLANE | 0x104);
    pub const ALT_RIGHT: LogicalKey = LogicalKey::new(SYNONYM_PLANE | 0x105);
    pub const META_LEFT: LogicalKey = LogicalKey::new(SYNONYM_PLANE | 0x106);
    pub const META_RIGHT: LogicalKey = LogicalKey::new(SYNONYM_PLANE | 0x107);
}

/// Toolkit key symbols used by the tables and tests.
pub mod keyval {
    pub const EXCLAM: u32 = 0x21;
    pub const MINUS: u32 = 0x2d;
    pub const DIGIT_0: u32 = 0x30;
    pub const DIGIT_1: u32 = 0x31;
    pub const UPPER_A: u32 = 0x41;
    pub const UNDERSCORE: u32 = 0x5f;
    pub const LOWER_A: u32 = 0x61;
    pub const LOWER_B: u32 = 0x62;
    pub const LOWER_Q: u32 = 0x71;
    pub const BACKSPACE: u32 = 0xff08;
    pub const TAB: u32 = 0xff09;
    pub const RETURN: u32 = 0xff0d;
    pub const ESCAPE: u32 = 0xff1b;
    pub const LEFT: u32 = 0xff51;
    pub const UP: u32 = 0xff52;
    pub const RIGHT: u32 = 0xff53;
    pub const DOWN: u32 = 0xff54;
    pub const F1: u32 = 0xffbe;
    pub const SHIFT_L: u32 = 0xffe1;
    pub const SHIFT_R: u32 = 0xffe2;
    pub const CONTROL_L: u32 = 0xffe3;
    pub const CONTROL_R: u32 = 0xffe4;
    pub const CAPS_LOCK: u32 = 0xffe5;
    pub const META_L: u32 = 0xffe7;
    pub const META_R: u32 = 0xffe8;
    pub const ALT_L: u32 = 0xffe9;
    pub const ALT_R: u32 = 0xffea;
    pub const SUPER_L: u32 = 0xffeb;
    pub const SUPER_R: u32 = 0xffec;
}

/// Hardware scan codes (XKB keycodes) used by the tables and tests.
pub mod keycode {
    pub const ESCAPE: u16 = 0x09;
    pub const DIGIT_1: u16 = 0x0a;
    pub const DIGIT_0: u16 = 0x13;
    pub const MINUS: u16 = 0x14;
    pub const BACKSPACE: u16 = 0x16;
    pub const TAB: u16 = 0x17;
    pub const KEY_Q: u16 = 0x18;
    pub const ENTER: u16 = 0x24;
    pub const CONTROL_LEFT: u16 = 0x25;
    pub const KEY_A: u16 = 0x26;
    pub const SHIFT_LEFT: u16 = 0x32;
    pub const KEY_B: u16 = 0x38;
    pub const SHIFT_RIGHT: u16 = 0x3e;
    pub const ALT_LEFT: u16 = 0x40;
    pub const SPACE: u16 = 0x41;
    pub const CAPS_LOCK: u16 = 0x42;
    pub const F1: u16 = 0x43;
    pub const CONTROL_RIGHT: u16 = 0x69;
    pub const ALT_RIGHT: u16 = 0x6c;
    pub const ARROW_UP: u16 = 0x6f;
    pub const ARROW_LEFT: u16 = 0x71;
    pub const ARROW_RIGHT: u16 = 0x72;
    pub const ARROW_DOWN: u16 = 0x74;
    pub const META_LEFT: u16 = 0x85;
    pub const META_RIGHT: u16 = 0x86;
}
