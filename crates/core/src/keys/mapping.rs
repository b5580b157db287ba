//! Static translation tables from toolkit values to key identifiers.
//!
//! The scan-code table covers the XKB evdev keycodes of a standard 105-key
//! board; anything else is carried into the toolkit plane unchanged.

use super::{LogicalKey, PhysicalKey, SYNONYM_PLANE, TOOLKIT_PLANE, UNPRINTABLE_PLANE, keyval};

const HID_KEYBOARD_PAGE: u64 = 0x0007_0000;

// (XKB keycode, HID usage on the keyboard page)
const KEYCODE_USAGES: &[(u16, u16)] = &[
    (0x09, 0x29), // Escape
    (0x0a, 0x1e),
    (0x0b, 0x1f),
    (0x0c, 0x20),
    (0x0d, 0x21),
    (0x0e, 0x22),
    (0x0f, 0x23),
    (0x10, 0x24),
    (0x11, 0x25),
    (0x12, 0x26),
    (0x13, 0x27), // Digit0
    (0x14, 0x2d), // Minus
    (0x15, 0x2e), // Equal
    (0x16, 0x2a), // Backspace
    (0x17, 0x2b), // Tab
    (0x18, 0x14), // KeyQ
    (0x19, 0x1a),
    (0x1a, 0x08),
    (0x1b, 0x15),
    (0x1c, 0x17),
    (0x1d, 0x1c),
    (0x1e, 0x18),
    (0x1f, 0x0c),
    (0x20, 0x12),
    (0x21, 0x13), // KeyP
    (0x22, 0x2f), // BracketLeft
    (0x23, 0x30), // BracketRight
    (0x24, 0x28), // Enter
    (0x25, 0xe0), // ControlLeft
    (0x26, 0x04), // KeyA
    (0x27, 0x16),
    (0x28, 0x07),
    (0x29, 0x09),
    (0x2a, 0x0a),
    (0x2b, 0x0b),
    (0x2c, 0x0d),
    (0x2d, 0x0e),
    (0x2e, 0x0f), // KeyL
    (0x2f, 0x33), // Semicolon
    (0x30, 0x34), // Quote
    (0x31, 0x35), // Backquote
    (0x32, 0xe1), // ShiftLeft
    (0x33, 0x31), // Backslash
    (0x34, 0x1d), // KeyZ
    (0x35, 0x1b),
    (0x36, 0x06),
    (0x37, 0x19),
    (0x38, 0x05), // KeyB
    (0x39, 0x11),
    (0x3a, 0x10), // KeyM
    (0x3b, 0x36), // Comma
    (0x3c, 0x37), // Period
    (0x3d, 0x38), // Slash
    (0x3e, 0xe5), // ShiftRight
    (0x40, 0xe2), // AltLeft
    (0x41, 0x2c), // Space
    (0x42, 0x39), // CapsLock
    (0x43, 0x3a), // F1
    (0x44, 0x3b),
    (0x45, 0x3c),
    (0x46, 0x3d),
    (0x47, 0x3e),
    (0x48, 0x3f),
    (0x49, 0x40),
    (0x4a, 0x41),
    (0x4b, 0x42),
    (0x4c, 0x43), // F10
    (0x5f, 0x44), // F11
    (0x60, 0x45), // F12
    (0x69, 0xe4), // ControlRight
    (0x6c, 0xe6), // AltRight
    (0x6e, 0x4a), // Home
    (0x6f, 0x52), // ArrowUp
    (0x70, 0x4b), // PageUp
    (0x71, 0x50), // ArrowLeft
    (0x72, 0x4f), // ArrowRight
    (0x73, 0x4d), // End
    (0x74, 0x51), // ArrowDown
    (0x75, 0x4e), // PageDown
    (0x76, 0x49), // Insert
    (0x77, 0x4c), // Delete
    (0x85, 0xe3), // MetaLeft
    (0x86, 0xe7), // MetaRight
];

const NAMED_LOGICAL_KEYS: &[(u32, u64)] = &[
    (keyval::BACKSPACE, UNPRINTABLE_PLANE | 0x08),
    (keyval::TAB, UNPRINTABLE_PLANE | 0x09),
    (keyval::RETURN, UNPRINTABLE_PLANE | 0x0d),
    (keyval::ESCAPE, UNPRINTABLE_PLANE | 0x1b),
    (0xffff, UNPRINTABLE_PLANE | 0x7f), // Delete
    (0xff50, UNPRINTABLE_PLANE | 0x306), // Home
    (keyval::LEFT, UNPRINTABLE_PLANE | 0x302),
    (keyval::UP, UNPRINTABLE_PLANE | 0x304),
    (keyval::RIGHT, UNPRINTABLE_PLANE | 0x303),
    (keyval::DOWN, UNPRINTABLE_PLANE | 0x301),
    (0xff55, UNPRINTABLE_PLANE | 0x308), // Page_Up
    (0xff56, UNPRINTABLE_PLANE | 0x307), // Page_Down
    (0xff57, UNPRINTABLE_PLANE | 0x305), // End
    (0xff63, UNPRINTABLE_PLANE | 0x407), // Insert
    (0xff8d, SYNONYM_PLANE | 0x20d),     // KP_Enter
    (keyval::CAPS_LOCK, UNPRINTABLE_PLANE | 0x104),
    (keyval::SHIFT_L, SYNONYM_PLANE | 0x102),
    (keyval::SHIFT_R, SYNONYM_PLANE | 0x103),
    (keyval::CONTROL_L, SYNONYM_PLANE | 0x100),
    (keyval::CONTROL_R, SYNONYM_PLANE | 0x101),
    (keyval::META_L, SYNONYM_PLANE | 0x106),
    (keyval::META_R, SYNONYM_PLANE | 0x107),
    (keyval::ALT_L, SYNONYM_PLANE | 0x104),
    (keyval::ALT_R, SYNONYM_PLANE | 0x105),
    (keyval::SUPER_L, SYNONYM_PLANE | 0x106),
    (keyval::SUPER_R, SYNONYM_PLANE | 0x107),
];

/// Resolves the hardware scan code to its physical key.
pub fn physical_key_for_keycode(keycode: u16) -> PhysicalKey {
    KEYCODE_USAGES
        .iter()
        .find(|(code, _)| *code == keycode)
        .map_or(PhysicalKey::new(TOOLKIT_PLANE | u64::from(keycode)), |(_, usage)| {
            PhysicalKey::new(HID_KEYBOARD_PAGE | u64::from(*usage))
        })
}

/// Resolves a key symbol to a logical key without any layout knowledge.
///
/// Named keys come from the table, printable symbols use their lower-cased
/// Unicode scalar and everything else lands in the toolkit plane.
pub fn logical_key_for_keyval(keyval: u32) -> LogicalKey {
    if let Some((_, logical)) = NAMED_LOGICAL_KEYS.iter().find(|(value, _)| *value == keyval) {
        return LogicalKey::new(*logical);
    }
    if let Some(ch) = keyval_to_char(keyval) {
        let mut lower = ch.to_lowercase();
        let folded = match (lower.next(), lower.next()) {
            (Some(single), None) => single,
            _ => ch,
        };
        return LogicalKey::new(u64::from(u32::from(folded)));
    }
    LogicalKey::new(TOOLKIT_PLANE | u64::from(keyval))
}

/// Printable character produced by a key symbol, if any.
pub fn keyval_to_char(keyval: u32) -> Option<char> {
    match keyval {
        0x20..=0x7e | 0xa0..=0xff => char::from_u32(keyval),
        0x0100_0100..=0x0110_ffff => char::from_u32(keyval - 0x0100_0000).filter(|ch| !ch.is_control()),
        _ => None,
    }
}
