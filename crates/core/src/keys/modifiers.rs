use super::{LogicalKey, PhysicalKey, keycode, keyval, logical, physical};
use crate::event::ModifierState;

/// One side of a modifier pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModifierKey {
    pub physical: PhysicalKey,
    pub logical: LogicalKey,
    pub keycode: u16,
    pub keyval: u32,
}

/// Ties a modifier bit to the left/right keys that can produce it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModifierBinding {
    pub mask: ModifierState,
    pub left: ModifierKey,
    pub right: ModifierKey,
}

impl ModifierBinding {
    pub fn sides(&self) -> [ModifierKey; 2] {
        [self.left, self.right]
    }
}

const fn key(physical: PhysicalKey, logical: LogicalKey, keycode: u16, keyval: u32) -> ModifierKey {
    ModifierKey { physical, logical, keycode, keyval }
}

/// Modifier bits that are kept in sync with the pressed-state table.
///
/// Lock-type bits (caps/num lock) are toggles and never appear here.
pub const MODIFIER_BINDINGS: [ModifierBinding; 4] = [
    ModifierBinding {
        mask: ModifierState::CONTROL,
        left: key(physical::CONTROL_LEFT, logical::CONTROL_LEFT, keycode::CONTROL_LEFT, keyval::CONTROL_L),
        right: key(physical::CONTROL_RIGHT, logical::CONTROL_RIGHT, keycode::CONTROL_RIGHT, keyval::CONTROL_R),
    },
    ModifierBinding {
        mask: ModifierState::SHIFT,
        left: key(physical::SHIFT_LEFT, logical::SHIFT_LEFT, keycode::SHIFT_LEFT, keyval::SHIFT_L),
        right: key(physical::SHIFT_RIGHT, logical::SHIFT_RIGHT, keycode::SHIFT_RIGHT, keyval::SHIFT_R),
    },
    ModifierBinding {
        mask: ModifierState::MOD1,
        left: key(physical::ALT_LEFT, logical::ALT_LEFT, keycode::ALT_LEFT, keyval::ALT_L),
        right: key(physical::ALT_RIGHT, logical::ALT_RIGHT, keycode::ALT_RIGHT, keyval::ALT_R),
    },
    ModifierBinding {
        mask: ModifierState::META,
        left: key(physical::META_LEFT, logical::META_LEFT, keycode::META_LEFT, keyval::META_L),
        right: key(physical::META_RIGHT, logical::META_RIGHT, keycode::META_RIGHT, keyval::META_R),
    },
];
