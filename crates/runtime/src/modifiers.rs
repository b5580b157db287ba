use std::collections::HashSet;

use keyrelay_core::keys::MODIFIER_BINDINGS;
use keyrelay_core::{KeyEvent, ModifierState, PhysicalKey};

/// Plans the synthesized events that bring the held modifier keys in line
/// with `state`.
///
/// A set bit with neither side held yields a press of the left key. A clear
/// bit yields a release for every side still held. Bits without a binding are
/// ignored.
pub fn plan_modifier_sync(state: ModifierState, held: &HashSet<PhysicalKey>, time: u32) -> Vec<KeyEvent> {
    let mut planned = Vec::new();
    for binding in &MODIFIER_BINDINGS {
        let sides = binding.sides();
        let mut pressed = sides.iter().filter(|side| held.contains(&side.physical)).peekable();
        if state.contains(binding.mask) {
            if pressed.peek().is_none() {
                let left = binding.left;
                planned.push(KeyEvent::synthesized(time, true, left.keycode, left.keyval, state));
            }
        } else {
            planned.extend(
                pressed.map(|side| KeyEvent::synthesized(time, false, side.keycode, side.keyval, state)),
            );
        }
    }
    planned
}
