use crate::keys::{LogicalKey, keycode, logical_key_for_keyval};

/// Layout-aware resolution of a key press to its logical key.
///
/// Implementations must be pure: the same inputs always yield the same key
/// for as long as the host does not report a layout change.
pub trait KeyLayout: Send + Sync {
    fn name(&self) -> &str;
    fn lookup_logical_key(&self, keycode: u16, keyval: u32, group: u8) -> LogicalKey;
}

impl<T: KeyLayout + ?Sized> KeyLayout for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn lookup_logical_key(&self, keycode: u16, keyval: u32, group: u8) -> LogicalKey {
        (**self).lookup_logical_key(keycode, keyval, group)
    }
}

/// US layout: the digit row always yields its digit so shortcuts such as
/// `Ctrl+1` stay stable when shifted; everything else follows the key symbol.
#[derive(Debug, Default)]
pub struct UsLayout;

impl UsLayout {
    pub const NAME: &'static str = "us";
}

impl KeyLayout for UsLayout {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn lookup_logical_key(&self, keycode: u16, keyval: u32, _group: u8) -> LogicalKey {
        match keycode {
            keycode::DIGIT_0 => LogicalKey::new(u64::from(b'0')),
            code @ keycode::DIGIT_1..keycode::DIGIT_0 => {
                LogicalKey::new(u64::from(b'1') + u64::from(code - keycode::DIGIT_1))
            }
            _ => logical_key_for_keyval(keyval),
        }
    }
}

pub static US_LAYOUT: UsLayout = UsLayout;

crate::register_key_layout!(&US_LAYOUT);

pub struct LayoutRegistration {
    pub layout: &'static dyn KeyLayout,
}

inventory::collect!(LayoutRegistration);

pub fn key_layouts() -> impl Iterator<Item = &'static dyn KeyLayout> {
    inventory::iter::<LayoutRegistration>.into_iter().map(|entry| entry.layout)
}

pub fn find_key_layout(name: &str) -> Option<&'static dyn KeyLayout> {
    key_layouts().find(|layout| layout.name().eq_ignore_ascii_case(name))
}
