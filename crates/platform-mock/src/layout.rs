use keyrelay_core::LogicalKey;
use keyrelay_core::platform::{KeyLayout, US_LAYOUT};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

/// Layout that behaves like the US layout unless a lookup was overridden.
///
/// Counts lookups so tests can observe the coordinator's logical-key cache.
#[derive(Default)]
pub struct MockKeyLayout {
    overrides: Mutex<Vec<((u16, u32, u8), LogicalKey)>>,
    lookups: AtomicUsize,
}

impl MockKeyLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_override(&self, keycode: u16, keyval: u32, group: u8, logical: LogicalKey) {
        let mut overrides = self.overrides.lock().unwrap_or_else(PoisonError::into_inner);
        overrides.retain(|(key, _)| *key != (keycode, keyval, group));
        overrides.push(((keycode, keyval, group), logical));
    }

    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl KeyLayout for MockKeyLayout {
    fn name(&self) -> &str {
        "mock"
    }

    fn lookup_logical_key(&self, keycode: u16, keyval: u32, group: u8) -> LogicalKey {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        let overrides = self.overrides.lock().unwrap_or_else(PoisonError::into_inner);
        overrides
            .iter()
            .find(|(key, _)| *key == (keycode, keyval, group))
            .map_or_else(|| US_LAYOUT.lookup_logical_key(keycode, keyval, group), |(_, logical)| *logical)
    }
}
