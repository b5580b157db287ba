use std::sync::Arc;

use keyrelay_core::platform::KeyboardViewDelegate;
use keyrelay_platform_mock::MockViewDelegate;
use rstest::fixture;

use crate::KeyboardCoordinator;

pub(crate) struct Harness {
    pub host: Arc<MockViewDelegate>,
    pub coordinator: KeyboardCoordinator,
}

/// rstest fixture: mock host whose responders all answer "unhandled"
#[fixture]
pub(crate) fn host() -> Arc<MockViewDelegate> {
    Arc::new(MockViewDelegate::new())
}

/// rstest fixture: coordinator with default settings attached to a fresh mock host
#[fixture]
pub(crate) fn harness(host: Arc<MockViewDelegate>) -> Harness {
    let coordinator = KeyboardCoordinator::new(Arc::clone(&host) as Arc<dyn KeyboardViewDelegate>);
    Harness { host, coordinator }
}
