use std::sync::atomic::{AtomicBool, Ordering};

/// One-shot flag guarding emergency report emission. An interrupted
/// campaign emits its partial report through [`EmergencyGuard::fire`];
/// the normal completion path disarms the guard instead.
#[derive(Debug, Default)]
pub struct EmergencyGuard {
    fired: AtomicBool,
}

impl EmergencyGuard {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fired: AtomicBool::new(false),
        }
    }

    /// Returns true exactly once; later calls and disarmed guards get false.
    pub fn fire(&self) -> bool {
        !self.fired.swap(true, Ordering::SeqCst)
    }

    /// Marks the guard spent without firing it.
    pub fn disarm(&self) {
        self.fired.store(true, Ordering::SeqCst);
    }
}
