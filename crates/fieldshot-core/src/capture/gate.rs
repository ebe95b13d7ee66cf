use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use tracing::debug;

/// Serializes shutter input: at most one capture is in flight.
///
/// Cloning shares the same flag.
#[derive(Debug, Clone, Default)]
pub struct CaptureGate {
    busy: Arc<AtomicBool>,
}

impl CaptureGate {
    /// Create an open gate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the gate, or `None` if a capture is already in flight.
    pub fn try_acquire(&self) -> Option<CaptureGuard> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| {
                debug!("Capture gate acquired");
                CaptureGuard {
                    busy: Arc::clone(&self.busy),
                }
            })
    }

    /// Whether a capture is currently in flight.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// RAII proof that the holder owns the in-flight capture slot.
///
/// Dropping the guard (on success, error or unwind) reopens the gate.
#[derive(Debug)]
pub struct CaptureGuard {
    busy: Arc<AtomicBool>,
}

impl Drop for CaptureGuard {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
        debug!("Capture gate released");
    }
}
