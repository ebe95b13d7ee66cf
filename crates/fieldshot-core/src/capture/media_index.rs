use crate::CoreResult;

use std::path::Path;

/// Platform media index that makes new captures visible to viewers.
pub trait MediaIndex: Send {
    /// Register a capture that has just been placed at `path`.
    ///
    /// # Errors
    ///
    /// Failures are reported to the caller, which logs them; the capture
    /// itself is already in place.
    fn register(&mut self, path: &Path) -> CoreResult<()>;
}

/// Media index that does nothing, for hosts without one.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoMediaIndex;

impl MediaIndex for NoMediaIndex {
    fn register(&mut self, _path: &Path) -> CoreResult<()> {
        Ok(())
    }
}
