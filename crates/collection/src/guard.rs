//! Re-entrancy exclusion for the mint entry points.

use crate::error::CollectionError;
use parking_lot::{ReentrantMutex, ReentrantMutexGuard};
use std::cell::Cell;

/// Serializes mint calls and rejects nested entry from the thread already inside.
///
/// Other threads wait for the running call to finish. The owning thread can
/// re-acquire the mutex (for example from a fund-forwarding callback), sees the
/// entered flag, and gets `Reentrant`.
#[derive(Debug, Default)]
pub(crate) struct CallLock {
    entered: ReentrantMutex<Cell<bool>>,
}

impl CallLock {
    /// Enters the lock for the lifetime of the returned guard.
    pub(crate) fn enter(&self) -> Result<CallGuard<'_>, CollectionError> {
        let entered = self.entered.lock();
        if entered.replace(true) {
            tracing::warn!(target: "zbz::mint", "reentrant call rejected");
            return Err(CollectionError::Reentrant);
        }
        Ok(CallGuard { entered })
    }
}

/// Scoped hold on a [`CallLock`]; released on drop along every exit path.
#[derive(Debug)]
pub(crate) struct CallGuard<'a> {
    entered: ReentrantMutexGuard<'a, Cell<bool>>,
}

impl Drop for CallGuard<'_> {
    fn drop(&mut self) {
        self.entered.set(false);
    }
}
