use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cooperative cancellation token.
///
/// Long-running loops poll it once per output tick and abort promptly when
/// set; a single tick cannot be interrupted mid-paint. Clones share the same
/// flag, so a caller can keep one handle and hand the other to the run.
/// Tokens are single-use: a cancelled run is abandoned and the next run gets
/// a fresh token, so a stuck flag can never block a new export.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Fresh, un-cancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Takes effect at the next poll.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}
