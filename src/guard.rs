//! Scope guard that reports an abnormal exit.

/// Runs `on_abort` when dropped, unless [`ExitGuard::disarm`] was called first.
///
/// Covers early returns, `?` propagation and unwinding panics alike.
pub struct ExitGuard<F: FnOnce()> {
    on_abort: Option<F>,
}

impl<F: FnOnce()> ExitGuard<F> {
    pub fn new(on_abort: F) -> Self {
        Self {
            on_abort: Some(on_abort),
        }
    }

    /// Consume the guard without running the abort action.
    pub fn disarm(mut self) {
        self.on_abort = None;
    }
}

impl<F: FnOnce()> Drop for ExitGuard<F> {
    fn drop(&mut self) {
        if let Some(on_abort) = self.on_abort.take() {
            on_abort();
        }
    }
}
