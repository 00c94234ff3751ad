//! Page-scoped cancellation for in-flight requests.
//!
//! A navigated-away page must not apply a late response to discarded state.
//! Each page owns a `PageLifetime`; wrapping a request in `scoped` makes it
//! resolve to `DeskError::Cancelled` once the lifetime is cancelled.

use tokio::sync::watch;

use crate::error::{DeskError, Result};

#[derive(Debug)]
pub struct PageLifetime {
    tx: watch::Sender<bool>,
    rx: watch::Receiver<bool>,
}

impl Default for PageLifetime {
    fn default() -> Self {
        Self::new()
    }
}

impl PageLifetime {
    pub fn new() -> Self {
        let (tx, rx) = watch::channel(false);
        Self { tx, rx }
    }

    /// Signal that the owning page has been left.
    pub fn cancel(&self) {
        let _ = self.tx.send(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Race `fut` against cancellation.
    pub async fn scoped<F, T>(&self, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        if self.is_cancelled() {
            return Err(DeskError::Cancelled);
        }

        let mut rx = self.rx.clone();
        tokio::select! {
            _ = rx.wait_for(|&cancelled| cancelled) => Err(DeskError::Cancelled),
            result = fut => result,
        }
    }
}
