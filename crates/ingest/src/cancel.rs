use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tocline_core::TocError;

/// Cooperative cancellation shared between a caller and running pipelines.
///
/// Checked only between pages and between anchor spans, never mid-line.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    pub fn check(&self) -> Result<(), TocError> {
        if self.is_cancelled() {
            Err(TocError::Cancelled)
        } else {
            Ok(())
        }
    }
}
