use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

/// Serializes operations that read and write several entities.
///
/// Clones share the same lock. Services built from one gate never
/// interleave their load-modify-persist sequences.
#[derive(Debug, Clone, Default)]
pub struct WriteGate {
    inner: Arc<Mutex<()>>,
}

impl WriteGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for exclusive access. Access ends when the guard is dropped.
    pub async fn enter(&self) -> MutexGuard<'_, ()> {
        self.inner.lock().await
    }
}
