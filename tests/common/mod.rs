use async_trait::async_trait;
use prompt_recall::{BackendError, MemoryStore, Prompt, RecordStore, StorageInfo};
use std::sync::atomic::{AtomicBool, Ordering};

/// A memory store whose reads and writes can be switched to fail.
#[derive(Default)]
pub struct FlakyStore {
    inner: MemoryStore,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl FlakyStore {
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl RecordStore for FlakyStore {
    async fn get_all(&self) -> Result<Vec<Prompt>, BackendError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(BackendError::Unavailable("read refused".to_string()));
        }
        self.inner.get_all().await
    }

    async fn set_all(&self, prompts: &[Prompt]) -> Result<(), BackendError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(BackendError::Unavailable("write refused".to_string()));
        }
        self.inner.set_all(prompts).await
    }

    async fn usage(&self) -> Result<StorageInfo, BackendError> {
        self.inner.usage().await
    }
}
