//! Instrumented in-memory provider for tests and doc examples.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use configs::StorageMode;
use models::MaintenanceModeStatus;

use crate::errors::StorageError;
use crate::storage::{memory::InMemoryStorageProvider, provider::StorageProvider};

/// Counts reads and saves and can be told to fail either.
///
/// Reports whatever `kind` it was built with, so one mock can stand in for a
/// database or a file backend. Data lives in an [`InMemoryStorageProvider`]
/// reachable through [`MockStorageProvider::backend`], which lets a test write
/// behind the service's back.
pub struct MockStorageProvider {
    kind: StorageMode,
    backend: InMemoryStorageProvider,
    reads: AtomicUsize,
    saves: AtomicUsize,
    fail_reads: AtomicBool,
    fail_saves: AtomicBool,
}

impl MockStorageProvider {
    pub fn new(kind: StorageMode) -> Self {
        Self::with_backend(kind, InMemoryStorageProvider::new())
    }

    pub fn with_backend(kind: StorageMode, backend: InMemoryStorageProvider) -> Self {
        Self {
            kind,
            backend,
            reads: AtomicUsize::new(0),
            saves: AtomicUsize::new(0),
            fail_reads: AtomicBool::new(false),
            fail_saves: AtomicBool::new(false),
        }
    }

    pub fn backend(&self) -> InMemoryStorageProvider {
        self.backend.clone()
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Successful saves only.
    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl StorageProvider for MockStorageProvider {
    fn kind(&self) -> StorageMode { self.kind }

    async fn read(&self) -> Result<Option<MaintenanceModeStatus>, StorageError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StorageError::unavailable("mock read failure"));
        }
        self.backend.read().await
    }

    async fn save(&self, status: &MaintenanceModeStatus) -> Result<(), StorageError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(StorageError::unavailable("mock save failure"));
        }
        self.backend.save(status).await?;
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
