//! Maintenance mode / content freeze status service.
//! - `storage`: the provider trait, its database/file/memory backends and the factory.
//! - `maintenance`: the service that tracks status and applies toggles.
//! - `errors`: storage and service error types.

pub mod errors;
pub mod storage;
pub mod maintenance;
#[cfg(test)]
pub mod test_support;

pub use errors::{ServiceError, StorageError};
pub use maintenance::MaintenanceModeService;
pub use storage::{StorageProvider, StorageProviderFactory};
