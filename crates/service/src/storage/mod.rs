//! Storage abstractions for the maintenance status record.
//!
//! One [`StorageProvider`] per backend kind, chosen once at startup by the
//! [`StorageProviderFactory`] from the configured `StorageMode`.

pub mod provider;
pub mod database;
pub mod file;
pub mod memory;
pub mod factory;
pub mod mock;

pub use provider::StorageProvider;
pub use database::DatabaseStorageProvider;
pub use file::FileStorageProvider;
pub use memory::InMemoryStorageProvider;
pub use factory::StorageProviderFactory;
