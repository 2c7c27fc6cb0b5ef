//! Maintenance mode / content freeze tracking.
//!
//! `MaintenanceModeService` is built once per process with [`MaintenanceModeService::load`]
//! and shared behind an `Arc` by whatever layer answers "are we in maintenance?".

pub mod service;

pub use service::MaintenanceModeService;
