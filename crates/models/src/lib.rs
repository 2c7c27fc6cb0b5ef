pub mod errors;
pub mod db;
pub mod status;
pub mod maintenance_status;

pub use status::{MaintenanceModeStatus, MaintenanceModeViewModel, StatusSettings};

#[cfg(test)]
mod tests;
