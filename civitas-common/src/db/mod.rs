//! Database models and queries

pub mod alerts;
pub mod init;
pub mod missions;
pub mod models;
pub mod reports;

pub use init::*;
pub use models::*;
