//! Configuration types and loading for review-board

mod error;
mod loader;
mod sections;

pub use error::ConfigError;
pub use loader::ReviewBoardConfig;
pub use sections::{ApiConfig, DashboardConfig, DatabaseConfig};
