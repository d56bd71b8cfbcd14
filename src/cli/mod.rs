//! CLI module for review-board
//!
//! This module provides:
//! - Command implementations (dashboard, api, init-db, check)
//! - Signal handling for graceful shutdown

pub mod commands;
pub mod signals;

pub use commands::{check, init_db, serve_api, serve_dashboard};
