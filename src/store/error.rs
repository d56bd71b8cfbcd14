//! Error types for the review database

use std::path::PathBuf;
use thiserror::Error;

/// Failures talking to the review database
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to open database at {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("query on {table} failed: {source}")]
    Query {
        table: &'static str,
        #[source]
        source: rusqlite::Error,
    },

    #[error("failed to initialize schema: {0}")]
    Schema(#[source] rusqlite::Error),
}

impl StoreError {
    pub(crate) fn query(table: &'static str) -> impl FnOnce(rusqlite::Error) -> Self {
        move |source| Self::Query { table, source }
    }
}
