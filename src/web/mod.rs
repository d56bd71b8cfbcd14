//! HTTP surfaces: the HTML dashboard and the JSON API
//!
//! Both servers are stateless apart from the dashboard's session toggle.
//! Every request opens its own read-only database connection on the
//! blocking pool and drops it when the queries finish.

pub mod api;
pub mod dashboard;
mod error;
pub mod navigation;
pub mod session;

pub use error::AppError;

use crate::store::{Database, ReviewStore, StoreError};
use anyhow::Context;
use axum::Router;
use std::future::Future;
use std::net::SocketAddr;

/// Run queries against a fresh connection on the blocking pool
pub async fn with_store<T, F>(db: &Database, query: F) -> Result<T, AppError>
where
    F: FnOnce(&ReviewStore) -> Result<T, StoreError> + Send + 'static,
    T: Send + 'static,
{
    let db = db.clone();
    let result = tokio::task::spawn_blocking(move || {
        let store = db.connect()?;
        query(&store)
    })
    .await?;

    Ok(result?)
}

/// Bind and serve a router until `shutdown` resolves
pub async fn serve<S>(name: &str, addr: SocketAddr, router: Router, shutdown: S) -> anyhow::Result<()>
where
    S: Future<Output = ()> + Send + 'static,
{
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {} to {}", name, addr))?;

    tracing::info!(server = name, %addr, "Listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .with_context(|| format!("serving {}", name))?;

    tracing::info!(server = name, "Stopped");
    Ok(())
}
