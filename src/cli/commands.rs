//! CLI command implementations

use super::signals::shutdown_signal;
use crate::config::ReviewBoardConfig;
use crate::render::PageRenderer;
use crate::store::{
    ApiVersioningFinding, CodeComplexityFinding, Database, FindingRecord, REQUIRED_TABLES,
    ReviewStore, StoreError, SwaggerDocumentationFinding,
};
use crate::web::{self, api, dashboard};
use anyhow::{Context, Result};
use std::net::SocketAddr;

fn open_database(config: &ReviewBoardConfig) -> Result<Database> {
    let path = config.database.resolved_path()?;
    tracing::debug!(path = %path.display(), "Using review database");
    Ok(Database::new(path))
}

/// Warn about tables the pipeline has not created yet
fn warn_missing_tables(db: &Database) {
    match db.missing_tables() {
        Ok(missing) if missing.is_empty() => {}
        Ok(missing) => tracing::warn!(
            tables = ?missing,
            "Review database is missing tables; affected pages will fail"
        ),
        Err(e) => tracing::warn!(error = %e, "Could not inspect review database"),
    }
}

/// Serve the HTML dashboard
pub async fn serve_dashboard(config: ReviewBoardConfig, bind: Option<SocketAddr>) -> Result<()> {
    let addr = match bind {
        Some(addr) => addr,
        None => config.dashboard.bind_addr()?,
    };
    let db = open_database(&config)?;
    warn_missing_tables(&db);

    let renderer =
        PageRenderer::from_config(&config.dashboard).context("loading dashboard templates")?;
    renderer
        .validate()
        .context("validating dashboard templates")?;

    if let Some(ref logo) = config.dashboard.logo_path {
        if !logo.exists() {
            tracing::warn!(path = %logo.display(), "Logo file does not exist");
        }
    }

    let state = dashboard::DashboardState::new(db, renderer, config.dashboard);
    web::serve("dashboard", addr, dashboard::router(state), shutdown_signal()).await
}

/// Serve the JSON API
pub async fn serve_api(config: ReviewBoardConfig, bind: Option<SocketAddr>) -> Result<()> {
    let addr = match bind {
        Some(addr) => addr,
        None => config.api.bind_addr()?,
    };
    let db = open_database(&config)?;
    warn_missing_tables(&db);

    web::serve("api", addr, api::router(db), shutdown_signal()).await
}

/// Create the database file and any missing tables
pub fn init_db(config: &ReviewBoardConfig) -> Result<()> {
    let db = open_database(config)?;
    db.initialize()?;
    println!("✓ Initialized {}", db.path().display());
    Ok(())
}

/// Report database tables and template health, returning the exit code
pub fn check(config: &ReviewBoardConfig) -> Result<i32> {
    let db = open_database(config)?;
    let mut all_ok = true;

    println!("Checking {}...\n", db.path().display());
    match db.missing_tables() {
        Ok(missing) => {
            for table in REQUIRED_TABLES {
                if missing.contains(&table) {
                    all_ok = false;
                    println!("  ✗ {} (missing)", table);
                } else {
                    println!("  ✓ {}", table);
                }
            }
            if missing.is_empty() {
                match db.connect().and_then(|store| row_counts(&store)) {
                    Ok(counts) => {
                        println!();
                        for (table, count) in counts {
                            println!("  {:<28} {} rows", table, count);
                        }
                    }
                    Err(e) => {
                        all_ok = false;
                        println!("  ✗ {}", e);
                    }
                }
            }
        }
        Err(e) => {
            all_ok = false;
            println!("  ✗ {}", e);
        }
    }

    println!("\nChecking templates...\n");
    match PageRenderer::from_config(&config.dashboard).and_then(|r| r.validate()) {
        Ok(()) => println!("  ✓ templates compile"),
        Err(e) => {
            all_ok = false;
            println!("  ✗ {}", e);
        }
    }

    Ok(if all_ok { 0 } else { 1 })
}

fn row_counts(store: &ReviewStore) -> Result<Vec<(&'static str, usize)>, StoreError> {
    Ok(vec![
        ("sonar_analysis_results", store.fetch_sonar_results()?.len()),
        (
            CodeComplexityFinding::TABLE,
            store.fetch_all_findings::<CodeComplexityFinding>()?.len(),
        ),
        (
            ApiVersioningFinding::TABLE,
            store.fetch_all_findings::<ApiVersioningFinding>()?.len(),
        ),
        (
            SwaggerDocumentationFinding::TABLE,
            store.fetch_all_findings::<SwaggerDocumentationFinding>()?.len(),
        ),
        ("developers", store.fetch_developer_scores()?.len()),
    ])
}
