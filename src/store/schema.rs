//! Database schema for the review tables
//!
//! The tables are filled by the external analysis pipeline. The schema here
//! mirrors what the pipeline writes so a local database can be bootstrapped.

use rusqlite::Connection;

/// Tables the dashboard and API read from
pub const REQUIRED_TABLES: [&str; 5] = [
    "sonar_analysis_results",
    "code_complexity",
    "api_versioning",
    "swagger_documentation",
    "analysis_results",
];

/// Create any missing review tables
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS sonar_analysis_results (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            pr_number INTEGER NOT NULL,
            branch TEXT NOT NULL,
            status TEXT NOT NULL,
            developer TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_sonar_branch ON sonar_analysis_results(branch);
        CREATE INDEX IF NOT EXISTS idx_sonar_developer ON sonar_analysis_results(developer);

        CREATE TABLE IF NOT EXISTS code_complexity (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            pr_number INTEGER NOT NULL,
            file_path TEXT NOT NULL,
            complexity_level TEXT NOT NULL,
            details TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_complexity_pr ON code_complexity(pr_number);

        CREATE TABLE IF NOT EXISTS api_versioning (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            pr_number INTEGER NOT NULL,
            file_path TEXT NOT NULL,
            versioning_followed TEXT NOT NULL,
            analysis TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_versioning_pr ON api_versioning(pr_number);

        CREATE TABLE IF NOT EXISTS swagger_documentation (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            pr_number INTEGER NOT NULL,
            file_path TEXT NOT NULL,
            swagger_implemented TEXT NOT NULL,
            details TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_swagger_pr ON swagger_documentation(pr_number);

        CREATE TABLE IF NOT EXISTS analysis_results (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            pr_number INTEGER NOT NULL,
            analysis_text TEXT NOT NULL,
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_analysis_pr_created ON analysis_results(pr_number, created_at);
        "#,
    )
}

/// Required tables that do not exist in the database
pub fn missing_tables(conn: &Connection) -> rusqlite::Result<Vec<&'static str>> {
    let mut stmt =
        conn.prepare("SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1")?;

    let mut missing = Vec::new();
    for table in REQUIRED_TABLES {
        if !stmt.exists([table])? {
            missing.push(table);
        }
    }

    Ok(missing)
}
