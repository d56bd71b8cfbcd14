//! Review database: schema, row types and read-only queries

mod error;
mod models;
mod schema;
mod queries;

pub use error::StoreError;
pub use models::{
    ApiVersioningFinding, CodeComplexityFinding, DeveloperScore, FindingRecord,
    PullRequestAnalysis, SwaggerDocumentationFinding,
};
pub use schema::REQUIRED_TABLES;
pub use queries::{Database, ReviewStore};

/// Seeding helpers standing in for the analysis pipeline in tests
#[cfg(test)]
pub(crate) mod fixtures {
    use super::Database;
    use rusqlite::Connection;
    use tempfile::TempDir;

    /// In-memory database with the review schema
    pub fn seeded_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        super::schema::init_schema(&conn).unwrap();
        conn
    }

    /// On-disk database with the review schema
    pub fn temp_database() -> (TempDir, Database) {
        let dir = TempDir::new().unwrap();
        let db = Database::new(dir.path().join("reviews.db"));
        db.initialize().unwrap();
        (dir, db)
    }

    /// Writable connection to a temp database for seeding
    pub fn writer(db: &Database) -> Connection {
        Connection::open(db.path()).unwrap()
    }

    pub fn insert_pull_request(
        conn: &Connection,
        pr_number: i64,
        branch: &str,
        status: &str,
        developer: &str,
    ) {
        conn.execute(
            "INSERT INTO sonar_analysis_results (pr_number, branch, status, developer)
             VALUES (?1, ?2, ?3, ?4)",
            (pr_number, branch, status, developer),
        )
        .unwrap();
    }

    pub fn insert_complexity(
        conn: &Connection,
        pr_number: i64,
        file_path: &str,
        level: &str,
        details: &str,
    ) {
        conn.execute(
            "INSERT INTO code_complexity (pr_number, file_path, complexity_level, details)
             VALUES (?1, ?2, ?3, ?4)",
            (pr_number, file_path, level, details),
        )
        .unwrap();
    }

    pub fn insert_versioning(
        conn: &Connection,
        pr_number: i64,
        file_path: &str,
        followed: &str,
        analysis: &str,
    ) {
        conn.execute(
            "INSERT INTO api_versioning (pr_number, file_path, versioning_followed, analysis)
             VALUES (?1, ?2, ?3, ?4)",
            (pr_number, file_path, followed, analysis),
        )
        .unwrap();
    }

    pub fn insert_swagger(
        conn: &Connection,
        pr_number: i64,
        file_path: &str,
        implemented: &str,
        details: &str,
    ) {
        conn.execute(
            "INSERT INTO swagger_documentation (pr_number, file_path, swagger_implemented, details)
             VALUES (?1, ?2, ?3, ?4)",
            (pr_number, file_path, implemented, details),
        )
        .unwrap();
    }

    pub fn insert_report(conn: &Connection, pr_number: i64, text: &str, created_at: &str) {
        conn.execute(
            "INSERT INTO analysis_results (pr_number, analysis_text, created_at)
             VALUES (?1, ?2, ?3)",
            (pr_number, text, created_at),
        )
        .unwrap();
    }
}
