//! Read-only access to the review tables

use super::error::StoreError;
use super::models::{DeveloperScore, FindingRecord, LlmAnalysisReport, PullRequestAnalysis};
use super::schema;
use rusqlite::{Connection, OpenFlags, OptionalExtension, Params, Row};
use std::path::{Path, PathBuf};

/// Location of the review database
///
/// Cheap to clone; every request opens its own connection through
/// [`Database::connect`] and drops it when done.
#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a read-only connection
    pub fn connect(&self) -> Result<ReviewStore, StoreError> {
        ReviewStore::open(&self.path)
    }

    /// Create the database file and any missing tables
    pub fn initialize(&self) -> Result<(), StoreError> {
        let conn = Connection::open(&self.path).map_err(|source| StoreError::Open {
            path: self.path.clone(),
            source,
        })?;
        schema::init_schema(&conn).map_err(StoreError::Schema)?;
        tracing::info!(path = %self.path.display(), "Initialized review database");
        Ok(())
    }

    /// Required tables absent from the database
    pub fn missing_tables(&self) -> Result<Vec<&'static str>, StoreError> {
        let store = self.connect()?;
        schema::missing_tables(&store.conn).map_err(StoreError::query("sqlite_master"))
    }
}

/// A connection to the review database
pub struct ReviewStore {
    conn: Connection,
}

impl ReviewStore {
    /// Open an existing database without write access
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let conn = Connection::open_with_flags(path, flags).map_err(|source| {
            StoreError::Open {
                path: path.to_path_buf(),
                source,
            }
        })?;

        Ok(Self { conn })
    }

    /// Wrap an already open connection
    #[cfg(test)]
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    /// Every analysed pull request, in insertion order
    pub fn fetch_sonar_results(&self) -> Result<Vec<PullRequestAnalysis>, StoreError> {
        let sql = format!(
            "SELECT {} FROM sonar_analysis_results ORDER BY id",
            PullRequestAnalysis::SELECT
        );
        self.query_rows(
            "sonar_analysis_results",
            &sql,
            [],
            PullRequestAnalysis::from_row,
        )
    }

    /// Distinct branches in the order they first appear
    pub fn fetch_branches(&self) -> Result<Vec<String>, StoreError> {
        self.query_rows(
            "sonar_analysis_results",
            "SELECT branch FROM sonar_analysis_results GROUP BY branch ORDER BY MIN(id)",
            [],
            |row| row.get(0),
        )
    }

    /// Pull requests analysed on one branch
    pub fn fetch_pull_requests(
        &self,
        branch: &str,
    ) -> Result<Vec<PullRequestAnalysis>, StoreError> {
        let sql = format!(
            "SELECT {} FROM sonar_analysis_results WHERE branch = ?1 ORDER BY id",
            PullRequestAnalysis::SELECT
        );
        let rows = self.query_rows(
            "sonar_analysis_results",
            &sql,
            [branch],
            PullRequestAnalysis::from_row,
        )?;

        tracing::debug!(branch, rows = rows.len(), "Fetched pull requests");
        Ok(rows)
    }

    /// Findings of one kind for a single PR
    ///
    /// A PR without findings yields an empty list.
    pub fn fetch_findings<F: FindingRecord>(&self, pr_number: i64) -> Result<Vec<F>, StoreError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE pr_number = ?1 ORDER BY id",
            F::SELECT,
            F::TABLE
        );
        let rows = self.query_rows(F::TABLE, &sql, [pr_number], F::from_row)?;

        tracing::debug!(table = F::TABLE, pr_number, rows = rows.len(), "Fetched findings");
        Ok(rows)
    }

    /// Every finding of one kind
    pub fn fetch_all_findings<F: FindingRecord>(&self) -> Result<Vec<F>, StoreError> {
        let sql = format!("SELECT {} FROM {} ORDER BY id", F::SELECT, F::TABLE);
        self.query_rows(F::TABLE, &sql, [], F::from_row)
    }

    /// Per-developer acceptance counts and coding score
    pub fn fetch_developer_scores(&self) -> Result<Vec<DeveloperScore>, StoreError> {
        // GROUP BY guarantees COUNT(*) >= 1 per developer
        self.query_rows(
            "sonar_analysis_results",
            "SELECT
                developer,
                COUNT(*) AS total_prs,
                SUM(CASE WHEN status = 'accepted' THEN 1 ELSE 0 END) AS accepted_prs,
                SUM(CASE WHEN status = 'rejected' THEN 1 ELSE 0 END) AS rejected_prs,
                ROUND(
                    (SUM(CASE WHEN status = 'accepted' THEN 1 ELSE 0 END) * 1.0) / COUNT(*),
                    2
                ) AS coding_score
             FROM sonar_analysis_results
             GROUP BY developer
             ORDER BY developer",
            [],
            |row| {
                Ok(DeveloperScore {
                    developer: row.get(0)?,
                    total_prs: row.get(1)?,
                    accepted_prs: row.get(2)?,
                    rejected_prs: row.get(3)?,
                    coding_score: row.get(4)?,
                })
            },
        )
    }

    /// Most recent written review for a PR
    ///
    /// Timestamps are compared as instants, so offsets other than UTC order
    /// correctly. Equal timestamps resolve to the last inserted row.
    pub fn fetch_latest_report(
        &self,
        pr_number: i64,
    ) -> Result<Option<LlmAnalysisReport>, StoreError> {
        self.conn
            .query_row(
                "SELECT pr_number, analysis_text, created_at
                 FROM analysis_results
                 WHERE pr_number = ?1
                 ORDER BY julianday(created_at) DESC, id DESC
                 LIMIT 1",
                [pr_number],
                |row| {
                    Ok(LlmAnalysisReport {
                        pr_number: row.get(0)?,
                        analysis_text: row.get(1)?,
                        created_at: row.get(2)?,
                    })
                },
            )
            .optional()
            .map_err(StoreError::query("analysis_results"))
    }

    fn query_rows<T, P, M>(
        &self,
        table: &'static str,
        sql: &str,
        params: P,
        map: M,
    ) -> Result<Vec<T>, StoreError>
    where
        P: Params,
        M: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        let run = || -> rusqlite::Result<Vec<T>> {
            let mut stmt = self.conn.prepare(sql)?;
            let rows = stmt.query_map(params, map)?.collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        };

        run().map_err(StoreError::query(table))
    }
}
