//! Row types for the review tables
//!
//! Every table gets an explicit row struct. Rows are converted from SQLite at
//! the query boundary, so nothing downstream inspects column metadata.

use rusqlite::Row;
use serde::Serialize;

/// Tables that hold per-PR findings and share the `{id, pr_number, ...}` shape
pub trait FindingRecord: Sized + Serialize + Send + 'static {
    /// Table the records are read from
    const TABLE: &'static str;

    /// Select list, in the order `from_row` reads it
    const SELECT: &'static str;

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;
}

/// One analysed pull request (`sonar_analysis_results`)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PullRequestAnalysis {
    #[serde(skip)]
    pub id: i64,
    pub pr_number: i64,
    pub branch: String,
    /// Merge status: accepted, rejected or pending
    pub status: String,
    pub developer: String,
}

impl PullRequestAnalysis {
    pub(crate) const SELECT: &'static str = "id, pr_number, branch, status, developer";

    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            pr_number: row.get(1)?,
            branch: row.get(2)?,
            status: row.get(3)?,
            developer: row.get(4)?,
        })
    }
}

/// A complexity finding for one file of a PR (`code_complexity`)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CodeComplexityFinding {
    #[serde(skip)]
    pub id: i64,
    #[serde(skip)]
    pub pr_number: i64,
    pub file_path: String,
    pub complexity_level: String,
    pub details: String,
}

impl FindingRecord for CodeComplexityFinding {
    const TABLE: &'static str = "code_complexity";
    const SELECT: &'static str = "id, pr_number, file_path, complexity_level, details";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            pr_number: row.get(1)?,
            file_path: row.get(2)?,
            complexity_level: row.get(3)?,
            details: row.get(4)?,
        })
    }
}

/// Whether an API change in a PR follows the versioning rules (`api_versioning`)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiVersioningFinding {
    #[serde(skip)]
    pub id: i64,
    #[serde(skip)]
    pub pr_number: i64,
    pub file_path: String,
    pub versioning_followed: String,
    pub analysis: String,
}

impl FindingRecord for ApiVersioningFinding {
    const TABLE: &'static str = "api_versioning";
    const SELECT: &'static str = "id, pr_number, file_path, versioning_followed, analysis";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            pr_number: row.get(1)?,
            file_path: row.get(2)?,
            versioning_followed: row.get(3)?,
            analysis: row.get(4)?,
        })
    }
}

/// Swagger coverage of an endpoint file in a PR (`swagger_documentation`)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwaggerDocumentationFinding {
    #[serde(skip)]
    pub id: i64,
    #[serde(skip)]
    pub pr_number: i64,
    pub file_path: String,
    pub swagger_implemented: String,
    pub details: String,
}

impl FindingRecord for SwaggerDocumentationFinding {
    const TABLE: &'static str = "swagger_documentation";
    const SELECT: &'static str = "id, pr_number, file_path, swagger_implemented, details";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            pr_number: row.get(1)?,
            file_path: row.get(2)?,
            swagger_implemented: row.get(3)?,
            details: row.get(4)?,
        })
    }
}

/// Free-text review written for a PR (`analysis_results`)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LlmAnalysisReport {
    pub pr_number: i64,
    pub analysis_text: String,
    /// RFC 3339 timestamp as stored by the pipeline
    pub created_at: String,
}

/// Acceptance ratio of one developer's PRs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeveloperScore {
    pub developer: String,
    pub total_prs: i64,
    pub accepted_prs: i64,
    pub rejected_prs: i64,
    /// accepted / total, rounded to 2 decimals
    pub coding_score: f64,
}
