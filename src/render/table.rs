//! Result tables: typed rows projected into named columns and cells

use crate::store::{
    ApiVersioningFinding, CodeComplexityFinding, DeveloperScore, PullRequestAnalysis,
    SwaggerDocumentationFinding,
};
use serde::Serialize;

/// Columns that identify rows internally and never reach the page
pub const INTERNAL_COLUMNS: [&str; 2] = ["id", "pr_number"];

/// A single table cell
///
/// Text cells are escaped by the template; link cells are the only markup
/// injected into a table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Cell {
    Text { value: String },
    Link { href: String, label: String },
}

impl Cell {
    pub fn text(value: impl ToString) -> Self {
        Self::Text {
            value: value.to_string(),
        }
    }

    pub fn link(href: impl Into<String>, label: impl Into<String>) -> Self {
        Self::Link {
            href: href.into(),
            label: label.into(),
        }
    }
}

/// Row types that can be laid out as a table
pub trait TableRow {
    /// Column names, matching the database columns
    fn columns() -> &'static [&'static str];

    /// One cell per column, in column order
    fn cells(&self) -> Vec<Cell>;
}

/// A rectangular set of rows with named columns
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResultTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl ResultTable {
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Lay out typed records, keeping every database column
    pub fn from_records<R: TableRow>(records: &[R]) -> Self {
        let mut table = Self::new(R::columns().iter().copied());
        for record in records {
            table.push_row(record.cells());
        }
        table
    }

    /// Append a row, padding with empty cells or truncating to the column count
    pub fn push_row(&mut self, mut row: Vec<Cell>) {
        row.resize(self.columns.len(), Cell::text(""));
        self.rows.push(row);
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Copy of the table without the named columns
    pub fn without_columns(&self, drop: &[&str]) -> Self {
        let keep: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .filter(|(_, c)| !drop.contains(&c.as_str()))
            .map(|(i, _)| i)
            .collect();

        Self {
            columns: keep.iter().map(|&i| self.columns[i].clone()).collect(),
            rows: self
                .rows
                .iter()
                .map(|row| keep.iter().filter_map(|&i| row.get(i).cloned()).collect())
                .collect(),
        }
    }

    /// The table as shown on a page: `id` and `pr_number` removed
    pub fn for_display(&self) -> Self {
        if !INTERNAL_COLUMNS.iter().any(|c| self.has_column(c)) {
            return self.clone();
        }
        self.without_columns(&INTERNAL_COLUMNS)
    }
}

/// Size of the scrollable container around a rendered table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableFrame {
    pub width: String,
    pub height: String,
}

impl Default for TableFrame {
    fn default() -> Self {
        Self {
            width: "100%".into(),
            height: "400px".into(),
        }
    }
}

/// A titled table ready for a page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableSection {
    pub title: String,
    pub table: ResultTable,
}

impl TableSection {
    /// Build a section, dropping internal columns from the table
    pub fn new(title: impl Into<String>, table: &ResultTable) -> Self {
        Self {
            title: title.into(),
            table: table.for_display(),
        }
    }
}

impl TableRow for PullRequestAnalysis {
    fn columns() -> &'static [&'static str] {
        &["id", "pr_number", "branch", "status", "developer"]
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::text(self.id),
            Cell::text(self.pr_number),
            Cell::text(&self.branch),
            Cell::text(&self.status),
            Cell::text(&self.developer),
        ]
    }
}

impl TableRow for CodeComplexityFinding {
    fn columns() -> &'static [&'static str] {
        &["id", "pr_number", "file_path", "complexity_level", "details"]
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::text(self.id),
            Cell::text(self.pr_number),
            Cell::text(&self.file_path),
            Cell::text(&self.complexity_level),
            Cell::text(&self.details),
        ]
    }
}

impl TableRow for ApiVersioningFinding {
    fn columns() -> &'static [&'static str] {
        &["id", "pr_number", "file_path", "versioning_followed", "analysis"]
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::text(self.id),
            Cell::text(self.pr_number),
            Cell::text(&self.file_path),
            Cell::text(&self.versioning_followed),
            Cell::text(&self.analysis),
        ]
    }
}

impl TableRow for SwaggerDocumentationFinding {
    fn columns() -> &'static [&'static str] {
        &["id", "pr_number", "file_path", "swagger_implemented", "details"]
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::text(self.id),
            Cell::text(self.pr_number),
            Cell::text(&self.file_path),
            Cell::text(&self.swagger_implemented),
            Cell::text(&self.details),
        ]
    }
}

impl TableRow for DeveloperScore {
    fn columns() -> &'static [&'static str] {
        &[
            "developer",
            "total_prs",
            "accepted_prs",
            "rejected_prs",
            "coding_score",
        ]
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::text(&self.developer),
            Cell::text(self.total_prs),
            Cell::text(self.accepted_prs),
            Cell::text(self.rejected_prs),
            Cell::text(format!("{:.2}", self.coding_score)),
        ]
    }
}
