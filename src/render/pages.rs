//! Page contexts handed to the dashboard templates

use super::table::{TableFrame, TableSection};
use crate::config::DashboardConfig;
use serde::Serialize;

/// Parts shared by every dashboard page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chrome {
    pub title: String,
    pub logo_url: Option<String>,
    pub peer_name: Option<String>,
    pub frame: TableFrame,
}

impl Chrome {
    pub fn from_config(dashboard: &DashboardConfig, logo_url: Option<String>) -> Self {
        Self {
            title: dashboard.title.clone(),
            logo_url,
            peer_name: dashboard.peer_name.clone(),
            frame: TableFrame {
                width: dashboard.table_width.clone(),
                height: dashboard.table_height.clone(),
            },
        }
    }
}

/// All PRs of one branch
#[derive(Debug, Clone, Serialize)]
pub struct ListPage {
    pub chrome: Chrome,
    pub branches: Vec<String>,
    pub selected_branch: Option<String>,
    pub section: Option<TableSection>,
}

impl ListPage {
    pub const TEMPLATE: &'static str = "list.html";
}

/// Written review and findings for one PR
#[derive(Debug, Clone, Serialize)]
pub struct DetailPage {
    pub chrome: Chrome,
    pub pr_number: i64,
    pub branch: Option<String>,
    pub report_text: String,
    pub report_created_at: Option<String>,
    pub sections: Vec<TableSection>,
}

impl DetailPage {
    pub const TEMPLATE: &'static str = "detail.html";
}

/// Coding score of one developer
#[derive(Debug, Clone, Serialize)]
pub struct ScoresPage {
    pub chrome: Chrome,
    pub developers: Vec<String>,
    pub selected_developer: Option<String>,
    pub section: Option<TableSection>,
}

impl ScoresPage {
    pub const TEMPLATE: &'static str = "scores.html";
}
