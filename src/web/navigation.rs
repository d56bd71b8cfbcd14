//! Dashboard navigation state carried in the URL and the session

use std::collections::HashMap;

/// Query parameter selecting a pull request
pub const PR_NUMBER_PARAM: &str = "pr_number";

/// Query parameters naming a branch, in order of preference
pub const BRANCH_PARAMS: [&str; 2] = ["branch", "branch_name"];

/// Query parameter selecting a developer on the scores page
pub const DEVELOPER_PARAM: &str = "developer";

/// Which page the dashboard shows for a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    /// PRs of one branch (or the first branch when none is named)
    List { branch: Option<String> },

    /// Report and findings for one PR
    Detail {
        pr_number: i64,
        branch: Option<String>,
    },

    /// Coding scores, toggled from the sidebar
    DeveloperScores { developer: Option<String> },
}

impl ViewState {
    /// Decide the view from the query string and the session toggle
    ///
    /// The scores toggle wins over everything in the URL. Otherwise a valid
    /// `pr_number` selects the detail view and anything else falls back to
    /// the list view.
    pub fn resolve(params: &HashMap<String, String>, show_scores: bool) -> Self {
        if show_scores {
            return Self::DeveloperScores {
                developer: non_empty(params.get(DEVELOPER_PARAM)),
            };
        }

        let branch = BRANCH_PARAMS
            .iter()
            .find_map(|key| non_empty(params.get(*key)));

        match parse_pr_number(params.get(PR_NUMBER_PARAM).map(String::as_str)) {
            Some(pr_number) => Self::Detail { pr_number, branch },
            None => Self::List { branch },
        }
    }
}

fn non_empty(value: Option<&String>) -> Option<String> {
    value.filter(|v| !v.is_empty()).cloned()
}

/// Parse a `pr_number` parameter
///
/// Only strings made entirely of ASCII digits that parse to a positive
/// number select a PR; `"abc"`, `""`, `"0"` and overflowing values mean no
/// selection.
pub fn parse_pr_number(raw: Option<&str>) -> Option<i64> {
    let raw = raw?;
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse::<i64>().ok().filter(|n| *n > 0)
}

/// Dashboard link to the detail view of a PR
pub fn pr_link(pr_number: i64) -> String {
    let query = serde_urlencoded::to_string([(PR_NUMBER_PARAM, pr_number.to_string())])
        .unwrap_or_else(|_| format!("{}={}", PR_NUMBER_PARAM, pr_number));
    format!("/?{}", query)
}
