//! HTML dashboard: PR list, PR detail and developer scores

use super::navigation::{ViewState, pr_link};
use super::session::{SessionStore, session_cookie, session_id};
use super::{AppError, with_store};
use crate::config::DashboardConfig;
use crate::render::{
    Cell, Chrome, DetailPage, ListPage, PageRenderer, ResultTable, ScoresPage, TableSection,
};
use crate::store::{
    ApiVersioningFinding, CodeComplexityFinding, Database, DeveloperScore, PullRequestAnalysis,
    SwaggerDocumentationFinding,
};
use axum::extract::{Query, State};
use axum::http::header::{CONTENT_TYPE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::Router;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Shown in place of the written review when a PR has none
pub const NO_REPORT: &str = "No report found.";

/// Route serving the sidebar logo
pub const LOGO_ROUTE: &str = "/static/logo.png";

/// Shared state of the dashboard server
#[derive(Clone)]
pub struct DashboardState {
    pub db: Database,
    pub renderer: Arc<PageRenderer>,
    pub config: Arc<DashboardConfig>,
    pub sessions: SessionStore,
}

impl DashboardState {
    pub fn new(db: Database, renderer: PageRenderer, config: DashboardConfig) -> Self {
        Self {
            db,
            renderer: Arc::new(renderer),
            config: Arc::new(config),
            sessions: SessionStore::new(),
        }
    }

    fn chrome(&self) -> Chrome {
        let logo_url = self.config.logo_path.as_ref().map(|_| LOGO_ROUTE.to_string());
        Chrome::from_config(&self.config, logo_url)
    }
}

pub fn router(state: DashboardState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/scores", post(show_scores))
        .route("/scores/back", post(hide_scores))
        .route(LOGO_ROUTE, get(logo))
        .with_state(state)
}

async fn index(
    State(state): State<DashboardState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Html<String>, AppError> {
    let show_scores = session_id(&headers)
        .map(|id| state.sessions.get(&id).view_scores)
        .unwrap_or(false);

    let view = ViewState::resolve(&params, show_scores);
    tracing::debug!(?view, "Rendering dashboard");

    let html = match view {
        ViewState::List { branch } => list_view(&state, branch).await?,
        ViewState::Detail { pr_number, branch } => detail_view(&state, pr_number, branch).await?,
        ViewState::DeveloperScores { developer } => scores_view(&state, developer).await?,
    };

    Ok(Html(html))
}

/// Sidebar action: switch this session to the scores view
///
/// A cookie naming a session this server does not hold gets a fresh id.
async fn show_scores(State(state): State<DashboardState>, headers: HeaderMap) -> Response {
    let (id, fresh) = match session_id(&headers).filter(|id| state.sessions.contains(id)) {
        Some(id) => (id, false),
        None => (state.sessions.start_session(), true),
    };
    state.sessions.set_view_scores(&id, true);
    tracing::debug!(sessions = state.sessions.session_count(), "Scores view enabled");

    let mut response = Redirect::to("/").into_response();
    if fresh {
        if let Ok(cookie) = HeaderValue::from_str(&session_cookie(&id)) {
            response.headers_mut().insert(SET_COOKIE, cookie);
        }
    }
    response
}

/// "Back to Dashboard" from the scores view
async fn hide_scores(State(state): State<DashboardState>, headers: HeaderMap) -> Redirect {
    if let Some(id) = session_id(&headers) {
        state.sessions.end_session(&id);
    }
    Redirect::to("/")
}

async fn logo(State(state): State<DashboardState>) -> Response {
    let Some(path) = state.config.logo_path.clone() else {
        return StatusCode::NOT_FOUND.into_response();
    };

    match tokio::fs::read(&path).await {
        Ok(bytes) => ([(CONTENT_TYPE, image_content_type(&path))], bytes).into_response(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Logo is not readable");
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

fn image_content_type(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("svg") => "image/svg+xml",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        _ => "image/png",
    }
}

async fn list_view(state: &DashboardState, branch: Option<String>) -> Result<String, AppError> {
    let (branches, selected_branch, rows) = with_store(&state.db, move |store| {
        let branches = store.fetch_branches()?;
        let selected = branch.or_else(|| branches.first().cloned());
        let rows = match selected {
            Some(ref b) => store.fetch_pull_requests(b)?,
            None => Vec::new(),
        };
        Ok((branches, selected, rows))
    })
    .await?;

    let section = selected_branch.as_ref().map(|b| {
        TableSection::new(
            format!("Pull Request Status for Branch: {}", b),
            &pull_request_table(&rows),
        )
    });

    let page = ListPage {
        chrome: state.chrome(),
        branches,
        selected_branch,
        section,
    };
    Ok(state.renderer.render(ListPage::TEMPLATE, &page)?)
}

/// PR list with a link to each PR's detail view
pub fn pull_request_table(rows: &[PullRequestAnalysis]) -> ResultTable {
    let mut table = ResultTable::new([
        "PR Number",
        "Merge Status",
        "Developer Name",
        "Gen AI Report",
    ]);
    for pr in rows {
        table.push_row(vec![
            Cell::text(pr.pr_number),
            Cell::text(&pr.status),
            Cell::text(&pr.developer),
            Cell::link(pr_link(pr.pr_number), "View Report"),
        ]);
    }
    table
}

async fn detail_view(
    state: &DashboardState,
    pr_number: i64,
    branch: Option<String>,
) -> Result<String, AppError> {
    let (report, complexity, versioning, swagger) = with_store(&state.db, move |store| {
        Ok((
            store.fetch_latest_report(pr_number)?,
            store.fetch_findings::<CodeComplexityFinding>(pr_number)?,
            store.fetch_findings::<ApiVersioningFinding>(pr_number)?,
            store.fetch_findings::<SwaggerDocumentationFinding>(pr_number)?,
        ))
    })
    .await?;

    let (report_text, report_created_at) = match report {
        Some(report) => (report.analysis_text, Some(report.created_at)),
        None => (NO_REPORT.to_string(), None),
    };

    let sections = vec![
        TableSection::new(
            "Code Complexity Details",
            &ResultTable::from_records(&complexity),
        ),
        TableSection::new(
            "API Versioning Details",
            &ResultTable::from_records(&versioning),
        ),
        TableSection::new(
            "Swagger Documentation Details",
            &ResultTable::from_records(&swagger),
        ),
    ];

    let page = DetailPage {
        chrome: state.chrome(),
        pr_number,
        branch,
        report_text,
        report_created_at,
        sections,
    };
    Ok(state.renderer.render(DetailPage::TEMPLATE, &page)?)
}

async fn scores_view(
    state: &DashboardState,
    developer: Option<String>,
) -> Result<String, AppError> {
    let scores = with_store(&state.db, |store| store.fetch_developer_scores()).await?;

    let developers: Vec<String> = scores.iter().map(|s| s.developer.clone()).collect();
    let selected_developer = developer
        .filter(|d| developers.contains(d))
        .or_else(|| developers.first().cloned());

    let section = selected_developer.as_ref().map(|d| {
        let rows: Vec<DeveloperScore> = scores
            .iter()
            .filter(|s| &s.developer == d)
            .cloned()
            .collect();
        TableSection::new(
            format!("Coding Scores for {}", d),
            &ResultTable::from_records(&rows),
        )
    });

    let page = ScoresPage {
        chrome: state.chrome(),
        developers,
        selected_developer,
        section,
    };
    Ok(state.renderer.render(ScoresPage::TEMPLATE, &page)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::fixtures::*;
    use crate::web::testing::{TestResponse, get as get_uri, send};
    use axum::http::Method;
    use tempfile::TempDir;

    fn dashboard(db: Database) -> Router {
        dashboard_with(db, DashboardConfig::default())
    }

    fn dashboard_with(db: Database, config: DashboardConfig) -> Router {
        router(DashboardState::new(db, PageRenderer::new().unwrap(), config))
    }

    fn dashboard_state(db: Database) -> DashboardState {
        DashboardState::new(db, PageRenderer::new().unwrap(), DashboardConfig::default())
    }

    fn seeded() -> (TempDir, Database) {
        let (dir, db) = temp_database();
        let conn = writer(&db);
        insert_pull_request(&conn, 101, "main", "accepted", "alice");
        insert_pull_request(&conn, 102, "main", "rejected", "bob");
        insert_pull_request(&conn, 103, "develop", "pending", "alice");
        insert_complexity(&conn, 101, "src/lib.rs", "high", "deeply nested match");
        insert_versioning(&conn, 101, "api/v1/orders.rs", "yes", "versioned route");
        insert_swagger(&conn, 101, "api/v1/orders.rs", "no", "no annotations");
        insert_report(&conn, 101, "Old review", "2026-01-01T09:00:00Z");
        insert_report(&conn, 101, "Looks good overall", "2026-02-01T09:00:00Z");
        (dir, db)
    }

    fn cookie_from(response: &TestResponse) -> String {
        let set_cookie = response.headers.get(SET_COOKIE).unwrap().to_str().unwrap();
        set_cookie.split(';').next().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_list_view_for_branch() {
        let (_dir, db) = seeded();

        let response = get_uri(dashboard(db), "/?branch=main").await;
        assert_eq!(response.status, StatusCode::OK);

        let body = response.body;
        assert!(body.contains("Pull Request Status for Branch: main"));
        assert!(body.contains("<th>PR Number</th>"));
        assert!(body.contains("<th>Merge Status</th>"));
        assert!(body.contains("<th>Developer Name</th>"));
        assert!(body.contains("<td>101</td>"));
        assert!(body.contains("<td>accepted</td>"));
        assert!(body.contains("<td>alice</td>"));
        assert!(body.contains("pr_number=101\">View Report</a>"));
        assert!(!body.contains("<td>103</td>"));
    }

    #[tokio::test]
    async fn test_list_view_defaults_to_first_branch() {
        let (_dir, db) = seeded();

        let body = get_uri(dashboard(db), "/").await.body;
        assert!(body.contains("Selected Branch: main"));
        assert!(body.contains("<option value=\"develop\">develop</option>"));
        assert!(body.contains("<td>102</td>"));
    }

    #[tokio::test]
    async fn test_list_view_on_empty_database() {
        let (_dir, db) = temp_database();

        let response = get_uri(dashboard(db), "/").await;
        assert_eq!(response.status, StatusCode::OK);
        assert!(response.body.contains("No pull requests have been analysed yet."));
    }

    #[tokio::test]
    async fn test_malformed_pr_number_falls_back_to_list() {
        let (_dir, db) = seeded();

        for uri in ["/?pr_number=abc", "/?pr_number=", "/?pr_number=0"] {
            let response = get_uri(dashboard(db.clone()), uri).await;
            assert_eq!(response.status, StatusCode::OK);
            assert!(response.body.contains("Pull Request Status for Branch: main"));
            assert!(!response.body.contains("GenAI Report for PR Number"));
        }
    }

    #[tokio::test]
    async fn test_detail_view() {
        let (_dir, db) = seeded();

        let response = get_uri(dashboard(db), "/?pr_number=101").await;
        assert_eq!(response.status, StatusCode::OK);

        let body = response.body;
        assert!(body.contains("GenAI Report for PR Number: 101"));
        assert!(body.contains("Looks good overall"));
        assert!(!body.contains("Old review"));
        assert!(body.contains("Generated 2026-02-01 09:00 UTC"));
        assert!(body.contains("Code Complexity Details"));
        assert!(body.contains("API Versioning Details"));
        assert!(body.contains("Swagger Documentation Details"));
        assert!(body.contains("deeply nested match"));
        assert!(body.contains("<th>versioning_followed</th>"));
        assert!(body.contains("<td>no annotations</td>"));
        assert!(!body.contains("<th>id</th>"));
        assert!(!body.contains("<th>pr_number</th>"));
        assert!(body.contains("Back to Dashboard</a>"));
    }

    #[tokio::test]
    async fn test_detail_view_without_findings() {
        let (_dir, db) = seeded();

        let response = get_uri(dashboard(db), "/?pr_number=999").await;
        assert_eq!(response.status, StatusCode::OK);

        let body = response.body;
        assert!(body.contains("GenAI Report for PR Number: 999"));
        assert!(body.contains(NO_REPORT));
        assert!(body.contains("<th>complexity_level</th>"));
        assert!(body.contains("<th>swagger_implemented</th>"));
        assert!(!body.contains("<td>"));
        assert!(!body.contains("<th>id</th>"));
    }

    #[tokio::test]
    async fn test_detail_view_with_branch_name() {
        let (_dir, db) = seeded();

        let body = get_uri(dashboard(db), "/?pr_number=101&branch_name=main")
            .await
            .body;
        assert!(body.contains("GenAI Report for PR Number: 101"));
        assert!(body.contains("Branch: main"));
    }

    #[tokio::test]
    async fn test_scores_toggle_round_trip() {
        let (_dir, db) = seeded();
        let app = dashboard(db);

        let toggled = send(app.clone(), Method::POST, "/scores", None).await;
        assert_eq!(toggled.status, StatusCode::SEE_OTHER);
        assert_eq!(toggled.headers.get("location").unwrap(), "/");
        let cookie = cookie_from(&toggled);

        let scores = send(app.clone(), Method::GET, "/", Some(&cookie)).await;
        assert!(scores.body.contains("Developer Coding Scores"));
        assert!(scores.body.contains("Coding Scores for alice"));
        assert!(scores.body.contains("<td>0.50</td>"));

        let bob = send(app.clone(), Method::GET, "/?developer=bob", Some(&cookie)).await;
        assert!(bob.body.contains("Coding Scores for bob"));
        assert!(bob.body.contains("<td>0.00</td>"));

        // other sessions are unaffected
        let anonymous = get_uri(app.clone(), "/").await;
        assert!(anonymous.body.contains("Pull Request Status for Branch"));

        let back = send(app.clone(), Method::POST, "/scores/back", Some(&cookie)).await;
        assert_eq!(back.status, StatusCode::SEE_OTHER);

        let list = send(app, Method::GET, "/", Some(&cookie)).await;
        assert!(list.body.contains("Pull Request Status for Branch: main"));
        assert!(!list.body.contains("Developer Coding Scores"));
    }

    #[tokio::test]
    async fn test_scores_toggle_reuses_issued_session() {
        let (_dir, db) = seeded();
        let app = dashboard(db);
        let cookie = cookie_from(&send(app.clone(), Method::POST, "/scores", None).await);

        let again = send(app, Method::POST, "/scores", Some(&cookie)).await;
        assert_eq!(again.status, StatusCode::SEE_OTHER);
        assert!(again.headers.get(SET_COOKIE).is_none());
    }

    #[tokio::test]
    async fn test_scores_toggle_replaces_unknown_cookie() {
        let (_dir, db) = seeded();
        let state = dashboard_state(db);
        let sessions = state.sessions.clone();
        let app = router(state);

        let response = send(
            app,
            Method::POST,
            "/scores",
            Some("review_board_session=forged"),
        )
        .await;
        let cookie = cookie_from(&response);
        assert_ne!(cookie, "review_board_session=forged");
        assert!(!sessions.contains("forged"));
        assert_eq!(sessions.session_count(), 1);
    }

    #[tokio::test]
    async fn test_session_count_stays_bounded() {
        let (_dir, db) = seeded();
        let state = dashboard_state(db);
        let sessions = state.sessions.clone();
        let app = router(state);

        for i in 0..1000 {
            let cookie = format!("review_board_session=forged{}", i);
            let back = send(app.clone(), Method::POST, "/scores/back", Some(&cookie)).await;
            assert_eq!(back.status, StatusCode::SEE_OTHER);
        }
        assert_eq!(sessions.session_count(), 0);

        let cookie = cookie_from(&send(app.clone(), Method::POST, "/scores", None).await);
        assert_eq!(sessions.session_count(), 1);
        send(app, Method::POST, "/scores/back", Some(&cookie)).await;
        assert_eq!(sessions.session_count(), 0);
    }

    #[tokio::test]
    async fn test_unknown_developer_falls_back_to_first() {
        let (_dir, db) = seeded();
        let app = dashboard(db);
        let cookie = cookie_from(&send(app.clone(), Method::POST, "/scores", None).await);

        let body = send(app, Method::GET, "/?developer=mallory", Some(&cookie))
            .await
            .body;
        assert!(body.contains("Coding Scores for alice"));
    }

    #[tokio::test]
    async fn test_database_failure_is_server_error() {
        let dir = TempDir::new().unwrap();
        let db = Database::new(dir.path().join("missing.db"));

        let response = get_uri(dashboard(db), "/").await;
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_logo_not_configured() {
        let (_dir, db) = temp_database();
        let response = get_uri(dashboard(db), LOGO_ROUTE).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_logo_served_and_linked() {
        let (dir, db) = temp_database();
        let logo = dir.path().join("logo.png");
        std::fs::write(&logo, b"png").unwrap();
        let config = DashboardConfig {
            logo_path: Some(logo),
            peer_name: Some("Reviewer One".into()),
            ..Default::default()
        };
        let app = dashboard_with(db, config);

        let response = get_uri(app.clone(), LOGO_ROUTE).await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.headers.get(CONTENT_TYPE).unwrap(), "image/png");
        assert_eq!(response.body, "png");

        let page = get_uri(app, "/").await.body;
        assert!(page.contains("<img class=\"logo\""));
        assert!(page.contains("Peer: Reviewer One"));
    }

    #[test]
    fn test_pull_request_table_links() {
        let rows = vec![PullRequestAnalysis {
            id: 1,
            pr_number: 202,
            branch: "main".into(),
            status: "pending".into(),
            developer: "carol".into(),
        }];
        let table = pull_request_table(&rows);
        assert_eq!(table.columns.len(), 4);
        assert_eq!(table.rows[0][3], Cell::link("/?pr_number=202", "View Report"));
    }
}
