//! JSON API over the finding tables
//!
//! `GET /api/{table}/{pr_number}` returns the table's rows for one PR as a
//! JSON array of domain columns. A PR without rows gets `[]`.

use super::{AppError, with_store};
use crate::store::{
    ApiVersioningFinding, CodeComplexityFinding, Database, FindingRecord,
    SwaggerDocumentationFinding,
};
use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};

pub fn router(db: Database) -> Router {
    Router::new()
        .route(
            "/api/code_complexity/{pr_number}",
            get(findings::<CodeComplexityFinding>),
        )
        .route(
            "/api/api_versioning/{pr_number}",
            get(findings::<ApiVersioningFinding>),
        )
        .route(
            "/api/swagger_documentation/{pr_number}",
            get(findings::<SwaggerDocumentationFinding>),
        )
        .with_state(db)
}

async fn findings<F: FindingRecord>(
    State(db): State<Database>,
    Path(pr_number): Path<i64>,
) -> Result<Json<Vec<F>>, AppError> {
    let rows = with_store(&db, move |store| store.fetch_findings::<F>(pr_number)).await?;
    tracing::debug!(table = F::TABLE, pr_number, rows = rows.len(), "Served findings");
    Ok(Json(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::fixtures::*;
    use crate::web::testing::get as get_uri;
    use axum::http::StatusCode;
    use serde_json::Value;

    #[tokio::test]
    async fn test_no_rows_returns_empty_array() {
        let (_dir, db) = temp_database();

        let response = get_uri(router(db), "/api/code_complexity/101").await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body, "[]");
    }

    #[tokio::test]
    async fn test_code_complexity_rows() {
        let (_dir, db) = temp_database();
        let conn = writer(&db);
        insert_complexity(&conn, 101, "src/a.rs", "high", "deep nesting");
        insert_complexity(&conn, 101, "src/b.rs", "low", "flat");
        insert_complexity(&conn, 202, "src/c.rs", "medium", "other PR");

        let response = get_uri(router(db), "/api/code_complexity/101").await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(
            response.headers.get("content-type").unwrap(),
            "application/json"
        );

        let json: Value = serde_json::from_str(&response.body).unwrap();
        let rows = json.as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0],
            serde_json::json!({
                "file_path": "src/a.rs",
                "complexity_level": "high",
                "details": "deep nesting"
            })
        );
    }

    #[tokio::test]
    async fn test_versioning_and_swagger_omit_internal_columns() {
        let (_dir, db) = temp_database();
        let conn = writer(&db);
        insert_versioning(&conn, 7, "api/v2/users.rs", "yes", "routes under /v2");
        insert_swagger(&conn, 7, "api/v2/users.rs", "no", "missing annotations");

        let versioning = get_uri(router(db.clone()), "/api/api_versioning/7").await;
        let json: Value = serde_json::from_str(&versioning.body).unwrap();
        let row = json[0].as_object().unwrap();
        assert_eq!(row.len(), 3);
        assert_eq!(row["versioning_followed"], "yes");
        assert!(!row.contains_key("id"));
        assert!(!row.contains_key("pr_number"));

        let swagger = get_uri(router(db), "/api/swagger_documentation/7").await;
        let json: Value = serde_json::from_str(&swagger.body).unwrap();
        assert_eq!(json[0]["swagger_implemented"], "no");
        assert_eq!(json[0]["details"], "missing annotations");
    }

    #[tokio::test]
    async fn test_malformed_pr_number_is_rejected() {
        let (_dir, db) = temp_database();
        let response = get_uri(router(db), "/api/code_complexity/abc").await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_table_is_not_found() {
        let (_dir, db) = temp_database();
        let response = get_uri(router(db), "/api/sonar_analysis_results/1").await;
        assert_eq!(response.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_database_failure_is_server_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let db = Database::new(dir.path().join("missing.db"));

        let response = get_uri(router(db), "/api/code_complexity/1").await;
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
