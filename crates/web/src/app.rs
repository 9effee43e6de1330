use axum::Router;
use storage::Database;

use crate::features::{events, houses, results, standings, store};

/// All API routes, bound to the store.
pub fn router(db: Database, max_upload_bytes: usize) -> Router {
    let api = Router::new()
        .nest("/houses", houses::routes::routes())
        .nest("/events", events::routes::routes())
        .nest("/results", results::routes::routes())
        .nest("/store", store::routes::routes(max_upload_bytes))
        .merge(standings::routes::routes());

    Router::new().nest("/api", api).with_state(db)
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
    };
    use serde_json::{Value, json};
    use tempfile::TempDir;
    use tower::ServiceExt;

    use super::*;

    async fn test_app() -> (TempDir, Router) {
        let dir = tempfile::tempdir().expect("create temp dir");
        let db = Database::open(dir.path().join("sports.db"))
            .await
            .expect("open store");
        (dir, router(db, 1024 * 1024))
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                request = request.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = app
            .clone()
            .oneshot(request.body(body).expect("request"))
            .await
            .expect("response");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("json body")
        };

        (status, value)
    }

    async fn create(app: &Router, uri: &str, body: Value) -> i64 {
        let (status, value) = send(app, "POST", uri, Some(body)).await;
        assert_eq!(status, StatusCode::CREATED, "{value}");
        value["id"].as_i64().expect("id")
    }

    #[tokio::test]
    async fn test_results_drive_the_standings() {
        let (_dir, app) = test_app().await;
        let red = create(&app, "/api/houses", json!({"name": "Red", "color": "#ff0000"})).await;
        let blue = create(&app, "/api/houses", json!({"name": "Blue"})).await;
        create(&app, "/api/houses", json!({"name": "Green"})).await;
        let sprint = create(
            &app,
            "/api/events",
            json!({"name": "100m", "category": "Balapan", "gender": "L"}),
        )
        .await;

        create(&app, "/api/results", json!({"event_id": sprint, "house_id": red, "position": 1})).await;
        create(&app, "/api/results", json!({"event_id": sprint, "house_id": blue, "position": 2, "performance": "12.9s"})).await;

        let (status, standings) = send(&app, "GET", "/api/standings", None).await;
        assert_eq!(status, StatusCode::OK);
        let rows = standings.as_array().expect("array");
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0]["name"], "Red");
        assert_eq!(rows[0]["color"], "#ff0000");
        assert_eq!(rows[0]["points"], 5);
        assert_eq!(rows[0]["gold"], 1);
        assert_eq!(rows[1]["name"], "Blue");
        assert_eq!(rows[1]["points"], 3);
        assert_eq!(rows[1]["silver"], 1);
        assert_eq!(rows[2]["points"], 0);

        let (_, scoreboard) = send(&app, "GET", "/api/scoreboard", None).await;
        assert_eq!(scoreboard["medal_totals"], json!({"gold": 1, "silver": 1, "bronze": 0}));
        assert_eq!(scoreboard["recent_results"].as_array().expect("array").len(), 2);

        let uri = format!("/api/results?event_id={sprint}");
        let (_, listed) = send(&app, "GET", &uri, None).await;
        assert_eq!(listed[0]["house_name"], "Red");
        assert_eq!(listed[1]["performance"], "12.9s");
    }

    #[tokio::test]
    async fn test_write_conflicts_report_the_constraint() {
        let (_dir, app) = test_app().await;
        let red = create(&app, "/api/houses", json!({"name": "Red"})).await;
        let sprint = create(&app, "/api/events", json!({"name": "100m"})).await;
        create(&app, "/api/results", json!({"event_id": sprint, "house_id": red, "position": 1})).await;

        let (status, body) = send(
            &app,
            "POST",
            "/api/results",
            Some(json!({"event_id": sprint, "house_id": red, "position": 1})),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["constraint"], "result_position_unique");

        let (status, body) = send(&app, "POST", "/api/houses", Some(json!({"name": "Red"}))).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["constraint"], "house_name_unique");

        let (status, _) = send(
            &app,
            "POST",
            "/api/results",
            Some(json!({"event_id": sprint, "house_id": red, "position": 0})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_removals() {
        let (_dir, app) = test_app().await;
        let red = create(&app, "/api/houses", json!({"name": "Red"})).await;
        let sprint = create(&app, "/api/events", json!({"name": "100m"})).await;
        let result = create(&app, "/api/results", json!({"event_id": sprint, "house_id": red, "position": 1})).await;

        let uri = format!("/api/results/{result}");
        let (status, _) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let uri = format!("/api/events/{sprint}");
        let (status, _) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, "PUT", "/api/houses/999/color", Some(json!({"color": "#000"}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_events_expose_resolved_policy() {
        let (_dir, app) = test_app().await;
        create(
            &app,
            "/api/events",
            json!({"name": "Relay", "category": "Balapan", "gender": "P", "points_policy": "{\"1\":\"8\",\"2\":\"4\"}"}),
        )
        .await;
        create(
            &app,
            "/api/events",
            json!({"name": "Tug of war", "category": "Permainan", "gender": "Campuran", "points_policy": "not json"}),
        )
        .await;

        let (_, events) = send(&app, "GET", "/api/events", None).await;
        assert_eq!(events[0]["name"], "Relay");
        assert_eq!(events[0]["points_policy"], json!({"1": 8, "2": 4}));
        assert_eq!(events[0]["policy_source"], "decoded");
        assert_eq!(events[1]["points_policy"], json!({"1": 5, "2": 3, "3": 1}));
        assert_eq!(events[1]["policy_source"], "default");
    }

    #[tokio::test]
    async fn test_backup_and_restore() {
        let (_dir, app) = test_app().await;
        create(&app, "/api/houses", json!({"name": "Red"})).await;

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/store/backup")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/octet-stream"
        );
        let backup = to_bytes(response.into_body(), usize::MAX).await.expect("body");

        create(&app, "/api/houses", json!({"name": "Blue"})).await;

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri("/api/store/restore")
                    .body(Body::from(backup))
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let (_, houses) = send(&app, "GET", "/api/houses", None).await;
        assert_eq!(houses, json!([{"id": 1, "name": "Red", "color": null}]));

        let (status, _) = send(&app, "PUT", "/api/store/restore", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
