use axum::{
    extract::DefaultBodyLimit,
    routing::{get, put},
    Router,
};
use storage::Database;

use super::handlers::{backup_store, restore_store};

pub fn routes(max_upload_bytes: usize) -> Router<Database> {
    Router::new()
        .route("/backup", get(backup_store))
        .route(
            "/restore",
            put(restore_store).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
}
