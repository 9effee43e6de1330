use axum::{
    routing::{delete, get},
    Router,
};
use storage::Database;

use super::handlers::{create_event, delete_event, list_events};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/", get(list_events).post(create_event))
        .route("/:id", delete(delete_event))
}
