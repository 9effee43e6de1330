use axum::{
    routing::{delete, get},
    Router,
};
use storage::Database;

use super::handlers::{list_results, register_result, unregister_result};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/", get(list_results).post(register_result))
        .route("/:id", delete(unregister_result))
}
