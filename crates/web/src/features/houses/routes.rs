use axum::{
    routing::{get, put},
    Router,
};
use storage::Database;

use super::handlers::{create_house, list_houses, set_house_color};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/", get(list_houses).post(create_house))
        .route("/:id/color", put(set_house_color))
}
