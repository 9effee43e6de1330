use axum::{routing::get, Router};
use storage::Database;

use super::handlers::{get_scoreboard, get_standings};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/standings", get(get_standings))
        .route("/scoreboard", get(get_scoreboard))
}
