use axum::{
    Json,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::standings::{HouseStanding, ScoreboardResponse},
};

use crate::error::WebError;

use super::services;

// Displays poll these endpoints, so every response is computed fresh.
const NO_STORE: [(header::HeaderName, &str); 1] = [(header::CACHE_CONTROL, "no-store")];

#[utoipa::path(
    get,
    path = "/api/standings",
    responses(
        (status = 200, description = "Every house ranked by points, then gold, silver and bronze", body = Vec<HouseStanding>)
    ),
    tag = "standings"
)]
pub async fn get_standings(State(db): State<Database>) -> Result<Response, WebError> {
    let standings = services::get_standings(&db).await?;

    Ok((NO_STORE, Json(standings)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/scoreboard",
    responses(
        (status = 200, description = "Ranking with medal totals and the latest results", body = ScoreboardResponse)
    ),
    tag = "standings"
)]
pub async fn get_scoreboard(State(db): State<Database>) -> Result<Response, WebError> {
    let scoreboard = services::get_scoreboard(&db).await?;

    Ok((NO_STORE, Json(scoreboard)).into_response())
}
