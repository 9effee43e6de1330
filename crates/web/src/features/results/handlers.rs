use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use storage::{
    Database,
    dto::result::{RegisterResultRequest, ResultView, ResultsFilter},
};
use utoipa::ToSchema;
use validator::Validate;

use crate::error::WebError;

use super::services;

#[derive(Debug, Serialize, ToSchema)]
pub struct RegisteredResult {
    pub id: i64,
}

#[utoipa::path(
    get,
    path = "/api/results",
    params(ResultsFilter),
    responses(
        (status = 200, description = "Results of one event by position, or all results newest first", body = Vec<ResultView>)
    ),
    tag = "results"
)]
pub async fn list_results(
    State(db): State<Database>,
    Query(filter): Query<ResultsFilter>,
) -> Result<Json<Vec<ResultView>>, WebError> {
    let results = services::list_results(&db, filter.event_id).await?;

    Ok(Json(results))
}

#[utoipa::path(
    post,
    path = "/api/results",
    request_body = RegisterResultRequest,
    responses(
        (status = 201, description = "Result recorded", body = RegisteredResult),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Position already taken, or unknown event or house")
    ),
    tag = "results"
)]
pub async fn register_result(
    State(db): State<Database>,
    Json(req): Json<RegisterResultRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let id = services::register_result(&db, &req).await?;

    Ok((StatusCode::CREATED, Json(RegisteredResult { id })).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/results/{id}",
    params(
        ("id" = i64, Path, description = "Result id")
    ),
    responses(
        (status = 204, description = "Result removed, or there was nothing to remove")
    ),
    tag = "results"
)]
pub async fn unregister_result(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> Result<Response, WebError> {
    services::unregister_result(&db, id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
