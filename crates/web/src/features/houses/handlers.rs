use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::house::{CreateHouseRequest, UpdateHouseColorRequest},
    models::House,
};
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/houses",
    responses(
        (status = 200, description = "List all houses by name", body = Vec<House>)
    ),
    tag = "houses"
)]
pub async fn list_houses(State(db): State<Database>) -> Result<Json<Vec<House>>, WebError> {
    let houses = services::list_houses(&db).await?;

    Ok(Json(houses))
}

#[utoipa::path(
    post,
    path = "/api/houses",
    request_body = CreateHouseRequest,
    responses(
        (status = 201, description = "House registered", body = House),
        (status = 400, description = "Validation error"),
        (status = 409, description = "House name already exists")
    ),
    tag = "houses"
)]
pub async fn create_house(
    State(db): State<Database>,
    Json(req): Json<CreateHouseRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let house = services::create_house(&db, &req).await?;

    Ok((StatusCode::CREATED, Json(house)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/houses/{id}/color",
    params(
        ("id" = i64, Path, description = "House id")
    ),
    request_body = UpdateHouseColorRequest,
    responses(
        (status = 200, description = "Color updated", body = House),
        (status = 404, description = "House not found")
    ),
    tag = "houses"
)]
pub async fn set_house_color(
    State(db): State<Database>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateHouseColorRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let house = services::set_house_color(&db, id, req.color.as_deref()).await?;

    Ok(Json(house).into_response())
}
