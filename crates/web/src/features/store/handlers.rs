use axum::{
    body::Bytes,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use storage::Database;

use crate::error::WebError;

use super::services;

const BACKUP_FILE_NAME: &str = "sports.db";

#[utoipa::path(
    get,
    path = "/api/store/backup",
    responses(
        (status = 200, description = "The complete store file", content_type = "application/octet-stream", body = Vec<u8>)
    ),
    tag = "store"
)]
pub async fn backup_store(State(db): State<Database>) -> Result<Response, WebError> {
    let bytes = services::export_store(&db).await?;

    let disposition = format!("attachment; filename=\"{BACKUP_FILE_NAME}\"");
    Ok((
        [
            (header::CONTENT_TYPE, "application/octet-stream".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}

#[utoipa::path(
    put,
    path = "/api/store/restore",
    request_body(content = Vec<u8>, content_type = "application/octet-stream", description = "A store file previously downloaded from the backup endpoint"),
    responses(
        (status = 204, description = "Store replaced"),
        (status = 400, description = "Empty upload"),
        (status = 500, description = "Upload could not be opened as a store; previous store kept")
    ),
    tag = "store"
)]
pub async fn restore_store(
    State(db): State<Database>,
    body: Bytes,
) -> Result<Response, WebError> {
    if body.is_empty() {
        return Err(WebError::BadRequest("Uploaded store is empty".to_string()));
    }

    services::restore_store(&db, &body).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
