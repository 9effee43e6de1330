use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// One house's finishing position in one event, as stored.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct EventResult {
    pub id: i64,
    pub event_id: i64,
    pub house_id: i64,
    pub position: i64,
    pub performance: Option<String>,
    pub created_at: Option<NaiveDateTime>,
}
