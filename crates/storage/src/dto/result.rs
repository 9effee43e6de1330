use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Request payload for recording a result
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct RegisterResultRequest {
    pub event_id: i64,
    pub house_id: i64,

    #[validate(range(min = 1, message = "Position must be 1 or greater"))]
    pub position: i64,

    /// Free text such as `12.34s`, `4.80m` or `2-0`.
    #[validate(length(max = 100))]
    pub performance: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ResultsFilter {
    pub event_id: Option<i64>,
}

/// A result joined with its event and house, for display.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ResultView {
    pub id: i64,
    pub event_id: i64,
    pub event_name: String,
    pub category: String,
    pub gender: String,
    pub house_id: i64,
    pub house_name: String,
    pub position: i64,
    pub performance: Option<String>,
}
