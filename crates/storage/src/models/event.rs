use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::points_policy::{PointsPolicy, ResolvedPolicy};

/// A single competition. `points_json` is kept exactly as stored; use
/// [`Event::policy`] to read it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Event {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub gender: String,
    pub points_json: Option<String>,
}

impl Event {
    pub fn policy(&self) -> ResolvedPolicy {
        PointsPolicy::resolve(self.points_json.as_deref())
    }
}
