use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::{Event, PointsPolicy, PolicySource};

/// Request payload for creating a new event
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateEventRequest {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Name must be between 1 and 100 characters"
    ))]
    pub name: String,

    #[validate(length(max = 100))]
    #[serde(default)]
    pub category: String,

    #[validate(length(max = 32))]
    #[serde(default)]
    pub gender: String,

    /// Encoded position -> points mapping, e.g. `{"1":5,"2":3,"3":1}`.
    /// Stored as given; unreadable mappings score with the default.
    #[validate(length(max = 1024))]
    pub points_policy: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EventResponse {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub gender: String,
    pub points_policy: PointsPolicy,
    pub policy_source: PolicySource,
}

impl From<Event> for EventResponse {
    fn from(event: Event) -> Self {
        let resolved = event.policy();
        Self {
            id: event.id,
            name: event.name,
            category: event.category,
            gender: event.gender,
            points_policy: resolved.policy,
            policy_source: resolved.source,
        }
    }
}
