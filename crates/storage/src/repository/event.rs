use sqlx::SqlitePool;
use sqlx::error::ErrorKind;

use super::{constraint_error, normalize_optional};
use crate::dto::event::CreateEventRequest;
use crate::error::{Constraint, Result, StorageError};
use crate::models::{Event, PolicySource};
use crate::models::points_policy::DEFAULT_POLICY_JSON;

/// Repository for Event database operations
pub struct EventRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> EventRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List all events grouped by category
    pub async fn list(&self) -> Result<Vec<Event>> {
        let events = sqlx::query_as::<_, Event>(
            r#"
            SELECT id, name, COALESCE(category, '') AS category,
                   COALESCE(gender, '') AS gender, points_json
            FROM events
            ORDER BY category, name, gender
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(events)
    }

    pub async fn exists(&self, id: i64) -> Result<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM events WHERE id = ?")
            .bind(id)
            .fetch_one(self.pool)
            .await?;

        Ok(count > 0)
    }

    /// Create a new event. The points policy is stored as supplied and only
    /// interpreted when scoring.
    pub async fn create(&self, req: &CreateEventRequest) -> Result<Event> {
        let name = req.name.trim();
        if name.is_empty() {
            return Err(StorageError::ConstraintViolation(Constraint::EventNameEmpty));
        }
        let points_json = normalize_optional(req.points_policy.as_deref())
            .unwrap_or_else(|| DEFAULT_POLICY_JSON.to_string());

        let event = sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events (name, category, gender, points_json)
            VALUES (?, ?, ?, ?)
            RETURNING id, name, category, gender, points_json
            "#,
        )
        .bind(name)
        .bind(req.category.trim())
        .bind(req.gender.trim())
        .bind(points_json)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            constraint_error(e, |kind| match kind {
                ErrorKind::UniqueViolation => Some(Constraint::EventIdentityUnique),
                ErrorKind::CheckViolation => Some(Constraint::EventNameEmpty),
                _ => None,
            })
        })?;

        if event.policy().source == PolicySource::Default {
            tracing::warn!(
                event_id = event.id,
                "Points policy could not be read, default mapping applies"
            );
        }
        tracing::info!(event_id = event.id, name = %event.name, "Event created");
        Ok(event)
    }

    /// Delete an event and, by cascade, all of its results
    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM events WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        tracing::info!(event_id = id, "Event deleted");
        Ok(())
    }
}
