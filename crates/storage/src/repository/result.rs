use sqlx::SqlitePool;
use sqlx::error::ErrorKind;

use super::event::EventRepository;
use super::house::HouseRepository;
use super::{constraint_error, normalize_optional};
use crate::dto::result::{RegisterResultRequest, ResultView};
use crate::error::{Constraint, Result, StorageError};

const RESULT_VIEW_SELECT: &str = r#"
    SELECT r.id, r.event_id, e.name AS event_name,
           COALESCE(e.category, '') AS category, COALESCE(e.gender, '') AS gender,
           r.house_id, h.name AS house_name, r.position, r.performance
    FROM results r
    INNER JOIN events e ON r.event_id = e.id
    INNER JOIN houses h ON r.house_id = h.id
"#;

/// Records and removes individual results.
///
/// At most one result exists per (event, position). Results are never edited:
/// a correction is an [`unregister`](Self::unregister) followed by a new
/// [`register`](Self::register).
pub struct ResultRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ResultRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Record a result and return its id.
    pub async fn register(&self, req: &RegisterResultRequest) -> Result<i64> {
        if req.position < 1 {
            return Err(StorageError::ConstraintViolation(
                Constraint::ResultPositionPositive,
            ));
        }
        if !EventRepository::new(self.pool).exists(req.event_id).await? {
            return Err(StorageError::ConstraintViolation(Constraint::UnknownEvent));
        }
        if !HouseRepository::new(self.pool).exists(req.house_id).await? {
            return Err(StorageError::ConstraintViolation(Constraint::UnknownHouse));
        }

        // The insert alone is authoritative; the checks above only name the
        // constraint for the common case.
        let inserted = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO results (event_id, house_id, position, performance)
            VALUES (?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(req.event_id)
        .bind(req.house_id)
        .bind(req.position)
        .bind(normalize_optional(req.performance.as_deref()))
        .fetch_one(self.pool)
        .await;

        let id = match inserted {
            Ok(id) => id,
            Err(e) => {
                let mut err = constraint_error(e, |kind| match kind {
                    ErrorKind::UniqueViolation => Some(Constraint::ResultPositionUnique),
                    ErrorKind::ForeignKeyViolation => Some(Constraint::UnknownEvent),
                    ErrorKind::CheckViolation => Some(Constraint::ResultPositionPositive),
                    _ => None,
                });
                // A parent removed after the checks above; find out which one.
                if err.constraint() == Some(Constraint::UnknownEvent) {
                    err = StorageError::ConstraintViolation(self.missing_reference(req).await?);
                }
                tracing::warn!(
                    event_id = req.event_id,
                    position = req.position,
                    "Result rejected: {}",
                    err
                );
                return Err(err);
            }
        };

        tracing::info!(
            result_id = id,
            event_id = req.event_id,
            house_id = req.house_id,
            position = req.position,
            "Result registered"
        );
        Ok(id)
    }

    /// The parent reference of `req` that no longer resolves. The event is
    /// reported when neither exists.
    pub(crate) async fn missing_reference(&self, req: &RegisterResultRequest) -> Result<Constraint> {
        if !EventRepository::new(self.pool).exists(req.event_id).await? {
            return Ok(Constraint::UnknownEvent);
        }
        if !HouseRepository::new(self.pool).exists(req.house_id).await? {
            return Ok(Constraint::UnknownHouse);
        }
        Ok(Constraint::UnknownEvent)
    }

    /// Remove a result. Removing an unknown id is a no-op.
    pub async fn unregister(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM results WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            tracing::debug!(result_id = id, "No result to remove");
        } else {
            tracing::info!(result_id = id, "Result removed");
        }

        Ok(())
    }

    /// Results of one event, best position first. Unknown events yield nothing.
    pub async fn list_for_event(&self, event_id: i64) -> Result<Vec<ResultView>> {
        let query = format!("{RESULT_VIEW_SELECT} WHERE r.event_id = ? ORDER BY r.position");
        let results = sqlx::query_as::<_, ResultView>(&query)
            .bind(event_id)
            .fetch_all(self.pool)
            .await?;

        Ok(results)
    }

    /// All results, most recently recorded first.
    pub async fn list_all(&self) -> Result<Vec<ResultView>> {
        let query = format!("{RESULT_VIEW_SELECT} ORDER BY r.created_at DESC, r.id DESC");
        let results = sqlx::query_as::<_, ResultView>(&query)
            .fetch_all(self.pool)
            .await?;

        Ok(results)
    }

    /// The `limit` most recently recorded results.
    pub async fn list_recent(&self, limit: i64) -> Result<Vec<ResultView>> {
        let query =
            format!("{RESULT_VIEW_SELECT} ORDER BY r.created_at DESC, r.id DESC LIMIT ?");
        let results = sqlx::query_as::<_, ResultView>(&query)
            .bind(limit)
            .fetch_all(self.pool)
            .await?;

        Ok(results)
    }

    pub async fn count_for_event(&self, event_id: i64) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM results WHERE event_id = ?")
            .bind(event_id)
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }
}
