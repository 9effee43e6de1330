use sqlx::SqlitePool;
use sqlx::error::ErrorKind;

use super::{constraint_error, normalize_optional};
use crate::dto::house::CreateHouseRequest;
use crate::error::{Constraint, Result, StorageError};
use crate::models::House;

/// Repository for House database operations
pub struct HouseRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> HouseRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List all houses by name
    pub async fn list(&self) -> Result<Vec<House>> {
        let houses = sqlx::query_as::<_, House>(
            r#"
            SELECT id, name, color
            FROM houses
            ORDER BY name
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(houses)
    }

    pub async fn exists(&self, id: i64) -> Result<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM houses WHERE id = ?")
            .bind(id)
            .fetch_one(self.pool)
            .await?;

        Ok(count > 0)
    }

    /// Register a new house. Names are trimmed and must be unique.
    pub async fn create(&self, req: &CreateHouseRequest) -> Result<House> {
        let name = req.name.trim();
        if name.is_empty() {
            return Err(StorageError::ConstraintViolation(Constraint::HouseNameEmpty));
        }
        let color = normalize_optional(req.color.as_deref());

        let house = sqlx::query_as::<_, House>(
            r#"
            INSERT INTO houses (name, color)
            VALUES (?, ?)
            RETURNING id, name, color
            "#,
        )
        .bind(name)
        .bind(color)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            constraint_error(e, |kind| match kind {
                ErrorKind::UniqueViolation => Some(Constraint::HouseNameUnique),
                ErrorKind::CheckViolation => Some(Constraint::HouseNameEmpty),
                _ => None,
            })
        })?;

        tracing::info!(house_id = house.id, name = %house.name, "House registered");
        Ok(house)
    }

    /// Set or clear the display color of a house
    pub async fn set_color(&self, id: i64, color: Option<&str>) -> Result<House> {
        let house = sqlx::query_as::<_, House>(
            r#"
            UPDATE houses
            SET color = ?
            WHERE id = ?
            RETURNING id, name, color
            "#,
        )
        .bind(normalize_optional(color))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(house)
    }
}
