use sqlx::SqlitePool;

use crate::error::Result;
use crate::models::points_policy::DEFAULT_POLICY_JSON;

const DEMO_HOUSES: [&str; 4] = ["Merah", "Biru", "Hijau", "Kuning"];

const DEMO_EVENTS: [(&str, &str, &str); 4] = [
    ("100m", "Balapan", "L"),
    ("100m", "Balapan", "P"),
    ("Lompat Jauh", "Padang", "L"),
    ("Lompat Jauh", "Padang", "P"),
];

/// Fills an empty store with demo houses and events.
///
/// Houses are only added when there are none, and likewise for events, so
/// running this against a store in use changes nothing.
pub async fn seed_demo(pool: &SqlitePool) -> Result<()> {
    let mut tx = pool.begin().await?;

    let house_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM houses")
        .fetch_one(&mut *tx)
        .await?;
    if house_count == 0 {
        for name in DEMO_HOUSES {
            sqlx::query("INSERT INTO houses (name) VALUES (?)")
                .bind(name)
                .execute(&mut *tx)
                .await?;
        }
        tracing::info!(houses = DEMO_HOUSES.len(), "Seeded demo houses");
    }

    let event_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM events")
        .fetch_one(&mut *tx)
        .await?;
    if event_count == 0 {
        for (name, category, gender) in DEMO_EVENTS {
            sqlx::query(
                r#"
                INSERT OR IGNORE INTO events (name, category, gender, points_json)
                VALUES (?, ?, ?, ?)
                "#,
            )
            .bind(name)
            .bind(category)
            .bind(gender)
            .bind(DEFAULT_POLICY_JSON)
            .execute(&mut *tx)
            .await?;
        }
        tracing::info!(events = DEMO_EVENTS.len(), "Seeded demo events");
    }

    tx.commit().await?;
    Ok(())
}
