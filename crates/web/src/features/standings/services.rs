use storage::{
    Database,
    dto::standings::{HouseStanding, MedalTally, ScoreboardResponse},
    error::Result,
    repository::result::ResultRepository,
    services::standings::compute_standings,
};

const RECENT_RESULTS: i64 = 20;

/// Rank all houses from the current store contents
pub async fn get_standings(db: &Database) -> Result<Vec<HouseStanding>> {
    let pool = db.acquire().await;
    compute_standings(&pool).await
}

/// Ranking, medal totals and latest results for the live display
pub async fn get_scoreboard(db: &Database) -> Result<ScoreboardResponse> {
    let pool = db.acquire().await;
    let standings = compute_standings(&pool).await?;
    let recent_results = ResultRepository::new(&pool)
        .list_recent(RECENT_RESULTS)
        .await?;

    Ok(ScoreboardResponse {
        medal_totals: MedalTally::from_standings(&standings),
        standings,
        recent_results,
    })
}
