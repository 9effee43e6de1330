use storage::{
    Database,
    dto::result::{RegisterResultRequest, ResultView},
    error::Result,
    repository::result::ResultRepository,
};

/// List results, for one event by position or all of them newest first
pub async fn list_results(db: &Database, event_id: Option<i64>) -> Result<Vec<ResultView>> {
    let pool = db.acquire().await;
    let repo = ResultRepository::new(&pool);

    match event_id {
        Some(event_id) => repo.list_for_event(event_id).await,
        None => repo.list_all().await,
    }
}

/// Record a result, returning its id
pub async fn register_result(db: &Database, request: &RegisterResultRequest) -> Result<i64> {
    let pool = db.acquire().await;
    ResultRepository::new(&pool).register(request).await
}

/// Remove a result if it exists
pub async fn unregister_result(db: &Database, id: i64) -> Result<()> {
    let pool = db.acquire().await;
    ResultRepository::new(&pool).unregister(id).await
}
