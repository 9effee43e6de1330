use storage::{
    Database,
    dto::event::{CreateEventRequest, EventResponse},
    error::Result,
    repository::event::EventRepository,
};

/// List all events with their resolved points policies
pub async fn list_events(db: &Database) -> Result<Vec<EventResponse>> {
    let pool = db.acquire().await;
    let events = EventRepository::new(&pool).list().await?;

    Ok(events.into_iter().map(EventResponse::from).collect())
}

/// Create a new event
pub async fn create_event(db: &Database, request: &CreateEventRequest) -> Result<EventResponse> {
    let pool = db.acquire().await;
    let event = EventRepository::new(&pool).create(request).await?;

    Ok(EventResponse::from(event))
}

/// Delete an event together with its results
pub async fn delete_event(db: &Database, id: i64) -> Result<()> {
    let pool = db.acquire().await;
    EventRepository::new(&pool).delete(id).await
}
