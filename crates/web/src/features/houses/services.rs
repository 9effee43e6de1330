use storage::{
    Database,
    dto::house::CreateHouseRequest,
    error::Result,
    models::House,
    repository::house::HouseRepository,
};

/// List all houses
pub async fn list_houses(db: &Database) -> Result<Vec<House>> {
    let pool = db.acquire().await;
    HouseRepository::new(&pool).list().await
}

/// Register a new house
pub async fn create_house(db: &Database, request: &CreateHouseRequest) -> Result<House> {
    let pool = db.acquire().await;
    HouseRepository::new(&pool).create(request).await
}

/// Set or clear a house's color
pub async fn set_house_color(db: &Database, id: i64, color: Option<&str>) -> Result<House> {
    let pool = db.acquire().await;
    HouseRepository::new(&pool).set_color(id, color).await
}
