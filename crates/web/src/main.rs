use std::time::Duration;

use anyhow::Context;
use storage::{Database, services::seed::seed_demo};
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod app;
mod config;
mod error;
mod features;

use config::Config;
use features::{events, houses, results, standings, store};

#[derive(OpenApi)]
#[openapi(
    paths(
        houses::handlers::list_houses,
        houses::handlers::create_house,
        houses::handlers::set_house_color,
        events::handlers::list_events,
        events::handlers::create_event,
        events::handlers::delete_event,
        results::handlers::list_results,
        results::handlers::register_result,
        results::handlers::unregister_result,
        standings::handlers::get_standings,
        standings::handlers::get_scoreboard,
        store::handlers::backup_store,
        store::handlers::restore_store,
    ),
    components(
        schemas(
            storage::dto::house::CreateHouseRequest,
            storage::dto::house::UpdateHouseColorRequest,
            storage::dto::event::CreateEventRequest,
            storage::dto::event::EventResponse,
            storage::dto::result::RegisterResultRequest,
            storage::dto::result::ResultView,
            storage::dto::standings::HouseStanding,
            storage::dto::standings::MedalTally,
            storage::dto::standings::ScoreboardResponse,
            storage::models::House,
            storage::models::PointsPolicy,
            storage::models::PolicySource,
            results::handlers::RegisteredResult,
        )
    ),
    tags(
        (name = "houses", description = "Competing houses"),
        (name = "events", description = "Events and their points policies"),
        (name = "results", description = "Recording and removing results"),
        (name = "standings", description = "Live house ranking"),
        (name = "store", description = "Whole-store backup and restore"),
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting house scoreboard API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    tracing::info!("Opening store at: {}", config.database_path);
    let db = Database::open(&config.database_path)
        .await
        .context("Failed to open store")?;
    tracing::info!("Store ready");

    if config.seed_demo {
        let pool = db.acquire().await;
        seed_demo(&pool).await.context("Failed to seed demo data")?;
    }

    let bind_address = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server at http://{}", bind_address);

    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600));

    let app = app::router(db, config.max_upload_bytes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {bind_address}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}
