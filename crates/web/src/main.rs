use std::net::SocketAddr;

use anyhow::Context;
use axum::Router;
use storage::Database;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod error;
mod features;

use config::Config;
use error::WebError;

#[derive(OpenApi)]
#[openapi(
    paths(
        features::profiles::handlers::list_profiles,
        features::profiles::handlers::get_profile,
        features::profiles::handlers::create_profile,
        features::profiles::handlers::update_profile,
        features::profiles::handlers::delete_profile,
        features::stats::handlers::get_stats,
        features::eligibility::handlers::check_eligibility,
    ),
    components(
        schemas(
            storage::dto::profile::CreateProfileRequest,
            storage::dto::profile::UpdateProfileRequest,
            storage::dto::profile::ProfileResponse,
            storage::dto::profile::EligibilityCheckRequest,
            storage::dto::profile::EligibilityCheckResponse,
            storage::dto::common::PaginationMeta,
            storage::dto::stats::StatsReport,
            storage::dto::stats::AgeStatistics,
            storage::dto::stats::SignCount,
            storage::models::Gender,
            storage::models::AstrologicalSign,
            storage::models::BirthDate,
            storage::models::BirthTime,
            storage::models::Height,
            storage::models::HeightUnit,
            storage::models::Weight,
            storage::models::WeightUnit,
        )
    ),
    tags(
        (name = "personal-details", description = "Personal details submissions"),
        (name = "stats", description = "Aggregate statistics"),
        (name = "eligibility", description = "Pre-submission eligibility check"),
    )
)]
struct ApiDoc;

async fn route_not_found() -> WebError {
    WebError::NotFound
}

fn app(db: Database) -> Router {
    Router::new()
        .nest("/api/personal-details", features::profiles::routes())
        .nest("/api/stats", features::stats::routes())
        .nest("/api/eligibility", features::eligibility::routes())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback(route_not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(db)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received");
}

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

    tracing::info!("Starting personal details API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    tracing::info!(
        "Connecting to database at: {}",
        config
            .database_url
            .split('@')
            .next_back()
            .unwrap_or("unknown")
    );
    let db = Database::new(&config.database_url, config.max_connections)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    let bind_address = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;

    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    axum::serve(
        listener,
        app(db).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}
