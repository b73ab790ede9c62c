//! Easy Rentals Server - Car Rental Booking
//!
//! REST API server for fleet browsing, bookings and vehicle returns.

use anyhow::Context;
use axum::{
    routing::{get, post, put},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use easyrent_server::{
    api,
    config::AppConfig,
    repository::Repository,
    services::Services,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("easyrent_server={},tower_http=debug", config.logging.level).into());
    let json_logs = config.logging.format.eq_ignore_ascii_case("json");

    tracing_subscriber::registry()
        .with(filter)
        .with(json_logs.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json_logs).then(|| tracing_subscriber::fmt::layer()))
        .init();

    tracing::info!("Starting Easy Rentals Server v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .context("Failed to connect to database")?;

    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    tracing::info!("Database migrations completed");

    let addr = SocketAddr::new(
        config.server.host.parse().context("Invalid host address")?,
        config.server.port,
    );

    let repository = Repository::new(pool);
    let services = Services::new(repository, &config).context("Failed to create services")?;

    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    let app = create_router(state);

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Authentication
        .route("/auth/register", post(api::auth::register))
        .route("/auth/login", post(api::auth::login))
        .route("/auth/me", get(api::auth::me))
        .route("/auth/profile", put(api::auth::update_profile))
        // Vehicles
        .route(
            "/vehicles",
            get(api::vehicles::list_vehicles).post(api::vehicles::create_vehicle),
        )
        .route(
            "/vehicles/:id",
            get(api::vehicles::get_vehicle)
                .put(api::vehicles::update_vehicle)
                .delete(api::vehicles::delete_vehicle),
        )
        .route(
            "/vehicles/:id/maintenance",
            get(api::vehicles::list_maintenance).post(api::vehicles::create_maintenance),
        )
        // Bookings
        .route(
            "/bookings",
            get(api::bookings::list_bookings).post(api::bookings::create_booking),
        )
        .route("/bookings/returned", get(api::bookings::list_returned_bookings))
        .route("/bookings/fare-quote", post(api::bookings::fare_quote))
        .route("/bookings/:id", get(api::bookings::get_booking))
        // Staff
        .route("/staff/bookings", get(api::staff::list_active_bookings))
        .route("/staff/returns", get(api::staff::list_returns))
        .route("/staff/returns/:id", post(api::staff::mark_returned))
        .route("/staff/returns/:id/quick", post(api::staff::quick_return))
        // Distance
        .route("/distance/estimate", post(api::distance::estimate))
        // Customers
        .route(
            "/customers/me",
            get(api::customers::get_my_profile).put(api::customers::update_my_profile),
        )
        // Drivers
        .route(
            "/drivers",
            get(api::drivers::list_drivers).post(api::drivers::create_driver),
        )
        .route(
            "/drivers/:id",
            get(api::drivers::get_driver)
                .put(api::drivers::update_driver)
                .delete(api::drivers::delete_driver),
        )
        // Admin
        .route("/admin/dashboard", get(api::admin::dashboard))
        .with_state(state);

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
}
