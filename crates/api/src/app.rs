use axum::{extract::DefaultBodyLimit, middleware, routing::get, Router};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use domain::services::SettingsStore;
use persistence::repositories::SystemSettingRepository;

use crate::config::Config;
use crate::middleware::{
    metrics_handler, metrics_middleware, require_admin, security_headers_middleware, trace_id,
};
use crate::routes::{admin_settings, health, hotel, settings};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub settings: Arc<SettingsStore>,
}

impl AppState {
    pub fn new(config: Config, pool: PgPool, settings: Arc<SettingsStore>) -> Self {
        Self {
            pool,
            config: Arc::new(config),
            settings,
        }
    }
}

/// Settings store backed by the system_settings table.
pub fn postgres_settings_store(pool: &PgPool) -> Arc<SettingsStore> {
    Arc::new(SettingsStore::new(Arc::new(SystemSettingRepository::new(
        pool.clone(),
    ))))
}

pub fn create_app(config: Config, pool: PgPool) -> Router {
    let settings = postgres_settings_store(&pool);
    create_app_with_store(config, pool, settings)
}

/// Builds the router around an existing store. The pool is still used for
/// API key lookups and health checks.
pub fn create_app_with_store(config: Config, pool: PgPool, settings: Arc<SettingsStore>) -> Router {
    let state = AppState::new(config, pool, settings);
    let config = state.config.clone();

    let cors = if config.security.cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    let admin_routes = Router::new()
        .nest("/api/v1/admin/settings", admin_settings::router())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/api/v1/settings/public", get(settings::get_public_settings))
        .route("/api/v1/hotel/info", get(hotel::get_hotel_info))
        .route("/api/v1/hotel/business", get(hotel::get_business_config))
        .route("/api/v1/hotel/contact", get(hotel::get_contact_display))
        .route("/metrics", get(metrics_handler));

    Router::new()
        .merge(public_routes)
        .merge(admin_routes)
        // Bottom layers run first.
        .layer(middleware::from_fn_with_state(
            state.clone(),
            security_headers_middleware,
        ))
        .layer(CompressionLayer::new())
        .layer(DefaultBodyLimit::max(config.server.max_body_size))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors)
        .with_state(state)
}
