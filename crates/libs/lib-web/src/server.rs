//! # Server Setup
//!
//! Server initialization, route registration, and HTTP server startup.
//!
//! Startup is strictly sequential: configuration, logging, database
//! connection, migrations and seed data all complete before the listener is
//! bound. Any failure on the way aborts startup with an error.

// region: --- Imports
use anyhow::{anyhow, Context};
use axum::{
    http::{header, HeaderValue, Method},
    middleware::{from_fn, from_fn_with_state},
    routing::{get, patch, post},
    Router,
};
use lib_core::model::store::seed_database;
use lib_core::{create_pool, run_migrations, AppError, Config, DbPool};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::handlers;
use crate::middleware::{log_requests, require_admin, require_auth, stamp_req, RequestStamp};
// endregion: --- Imports

// region: --- AppState
/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub config: Config,
}

impl AppState {
    pub fn new(db: DbPool, config: Config) -> Self {
        Self { db, config }
    }
}

impl axum::extract::FromRef<AppState> for DbPool {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}

impl axum::extract::FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
// endregion: --- AppState

// region: --- Server Configuration
/// Server configuration
pub struct ServerConfig {
    /// Bind address override (e.g., "127.0.0.1:8000"). When `None`, the
    /// address comes from `APP_HOST` / `APP_PORT`.
    pub bind_address: Option<String>,
    /// Allowed CORS origins
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: None,
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
                "http://localhost:8000".to_string(),
                "http://127.0.0.1:8000".to_string(),
            ],
        }
    }
}
// endregion: --- Server Configuration

// region: --- Server Setup
/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` wins when set; otherwise `log_level` is used, falling back to
/// `info` for unknown levels. Calling this twice is harmless.
pub fn init_tracing(log_level: &str) {
    let level = match log_level {
        "trace" | "debug" | "info" | "warn" | "error" => log_level,
        _ => "info",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let result = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .with_file(true)
        .try_init();

    if result.is_err() {
        warn!("Global tracing subscriber already set");
    }
}

/// Bring the schema to head, then insert missing seed data.
///
/// Must succeed before the listener is bound.
pub async fn prepare_database(pool: &DbPool, config: &Config) -> anyhow::Result<()> {
    info!("Running database migrations...");
    run_migrations(pool).await.context("database migration failed")?;
    info!("Migrations complete");

    seed_database(pool, config).await.context("seeding database failed")?;
    info!("Seed data in place");

    Ok(())
}

/// Initialize and start the HTTP server
///
/// # Errors
///
/// This function will return an error if:
/// - Configuration loading or validation fails
/// - Database connection fails
/// - Database migrations or seeding fail
/// - Server binding fails
pub async fn start_server(server_config: ServerConfig) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let app_config = Config::from_env().map_err(|e| anyhow!(e))?;
    app_config.validate().map_err(|e| anyhow!(e))?;

    init_tracing(&app_config.log_level);
    info!("RBAC SERVICE STARTING");
    info!("Log level: {}", app_config.log_level);
    info!("Database URL: {}", app_config.database_url);

    info!("Connecting to database...");
    let pool = create_pool(&app_config.database_url).await?;
    prepare_database(&pool, &app_config).await?;

    let bind_address = server_config
        .bind_address
        .clone()
        .unwrap_or_else(|| app_config.bind_address());

    let state = AppState::new(pool, app_config);
    let app = create_router(state, &server_config.allowed_origins);

    let listener = TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("failed to bind {}", bind_address))?;

    info!("SERVER READY: http://{}", listener.local_addr()?);
    log_server_info();

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => info!("SIGTERM received, shutting down"),
                    _ = sigint.recv() => info!("SIGINT received, shutting down"),
                }
                return;
            }
            (Err(e), _) | (_, Err(e)) => {
                error!("Failed to register signal handlers: {}", e);
            }
        }
    }

    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Ctrl-C received, shutting down");
    }
}

/// Create the main application router with all routes
pub fn create_router(state: AppState, allowed_origins: &[String]) -> Router {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    let public = Router::new()
        .route("/users/register", post(handlers::auth::register))
        .route("/users/login", post(handlers::auth::login))
        .route("/health", get(|| async { "OK" }));

    let authenticated = Router::new()
        .route("/users/logout", post(handlers::auth::logout))
        .route(
            "/users/me",
            get(handlers::users::read_me)
                .patch(handlers::users::update_me)
                .delete(handlers::users::delete_me),
        )
        .route("/users", get(handlers::users::list_users))
        .route("/users/{id}", get(handlers::users::read_user))
        .route_layer(from_fn_with_state(state.clone(), require_auth));

    // Layers run bottom-up: authentication first, then the admin check.
    let admin = Router::new()
        .route("/admin/users/create", post(handlers::admin::create_user))
        .route("/admin/users/{user_id}/role", patch(handlers::admin::update_user_role))
        .route("/admin/permissions", get(handlers::admin::list_access_rules))
        .route(
            "/admin/permissions/{role_id}/{element_id}",
            patch(handlers::admin::update_access_rule),
        )
        .route(
            "/business-elements/elements",
            post(handlers::business_elements::create_element).get(handlers::business_elements::list_elements),
        )
        .route_layer(from_fn(require_admin))
        .route_layer(from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .merge(public)
        .merge(authenticated)
        .merge(admin)
        .fallback(|| async {
            info!("[404 HANDLER] Unmatched route - returning 404");
            AppError::NotFound("Route not found".to_string())
        })
        .with_state(state)
        // The last layer added runs first: CORS, stamping, trace span, logging.
        .layer(from_fn(log_requests))
        .layer(
            tower_http::trace::TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    let request_id = request
                        .extensions()
                        .get::<RequestStamp>()
                        .map(|s| s.id.clone())
                        .unwrap_or_else(|| "unknown".to_string());
                    tracing::info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = %request.method(),
                        uri = %request.uri(),
                        version = ?request.version(),
                    )
                })
                .on_failure(
                    |error: tower_http::classify::ServerErrorsFailureClass,
                     latency: std::time::Duration,
                     _span: &tracing::Span| {
                        error!(
                            error = ?error,
                            latency_ms = latency.as_millis(),
                            "[HTTP FAILURE] Error: {:?}, Latency: {}ms",
                            error,
                            latency.as_millis()
                        );
                    },
                ),
        )
        .layer(from_fn(stamp_req))
        .layer(cors)
}

/// Log the available endpoints
fn log_server_info() {
    info!(" AUTH:");
    info!("   • POST   /users/register");
    info!("   • POST   /users/login");
    info!("   • POST   /users/logout");
    info!(" USERS:");
    info!("   • GET    /users/me");
    info!("   • PATCH  /users/me");
    info!("   • DELETE /users/me");
    info!("   • GET    /users");
    info!("   • GET    /users/{{id}}");
    info!(" ADMIN:");
    info!("   • POST   /admin/users/create");
    info!("   • PATCH  /admin/users/{{user_id}}/role");
    info!("   • GET    /admin/permissions");
    info!("   • PATCH  /admin/permissions/{{role_id}}/{{element_id}}");
    info!(" BUSINESS ELEMENTS:");
    info!("   • GET    /business-elements/elements");
    info!("   • POST   /business-elements/elements");
    info!(" HEALTH:");
    info!("   • GET    /health");
}
// endregion: --- Server Setup
