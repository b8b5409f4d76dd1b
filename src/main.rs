use axum::{routing::get, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::EnvFilter;

use contacts_api::config;
use contacts_api::database::manager::DatabaseManager;
use contacts_api::handlers;
use contacts_api::middleware::jwt_auth_middleware;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Initialize configuration (this loads the config singleton)
    let config = config::config();
    tracing::info!("Starting Contacts API in {:?} mode", config.environment);

    // Apply schema migrations up front when the database is reachable.
    // The pool itself is lazy, so a missing database only degrades /health.
    if let Err(e) = DatabaseManager::migrate().await {
        tracing::warn!("Skipping migrations, database not ready: {}", e);
    }

    let app = app();

    // Allow tests or deployments to override port via env
    let port = std::env::var("CONTACTS_API_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("Contacts API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

fn app() -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Public auth routes (token acquisition)
        .merge(auth_public_routes())
        // Protected API
        .merge(api_routes())
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn auth_public_routes() -> Router {
    use axum::routing::post;
    use handlers::public::auth;

    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
}

fn api_routes() -> Router {
    use handlers::protected::{auth, contacts};

    Router::new()
        // Session introspection
        .route("/api/auth/whoami", get(auth::whoami))
        // Collection operations
        .route(
            "/api/contacts",
            get(contacts::collection::list).post(contacts::collection::create),
        )
        // Upcoming birthdays (static segment, must not be shadowed by :id)
        .route("/api/contacts/birthdays", get(contacts::birthdays::upcoming))
        // Record operations
        .route(
            "/api/contacts/:id",
            get(contacts::record::show)
                .put(contacts::record::update)
                .delete(contacts::record::destroy),
        )
        // Single-match field lookups
        .route("/api/contacts/by_email/:email", get(contacts::lookup::by_email))
        .route("/api/contacts/by_phone/:phone", get(contacts::lookup::by_phone))
        .route("/api/contacts/by_first_name/:name", get(contacts::lookup::by_first_name))
        .route("/api/contacts/by_second_name/:name", get(contacts::lookup::by_second_name))
        .route("/api/contacts/by_birth_date/:date", get(contacts::lookup::by_birth_date))
        .route_layer(axum::middleware::from_fn(jwt_auth_middleware))
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "Contacts API",
            "version": version,
            "description": "Personal contacts REST API built with Rust (Axum)",
            "endpoints": {
                "home": "/ (public)",
                "auth": "/auth/register, /auth/login (public - token acquisition)",
                "whoami": "/api/auth/whoami (protected)",
                "contacts": "/api/contacts[/:id] (protected)",
                "lookups": "/api/contacts/by_{email,phone,first_name,second_name,birth_date}/:value (protected)",
                "birthdays": "/api/contacts/birthdays (protected)",
            }
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match DatabaseManager::health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
