use axum::{middleware as axum_middleware, routing::get, routing::post, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

mod auth;
mod config;
mod database;
mod error;
mod export;
mod handlers;
mod middleware;
mod query;
mod services;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, SESSION_SECRET, etc.
    let _ = dotenvy::dotenv();

    let config = crate::config::config();
    tracing::info!("Starting Donorbook API in {:?} mode", config.environment);

    tracing_subscriber::fmt::init();

    let app = app();

    let port = std::env::var("PORT")
        .ok()
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    println!("🚀 Donorbook API server listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

fn app() -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(public_routes())
        // Authenticated back office
        .merge(protected_routes())
        // Admin-only center and account management
        .merge(admin_routes())
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Session lifecycle and public receipt verification. The receipt endpoints
/// are deliberately unauthenticated; the (receipt, mobile) pair is the
/// credential.
fn public_routes() -> Router {
    Router::new()
        .route("/login", post(handlers::auth::login))
        .route("/logout", post(handlers::auth::logout))
        .route("/receipt-validate", get(handlers::receipts::validate))
        .route("/receipt-pdf/:receipt/:mobile", get(handlers::receipts::pdf))
}

fn protected_routes() -> Router {
    Router::new()
        // Donors
        .route("/donors", get(handlers::donors::list))
        .route("/donors/search", get(handlers::donors::search))
        .route("/donors/new", post(handlers::donors::create))
        .route("/donors/:id", get(handlers::donors::get))
        .route("/donors/update/:id", post(handlers::donors::update))
        // Donations
        .route("/donations-list", get(handlers::donations::list))
        .route("/donations-export", get(handlers::donations::export))
        .route("/donations/new", post(handlers::donations::create))
        .route("/donations/:id", get(handlers::donations::get))
        // Programs
        .route("/programs", get(handlers::programs::list))
        .route("/programs-dropdown", get(handlers::programs::dropdown))
        .route("/programs/new", post(handlers::programs::create))
        .route(
            "/programs/:id",
            get(handlers::programs::get).put(handlers::programs::update),
        )
        // Expenses
        .route("/expenses-list", get(handlers::expenses::list))
        .route("/expenses-export", get(handlers::expenses::export))
        .route("/expenses/new", post(handlers::expenses::create))
        .route("/expenses/:id", get(handlers::expenses::get))
        .route("/expenses/update/:id", post(handlers::expenses::update))
        // Dashboard and profile
        .route("/dashboard-stats", get(handlers::dashboard::stats))
        .route("/profile-data", get(handlers::dashboard::profile))
        .route_layer(axum_middleware::from_fn(middleware::auth::session_auth))
}

fn admin_routes() -> Router {
    Router::new()
        .route("/centers", get(handlers::centers::list))
        .route("/centers/create", post(handlers::centers::create))
        .route("/admin/create-user", post(handlers::centers::create_admin))
        .route("/admin/list", get(handlers::centers::list_admins))
        .route("/admin/reset-password", post(handlers::centers::reset_password))
        // session_auth is added last so it runs first and require_admin can
        // rely on the injected AuthSession.
        .route_layer(axum_middleware::from_fn(middleware::auth::require_admin))
        .route_layer(axum_middleware::from_fn(middleware::auth::session_auth))
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "Donorbook API",
            "version": version,
            "description": "Donation-management back office for multi-center NGOs",
            "endpoints": {
                "session": "POST /login, POST /logout (public)",
                "donors": "/donors, /donors/search, /donors/new, /donors/:id, /donors/update/:id",
                "donations": "/donations-list, /donations/new, /donations/:id, /donations-export",
                "programs": "/programs, /programs-dropdown, /programs/new, /programs/:id",
                "expenses": "/expenses-list, /expenses/new, /expenses/:id, /expenses/update/:id, /expenses-export",
                "dashboard": "/dashboard-stats, /profile-data",
                "admin": "/centers, /centers/create, /admin/* (Admin only)",
                "receipts": "/receipt-validate, /receipt-pdf/:receipt/:mobile (public)",
            }
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match crate::database::manager::DatabaseManager::health_check().await {
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
