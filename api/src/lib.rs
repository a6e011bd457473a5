//! REST API over the stockroom store.
//!
//! Every endpoint lives under `/main` and answers with the same JSON
//! envelope: `{"success": bool, "message": string, ...payload}`.

use std::sync::Arc;
use std::time::Duration;

use axum::http::header::CONTENT_TYPE;
use axum::http::Method;
use axum::routing::{delete, get, patch, post};
use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use config::Config;
use state::AppState;

/// Build the application router with its middleware.
pub fn app(state: Arc<AppState>) -> Router {
    let main = Router::new()
        .route("/addProducts", post(routes::products::add_product))
        .route("/updateProducts/{id}", patch(routes::products::update_product))
        .route("/getProducts", get(routes::products::list_products))
        .route("/getProductById/{id}", get(routes::products::get_product))
        .route("/deleteProduct", delete(routes::products::delete_product))
        .route("/purchaseProduct", post(routes::purchases::purchase_product))
        .route("/getHistory", get(routes::purchases::list_history))
        .route("/productReturned", post(routes::returns::return_product))
        .route("/getReturnProducts", get(routes::returns::list_returns));

    Router::new()
        .nest("/main", main)
        .route("/health", get(routes::health))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&state.config))
        .with_state(state)
}

fn cors_layer(config: &Config) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    match &config.cors_origin {
        Some(origin) => cors
            .allow_origin(AllowOrigin::exact(origin.clone()))
            .allow_credentials(true),
        None => cors.allow_origin(Any),
    }
}

/// Load configuration from the environment, open the store and serve until
/// Ctrl+C or SIGTERM.
pub async fn start_server() -> anyhow::Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = Config::load()?;

    info!("Initializing state...");
    let state = AppState::new(config).await?;

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");
    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
