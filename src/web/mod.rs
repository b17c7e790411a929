pub mod auth;
pub mod handlers;
pub mod session;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::{Config, UiConfig};
use crate::pipeline::AnalysisPipeline;

use self::auth::{Authenticator, StaticCredentials};
use self::session::SessionStore;

pub struct AppState {
    pub pipeline: AnalysisPipeline,
    pub sessions: SessionStore,
    pub auth: Arc<dyn Authenticator>,
    pub ui: UiConfig,
}

impl AppState {
    pub fn from_config(config: &Config) -> Self {
        Self {
            pipeline: AnalysisPipeline::from_config(config),
            sessions: SessionStore::new(),
            auth: Arc::new(StaticCredentials::from_config(&config.admin)),
            ui: config.ui.clone(),
        }
    }
}

pub fn router(state: AppState) -> Router {
    let state = Arc::new(state);

    Router::new()
        .route("/", get(handlers::index))
        .route("/analyze", post(handlers::analyze))
        .route("/login", post(handlers::login))
        .route(handlers::PDF_ROUTE, get(handlers::download_pdf))
        .route("/health", get(handlers::health))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

pub async fn serve(state: AppState, host: &str, port: u16) -> eyre::Result<()> {
    let app = router(state);
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "Wallet analyzer listening");
    axum::serve(listener, app).await?;
    Ok(())
}
