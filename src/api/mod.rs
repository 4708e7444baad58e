pub mod cors;
pub mod forecast;
pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
#[cfg(feature = "ml")]
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::Config;
#[cfg(feature = "ml")]
use crate::predictor::Predictor;

#[derive(Clone)]
pub struct AppState {
    pub cfg: Config,
    #[cfg(feature = "ml")]
    pub predictor: Arc<Predictor>,
}

impl AppState {
    pub fn new(cfg: Config) -> Self {
        #[cfg(feature = "ml")]
        let predictor = Arc::new(Predictor::new(cfg.model.artifacts_dir.clone()));
        Self {
            cfg,
            #[cfg(feature = "ml")]
            predictor,
        }
    }
}

pub fn router(state: AppState, cfg: &Config) -> Router {
    Router::new()
        .route(
            "/api/forecast",
            post(forecast::forecast).options(forecast::preflight),
        )
        .route("/healthz", get(health::healthz))
        .with_state(state)
        .layer(middleware::from_fn(cors::cors_headers_middleware))
        .layer(
            ServiceBuilder::new()
                .layer(DefaultBodyLimit::max(1024 * 1024))
                .layer(TimeoutLayer::new(Duration::from_secs(
                    cfg.server.request_timeout_secs,
                ))),
        )
        .layer(TraceLayer::new_for_http())
}
