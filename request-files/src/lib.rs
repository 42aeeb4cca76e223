//! # request-files: multipart file upload service
//!
//! A small HTTP service accepting repeated `files` parts in `multipart/form-data` bodies, together
//! with the OpenAPI document describing it.
//!
//! ## Routes
//!
//! | Route | Method | Response |
//! |---|---|---|
//! | `/` | GET | HTML page with one upload form per endpoint |
//! | `/files/` | POST | `{"file_sizes": [...]}`, one byte count per `files` part |
//! | `/uploadfiles/` | POST | `{"filenames": [...]}`, one filename per `files` part |
//! | `/openapi.json` | GET | legacy OpenAPI 3.0 document (see [`openapi::compat`]) |
//! | `/docs` | GET | interactive API documentation |
//!
//! A request without any `files` part, including a request that is not multipart at all, is
//! answered with `422` and the validation document
//! `{"detail": [{"loc": ["body", "files"], "msg": "field required", "type": "value_error.missing"}]}`.
//!
//! ## Quick Start
//!
//! ```no_run
//! use clap::Parser;
//! use request_files::{Application, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let args = request_files::config::Args::parse();
//!     let config = Config::load(&args)?;
//!
//!     request_files::telemetry::init_telemetry(config.enable_otel_export)?;
//!
//!     Application::new(config)?
//!         .serve(async {
//!             tokio::signal::ctrl_c().await.expect("Failed to listen for Ctrl+C");
//!         })
//!         .await
//! }
//! ```
//!
//! ## Configuration
//!
//! See the [`config`] module for configuration options.

pub mod api;
pub mod config;
pub mod errors;
pub mod openapi;
pub mod telemetry;

#[cfg(test)]
mod test;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use bon::Builder;
use bytes::Bytes;
pub use config::Config;
use tokio::net::TcpListener;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::{Level, debug, info, instrument};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::openapi::{ApiDoc, compat};

/// Application state shared across all request handlers.
///
/// - `config`: Application configuration loaded from file/environment
/// - `openapi_document`: The rendered legacy OpenAPI document, served as-is
#[derive(Clone, Builder)]
pub struct AppState {
    pub config: Config,
    pub openapi_document: Bytes,
}

impl AppState {
    /// Render the OpenAPI document for `config` and build the state around it.
    pub fn from_config(config: Config) -> anyhow::Result<Self> {
        let document = compat::render_json(&config.title, &config.version, compat::ROUTES)?;
        Ok(Self::builder().openapi_document(Bytes::from(document)).config(config).build())
    }
}

/// Build the application router.
///
/// - Upload routes with the configured body limit
/// - HTML upload form at `/`
/// - OpenAPI document and interactive docs at their configured URLs (each optional)
/// - JSON 404/405 fallbacks with trailing-slash redirects
/// - Tracing middleware
#[instrument(skip_all)]
pub fn build_router(state: &AppState) -> Router {
    let upload_limit = state.config.max_upload_size;

    let mut router = Router::new()
        .route("/", get(api::handlers::form::upload_form))
        .route(
            "/files/",
            post(api::handlers::files::create_files).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route(
            "/uploadfiles/",
            post(api::handlers::files::create_upload_files).layer(DefaultBodyLimit::max(upload_limit)),
        );

    if let Some(openapi_url) = &state.config.openapi_url {
        debug!(url = %openapi_url, "Serving OpenAPI document");
        router = router.route(openapi_url, get(api::handlers::schema::openapi_json));
    }

    if let Some(docs_url) = &state.config.docs_url {
        debug!(url = %docs_url, "Serving interactive docs");
        router = router.merge(Scalar::with_url(docs_url.clone(), ApiDoc::openapi()));
    }

    router
        .fallback(api::handlers::fallback::not_found)
        .method_not_allowed_fallback(api::handlers::fallback::method_not_allowed)
        .with_state(state.clone())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}

/// Main application struct that owns the router and configuration.
///
/// 1. **Create**: [`Application::new`] renders the OpenAPI document and builds the router
/// 2. **Serve**: [`Application::serve`] binds to a TCP port and handles requests until the
///    shutdown future resolves, then flushes telemetry
pub struct Application {
    router: Router,
    config: Config,
}

impl Application {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        debug!("Starting with configuration: {:#?}", config);

        let state = AppState::from_config(config.clone())?;
        let router = build_router(&state);

        Ok(Self { router, config })
    }

    /// Convert application into a test server (for tests)
    #[cfg(test)]
    pub fn into_test_server(self) -> axum_test::TestServer {
        axum_test::TestServer::new(self.router).expect("Failed to create test server")
    }

    /// Start serving the application
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!(
            "Listening on http://{}, available at http://localhost:{}",
            bind_addr, self.config.port
        );

        axum::serve(listener, self.router).with_graceful_shutdown(shutdown).await?;

        info!("Shutting down telemetry...");
        telemetry::shutdown_telemetry();

        Ok(())
    }
}
