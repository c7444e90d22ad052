//! HTTP server wiring for Snippetbox (routes, handlers, and shared state).

/// HTTP error mapping for page handlers.
pub mod error;
/// HTTP handlers for snippet pages.
pub mod handlers;

pub use snippetbox_core::{
    config, db, models, AppError, Clock, Config, Database, Renderer, SnippetService,
    SystemClock, TeraRenderer, DEFAULT_PORT,
};

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue},
    routing::{get, post},
    Router,
};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer, services::ServeDir, set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

const CONTENT_SECURITY_POLICY: &str = "default-src 'self'; style-src 'self'; img-src 'self' data:; font-src 'self'; frame-ancestors 'none'; base-uri 'self'; form-action 'self'";

/// Slack for the form fields other than `content` and for url-encoding overhead.
const FORM_OVERHEAD_BYTES: usize = 4 * 1024;

/// Shared state passed to HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<SnippetService>,
    pub renderer: Arc<dyn Renderer>,
    pub config: Arc<Config>,
    /// Time source for page data, shared with the store.
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// Construct shared application state on top of an open database.
    ///
    /// # Arguments
    /// - `config`: Loaded configuration.
    /// - `db`: Open database handle.
    /// - `renderer`: View renderer used by page handlers.
    ///
    /// # Returns
    /// A new [`AppState`].
    pub fn new(config: Config, db: &Database, renderer: Arc<dyn Renderer>) -> Self {
        let service =
            SnippetService::with_max_content_size(db.snippets.clone(), config.max_content_size);
        Self::with_service(config, service, renderer).with_clock(db.clock.clone())
    }

    /// Construct shared application state from a pre-built service.
    ///
    /// Page data uses wall-clock time until [`AppState::with_clock`] says otherwise.
    pub fn with_service(
        config: Config,
        service: SnippetService,
        renderer: Arc<dyn Renderer>,
    ) -> Self {
        Self {
            service: Arc::new(service),
            renderer,
            config: Arc::new(config),
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the time source used for page data.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }
}

/// Largest request body accepted for a snippet of `max_content_size` bytes.
///
/// Url-encoding can expand each content byte to three.
pub fn request_body_limit(max_content_size: usize) -> usize {
    max_content_size
        .saturating_mul(3)
        .saturating_add(FORM_OVERHEAD_BYTES)
}

/// Create the application router with all routes and middleware.
///
/// # Arguments
/// - `state`: Shared application state.
///
/// # Returns
/// Configured `axum::Router`.
pub fn create_app(state: AppState) -> Router {
    let body_limit = request_body_limit(state.config.max_content_size);
    let static_files = ServeDir::new(state.config.static_dir.as_str());

    Router::new()
        .route("/", get(handlers::snippet::home))
        .route("/snippet", get(handlers::snippet::show_snippet))
        .route("/snippet/create", post(handlers::snippet::create_snippet))
        .nest_service("/static", static_files)
        .fallback(handlers::snippet::not_found)
        .with_state(state)
        .layer(
            tower::ServiceBuilder::new()
                .layer(DefaultBodyLimit::max(body_limit))
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(SetResponseHeaderLayer::overriding(
                    header::CONTENT_SECURITY_POLICY,
                    HeaderValue::from_static(CONTENT_SECURITY_POLICY),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    header::X_CONTENT_TYPE_OPTIONS,
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    header::X_FRAME_OPTIONS,
                    HeaderValue::from_static("DENY"),
                )),
        )
}

/// Resolve the listener address from a `BIND` override and security policy.
///
/// # Arguments
/// - `config`: Server configuration containing the configured `port`.
/// - `bind`: Raw `BIND` value, if one was supplied.
/// - `allow_public_access`: Whether non-loopback bind targets are permitted.
///
/// # Returns
/// A validated socket address that enforces loopback when public access is disabled.
pub fn resolve_bind_address(
    config: &Config,
    bind: Option<&str>,
    allow_public_access: bool,
) -> SocketAddr {
    let default_bind = SocketAddr::from(([127, 0, 0, 1], config.port));
    let requested = match bind.map(str::trim).filter(|value| !value.is_empty()) {
        Some(value) => match value.parse::<SocketAddr>() {
            Ok(addr) => addr,
            Err(err) => {
                tracing::warn!(
                    "Invalid BIND='{}': {}. Falling back to {}",
                    value,
                    err,
                    default_bind
                );
                default_bind
            }
        },
        None => default_bind,
    };

    if allow_public_access || requested.ip().is_loopback() {
        return requested;
    }

    tracing::warn!(
        "Non-loopback bind {} requested without ALLOW_PUBLIC_ACCESS; forcing 127.0.0.1",
        requested
    );
    SocketAddr::from(([127, 0, 0, 1], requested.port()))
}

/// Run the Axum server with graceful shutdown support.
///
/// # Arguments
/// - `listener`: Bound TCP listener for the server.
/// - `state`: Shared application state.
/// - `shutdown_signal`: Future that resolves when shutdown should start.
///
/// # Errors
/// Returns any I/O error produced by `axum::serve`.
pub async fn serve_router(
    listener: tokio::net::TcpListener,
    state: AppState,
    shutdown_signal: impl Future<Output = ()> + Send + 'static,
) -> Result<(), std::io::Error> {
    let app = create_app(state);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
}
