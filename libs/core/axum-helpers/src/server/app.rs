use super::shutdown::ShutdownCoordinator;
use crate::errors::handlers::not_found;
use crate::http::{CorsConfigError, cors_layer_from_env, require_json_content_type, security_headers};
use axum::{Router, middleware};
use core_config::server::ServerConfig;
use std::future::Future;
use std::io;
use std::time::Duration;
use tower_http::compression::CompressionLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info, warn};
use utoipa::OpenApi;

/// Prefix under which API routes are nested
pub const API_PREFIX: &str = "/api/v1";

/// Wrap API routes with documentation and cross-cutting middleware.
///
/// - `apis` nested under [`API_PREFIX`]
/// - OpenAPI JSON at `/api-docs/openapi.json`, Swagger UI at `/swagger-ui`, Scalar at `/scalar`
/// - JSON 404 fallback
/// - Layers, innermost first: JSON `Content-Type` guard, request timeout
///   (`server_config.request_timeout`), HTTP trace at INFO, security headers,
///   CORS from `CORS_ALLOWED_ORIGIN`, response compression
///
/// When the timeout fires the handler future is dropped, which cancels any
/// in-flight database call, and the client receives 408.
///
/// `apis` must already have its state applied.
///
/// ```ignore
/// let router = create_router::<ApiDoc>(handlers::router(service), &server_config)?
///     .merge(health_router(app_info!()));
/// ```
pub fn create_router<T>(apis: Router, server_config: &ServerConfig) -> Result<Router, CorsConfigError>
where
    T: OpenApi + 'static,
{
    use utoipa_scalar::{Scalar, Servable as ScalarServable};
    use utoipa_swagger_ui::SwaggerUi;

    let cors_layer = cors_layer_from_env()?;

    #[allow(deprecated)]
    let timeout_layer = TimeoutLayer::new(server_config.request_timeout);

    let router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", T::openapi()))
        .merge(Scalar::with_url("/scalar", T::openapi()))
        .nest(API_PREFIX, apis)
        .fallback(not_found)
        .layer(middleware::from_fn(require_json_content_type))
        .layer(timeout_layer)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(security_headers))
        .layer(cors_layer)
        .layer(CompressionLayer::new());

    Ok(router)
}

/// Serve `router` and run `cleanup` once shutdown begins.
///
/// `cleanup` (closing the database client, etc.) is bounded by
/// `server_config.shutdown_timeout`; on expiry the process proceeds without it.
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    cleanup: F,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let (coordinator, mut shutdown_rx) = ShutdownCoordinator::new();
    let shutdown_timeout = server_config.shutdown_timeout;

    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!("Server starting on {}", listener.local_addr()?);

    let cleanup_handle = tokio::spawn(async move {
        if shutdown_rx.recv().await.is_err() {
            return;
        }
        run_cleanup(cleanup, shutdown_timeout).await;
    });

    let signal = coordinator.clone();
    let serve_result = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async move { signal.wait_for_signal().await })
        .await
        .inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        });

    // A serve error skips the signal path; cleanup still has to run.
    coordinator.shutdown();
    cleanup_handle.await.ok();

    serve_result
}

async fn run_cleanup<F>(cleanup: F, timeout: Duration)
where
    F: Future<Output = ()>,
{
    info!("Starting cleanup tasks (timeout: {:?})", timeout);
    match tokio::time::timeout(timeout, cleanup).await {
        Ok(()) => info!("Cleanup completed successfully"),
        Err(_) => warn!("Cleanup exceeded timeout of {:?}, forcing shutdown", timeout),
    }
}
