use std::{any::Any, sync::Arc, time::Duration};

use axum::{
    Json, Router,
    extract::State,
    handler::Handler,
    http::{HeaderValue, Method, StatusCode, Uri, header},
    response::{Html, IntoResponse, Response},
};
use serde_json::json;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use super::{AppState, ConfigError, ServerConfig, ServerError, api};

const CORS_MAX_AGE: Duration = Duration::from_secs(12 * 60 * 60);

/// The complete HTTP surface: API routes, static files and the page fallback.
///
/// Paths under `/api` never reach the static files. Any other path is served
/// from the build directory when a file exists there, and answered with the
/// pre-rendered shell otherwise.
pub fn router(state: Arc<AppState>, config: &ServerConfig) -> Result<Router, ServerError> {
    let files = ServeDir::new(state.static_dir())
        .append_index_html_on_directories(false)
        .fallback(page.with_state(state.clone()));

    let routes = Router::new()
        .nest("/api", api::routes())
        .fallback_service(files)
        .with_state(state);

    with_layers(routes, config)
}

fn with_layers(routes: Router, config: &ServerConfig) -> Result<Router, ServerError> {
    Ok(routes
        .layer(cors_layer(&config.cors_origins)?)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http()))
}

fn cors_layer(origins: &[String]) -> Result<CorsLayer, ConfigError> {
    let origins = origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin).map_err(|_| ConfigError::InvalidOrigin(origin.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::ORIGIN,
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::AUTHORIZATION,
        ])
        .expose_headers([header::CONTENT_LENGTH])
        .allow_credentials(true)
        .max_age(CORS_MAX_AGE))
}

// Client routes, and anything else with no file behind it.
async fn page(State(state): State<Arc<AppState>>, uri: Uri) -> Response {
    match state.render_shell(uri.path()).await {
        Some(html) => Html(html).into_response(),
        None => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Failed to load frontend" })),
        )
            .into_response(),
    }
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_owned()
    } else {
        "unknown panic".to_owned()
    };

    tracing::error!(%details, "request handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Internal server error", "details": details })),
    )
        .into_response()
}
