use std::any::Any;
use std::time::Instant;

use axum::{
    routing::get,
    Router,
    extract::{RawQuery, State},
    response::{IntoResponse, Response},
    Json,
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{CorsLayer, Any as AnyOrigin};
use tower_http::trace::TraceLayer;

use crate::error::{Result, AppError};
use crate::api::excel::excel_handler;
use crate::api::models::{ScrapeQuery, ScrapeResult};
use crate::api::response::compose;
use crate::extract::extract;
use crate::validation::validate_url;
use crate::AppState;

pub fn create_router(app_state: AppState) -> Router {
    let routes = Router::new()
        .route("/api/scrape", get(scrape_handler))
        .route("/api/excel", get(excel_handler));

    with_boundary_layers(routes).with_state(app_state)
}

/// Panic containment, request tracing and CORS shared by every route.
pub fn with_boundary_layers<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(AnyOrigin)
                .allow_methods(AnyOrigin)
                .allow_headers(AnyOrigin),
        )
}

async fn scrape_handler(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Json<ScrapeResult>> {
    let req = ScrapeQuery::from_query_string(query.as_deref());
    let start_time = Instant::now();

    let result = process_scrape_request(&state, &req).await;
    tracing::debug!(elapsed = ?start_time.elapsed(), ok = result.is_ok(), "scrape finished");

    result.map(Json)
}

async fn process_scrape_request(state: &AppState, req: &ScrapeQuery) -> Result<ScrapeResult> {
    // Nothing below this line runs for a malformed locator
    let target = validate_url(req.url.as_deref())?;
    let raw_url = req.url.as_deref().unwrap_or_default();
    let selector = req.selector();
    tracing::info!(url = %target, selector = ?selector, "processing scrape request");

    let fetch_start = Instant::now();
    let page = state.fetcher.fetch(&target).await?;
    tracing::debug!(
        elapsed = ?fetch_start.elapsed(),
        status = page.status,
        bytes = page.body.len(),
        "page fetched"
    );

    let extraction = selector.map(|selector| (selector, extract(&page.body, selector)));
    if let Some((selector, Err(err))) = &extraction {
        tracing::info!(url = %target, selector = %selector, reason = %err, "selector yielded no content");
    }

    Ok(compose(raw_url, page, extraction))
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    AppError::Internal(format!("handler panicked: {}", detail)).into_response()
}
