//! The catalog route.

use axum::extract::{RawQuery, State};
use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse, Json, Response};
use axum::routing::get;
use axum::Router;
use tower_http::services::ServeDir;
use vitrine_catalog::{FragmentResponse, SearchCriteria, AJAX_PARAM};

use crate::error::AppResult;
use crate::render;
use crate::repo::ProductRepo;
use crate::state::AppState;

/// Header a programmatic reload sends alongside the `ajax` flag.
pub const REQUESTED_WITH: &str = "x-requested-with";

/// Build the application router.
///
/// `/assets` serves the stylesheet and the compiled client module.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .nest_service("/assets", ServeDir::new("assets"))
        .with_state(state)
}

/// The single listing route.
///
/// `Received -> (ajax flag?) -> {FullRender, FragmentRender} -> Sent`.
/// The `ajax` query flag is authoritative for branching; the
/// `X-Requested-With` header is expected alongside it but only logged
/// when missing.
async fn index(
    State(state): State<AppState>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> AppResult<Response> {
    let query = query.unwrap_or_default();
    let criteria = SearchCriteria::from_query_str(&query);
    let ajax = ajax_requested(&query);

    tracing::debug!(?criteria, ajax, "listing request");
    if ajax && !headers.contains_key(REQUESTED_WITH) {
        tracing::debug!("ajax flag set without X-Requested-With header");
    }

    let page = ProductRepo::find_page(&state.pool, &criteria).await?;

    if ajax {
        let body = FragmentResponse {
            content: render::render_products(&page.items),
            sorting: render::render_sorting(&page, &criteria),
            pagination: render::render_pagination(&page.pagination, &criteria),
        };
        return Ok(Json(body).into_response());
    }

    let categories = ProductRepo::list_categories(&state.pool).await?;
    Ok(Html(render::render_index(&page, &categories, &criteria)).into_response())
}

/// Whether the query string carries a truthy `ajax` flag.
fn ajax_requested(query: &str) -> bool {
    form_urlencoded::parse(query.as_bytes())
        .any(|(key, value)| key == AJAX_PARAM && !matches!(value.as_ref(), "0" | "false" | "off"))
}
