//! Route handlers for the web GUI

use axum::{
    extract::{Form, Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_cookies::{Cookie, Cookies};

use interchange_core::SearchQuery;
use interchange_form::{FormError, Page, PartField, VehicleField};

use crate::state::{lock_page, AppState};
use crate::templates;

/// Cookie naming the browser's page session
pub const SESSION_COOKIE: &str = "interchange_session";

// ============== Sessions ==============

/// Session id from the cookie, minting a fresh one on first visit.
pub fn session_id(cookies: &Cookies) -> String {
    if let Some(cookie) = cookies.get(SESSION_COOKIE) {
        return cookie.value().to_string();
    }

    let id = uuid::Uuid::new_v4().to_string();
    let mut cookie = Cookie::new(SESSION_COOKIE, id.clone());
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(tower_cookies::cookie::SameSite::Lax);
    cookies.add(cookie);
    id
}

fn rejected(err: &FormError) -> Response {
    tracing::debug!(error = %err, "rejected form input");
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Html(templates::form_error_html(err)),
    )
        .into_response()
}

// ============== Page Handlers ==============

/// The search page
pub async fn index(State(state): State<Arc<AppState>>, cookies: Cookies) -> impl IntoResponse {
    let page = state.page(&session_id(&cookies));
    let page = lock_page(&page);
    Html(templates::index_html(&page))
}

/// Serve CSS
pub async fn style_css() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css")], templates::STYLE_CSS)
}

// ============== HTMX Partial Handlers ==============

/// Value posted by a single control. Text inputs post under their own
/// form names so a search can carry them too.
#[derive(Deserialize)]
pub struct ValueInput {
    #[serde(default, alias = "custom_name", alias = "part_number")]
    pub value: String,
}

/// One of the vehicle dropdowns changed
pub async fn vehicle_select(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
    Path(field): Path<String>,
    Form(input): Form<ValueInput>,
) -> Response {
    let field = match field.parse::<VehicleField>() {
        Ok(field) => field,
        Err(err) => return rejected(&err),
    };

    let page = state.page(&session_id(&cookies));
    let mut page = lock_page(&page);
    match page.select_vehicle(field, &input.value) {
        Ok(_) => Html(templates::vehicle_selector_html(&page.vehicle)).into_response(),
        Err(err) => rejected(&err),
    }
}

/// A part search control changed. Dropdowns re-render the whole card;
/// text fields only refresh the search button.
pub async fn part_update(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
    Path(field): Path<String>,
    Form(input): Form<ValueInput>,
) -> Response {
    let field = match field.parse::<PartField>() {
        Ok(field) => field,
        Err(err) => return rejected(&err),
    };

    let page = state.page(&session_id(&cookies));
    let mut page = lock_page(&page);
    let part = &mut page.part;

    let changed = match field {
        PartField::Category => part.select_category(&input.value),
        PartField::Name => part.select_part(&input.value),
        PartField::CustomName => {
            part.set_custom_name(input.value);
            Ok(())
        }
        PartField::PartNumber => {
            part.set_part_number(input.value);
            Ok(())
        }
    };

    match (changed, field) {
        (Err(err), _) => rejected(&err),
        (Ok(()), PartField::Category | PartField::Name) => {
            Html(templates::part_search_html(part)).into_response()
        }
        (Ok(()), _) => Html(templates::search_button_html(part)).into_response(),
    }
}

/// Text inputs included with a search, newer than their debounced posts.
#[derive(Deserialize, Default)]
pub struct SearchInput {
    pub custom_name: Option<String>,
    pub part_number: Option<String>,
}

/// "Search Interchangeable Parts" pressed
pub async fn search(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
    input: Option<Form<SearchInput>>,
) -> Response {
    let page = state.page(&session_id(&cookies));
    let mut page = lock_page(&page);

    let Form(input) = input.unwrap_or_default();
    if let Some(name) = input.custom_name {
        page.part.set_custom_name(name);
    }
    if let Some(number) = input.part_number {
        page.part.set_part_number(number);
    }

    if page.search().is_none() {
        // Button was disabled; leave the panel as it was.
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Html(templates::results_html(&page.results_view())),
        )
            .into_response();
    }
    Html(templates::results_html(&page.results_view())).into_response()
}

#[derive(Deserialize)]
pub struct CopyInput {
    pub part_number: String,
}

/// Copy button pressed on a result row
pub async fn copy(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
    Form(input): Form<CopyInput>,
) -> impl IntoResponse {
    let page = state.page(&session_id(&cookies));
    let page = lock_page(&page);
    tracing::debug!(part_number = %input.part_number, "part number copied");
    page.copied.copy(input.part_number);
    Html(templates::results_html(&page.results_view()))
}

/// Results panel, polled to clear the copied indicator
pub async fn results_partial(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
) -> impl IntoResponse {
    let page = state.page(&session_id(&cookies));
    let page = lock_page(&page);
    Html(templates::results_html(&page.results_view()))
}

// ============== API Handlers ==============

/// Health check
pub async fn api_health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "parts-interchange-buddy",
        "uptime_secs": state.uptime_secs(),
        "sessions": state.session_count(),
    }))
}

pub async fn api_years(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.catalog.years())
}

pub async fn api_makes(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.catalog.makes().map(str::to_string).collect::<Vec<_>>())
}

#[derive(Deserialize)]
pub struct MakeParam {
    pub make: String,
}

/// Models for a make; empty for makes outside the catalog.
pub async fn api_models(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MakeParam>,
) -> impl IntoResponse {
    Json(state.catalog.models(&params.make).to_vec())
}

pub async fn api_categories(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.catalog.categories().map(str::to_string).collect::<Vec<_>>())
}

#[derive(Deserialize)]
pub struct CategoryParam {
    pub category: String,
}

pub async fn api_parts(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CategoryParam>,
) -> impl IntoResponse {
    Json(state.catalog.parts(&params.category).to_vec())
}

/// Stateless search through a throwaway page
pub async fn api_search(
    State(state): State<Arc<AppState>>,
    Json(input): Json<SearchQuery>,
) -> Response {
    let searched = Page::search_for(
        Arc::clone(&state.catalog),
        Arc::clone(&state.matcher),
        &input.vehicle,
        &input.part,
    );

    match searched {
        Ok((page, _)) => {
            let view = page.results_view();
            let rows = view.rows();
            Json(serde_json::json!({
                "query": view.query(),
                "count": rows.len(),
                "results": rows.iter().map(|r| &r.record).collect::<Vec<_>>(),
            }))
            .into_response()
        }
        Err(err) => {
            tracing::warn!(error = %err, "api search rejected");
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(serde_json::json!({ "error": err.to_string() })),
            )
                .into_response()
        }
    }
}
