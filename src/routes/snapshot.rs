use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tracing::info;

use crate::errors::AppError;
use crate::models::snapshot::{SnapshotOptions, Variant};
use crate::services::snapshot_service::{self, Snapshot};
use crate::services::page_service;
use crate::state::AppState;

pub fn router(variant: Variant) -> Router<AppState> {
    match variant {
        Variant::Daily | Variant::Intraday => Router::new().route("/", get(snapshot_by_query)),
        // The root route still reads the query param so the page's form
        // can round-trip without JavaScript.
        Variant::PathBased => Router::new()
            .route("/", get(snapshot_by_query))
            .route("/:ticker", get(snapshot_by_path)),
    }
}

async fn snapshot_by_query(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let raw = params.get(state.options.ticker_param).map(String::as_str);
    info!(
        "GET / - Snapshot request ({}={})",
        state.options.ticker_param,
        raw.unwrap_or("<none>")
    );
    respond(&state, raw).await
}

async fn snapshot_by_path(
    Path(ticker): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    info!("GET /{} - Snapshot request", ticker);
    respond(&state, Some(&ticker)).await
}

async fn respond(state: &AppState, raw: Option<&str>) -> Result<Response, AppError> {
    let options = &state.options;

    let Some(ticker) = options.resolve_ticker(raw) else {
        // Variant without a default ticker: empty-state page.
        let html = page_service::status_page(options, None, "Enter a symbol to view a snapshot.");
        return Ok(Html(html).into_response());
    };

    match snapshot_service::build_snapshot(state, &ticker).await? {
        Snapshot::NoData => Ok(no_data_response(options, &ticker)),
        Snapshot::Ready {
            chart_base64,
            commentary,
            news,
        } => {
            let advisory = news.as_ref().and_then(|digest| digest.advisory_text());
            let html =
                page_service::snapshot_page(options, &ticker, &chart_base64, &commentary, advisory);
            Ok(Html(html).into_response())
        }
    }
}

fn no_data_response(options: &SnapshotOptions, ticker: &str) -> Response {
    match options.variant {
        Variant::Daily => Html(page_service::no_data_fragment(ticker)).into_response(),
        Variant::Intraday => {
            let message = format!("No stock data found for {ticker}");
            Html(page_service::status_page(options, Some(ticker), &message)).into_response()
        }
        Variant::PathBased => (
            StatusCode::NOT_FOUND,
            format!("No stock data found for {ticker}"),
        )
            .into_response(),
    }
}
