//! HTTP handlers.

use super::client::ClientContext;
use super::AppState;
use crate::output::{render_error_page, render_page, PageOutcome};
use crate::processing::lookup;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

/// Query parameters of `/api/classify`.
#[derive(Deserialize, Debug, Default)]
pub struct ClassifyQuery {
    /// Address to classify instead of the caller's.
    pub ip: Option<String>,
}

/// JSON error body.
#[derive(Serialize, Debug)]
pub struct ErrorResponse {
    error: String,
}

impl ErrorResponse {
    fn respond(status: StatusCode, error: impl ToString) -> Response {
        (
            status,
            Json(ErrorResponse {
                error: error.to_string(),
            }),
        )
            .into_response()
    }
}

/// `GET /`: the connection page.
pub async fn index(State(state): State<AppState>, client: ClientContext) -> Response {
    let (dataset, pops) = match state.source.load().await {
        Ok(loaded) => loaded,
        Err(e) => {
            log::error!("Error loading range data: {e}");
            return (StatusCode::BAD_GATEWAY, Html(render_error_page(&e.to_string())))
                .into_response();
        }
    };

    let outcome = match client.address.as_deref() {
        None => PageOutcome::NoAddress,
        Some(text) => match lookup(Some(text), &dataset, &pops) {
            Ok(result) => PageOutcome::Lookup(result),
            Err(e) => {
                log::warn!("{e}");
                PageOutcome::InvalidAddress(text.to_string())
            }
        },
    };

    Html(render_page(&outcome, &client.cf)).into_response()
}

/// `GET /api/classify`: lookup result as JSON.
pub async fn classify(
    State(state): State<AppState>,
    Query(query): Query<ClassifyQuery>,
    client: ClientContext,
) -> Response {
    let Some(address) = query.ip.or(client.address) else {
        return ErrorResponse::respond(StatusCode::BAD_REQUEST, "no client address available");
    };

    let (dataset, pops) = match state.source.load().await {
        Ok(loaded) => loaded,
        Err(e) => {
            log::error!("Error loading range data: {e}");
            return ErrorResponse::respond(StatusCode::BAD_GATEWAY, e);
        }
    };

    match lookup(Some(address.as_str()), &dataset, &pops) {
        Ok(result) => Json(result).into_response(),
        Err(e) => ErrorResponse::respond(StatusCode::BAD_REQUEST, e),
    }
}

/// `GET /health`
pub async fn health() -> &'static str {
    "ok"
}
