use axum::extract::{Form, State};
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::render::page;

use super::session::Session;
use super::AppState;

pub const PDF_ROUTE: &str = "/report.pdf";
pub const FETCH_ERROR_MESSAGE: &str = "Error fetching wallet data. Please check the address.";

type PageResult = Result<Response, (StatusCode, Html<String>)>;

fn page_error(
    status: StatusCode,
    address: &str,
    msg: impl Into<String>,
) -> (StatusCode, Html<String>) {
    (
        status,
        Html(page::normal_page(address, &page::error_section(&msg.into()))),
    )
}

fn html_with_session(session: &Session, html: String) -> Response {
    (session.response_headers(), Html(html)).into_response()
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeForm {
    pub address: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

// ============================================================
// Pages
// ============================================================

pub async fn index(State(state): State<Arc<AppState>>, headers: HeaderMap) -> PageResult {
    let session = state.sessions.resolve(&headers).await;
    if session.state.is_admin {
        return admin_view(&state, &session);
    }

    let html = page::normal_page(&state.ui.default_address, "");
    Ok(html_with_session(&session, html))
}

pub async fn analyze(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Form(form): Form<AnalyzeForm>,
) -> PageResult {
    let session = state.sessions.resolve(&headers).await;
    if session.state.is_admin {
        return admin_view(&state, &session);
    }

    let address = form.address.trim();
    let outcome = state.pipeline.run(address).await.map_err(|e| {
        tracing::error!(address, error = %e, "Wallet analysis failed");
        page_error(StatusCode::INTERNAL_SERVER_ERROR, address, e.to_string())
    })?;

    let result = match outcome {
        Some(outcome) => {
            let pdf_href = if outcome.pdf_path.is_some() { PDF_ROUTE } else { "" };
            page::analysis_section(
                &outcome.report,
                &outcome.assessment,
                &state.ui.premium_report_url,
                pdf_href,
            )
            .map_err(|e| page_error(StatusCode::INTERNAL_SERVER_ERROR, address, e.to_string()))?
        }
        None => page::error_section(FETCH_ERROR_MESSAGE),
    };

    Ok(html_with_session(&session, page::normal_page(address, &result)))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Form(form): Form<LoginForm>,
) -> Response {
    let mut session = state.sessions.resolve(&headers).await;

    if !session.state.is_admin && state.auth.verify(&form.username, &form.password) {
        session = state.sessions.grant_admin().await;
        tracing::info!(session = ?session.id, "Admin view unlocked");
    }

    (session.response_headers(), Redirect::to("/")).into_response()
}

fn admin_view(state: &AppState, session: &Session) -> PageResult {
    let log = state.pipeline.log();
    let entries = if log.exists() {
        match log.read_all() {
            Ok(entries) => Some(entries),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read wallet log");
                None
            }
        }
    } else {
        None
    };

    let html = page::admin_page(entries.as_deref())
        .map_err(|e| page_error(StatusCode::INTERNAL_SERVER_ERROR, "", e.to_string()))?;
    Ok(html_with_session(session, html))
}

// ============================================================
// Download & Health
// ============================================================

pub async fn download_pdf(State(state): State<Arc<AppState>>) -> Result<Response, (StatusCode, String)> {
    let path = state.pipeline.exporter().output_path();
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|_| (StatusCode::NOT_FOUND, "No report has been exported yet".to_string()))?;

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("btc_wallet_report.pdf");
    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{}\"", file_name))
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("application/pdf")),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
