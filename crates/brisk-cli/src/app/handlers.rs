//! Request handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use tokio::task;
use tracing::instrument;

use super::AppState;

/// `GET /`
pub async fn home(State(state): State<AppState>) -> Response {
    render_page(state, "home").await
}

/// `GET /jet`
pub async fn test_jet(State(state): State<AppState>) -> Response {
    render_page(state, "testjet").await
}

/// Render into a buffer on the blocking pool; a render error is logged and
/// becomes a 500.
#[instrument(skip(state))]
async fn render_page(state: AppState, page: &'static str) -> Response {
    let renderer = state.renderer.clone();
    let rendered = task::spawn_blocking(move || {
        let mut body = Vec::new();
        renderer.page(&mut body, page, None, None).map(|()| body)
    })
    .await;

    match rendered {
        Ok(Ok(body)) => Html(body).into_response(),
        Ok(Err(e)) => {
            state
                .loggers
                .error
                .log(format_args!("error rendering {page}: {e}"));
            internal_error()
        }
        Err(e) => {
            state
                .loggers
                .error
                .log(format_args!("render task for {page} failed: {e}"));
            internal_error()
        }
    }
}

fn internal_error() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
}
