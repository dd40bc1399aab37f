//! Route table and middleware stack.

use std::time::Duration;

use axum::{Router, http::StatusCode, routing::get};
use brisk_core::domain::ApplicationConfig;
use tower_http::{services::ServeDir, timeout::TimeoutLayer, trace::TraceLayer};

use super::{AppState, handlers};

/// Requests running longer than this get a 408.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Directory under the project root served at `/public`.
pub const PUBLIC_DIR: &str = "public";

/// Routes attached during bootstrap, before the renderer exists.
pub fn attach(config: &ApplicationConfig) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::home))
        .route("/jet", get(handlers::test_jet))
        .nest_service(
            "/public",
            ServeDir::new(config.root_path().join(PUBLIC_DIR)),
        )
}

pub fn finish(routes: Router<AppState>, state: AppState) -> Router {
    with_middleware(routes.with_state(state), REQUEST_TIMEOUT)
}

fn with_middleware(router: Router, timeout: Duration) -> Router {
    router
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode},
    };
    use brisk_adapters::{DotenvSource, bootstrapper_with_env};
    use tempfile::TempDir;
    use tower::ServiceExt;

    use super::*;
    use crate::app::Application;

    fn app_for(env: &str, views: &[(&str, &str)]) -> (TempDir, Router) {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(".env"), env).unwrap();
        fs::create_dir_all(temp.path().join("views")).unwrap();
        for (name, body) in views {
            fs::write(temp.path().join("views").join(name), body).unwrap();
        }

        let framework = bootstrapper_with_env(DotenvSource::isolated::<_, String, String>([]))
            .initialize(temp.path(), attach)
            .unwrap();
        let router = Application::new(framework).into_router();
        (temp, router)
    }

    async fn get(router: Router, uri: &str) -> (StatusCode, String) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn home_renders_native_page() {
        let (_temp, router) = app_for("RENDERER=go\n", &[("home.page.tmpl", "<h1>Home</h1>")]);

        let (status, body) = get(router, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "<h1>Home</h1>");
    }

    #[tokio::test]
    async fn jet_route_renders_extended_page() {
        let (_temp, router) = app_for("RENDERER=jet\n", &[("testjet.jet", "<p>jet</p>")]);

        let (status, body) = get(router, "/jet").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "<p>jet</p>");
    }

    #[tokio::test]
    async fn render_error_is_500() {
        let (_temp, router) = app_for("RENDERER=go\n", &[]);

        let (status, body) = get(router, "/").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.contains("home.page.tmpl"));
    }

    #[tokio::test]
    async fn public_files_are_served() {
        let (temp, router) = app_for("", &[]);
        fs::write(temp.path().join("public").join("site.css"), "body {}").unwrap();

        let (status, body) = get(router, "/public/site.css").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "body {}");
    }

    #[tokio::test]
    async fn slow_request_times_out_with_408() {
        let slow = Router::new().route(
            "/slow",
            axum::routing::get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "late"
            }),
        );
        let router = with_middleware(slow, Duration::from_millis(20));

        let (status, _) = get(router, "/slow").await;
        assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let (_temp, router) = app_for("", &[]);

        let (status, _) = get(router, "/missing").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
