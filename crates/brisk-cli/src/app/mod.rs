//! The demo application served by `brisk serve`.
//!
//! The application holds the bootstrapped framework by composition: it keeps
//! shared handles to the frozen config, the log sinks and the renderer, and
//! finishes the router that bootstrap attached.

pub mod handlers;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use brisk_core::application::{PageRenderer, services::Framework};
use brisk_core::domain::{ApplicationConfig, Loggers};

/// State shared by every request handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ApplicationConfig>,
    pub loggers: Loggers,
    pub renderer: Arc<dyn PageRenderer>,
}

pub struct Application {
    state: AppState,
    routes: Router<AppState>,
}

impl Application {
    pub fn new(framework: Framework<Router<AppState>>) -> Self {
        let state = AppState {
            config: Arc::new(framework.config().clone()),
            loggers: *framework.loggers(),
            renderer: framework.renderer(),
        };
        Self {
            state,
            routes: framework.into_routes(),
        }
    }

    pub fn config(&self) -> &ApplicationConfig {
        &self.state.config
    }

    pub fn loggers(&self) -> &Loggers {
        &self.state.loggers
    }

    /// Bind the state and wrap the router in the HTTP middleware stack.
    pub fn into_router(self) -> Router {
        routes::finish(self.routes, self.state)
    }
}
