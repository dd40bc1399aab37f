//! Template renderers backed by `tera`.
//!
//! One [`TemplateRenderer`] is built per application, at the end of
//! bootstrap, and dispatches on the engine chosen in the frozen config:
//!
//! | Engine             | Templates                          | Loaded          |
//! |--------------------|------------------------------------|-----------------|
//! | `GoNative`         | `views/<page>.page.tmpl`           | on every call   |
//! | `Extended`         | `views/**/<page>.jet`              | once, at build  |
//! | `Unknown`          | none                               | never           |

mod extended;
mod native;

use std::error::Error as _;
use std::io::Write;
use std::sync::Arc;

use brisk_core::application::ports::{PageRenderer, RendererFactory};
use brisk_core::domain::{ApplicationConfig, Loggers, RenderEngine};
use brisk_core::error::RenderError;
use serde_json::Value;
use tracing::{instrument, warn};

pub use extended::{EXTENDED_EXTENSION, ExtendedEngine};
pub use native::{NATIVE_SUFFIX, NativeEngine};

enum Strategy {
    Native(NativeEngine),
    Extended(ExtendedEngine),
    Disabled,
}

/// Page renderer for one application.
///
/// Immutable after construction; share it behind an `Arc`.
pub struct TemplateRenderer {
    engine: RenderEngine,
    strategy: Strategy,
}

impl TemplateRenderer {
    /// Build the renderer selected by `config`.
    ///
    /// For the extended engine every template under the views directory is
    /// compiled here; a syntax error in any of them fails construction.
    #[instrument(skip_all, fields(engine = %config.renderer()))]
    pub fn new(config: &ApplicationConfig, loggers: &Loggers) -> Result<Self, RenderError> {
        let views = config.views_dir();
        let strategy = match config.renderer() {
            RenderEngine::GoNative => Strategy::Native(NativeEngine::new(views)),
            RenderEngine::Extended => {
                Strategy::Extended(ExtendedEngine::load(&views, loggers.error)?)
            }
            RenderEngine::Unknown => {
                warn!(
                    renderer = config.renderer_name(),
                    "Unrecognized renderer; pages will render nothing"
                );
                Strategy::Disabled
            }
        };

        Ok(Self {
            engine: config.renderer(),
            strategy,
        })
    }
}

impl PageRenderer for TemplateRenderer {
    fn engine(&self) -> RenderEngine {
        self.engine
    }

    #[instrument(skip(self, output, variables, data), fields(engine = %self.engine))]
    fn page(
        &self,
        output: &mut dyn Write,
        page: &str,
        variables: Option<&Value>,
        data: Option<&Value>,
    ) -> Result<(), RenderError> {
        match &self.strategy {
            Strategy::Native(engine) => engine.render(output, page, data),
            Strategy::Extended(engine) => engine.render(output, page, variables, data),
            Strategy::Disabled => Ok(()),
        }
    }
}

impl std::fmt::Debug for TemplateRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateRenderer")
            .field("engine", &self.engine)
            .finish_non_exhaustive()
    }
}

/// [`RendererFactory`] producing [`TemplateRenderer`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct TeraRendererFactory;

impl TeraRendererFactory {
    pub fn new() -> Self {
        Self
    }
}

impl RendererFactory for TeraRendererFactory {
    fn build(
        &self,
        config: &ApplicationConfig,
        loggers: &Loggers,
    ) -> Result<Arc<dyn PageRenderer>, RenderError> {
        Ok(Arc::new(TemplateRenderer::new(config, loggers)?))
    }
}

/// Flatten a tera error and its causes into one line.
pub(crate) fn describe(err: &tera::Error) -> String {
    let mut message = err.to_string();
    let mut cause = err.source();
    while let Some(inner) = cause {
        message.push_str(": ");
        message.push_str(&inner.to_string());
        cause = inner.source();
    }
    message
}

/// Write a fully rendered body; a failed write is an execution failure.
pub(crate) fn write_body(
    output: &mut dyn Write,
    name: &str,
    body: &str,
) -> Result<(), RenderError> {
    output
        .write_all(body.as_bytes())
        .and_then(|()| output.flush())
        .map_err(|e| RenderError::TemplateExec {
            name: name.to_string(),
            reason: format!("failed to write output: {e}"),
        })
}
