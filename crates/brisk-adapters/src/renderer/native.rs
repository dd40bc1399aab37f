//! Native engine: one template file per page, re-read on every call.

use std::fs;
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};

use brisk_core::domain::TemplateData;
use brisk_core::error::RenderError;
use serde_json::Value;
use tera::{Context, Tera};
use tracing::debug;

use super::{describe, write_body};

/// File suffix of native page templates.
pub const NATIVE_SUFFIX: &str = ".page.tmpl";

#[derive(Debug, Clone)]
pub struct NativeEngine {
    views: PathBuf,
}

impl NativeEngine {
    pub fn new(views: impl Into<PathBuf>) -> Self {
        Self {
            views: views.into(),
        }
    }

    /// Render `<views>/<page>.page.tmpl` against `data` (zero-valued when
    /// absent). Template edits show up on the next call.
    pub fn render(
        &self,
        output: &mut dyn Write,
        page: &str,
        data: Option<&Value>,
    ) -> Result<(), RenderError> {
        let name = format!("{page}{NATIVE_SUFFIX}");
        if !stays_inside(page) {
            return Err(RenderError::TemplateNotFound { name });
        }

        let path = self.views.join(&name);
        let source = fs::read_to_string(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => RenderError::TemplateNotFound { name: name.clone() },
            _ => RenderError::TemplateParse {
                name: name.clone(),
                reason: format!("failed to read {}: {e}", path.display()),
            },
        })?;

        let mut tera = Tera::default();
        tera.autoescape_on(vec![NATIVE_SUFFIX]);
        tera.add_raw_template(&name, &source)
            .map_err(|e| RenderError::TemplateParse {
                name: name.clone(),
                reason: describe(&e),
            })?;

        let data = TemplateData::narrow(data)?;
        let context = Context::from_serialize(&data).map_err(|e| RenderError::TemplateExec {
            name: name.clone(),
            reason: describe(&e),
        })?;

        let body = tera
            .render(&name, &context)
            .map_err(|e| RenderError::TemplateExec {
                name: name.clone(),
                reason: describe(&e),
            })?;

        debug!(template = %name, bytes = body.len(), "Page rendered");
        write_body(output, &name, &body)
    }
}

// Page names resolve below the views directory only.
fn stays_inside(page: &str) -> bool {
    !page.is_empty()
        && Path::new(page)
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn engine_with(templates: &[(&str, &str)]) -> (TempDir, NativeEngine) {
        let temp = TempDir::new().unwrap();
        for (name, body) in templates {
            std::fs::write(temp.path().join(name), body).unwrap();
        }
        let engine = NativeEngine::new(temp.path());
        (temp, engine)
    }

    #[test]
    fn renders_with_zero_valued_data() {
        let (_temp, engine) = engine_with(&[(
            "home.page.tmpl",
            "<h1>Home</h1>{% if is_authenticated %}in{% else %}out{% endif %}[{{ csrf_token }}]",
        )]);

        let mut out = Vec::new();
        engine.render(&mut out, "home", None).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "<h1>Home</h1>out[]");
    }

    #[test]
    fn renders_supplied_data() {
        let (_temp, engine) = engine_with(&[(
            "about.page.tmpl",
            "{{ string_map.title }} on {{ server_name }}:{{ port }}",
        )]);
        let data = json!({
            "string_map": { "title": "About" },
            "server_name": "localhost",
            "port": "4000",
        });

        let mut out = Vec::new();
        engine.render(&mut out, "about", Some(&data)).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "About on localhost:4000");
    }

    #[test]
    fn output_is_escaped() {
        let (_temp, engine) = engine_with(&[("x.page.tmpl", "{{ string_map.v }}")]);
        let data = json!({ "string_map": { "v": "<b>" } });

        let mut out = Vec::new();
        engine.render(&mut out, "x", Some(&data)).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "&lt;b&gt;");
    }

    #[test]
    fn edits_are_picked_up_without_rebuild() {
        let (temp, engine) = engine_with(&[("home.page.tmpl", "v1")]);
        let mut out = Vec::new();
        engine.render(&mut out, "home", None).unwrap();

        std::fs::write(temp.path().join("home.page.tmpl"), "v2").unwrap();
        let mut out = Vec::new();
        engine.render(&mut out, "home", None).unwrap();
        assert_eq!(out, b"v2");
    }

    #[test]
    fn missing_template_is_not_found() {
        let (_temp, engine) = engine_with(&[]);
        let mut out = Vec::new();

        let err = engine.render(&mut out, "nope", None).unwrap_err();
        assert_eq!(
            err,
            RenderError::TemplateNotFound {
                name: "nope.page.tmpl".into()
            }
        );
        assert!(out.is_empty());
    }

    #[test]
    fn escaping_page_names_are_not_found() {
        let (_temp, engine) = engine_with(&[]);
        let mut out = Vec::new();

        for page in ["../secret", "/etc/passwd", ""] {
            let err = engine.render(&mut out, page, None).unwrap_err();
            assert!(matches!(err, RenderError::TemplateNotFound { .. }), "{page}");
        }
    }

    #[test]
    fn syntax_error_is_parse_error() {
        let (_temp, engine) = engine_with(&[("bad.page.tmpl", "{% if %}")]);
        let mut out = Vec::new();

        let err = engine.render(&mut out, "bad", None).unwrap_err();
        assert!(matches!(err, RenderError::TemplateParse { .. }));
        assert!(out.is_empty());
    }

    #[test]
    fn execution_failure_writes_nothing() {
        let (_temp, engine) = engine_with(&[("home.page.tmpl", "before {{ missing.field }}")]);
        let mut out = Vec::new();

        let err = engine.render(&mut out, "home", None).unwrap_err();
        assert!(matches!(err, RenderError::TemplateExec { .. }));
        assert!(out.is_empty());
    }

    #[test]
    fn wrong_shaped_data_is_recoverable() {
        let (_temp, engine) = engine_with(&[("home.page.tmpl", "ok")]);
        let mut out = Vec::new();

        let err = engine
            .render(&mut out, "home", Some(&json!(["not", "data"])))
            .unwrap_err();
        assert!(matches!(err, RenderError::InvalidData { .. }));
        assert!(out.is_empty());
    }
}
