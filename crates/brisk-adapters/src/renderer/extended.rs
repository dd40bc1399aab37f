//! Extended engine: every `.jet` template under the views directory,
//! compiled once at construction.

use std::io::Write;
use std::path::Path;

use brisk_core::domain::{ErrorLog, RenderVariables, TemplateData};
use brisk_core::error::RenderError;
use serde_json::Value;
use tera::{Context, Tera};
use tracing::debug;

use super::{describe, write_body};

/// Extension of extended templates, without the dot.
pub const EXTENDED_EXTENSION: &str = "jet";

pub struct ExtendedEngine {
    templates: Tera,
    errors: ErrorLog,
}

impl ExtendedEngine {
    /// Compile `<views>/**/*.jet`. Template names are paths relative to
    /// `views`, e.g. `testjet.jet` or `partials/nav.jet`. A missing views
    /// directory yields an empty set.
    pub fn load(views: &Path, errors: ErrorLog) -> Result<Self, RenderError> {
        let pattern = views.join(format!("**/*.{EXTENDED_EXTENSION}"));
        let pattern = pattern.to_string_lossy();

        let mut templates = Tera::new(&pattern).map_err(|e| RenderError::TemplateParse {
            name: pattern.to_string(),
            reason: describe(&e),
        })?;
        templates.autoescape_on(vec![".jet"]);

        debug!(
            views = %views.display(),
            count = templates.get_template_names().count(),
            "Extended templates compiled"
        );
        Ok(Self { templates, errors })
    }

    /// Names of the compiled templates, sorted.
    pub fn template_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.templates.get_template_names().collect();
        names.sort_unstable();
        names
    }

    /// Render `<page>.jet` with the `TemplateData` fields at the top level of
    /// the context and `variables` layered over them.
    pub fn render(
        &self,
        output: &mut dyn Write,
        page: &str,
        variables: Option<&Value>,
        data: Option<&Value>,
    ) -> Result<(), RenderError> {
        let variables = RenderVariables::narrow(variables)?;
        let data = TemplateData::narrow(data)?;
        let name = format!("{page}.{EXTENDED_EXTENSION}");

        if !self.templates.get_template_names().any(|n| n == name) {
            self.errors
                .log(format_args!("error getting template {name}: not found"));
            return Err(RenderError::TemplateNotFound { name });
        }

        let mut context = Context::from_serialize(&data).map_err(|e| RenderError::TemplateExec {
            name: name.clone(),
            reason: describe(&e),
        })?;
        for (key, value) in variables.iter() {
            context.insert(key.as_str(), value);
        }

        let body = match self.templates.render(&name, &context) {
            Ok(body) => body,
            Err(e) => {
                let reason = describe(&e);
                self.errors
                    .log(format_args!("error executing template {name}: {reason}"));
                return Err(RenderError::TemplateExec { name, reason });
            }
        };

        debug!(template = %name, bytes = body.len(), "Page rendered");
        write_body(output, &name, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn load(templates: &[(&str, &str)]) -> (TempDir, Result<ExtendedEngine, RenderError>) {
        let temp = TempDir::new().unwrap();
        for (name, body) in templates {
            let path = temp.path().join(name);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(path, body).unwrap();
        }
        let engine = ExtendedEngine::load(temp.path(), ErrorLog);
        (temp, engine)
    }

    #[test]
    fn compiles_nested_templates() {
        let (_temp, engine) = load(&[
            ("testjet.jet", "jet"),
            ("partials/nav.jet", "nav"),
            ("home.page.tmpl", "ignored"),
        ]);

        assert_eq!(
            engine.unwrap().template_names(),
            vec!["partials/nav.jet", "testjet.jet"]
        );
    }

    #[test]
    fn missing_views_directory_is_empty_set() {
        let temp = TempDir::new().unwrap();
        let engine = ExtendedEngine::load(&temp.path().join("views"), ErrorLog).unwrap();
        assert!(engine.template_names().is_empty());
    }

    #[test]
    fn syntax_error_fails_load() {
        let (_temp, engine) = load(&[("bad.jet", "{% for %}")]);
        assert!(matches!(engine, Err(RenderError::TemplateParse { .. })));
    }

    #[test]
    fn variables_layer_over_data() {
        let (_temp, engine) = load(&[(
            "greet.jet",
            "{{ greeting }}, {{ server_name }} / {{ port }}",
        )]);
        let variables = json!({ "greeting": "Hello", "port": "override" });
        let data = json!({ "server_name": "brisk", "port": "4000" });

        let mut out = Vec::new();
        engine
            .unwrap()
            .render(&mut out, "greet", Some(&variables), Some(&data))
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Hello, brisk / override");
    }

    #[test]
    fn renders_without_payloads() {
        let (_temp, engine) = load(&[("testjet.jet", "<p>{{ is_authenticated }}</p>")]);

        let mut out = Vec::new();
        engine.unwrap().render(&mut out, "testjet", None, None).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "<p>false</p>");
    }

    #[test]
    fn templates_can_include_partials() {
        let (_temp, engine) = load(&[
            ("page.jet", "[{% include \"partials/nav.jet\" %}]"),
            ("partials/nav.jet", "nav"),
        ]);

        let mut out = Vec::new();
        engine.unwrap().render(&mut out, "page", None, None).unwrap();
        assert_eq!(out, b"[nav]");
    }

    #[test]
    fn non_object_variables_are_rejected() {
        let (_temp, engine) = load(&[("testjet.jet", "ok")]);
        let mut out = Vec::new();

        let err = engine
            .unwrap()
            .render(&mut out, "testjet", Some(&json!("nope")), None)
            .unwrap_err();
        assert_eq!(err, RenderError::InvalidVariables { found: "string" });
        assert!(out.is_empty());
    }

    #[test]
    fn wrong_shaped_data_is_rejected() {
        let (_temp, engine) = load(&[("testjet.jet", "ok")]);
        let mut out = Vec::new();

        let err = engine
            .unwrap()
            .render(&mut out, "testjet", None, Some(&json!({ "int_map": "x" })))
            .unwrap_err();
        assert!(matches!(err, RenderError::InvalidData { .. }));
        assert!(out.is_empty());
    }

    #[test]
    fn unknown_page_is_not_found() {
        let (_temp, engine) = load(&[("testjet.jet", "ok")]);
        let mut out = Vec::new();

        let err = engine
            .unwrap()
            .render(&mut out, "missing", None, None)
            .unwrap_err();
        assert_eq!(
            err,
            RenderError::TemplateNotFound {
                name: "missing.jet".into()
            }
        );
    }

    #[test]
    fn execution_failure_writes_nothing() {
        let (_temp, engine) = load(&[("broken.jet", "partial {{ nothing.here }}")]);
        let mut out = Vec::new();

        let err = engine
            .unwrap()
            .render(&mut out, "broken", None, None)
            .unwrap_err();
        assert!(matches!(err, RenderError::TemplateExec { .. }));
        assert!(out.is_empty());
    }
}
