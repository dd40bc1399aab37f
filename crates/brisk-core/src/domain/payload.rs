//! Per-request render payloads and their narrowing rules.
//!
//! Handlers hand the renderer loosely-typed JSON. Before any engine runs, the
//! payloads are narrowed into [`TemplateData`] and [`RenderVariables`]; a
//! payload of the wrong shape becomes a typed [`RenderError`] instead of being
//! coerced or dropped.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::RenderError;

/// Value bag passed into every template execution.
///
/// Every field defaults to its zero value, so `{}` (or no payload at all) is a
/// valid `TemplateData`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateData {
    pub is_authenticated: bool,
    pub int_map: HashMap<String, i64>,
    pub string_map: HashMap<String, String>,
    pub float_map: HashMap<String, f32>,
    pub data: Map<String, Value>,
    pub csrf_token: String,
    pub port: String,
    pub server_name: String,
    pub secure: bool,
}

impl TemplateData {
    /// Narrow an optional payload into `TemplateData`.
    ///
    /// `None` yields the zero value. Anything that does not deserialize into
    /// this shape is [`RenderError::InvalidData`].
    pub fn narrow(data: Option<&Value>) -> Result<Self, RenderError> {
        match data {
            None => Ok(Self::default()),
            Some(value) => Self::deserialize(value).map_err(|e| RenderError::InvalidData {
                reason: e.to_string(),
            }),
        }
    }

    /// Serialize into the JSON shape [`TemplateData::narrow`] accepts.
    pub fn to_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}

/// Named values substituted at template-evaluation time by the extended
/// engine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderVariables(Map<String, Value>);

impl RenderVariables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Narrow an optional payload into a variable map.
    ///
    /// `None` yields an empty map; any JSON value other than an object is
    /// [`RenderError::InvalidVariables`].
    pub fn narrow(variables: Option<&Value>) -> Result<Self, RenderError> {
        match variables {
            None => Ok(Self::default()),
            Some(Value::Object(map)) => Ok(Self(map.clone())),
            Some(other) => Err(RenderError::InvalidVariables {
                found: json_kind(other),
            }),
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_data_is_zero_valued() {
        let td = TemplateData::narrow(None).unwrap();
        assert_eq!(td, TemplateData::default());
        assert!(!td.is_authenticated);
        assert!(td.int_map.is_empty());
        assert_eq!(td.csrf_token, "");
    }

    #[test]
    fn partial_data_fills_defaults() {
        let payload = json!({ "is_authenticated": true, "string_map": { "title": "Home" } });
        let td = TemplateData::narrow(Some(&payload)).unwrap();
        assert!(td.is_authenticated);
        assert_eq!(td.string_map["title"], "Home");
        assert!(td.float_map.is_empty());
        assert!(!td.secure);
    }

    #[test]
    fn wrong_shaped_data_is_invalid() {
        for payload in [json!(42), json!("text"), json!([1, 2]), json!({ "int_map": "nope" })] {
            let err = TemplateData::narrow(Some(&payload)).unwrap_err();
            assert!(matches!(err, RenderError::InvalidData { .. }), "{payload}");
        }
    }

    #[test]
    fn data_survives_value_conversion() {
        let mut td = TemplateData {
            csrf_token: "tok".into(),
            ..TemplateData::default()
        };
        td.float_map.insert("ratio".into(), 0.5);
        let value = td.to_value().unwrap();
        assert_eq!(TemplateData::narrow(Some(&value)).unwrap(), td);
    }

    #[test]
    fn object_variables_are_accepted() {
        let payload = json!({ "name": "brisk", "count": 3 });
        let vars = RenderVariables::narrow(Some(&payload)).unwrap();
        assert_eq!(vars.len(), 2);
    }

    #[test]
    fn non_object_variables_are_rejected() {
        let err = RenderVariables::narrow(Some(&json!(["a"]))).unwrap_err();
        assert!(matches!(err, RenderError::InvalidVariables { found: "array" }));
    }

    #[test]
    fn missing_variables_are_empty() {
        assert!(RenderVariables::narrow(None).unwrap().is_empty());
    }

    #[test]
    fn built_variables_narrow_back() {
        let mut vars = RenderVariables::new();
        vars.insert("title", "Home");
        vars.insert("count", 3);

        let value = vars.clone().into_value();
        assert_eq!(value, json!({ "title": "Home", "count": 3 }));
        assert_eq!(RenderVariables::narrow(Some(&value)).unwrap(), vars);
    }
}
