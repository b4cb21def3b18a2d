//! Constant catalog file
//!
//! Declares constant classes in TOML:
//!
//! ```toml
//! [[class]]
//! name = "com.acme.Colors"
//! sealed = ["INTERNAL"]
//!
//! [class.fields]
//! RED = "r"
//! GREEN = "g"
//! ```

use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use super::ConstantClass;
use crate::error::CatalogError;

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default, rename = "class")]
    classes: Vec<CatalogClass>,
}

#[derive(Debug, Deserialize)]
struct CatalogClass {
    name: String,
    #[serde(default)]
    fields: toml::Table,
    /// Fields declared without a readable value
    #[serde(default)]
    sealed: Vec<String>,
}

/// Read and parse a catalog file
pub fn load(path: impl AsRef<Path>) -> Result<Vec<ConstantClass>, CatalogError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse(&content)
}

/// Parse catalog content
pub fn parse(content: &str) -> Result<Vec<ConstantClass>, CatalogError> {
    let file: CatalogFile = toml::from_str(content)?;
    Ok(file.classes.into_iter().map(into_class).collect())
}

fn into_class(entry: CatalogClass) -> ConstantClass {
    let mut class = ConstantClass::new(entry.name);
    for (name, value) in entry.fields {
        class = class.field(name, toml_to_json(value));
    }
    for name in entry.sealed {
        class = class.sealed_field(name);
    }
    class
}

fn toml_to_json(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::from(i),
        toml::Value::Float(f) => Value::from(f),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(items.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect(),
        ),
    }
}
