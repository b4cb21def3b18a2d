//! Constant class registry
//!
//! Classes whose fields are published to views are declared up front in a
//! [`ClassRegistry`]: either in code (see [`constant_definition`]) or in a TOML
//! catalog file (see [`catalog`]). Lookup by fully-qualified name replaces
//! runtime class loading.

mod builtin;
pub mod catalog;

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde_json::Value;

use crate::error::{CatalogError, FieldAccessError};

pub use builtin::constant_definition;

/// Field name -> field value, as published for one class
pub type ConstantMap = BTreeMap<String, Value>;

/// How a declared field can be read
#[derive(Debug, Clone, PartialEq)]
pub enum FieldAccess {
    Readable(Value),
    /// Declared but never readable from outside the class
    Sealed,
}

/// A single class-level field
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    name: String,
    access: FieldAccess,
}

impl Field {
    pub fn readable(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            access: FieldAccess::Readable(value.into()),
        }
    }

    pub fn sealed(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            access: FieldAccess::Sealed,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn access(&self) -> &FieldAccess {
        &self.access
    }

    /// Read the field's value on behalf of `class`
    pub fn read(&self, class: &str) -> Result<&Value, FieldAccessError> {
        match &self.access {
            FieldAccess::Readable(value) => Ok(value),
            FieldAccess::Sealed => Err(FieldAccessError {
                class: class.to_string(),
                field: self.name.clone(),
            }),
        }
    }
}

/// A named set of constants, addressed in views as `SimpleName.FIELD`
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantClass {
    qualified_name: String,
    fields: Vec<Field>,
}

impl ConstantClass {
    pub fn new(qualified_name: impl Into<String>) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            fields: Vec::new(),
        }
    }

    /// Declare a readable field, replacing any field with the same name
    #[must_use]
    pub fn field(self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.with_field(Field::readable(name, value))
    }

    /// Declare a field that cannot be read
    #[must_use]
    pub fn sealed_field(self, name: impl Into<String>) -> Self {
        self.with_field(Field::sealed(name))
    }

    #[must_use]
    pub fn with_field(mut self, field: Field) -> Self {
        match self.fields.iter_mut().find(|f| f.name == field.name) {
            Some(existing) => *existing = field,
            None => self.fields.push(field),
        }
        self
    }

    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    /// Unqualified name: the part after the last `.` and, for nested
    /// classes, after the last `$`
    pub fn simple_name(&self) -> &str {
        let name = self
            .qualified_name
            .rsplit('.')
            .next()
            .unwrap_or(&self.qualified_name);
        name.rsplit('$').next().unwrap_or(name)
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }
}

/// Every constant class the application can publish, keyed by qualified name
#[derive(Debug, Default, Clone)]
pub struct ClassRegistry {
    classes: HashMap<String, ConstantClass>,
}

impl ClassRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with the classes declared in code
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        for class in builtin::classes() {
            registry.register(class);
        }
        registry
    }

    /// Add a class, returning the previous declaration with the same name
    pub fn register(&mut self, class: ConstantClass) -> Option<ConstantClass> {
        self.classes.insert(class.qualified_name.clone(), class)
    }

    /// Resolve a fully-qualified name to its declaration
    pub fn resolve(&self, qualified_name: &str) -> Option<&ConstantClass> {
        self.classes.get(qualified_name)
    }

    /// Register every class declared in a TOML catalog file
    pub fn load_catalog(&mut self, path: impl AsRef<Path>) -> Result<usize, CatalogError> {
        let classes = catalog::load(path)?;
        let count = classes.len();
        for class in classes {
            self.register(class);
        }
        Ok(count)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_simple_name() {
        assert_eq!(ConstantClass::new("com.acme.Colors").simple_name(), "Colors");
        assert_eq!(ConstantClass::new("Colors").simple_name(), "Colors");
        assert_eq!(
            ConstantClass::new("com.acme.Outer$Inner").simple_name(),
            "Inner"
        );
    }

    #[test]
    fn test_field_redeclaration_replaces() {
        let class = ConstantClass::new("com.acme.Sizes")
            .field("SMALL", 1)
            .field("LARGE", 3)
            .field("SMALL", 2);
        assert_eq!(class.fields().len(), 2);
        assert_eq!(class.fields()[0].read("com.acme.Sizes"), Ok(&json!(2)));
    }

    #[test]
    fn test_sealed_field_read_fails() {
        let field = Field::sealed("SECRET");
        let err = field.read("com.acme.Vault").unwrap_err();
        assert_eq!(err.class, "com.acme.Vault");
        assert_eq!(err.field, "SECRET");
    }

    #[test]
    fn test_registry_resolve() {
        let mut registry = ClassRegistry::new();
        assert!(registry.register(ConstantClass::new("com.acme.Colors")).is_none());
        assert!(registry.resolve("com.acme.Colors").is_some());
        assert!(registry.resolve("Colors").is_none());
        assert!(registry.resolve("com.acme.Missing").is_none());
    }

    #[test]
    fn test_builtin_registry_has_constant_definition() {
        let registry = ClassRegistry::with_builtin();
        let class = registry
            .resolve(constant_definition::CLASS_NAME)
            .expect("builtin class registered");
        assert_eq!(class.simple_name(), "ConstantDefinition");
        assert_eq!(
            class.fields()[0].read(constant_definition::CLASS_NAME),
            Ok(&json!(constant_definition::FOO))
        );
    }
}
