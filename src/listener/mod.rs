//! Constant listener
//!
//! Runs once when the application context starts. Reads the
//! `constantClassName` init parameter, resolves each named class in the
//! [`ClassRegistry`] and publishes its fields under the class's short name, so
//! views can address them as `Constant1.FOO`.
//!
//! Registration is best effort: unknown classes and unreadable fields are
//! logged and skipped. When two classes share a short name, the one listed
//! later wins.

use std::collections::HashMap;

use crate::constants::{ClassRegistry, ConstantClass, ConstantMap};
use crate::context::{ConstantStore, WebContext, CONSTANT_CLASS_NAME_PARAM};
use crate::error::ContextError;
use crate::logger;

/// Recoverable problem found while registering constants
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    UnresolvedClass {
        name: String,
    },
    InaccessibleField {
        class: String,
        field: String,
    },
    ShortNameCollision {
        short_name: String,
        replaced: String,
        by: String,
    },
}

/// Outcome of [`register_constants`]
#[derive(Debug, Default)]
pub struct Registration {
    pub store: ConstantStore,
    pub diagnostics: Vec<Diagnostic>,
}

/// Split a class list on commas after removing ASCII whitespace.
///
/// Entries are not validated: `"a,,b"` keeps its empty middle entry, which
/// later fails to resolve. Trailing empty entries are dropped, and a list
/// without commas is returned as its single entry, even when empty.
pub fn extract_class_names(class_names: &str) -> Vec<String> {
    let stripped: String = class_names
        .chars()
        .filter(|&c| !is_separator_whitespace(c))
        .collect();
    let mut names: Vec<String> = stripped.split(',').map(ToString::to_string).collect();
    if names.len() > 1 {
        while names.last().is_some_and(String::is_empty) {
            names.pop();
        }
    }
    names
}

// space, \t, \n, \x0B, \x0C, \r
const fn is_separator_whitespace(c: char) -> bool {
    c.is_ascii_whitespace() || c == '\x0B'
}

/// Collect every readable field of `class`. Sealed fields are logged and left out.
pub fn field_to_map(class: &ConstantClass) -> (ConstantMap, Vec<Diagnostic>) {
    let mut map = ConstantMap::new();
    let mut diagnostics = Vec::new();

    for field in class.fields() {
        match field.read(class.qualified_name()) {
            Ok(value) => {
                map.insert(field.name().to_string(), value.clone());
            }
            Err(e) => {
                logger::log_illegal_field_access(&e);
                diagnostics.push(Diagnostic::InaccessibleField {
                    class: e.class,
                    field: e.field,
                });
            }
        }
    }

    (map, diagnostics)
}

/// Build the constant store for a `constantClassName` value
pub fn register_constants(class_names: Option<&str>, registry: &ClassRegistry) -> Registration {
    let mut registration = Registration::default();
    let Some(class_names) = class_names.filter(|s| !s.is_empty()) else {
        return registration;
    };

    // short name -> qualified name of the class currently published under it
    let mut owners: HashMap<String, String> = HashMap::new();

    for name in extract_class_names(class_names) {
        let Some(class) = registry.resolve(&name) else {
            logger::log_class_not_found(&name);
            registration
                .diagnostics
                .push(Diagnostic::UnresolvedClass { name });
            continue;
        };

        let (map, field_diagnostics) = field_to_map(class);
        registration.diagnostics.extend(field_diagnostics);

        let short_name = class.simple_name().to_string();
        if let Some(previous) = owners.insert(short_name.clone(), name.clone()) {
            if previous != name {
                logger::log_short_name_collision(&short_name, &previous, &name);
                registration.diagnostics.push(Diagnostic::ShortNameCollision {
                    short_name: short_name.clone(),
                    replaced: previous,
                    by: name,
                });
            }
        }
        registration.store.insert(short_name, map);
    }

    registration
}

/// Lifecycle hooks publishing constants into a [`WebContext`]
#[derive(Debug, Clone)]
pub struct ConstantListener {
    registry: ClassRegistry,
}

impl ConstantListener {
    pub const fn new(registry: ClassRegistry) -> Self {
        Self { registry }
    }

    /// Register constants and publish them. Fails only if the context has
    /// already been initialized, in which case the published store is kept.
    pub fn context_initialized(&self, context: &WebContext) -> Result<Vec<Diagnostic>, ContextError> {
        if context.is_initialized() {
            return Err(ContextError::AlreadyInitialized);
        }

        let Registration { store, diagnostics } = register_constants(
            context.init_parameter(CONSTANT_CLASS_NAME_PARAM),
            &self.registry,
        );
        let published = store.len();
        context.publish(store)?;
        logger::log_constants_registered(published, diagnostics.len());
        Ok(diagnostics)
    }

    pub fn context_destroyed(&self, context: &WebContext) {
        let published = context.constants().map_or(0, ConstantStore::len);
        logger::log_context_destroyed(published);
    }
}
