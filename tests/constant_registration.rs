//! Startup registration from a constant catalog file.

use std::io::Write;

use irregular::constants::ClassRegistry;
use irregular::context::WebContext;
use irregular::listener::{ConstantListener, Diagnostic};
use serde_json::json;

const CATALOG: &str = r#"
[[class]]
name = "com.acme.Colors"
[class.fields]
RED = "r"
GREEN = "g"

[[class]]
name = "com.acme.Sizes"
sealed = ["INTERNAL"]
[class.fields]
SMALL = 1
"#;

fn registry_from_catalog() -> ClassRegistry {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(CATALOG.as_bytes()).unwrap();

    let mut registry = ClassRegistry::with_builtin();
    assert_eq!(registry.load_catalog(file.path()).unwrap(), 2);
    registry
}

#[test]
fn catalog_classes_are_published_by_short_name() {
    let listener = ConstantListener::new(registry_from_catalog());
    let context = WebContext::with_constant_classes(Some(" com.acme.Colors, com.acme.Sizes "));

    let diagnostics = listener.context_initialized(&context).unwrap();

    let store = context.constants().unwrap();
    assert_eq!(store.len(), 2);
    assert_eq!(store.lookup("Colors.RED"), Some(&json!("r")));
    assert_eq!(store.lookup("Colors.GREEN"), Some(&json!("g")));
    assert_eq!(store.lookup("Sizes.SMALL"), Some(&json!(1)));
    assert_eq!(store.lookup("Sizes.INTERNAL"), None);
    assert_eq!(
        diagnostics,
        vec![Diagnostic::InaccessibleField {
            class: "com.acme.Sizes".to_string(),
            field: "INTERNAL".to_string(),
        }]
    );
}

#[test]
fn unknown_class_is_skipped() {
    let listener = ConstantListener::new(registry_from_catalog());
    let context = WebContext::with_constant_classes(Some("com.acme.Colors,com.acme.Shapes"));

    let diagnostics = listener.context_initialized(&context).unwrap();

    assert_eq!(context.constants().unwrap().len(), 1);
    assert!(context.attribute("Colors").is_some());
    assert_eq!(
        diagnostics,
        vec![Diagnostic::UnresolvedClass {
            name: "com.acme.Shapes".to_string()
        }]
    );
}
