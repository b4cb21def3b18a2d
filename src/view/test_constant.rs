// Demo page for /TestConstantListener: shows the session attribute addressed
// through `ConstantDefinition.FOO` and every published constant.

use std::fmt::Write;

use serde_json::Value;

use super::{escape_html, View, ViewContext};
use crate::error::ViewError;

pub const TEST_CONSTANT_VIEW: &str = "testConstantListener";

const KEY_EXPRESSION: &str = "ConstantDefinition.FOO";

pub struct TestConstantView;

impl View for TestConstantView {
    fn render(&self, ctx: &ViewContext<'_>) -> Result<String, ViewError> {
        let something = ctx
            .session_attribute_by_constant(KEY_EXPRESSION)
            .map(|value| display_value(&value))
            .unwrap_or_default();

        let mut html = String::from(
            "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>Test Constant Listener</title></head>\n<body>\n",
        );
        let _ = writeln!(html, "<h1>{}</h1>", escape_html(ctx.path));
        let _ = writeln!(
            html,
            "<p>sessionScope[{KEY_EXPRESSION}]: <span id=\"something\">{}</span></p>",
            escape_html(&something)
        );

        if let Some(session) = ctx.session {
            let _ = writeln!(
                html,
                "<p>Session created: {}</p>",
                session.created().format("%Y-%m-%d %H:%M:%S")
            );
        }

        html.push_str("<table>\n<tr><th>Constant</th><th>Value</th></tr>\n");
        for (class, fields) in ctx.constants.into_iter().flat_map(|store| store.iter()) {
            for (field, value) in fields {
                let _ = writeln!(
                    html,
                    "<tr><td>{}.{}</td><td>{}</td></tr>",
                    escape_html(class),
                    escape_html(field),
                    escape_html(&display_value(value))
                );
            }
        }
        html.push_str("</table>\n</body>\n</html>\n");
        Ok(html)
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{constant_definition, ConstantMap};
    use crate::context::ConstantStore;
    use crate::session::SessionStore;
    use serde_json::json;

    fn store() -> ConstantStore {
        let mut store = ConstantStore::new();
        store.insert(
            "ConstantDefinition",
            ConstantMap::from([("FOO".to_string(), json!(constant_definition::FOO))]),
        );
        store.insert("Sizes", ConstantMap::from([("SMALL".to_string(), json!(1))]));
        store
    }

    #[test]
    fn test_renders_session_value_and_constants() {
        let store = store();
        let sessions = SessionStore::new(60);
        let (session, _) = sessions.get_or_create(None);
        session.set_attribute(constant_definition::FOO, "<b>hi</b>");

        let ctx = ViewContext {
            path: "/TestConstantListener",
            constants: Some(&store),
            session: Some(&session),
        };
        let html = TestConstantView.render(&ctx).unwrap();
        assert!(html.contains("<span id=\"something\">&lt;b&gt;hi&lt;/b&gt;</span>"));
        assert!(html.contains("<td>Sizes.SMALL</td><td>1</td>"));
        assert!(html.contains("<td>ConstantDefinition.FOO</td><td>foo</td>"));
        assert!(html.contains("<h1>/TestConstantListener</h1>"));
        assert!(html.contains("Session created: "));
    }

    #[test]
    fn test_renders_empty_without_constant_definition() {
        let empty = ConstantStore::new();
        let sessions = SessionStore::new(60);
        let (session, _) = sessions.get_or_create(None);
        session.set_attribute(constant_definition::FOO, "hidden");

        let ctx = ViewContext {
            path: "/TestConstantListener",
            constants: Some(&empty),
            session: Some(&session),
        };
        let html = TestConstantView.render(&ctx).unwrap();
        assert!(html.contains("<span id=\"something\"></span>"));
        assert!(!html.contains("hidden"));
    }
}
