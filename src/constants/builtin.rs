// Constant classes declared in code

use super::ConstantClass;

/// Session attribute keys shared between handlers and views
pub mod constant_definition {
    pub const CLASS_NAME: &str = "com.trgoofi.irregular.web.listener.ConstantDefinition";

    /// Key of the demo attribute written by `/TestConstantListener`
    pub const FOO: &str = "foo";
}

pub fn classes() -> Vec<ConstantClass> {
    vec![ConstantClass::new(constant_definition::CLASS_NAME).field("FOO", constant_definition::FOO)]
}
