//! Demo handler at `/TestConstantListener`
//!
//! Stores a literal under `ConstantDefinition.FOO` in the session and forwards
//! to the page that reads it back through the published constants.

use super::{HandlerResult, RequestContext, Servlet};
use crate::constants::constant_definition;
use crate::view::TEST_CONSTANT_VIEW;

pub const TEST_CONSTANT_PATH: &str = "/TestConstantListener";

pub const SOMETHING: &str = "test constant in view(jsp)";

pub struct TestConstantServlet;

impl Servlet for TestConstantServlet {
    /// Same as POST
    fn do_get(&self, req: &mut RequestContext<'_>) -> HandlerResult {
        self.do_post(req)
    }

    fn do_post(&self, req: &mut RequestContext<'_>) -> HandlerResult {
        req.session().set_attribute(constant_definition::FOO, SOMETHING);
        req.forward(TEST_CONSTANT_VIEW)
    }
}
