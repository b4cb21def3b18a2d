//! Application context
//!
//! Holds the init parameters supplied at startup and the constant store
//! published by the context listener. The store is set exactly once and is
//! read without locking afterwards.

mod store;

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::constants::ConstantMap;
use crate::error::ContextError;

pub use store::ConstantStore;

/// Init parameter naming the constant classes to publish
pub const CONSTANT_CLASS_NAME_PARAM: &str = "constantClassName";

#[derive(Debug, Default)]
pub struct WebContext {
    init_params: HashMap<String, String>,
    constants: OnceLock<ConstantStore>,
}

impl WebContext {
    pub fn new(init_params: HashMap<String, String>) -> Self {
        Self {
            init_params,
            constants: OnceLock::new(),
        }
    }

    /// Context whose only init parameter is `constantClassName`, when given
    pub fn with_constant_classes(constant_class_name: Option<&str>) -> Self {
        let init_params = constant_class_name
            .map(|value| HashMap::from([(CONSTANT_CLASS_NAME_PARAM.to_string(), value.to_string())]))
            .unwrap_or_default();
        Self::new(init_params)
    }

    pub fn init_parameter(&self, name: &str) -> Option<&str> {
        self.init_params.get(name).map(String::as_str)
    }

    /// Publish the constant store. Only the first call succeeds.
    pub fn publish(&self, store: ConstantStore) -> Result<(), ContextError> {
        self.constants
            .set(store)
            .map_err(|_| ContextError::AlreadyInitialized)
    }

    pub fn is_initialized(&self) -> bool {
        self.constants.get().is_some()
    }

    /// Published constants, `None` until the context has been initialized
    pub fn constants(&self) -> Option<&ConstantStore> {
        self.constants.get()
    }

    /// Constant map published under a class's short name
    pub fn attribute(&self, short_name: &str) -> Option<&ConstantMap> {
        self.constants()?.get(short_name)
    }
}
