// Context store: short class name -> constant map

use std::collections::BTreeMap;

use serde_json::Value;

use crate::constants::ConstantMap;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ConstantStore {
    entries: BTreeMap<String, ConstantMap>,
}

impl ConstantStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert under `short_name`, returning the map it replaced
    pub fn insert(&mut self, short_name: impl Into<String>, map: ConstantMap) -> Option<ConstantMap> {
        self.entries.insert(short_name.into(), map)
    }

    pub fn get(&self, short_name: &str) -> Option<&ConstantMap> {
        self.entries.get(short_name)
    }

    /// Look up `Class.FIELD`
    pub fn lookup(&self, expression: &str) -> Option<&Value> {
        let (class, field) = expression.split_once('.')?;
        self.get(class)?.get(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConstantMap)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lookup() {
        let mut store = ConstantStore::new();
        store.insert(
            "Colors",
            ConstantMap::from([("RED".to_string(), json!("r"))]),
        );
        assert_eq!(store.lookup("Colors.RED"), Some(&json!("r")));
        assert_eq!(store.lookup("Colors.BLUE"), None);
        assert_eq!(store.lookup("Sizes.RED"), None);
        assert_eq!(store.lookup("Colors"), None);
    }
}
