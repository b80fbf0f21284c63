use crate::graph::{NodeKey, NodeRecord};
use serde_json::Value;

/// Extracts the key that links use to refer to a node.
pub trait NodeIdentity: Send + Sync {
    fn node_key(&self, record: &NodeRecord, index: usize) -> NodeKey;
}

/// Nodes are referred to by their position in the input sequence.
#[derive(Debug, Clone, Copy, Default)]
pub struct ByIndex;

impl NodeIdentity for ByIndex {
    fn node_key(&self, _record: &NodeRecord, index: usize) -> NodeKey {
        NodeKey::Index(index)
    }
}

/// Nodes are referred to by one of their attributes (string, or non-negative integer).
/// A record without a usable attribute falls back to its index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByAttribute(pub String);

impl ByAttribute {
    pub fn name() -> Self {
        Self("name".to_string())
    }
}

impl NodeIdentity for ByAttribute {
    fn node_key(&self, record: &NodeRecord, index: usize) -> NodeKey {
        match record.attributes.get(&self.0) {
            Some(Value::String(s)) => NodeKey::Name(s.clone()),
            Some(Value::Number(n)) => match n.as_u64() {
                Some(i) => NodeKey::Index(i as usize),
                None => NodeKey::Name(n.to_string()),
            },
            _ => NodeKey::Index(index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn by_attribute_reads_strings_and_integers() {
        let id = ByAttribute("id".to_string());
        let named = NodeRecord::default().with_attribute("id", "a");
        let numbered = NodeRecord::default().with_attribute("id", 7);
        let missing = NodeRecord::default();
        assert_eq!(id.node_key(&named, 0), NodeKey::from("a"));
        assert_eq!(id.node_key(&numbered, 0), NodeKey::Index(7));
        assert_eq!(id.node_key(&missing, 3), NodeKey::Index(3));
    }
}
