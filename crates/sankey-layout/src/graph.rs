use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// External node identity, as produced by a [`crate::NodeIdentity`] extractor and as written in
/// a link's `source`/`target`.
///
/// JSON accepts either form: `0` resolves against positional keys, `"A"` against named keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeKey {
    Index(usize),
    Name(String),
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKey::Index(i) => write!(f, "{i}"),
            NodeKey::Name(name) => write!(f, "{name}"),
        }
    }
}

impl From<usize> for NodeKey {
    fn from(value: usize) -> Self {
        Self::Index(value)
    }
}

impl From<&str> for NodeKey {
    fn from(value: &str) -> Self {
        Self::Name(value.to_string())
    }
}

impl From<String> for NodeKey {
    fn from(value: String) -> Self {
        Self::Name(value)
    }
}

/// A caller-supplied node. Everything except `value` is opaque to the layout and is carried
/// through to the output in `attributes`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl NodeRecord {
    /// A record with a `name` attribute, for use with [`crate::ByAttribute`].
    pub fn named(name: impl Into<String>) -> Self {
        let mut attributes = Map::new();
        attributes.insert("name".to_string(), Value::String(name.into()));
        Self {
            value: None,
            attributes,
        }
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkRecord {
    pub source: NodeKey,
    pub target: NodeKey,
    #[serde(default)]
    pub value: f64,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl LinkRecord {
    pub fn new(source: impl Into<NodeKey>, target: impl Into<NodeKey>, value: f64) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            value,
            attributes: Map::new(),
        }
    }
}

/// The raw graph handed to [`crate::Sankey::layout`]. Callers with their own graph type provide
/// a `From` conversion; `(nodes, links)` tuples convert directly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SankeyData {
    #[serde(default)]
    pub nodes: Vec<NodeRecord>,
    #[serde(default)]
    pub links: Vec<LinkRecord>,
}

impl SankeyData {
    pub fn new(nodes: Vec<NodeRecord>, links: Vec<LinkRecord>) -> Self {
        Self { nodes, links }
    }

    pub fn from_json(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

impl From<(Vec<NodeRecord>, Vec<LinkRecord>)> for SankeyData {
    fn from((nodes, links): (Vec<NodeRecord>, Vec<LinkRecord>)) -> Self {
        Self { nodes, links }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub key: NodeKey,
    /// Generated per layout run (`ID0`, `ID1`, ...).
    pub uid: String,
    pub index: usize,
    pub value: f64,
    pub depth: usize,
    pub height: usize,
    pub layer: usize,
    pub x0: f64,
    pub x1: f64,
    pub y0: f64,
    pub y1: f64,
    pub source_links: Vec<usize>,
    pub target_links: Vec<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_number: Option<usize>,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub attributes: Map<String, Value>,
}

impl Node {
    pub fn center(&self) -> f64 {
        (self.y0 + self.y1) / 2.0
    }

    pub fn breadth(&self) -> f64 {
        self.y1 - self.y0
    }

    pub(crate) fn translate(&mut self, dy: f64) {
        self.y0 += dy;
        self.y1 += dy;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub index: usize,
    pub source: usize,
    pub target: usize,
    pub value: f64,
    pub width: f64,
    pub y0: f64,
    pub y1: f64,
    /// Sum of the values of the links ordered before this one at its source.
    pub source_share: f64,
    /// Sum of the values of the links ordered before this one at its target.
    pub target_share: f64,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub attributes: Map<String, Value>,
}

/// A laid-out graph. Links and nodes refer to each other by arena index.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SankeyGraph {
    pub nodes: Vec<Node>,
    pub links: Vec<Link>,
}

impl SankeyGraph {
    pub fn node_by_key(&self, key: &NodeKey) -> Option<&Node> {
        self.nodes.iter().find(|n| &n.key == key)
    }

    pub fn source_of(&self, link: &Link) -> &Node {
        &self.nodes[link.source]
    }

    pub fn target_of(&self, link: &Link) -> &Node {
        &self.nodes[link.target]
    }

    pub(crate) fn incoming_value(&self, node: usize) -> f64 {
        self.nodes[node]
            .target_links
            .iter()
            .map(|&li| self.links[li].value)
            .sum()
    }

    pub(crate) fn outgoing_value(&self, node: usize) -> f64 {
        self.nodes[node]
            .source_links
            .iter()
            .map(|&li| self.links[li].value)
            .sum()
    }

    /// Shifts a node vertically together with the link endpoints attached to it.
    pub(crate) fn shift_node(&mut self, node: usize, dy: f64) {
        self.nodes[node].translate(dy);
        for i in 0..self.nodes[node].source_links.len() {
            let li = self.nodes[node].source_links[i];
            self.links[li].y0 += dy;
        }
        for i in 0..self.nodes[node].target_links.len() {
            let li = self.nodes[node].target_links[i];
            self.links[li].y1 += dy;
        }
    }
}
