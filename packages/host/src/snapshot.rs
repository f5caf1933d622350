use crate::memory::MemoryNode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Serializable copy of a memory subtree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum NodeSnapshot {
    Element {
        tag: String,
        #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
        attributes: BTreeMap<String, String>,
        #[serde(skip_serializing_if = "Vec::is_empty", default)]
        classes: Vec<String>,
        #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
        styles: BTreeMap<String, String>,
        #[serde(skip_serializing_if = "Vec::is_empty", default)]
        children: Vec<NodeSnapshot>,
    },

    Text { content: String },
}

impl NodeSnapshot {
    pub fn capture(node: &MemoryNode) -> Self {
        match node.tag() {
            Some(tag) => NodeSnapshot::Element {
                tag,
                attributes: node.attributes().into_iter().collect(),
                classes: node.classes(),
                styles: node.styles().into_iter().collect(),
                children: node.children().iter().map(NodeSnapshot::capture).collect(),
            },
            None => NodeSnapshot::Text {
                content: node.text_value().unwrap_or_default(),
            },
        }
    }

    /// Tag nesting and text order only, e.g. `div(h1("Title"),p)`.
    pub fn outline(&self) -> String {
        match self {
            NodeSnapshot::Text { content } => format!("{:?}", content),
            NodeSnapshot::Element { tag, children, .. } if children.is_empty() => tag.clone(),
            NodeSnapshot::Element { tag, children, .. } => {
                let inner: Vec<String> = children.iter().map(NodeSnapshot::outline).collect();
                format!("{}({})", tag, inner.join(","))
            }
        }
    }
}
