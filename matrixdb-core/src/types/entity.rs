//! Node (vertex) types for the graph.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{NodeId, Value};

/// A label that categorizes a node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Label(String);

impl Label {
    /// Create a new label.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the label name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Label {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Label {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// A node (vertex) in the graph.
///
/// Nodes have:
/// - A dense identifier that doubles as their adjacency-matrix index
/// - Zero or more labels for categorization
/// - Properties as key-value pairs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier for this node.
    pub id: NodeId,
    /// Labels that categorize this node.
    pub labels: Vec<Label>,
    /// Properties stored on this node.
    pub properties: HashMap<String, Value>,
}

impl Node {
    /// Create a new node with the given ID.
    #[must_use]
    pub fn new(id: NodeId) -> Self {
        Self { id, labels: Vec::new(), properties: HashMap::new() }
    }

    /// Add a label to this node.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<Label>) -> Self {
        self.labels.push(label.into());
        self
    }

    /// Add a property to this node.
    #[must_use]
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Check if this node has a specific label.
    #[must_use]
    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l.as_str() == label)
    }

    /// Get a property value by key.
    #[must_use]
    pub fn get_property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// Set a property value.
    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.properties.insert(key.into(), value.into());
    }

    /// Overwrite this node with the contents of `other`, reusing the
    /// existing label and property allocations where possible.
    pub fn refresh_from(&mut self, other: &Node) {
        self.id = other.id;
        self.labels.clone_from(&other.labels);
        self.properties.clone_from(&other.properties);
    }
}
