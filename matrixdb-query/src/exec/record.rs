//! Records threaded through the operator tree.
//!
//! A [`Record`] is an ordered mapping from alias to [`Entry`]. One record is
//! allocated per query by the executor and mutated in place by every
//! operator on each pull; an operator that fans out rewrites the same
//! record for every row it yields.

use matrixdb_core::{Edge, Node, NodeId, Value};

use crate::error::{ExecError, ExecResult};

/// A value bound under an alias.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Entry {
    /// Declared but not yet bound.
    #[default]
    Unbound,
    /// A graph node.
    Node(Node),
    /// A graph edge.
    Edge(Edge),
    /// A scalar value.
    Scalar(Value),
}

impl Entry {
    /// A short name for the entry kind, used in error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Unbound => "unbound",
            Self::Node(_) => "node",
            Self::Edge(_) => "edge",
            Self::Scalar(_) => "scalar",
        }
    }

    /// Returns true unless the entry is [`Entry::Unbound`].
    #[must_use]
    pub const fn is_bound(&self) -> bool {
        !matches!(self, Self::Unbound)
    }

    /// Returns the node if this entry holds one.
    #[must_use]
    pub const fn as_node(&self) -> Option<&Node> {
        match self {
            Self::Node(node) => Some(node),
            _ => None,
        }
    }

    /// Returns the edge if this entry holds one.
    #[must_use]
    pub const fn as_edge(&self) -> Option<&Edge> {
        match self {
            Self::Edge(edge) => Some(edge),
            _ => None,
        }
    }

    /// Returns the scalar if this entry holds one.
    #[must_use]
    pub const fn as_scalar(&self) -> Option<&Value> {
        match self {
            Self::Scalar(value) => Some(value),
            _ => None,
        }
    }
}

impl From<Node> for Entry {
    fn from(node: Node) -> Self {
        Self::Node(node)
    }
}

impl From<Edge> for Entry {
    fn from(edge: Edge) -> Self {
        Self::Edge(edge)
    }
}

impl From<Value> for Entry {
    fn from(value: Value) -> Self {
        Self::Scalar(value)
    }
}

/// An ordered alias-to-entry mapping.
///
/// Records hold a handful of aliases, so lookups scan linearly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    entries: Vec<(String, Entry)>,
}

impl Record {
    /// Creates an empty record.
    #[must_use]
    pub const fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Creates an empty record with room for `aliases` bindings.
    #[must_use]
    pub fn with_capacity(aliases: usize) -> Self {
        Self { entries: Vec::with_capacity(aliases) }
    }

    /// Binds `alias` to `entry`, replacing any existing binding, and returns
    /// the alias's position.
    pub fn add_entry(&mut self, alias: &str, entry: Entry) -> usize {
        if let Some(idx) = self.position(alias) {
            self.entries[idx].1 = entry;
            return idx;
        }
        self.entries.push((alias.to_owned(), entry));
        self.entries.len() - 1
    }

    /// Replaces the binding of an alias that is already present.
    pub fn set(&mut self, alias: &str, entry: Entry) -> ExecResult<()> {
        let slot = self.get_mut(alias).ok_or_else(|| ExecError::UnboundAlias(alias.to_owned()))?;
        *slot = entry;
        Ok(())
    }

    /// Gets the entry bound under `alias`.
    #[must_use]
    pub fn get(&self, alias: &str) -> Option<&Entry> {
        self.entries.iter().find(|(name, _)| name == alias).map(|(_, entry)| entry)
    }

    /// Gets the entry bound under `alias` mutably.
    pub fn get_mut(&mut self, alias: &str) -> Option<&mut Entry> {
        self.entries.iter_mut().find(|(name, _)| name == alias).map(|(_, entry)| entry)
    }

    /// Gets the node bound under `alias`.
    pub fn node(&self, alias: &str) -> ExecResult<&Node> {
        match self.get(alias) {
            Some(Entry::Node(node)) => Ok(node),
            Some(other) => Err(binding_type(alias, "node", other)),
            None => Err(ExecError::UnboundAlias(alias.to_owned())),
        }
    }

    /// Gets the node bound under `alias` mutably, for in-place refresh.
    pub fn node_mut(&mut self, alias: &str) -> ExecResult<&mut Node> {
        match self.get_mut(alias) {
            Some(Entry::Node(node)) => Ok(node),
            Some(other) => Err(binding_type(alias, "node", other)),
            None => Err(ExecError::UnboundAlias(alias.to_owned())),
        }
    }

    /// Returns the node slot for `alias`, binding an empty placeholder node
    /// first if the alias holds anything else.
    pub fn node_slot(&mut self, alias: &str) -> &mut Node {
        let idx = match self.position(alias) {
            Some(idx) if matches!(self.entries[idx].1, Entry::Node(_)) => idx,
            _ => self.add_entry(alias, Entry::Node(Node::new(NodeId::new(0)))),
        };
        match &mut self.entries[idx].1 {
            Entry::Node(node) => node,
            _ => unreachable!("slot {idx} was just bound to a node"),
        }
    }

    /// Resolves the node id bound under `alias`.
    ///
    /// Accepts either a node or an integer scalar holding the id.
    pub fn node_id(&self, alias: &str) -> ExecResult<NodeId> {
        match self.get(alias) {
            Some(Entry::Node(node)) => Ok(node.id),
            Some(Entry::Scalar(value @ Value::Int(_))) => Ok(NodeId::try_from(value)?),
            Some(other) => Err(binding_type(alias, "node", other)),
            None => Err(ExecError::UnboundAlias(alias.to_owned())),
        }
    }

    /// Returns true if `alias` is present, bound or not.
    #[must_use]
    pub fn contains(&self, alias: &str) -> bool {
        self.position(alias).is_some()
    }

    /// The aliases in binding order.
    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Iterates `(alias, entry)` pairs in binding order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Entry)> {
        self.entries.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    /// Number of aliases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no alias is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes every alias.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Copies the listed aliases into a new record, in the listed order.
    /// Missing aliases come out [`Entry::Unbound`].
    #[must_use]
    pub fn project(&self, aliases: &[String]) -> Self {
        let entries = aliases
            .iter()
            .map(|alias| (alias.clone(), self.get(alias).cloned().unwrap_or_default()))
            .collect();
        Self { entries }
    }

    fn position(&self, alias: &str) -> Option<usize> {
        self.entries.iter().position(|(name, _)| name == alias)
    }
}

fn binding_type(alias: &str, expected: &'static str, actual: &Entry) -> ExecError {
    ExecError::BindingType { alias: alias.to_owned(), expected, actual: actual.kind() }
}
