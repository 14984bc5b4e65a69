//! Lineage tree nodes.
//!
//! A [`TypeNode`] names one resolved type and lists its structural children
//! in a fixed order:
//!
//! 1. declared type-parameter placeholders (as wildcard leaves),
//! 2. implemented interfaces,
//! 3. the super-type, if present and not filtered out.
//!
//! Comparison is positional, so this order is part of the contract. Nodes
//! are only ever grown while the parser builds them; afterwards a tree is
//! read-only.

use crate::filters::NamePattern;
use lineage_common::names::is_top_name;
use lineage_common::{NULL_TYPE_NAME, TOP_TYPE_NAME};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One resolved type and its ordered structural children.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeNode {
    name: String,
    #[serde(default)]
    children: Vec<TypeNode>,
}

impl TypeNode {
    /// A childless node.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    /// A node with the given children, in order.
    pub fn with_children(
        name: impl Into<String>,
        children: impl IntoIterator<Item = TypeNode>,
    ) -> Self {
        Self {
            name: name.into(),
            children: children.into_iter().collect(),
        }
    }

    /// The wildcard sentinel leaf.
    pub fn top() -> Self {
        Self::new(TOP_TYPE_NAME)
    }

    /// The node for an absent value.
    pub fn null() -> Self {
        Self::new(NULL_TYPE_NAME)
    }

    pub(crate) fn push_child(&mut self, child: TypeNode) {
        self.children.push(child);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn children(&self) -> &[TypeNode] {
        &self.children
    }

    /// Whether this node is the wildcard sentinel.
    pub fn is_top(&self) -> bool {
        is_top_name(&self.name)
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Whether this node or any descendant is the wildcard sentinel.
    pub fn contains_top(&self) -> bool {
        self.is_top() || self.children.iter().any(TypeNode::contains_top)
    }

    /// Number of levels in the tree; a leaf has depth 1.
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(TypeNode::depth).max().unwrap_or(0)
    }

    /// Number of nodes in the tree, this one included.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(TypeNode::node_count).sum::<usize>()
    }

    /// Depth-first, pre-order search over this node and its descendants for
    /// the first node whose name matches `pattern`.
    ///
    /// Returns `None` when nothing matches or when no pattern is given.
    pub fn first_child_matching<'p>(
        &self,
        pattern: impl Into<Option<&'p NamePattern>>,
    ) -> Option<&TypeNode> {
        let pattern = pattern.into()?;
        self.find_pre_order(pattern)
    }

    fn find_pre_order(&self, pattern: &NamePattern) -> Option<&TypeNode> {
        if pattern.matches(&self.name) {
            return Some(self);
        }
        self.children
            .iter()
            .find_map(|child| child.find_pre_order(pattern))
    }

    /// Canonical text form: `name<child1, child2, ...>`, recursively; the
    /// angle brackets are left out for leaves.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TypeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if let Some((first, rest)) = self.children.split_first() {
            write!(f, "<{first}")?;
            for child in rest {
                write!(f, ", {child}")?;
            }
            f.write_str(">")?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/node_tests.rs"]
mod tests;
