use super::walker::AstVisitor;
use crate::ast::{Ast, NodeId};
use buildscope_api::Position;
use std::collections::HashMap;
use url::Url;

/// Traversal-order record of a document's source nodes with parent links.
///
/// Synthetic nodes are never recorded; their children are parented to the
/// nearest recorded ancestor.
#[derive(Debug, Clone)]
pub struct NodeIndex {
    uri: Url,
    order: Vec<NodeId>,
    parents: HashMap<NodeId, Option<NodeId>>,
}

impl NodeIndex {
    pub fn new(uri: Url) -> Self {
        Self {
            uri,
            order: Vec::new(),
            parents: HashMap::new(),
        }
    }

    /// Owning document.
    pub fn uri(&self) -> &Url {
        &self.uri
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn is_indexed(&self, node: NodeId) -> bool {
        self.parents.contains_key(&node)
    }

    /// `None` for roots and for nodes this index never saw.
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.parents.get(&node).copied().flatten()
    }

    /// Whether `ancestor` is a strict ancestor of `descendant`.
    pub fn contains(&self, ancestor: NodeId, descendant: NodeId) -> bool {
        let mut current = self.parent(descendant);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.parent(node);
        }
        false
    }

    /// Innermost recorded node whose span contains the zero-based position.
    pub fn node_at(&self, ast: &Ast, position: Position) -> Option<NodeId> {
        self.order
            .iter()
            .rev()
            .copied()
            .find(|&node| ast.span(node).to_range().contains_position(position))
    }
}

/// Builds a [`NodeIndex`] while walking.
pub struct NodeIndexer {
    index: NodeIndex,
    stack: Vec<NodeId>,
}

impl NodeIndexer {
    pub fn new(uri: Url) -> Self {
        Self {
            index: NodeIndex::new(uri),
            stack: Vec::new(),
        }
    }

    pub fn finish(self) -> NodeIndex {
        self.index
    }
}

impl AstVisitor for NodeIndexer {
    fn enter(&mut self, ast: &Ast, node: NodeId, _parent: Option<NodeId>) {
        if ast.node(node).synthetic {
            return;
        }
        self.index.order.push(node);
        self.index.parents.insert(node, self.stack.last().copied());
        self.stack.push(node);
    }

    fn leave(&mut self, ast: &Ast, node: NodeId) {
        if !ast.node(node).synthetic {
            self.stack.pop();
        }
    }
}
