use crate::ast::{Ast, NodeId};

/// Receives traversal events from [`walk`].
///
/// `parent` is the structural parent in the tree, synthetic or not.
pub trait AstVisitor {
    fn enter(&mut self, _ast: &Ast, _node: NodeId, _parent: Option<NodeId>) {}
    fn leave(&mut self, _ast: &Ast, _node: NodeId) {}
}

impl<V: AstVisitor + ?Sized> AstVisitor for &mut V {
    fn enter(&mut self, ast: &Ast, node: NodeId, parent: Option<NodeId>) {
        (**self).enter(ast, node, parent)
    }

    fn leave(&mut self, ast: &Ast, node: NodeId) {
        (**self).leave(ast, node)
    }
}

/// A disabled visitor sees nothing.
impl<V: AstVisitor> AstVisitor for Option<V> {
    fn enter(&mut self, ast: &Ast, node: NodeId, parent: Option<NodeId>) {
        if let Some(visitor) = self {
            visitor.enter(ast, node, parent);
        }
    }

    fn leave(&mut self, ast: &Ast, node: NodeId) {
        if let Some(visitor) = self {
            visitor.leave(ast, node);
        }
    }
}

macro_rules! impl_visitor_tuple {
    ($($name:ident),+) => {
        #[allow(non_snake_case)]
        impl<$($name: AstVisitor),+> AstVisitor for ($($name,)+) {
            fn enter(&mut self, ast: &Ast, node: NodeId, parent: Option<NodeId>) {
                let ($($name,)+) = self;
                $($name.enter(ast, node, parent);)+
            }

            fn leave(&mut self, ast: &Ast, node: NodeId) {
                let ($($name,)+) = self;
                $($name.leave(ast, node);)+
            }
        }
    };
}

impl_visitor_tuple!(A, B);
impl_visitor_tuple!(A, B, C);

enum Step {
    Enter(NodeId, Option<NodeId>),
    Leave(NodeId),
}

/// Depth-first, pre-order traversal from the root with an explicit stack, so
/// deeply nested scripts cannot overflow the call stack.
pub fn walk<V: AstVisitor + ?Sized>(ast: &Ast, visitor: &mut V) {
    let Some(root) = ast.root() else {
        return;
    };
    let mut stack = vec![Step::Enter(root, None)];
    while let Some(step) = stack.pop() {
        match step {
            Step::Enter(node, parent) => {
                visitor.enter(ast, node, parent);
                stack.push(Step::Leave(node));
                let children = ast.children(node);
                stack.extend(children.into_iter().rev().map(|child| Step::Enter(child, Some(node))));
            }
            Step::Leave(node) => visitor.leave(ast, node),
        }
    }
}
