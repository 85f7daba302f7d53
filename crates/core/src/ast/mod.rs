//! Arena-backed syntax tree for Groovy build scripts.
//!
//! Nodes are owned by an [`Ast`] and addressed by [`NodeId`]. Identity is the
//! id, never structural equality: two `Constant` nodes with the same text are
//! still distinct nodes. The tree is produced by a front-end (see
//! [`crate::parser::ScriptParser`]) and is immutable once built.

mod line_index;

pub use line_index::LineIndex;

use buildscope_api::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Source extent of a node.
///
/// Lines and columns are one-based, columns count UTF-16 code units and
/// `last_column` points one past the final character. Synthetic nodes carry
/// the all-zero span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub line: u32,
    pub column: u32,
    pub last_line: u32,
    pub last_column: u32,
    pub length: u32,
}

impl Span {
    pub const fn new(line: u32, column: u32, last_line: u32, last_column: u32, length: u32) -> Self {
        Self {
            line,
            column,
            last_line,
            last_column,
            length,
        }
    }

    /// Zero-based editor range covering the whole span.
    pub fn to_range(&self) -> Range {
        self.trimmed_range(0, 0)
    }

    /// Zero-based range with `leading` characters dropped from the start and
    /// `trailing` characters dropped from the end.
    pub fn trimmed_range(&self, leading: u32, trailing: u32) -> Range {
        Range::new(
            self.line.saturating_sub(1),
            (self.column + leading).saturating_sub(1),
            self.last_line.saturating_sub(1),
            self.last_column.saturating_sub(1 + trailing),
        )
    }
}

/// Quoting of a literal as written in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiteralStyle {
    /// Numbers, booleans, identifiers used as names.
    Bare,
    SingleQuoted,
    DoubleQuoted,
    TripleSingleQuoted,
    TripleDoubleQuoted,
    Slashy,
    DollarSlashy,
}

impl LiteralStyle {
    /// Widths of the opening and closing delimiters.
    pub fn delimiters(self) -> (u32, u32) {
        match self {
            LiteralStyle::Bare => (0, 0),
            LiteralStyle::SingleQuoted | LiteralStyle::DoubleQuoted | LiteralStyle::Slashy => (1, 1),
            LiteralStyle::TripleSingleQuoted | LiteralStyle::TripleDoubleQuoted => (3, 3),
            LiteralStyle::DollarSlashy => (2, 2),
        }
    }

    /// Infer the style from the raw source text of a literal.
    pub fn of(raw: &str) -> Self {
        if raw.starts_with("'''") {
            LiteralStyle::TripleSingleQuoted
        } else if raw.starts_with("\"\"\"") {
            LiteralStyle::TripleDoubleQuoted
        } else if raw.starts_with("$/") {
            LiteralStyle::DollarSlashy
        } else if raw.starts_with('\'') {
            LiteralStyle::SingleQuoted
        } else if raw.starts_with('"') {
            LiteralStyle::DoubleQuoted
        } else if raw.starts_with('/') {
            LiteralStyle::Slashy
        } else {
            LiteralStyle::Bare
        }
    }

    /// Strip the delimiters from `raw`, if they are present.
    pub fn unquote(self, raw: &str) -> &str {
        let (lead, trail) = self.delimiters();
        let (lead, trail) = (lead as usize, trail as usize);
        if raw.len() >= lead + trail && raw.is_char_boundary(lead) && raw.is_char_boundary(raw.len() - trail) {
            &raw[lead..raw.len() - trail]
        } else {
            raw
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Root of a script; its statements form the file's outermost block.
    Module { statements: Vec<NodeId> },
    Block { statements: Vec<NodeId> },
    ExpressionStatement { expression: NodeId },
    /// `receiver.method(arguments)`. Bare calls have a synthetic `this` receiver.
    MethodCall {
        receiver: NodeId,
        method: NodeId,
        arguments: NodeId,
    },
    ArgumentList { arguments: Vec<NodeId> },
    Closure { parameters: Vec<NodeId>, body: NodeId },
    Binary {
        left: NodeId,
        operator: String,
        right: NodeId,
    },
    Variable { name: String },
    Property { object: NodeId, property: NodeId },
    Constant { value: String, style: LiteralStyle },
    /// Interpolated string. `value` is the text between the delimiters.
    GString {
        value: String,
        style: LiteralStyle,
        parts: Vec<NodeId>,
    },
    Map { entries: Vec<NodeId> },
    MapEntry { key: NodeId, value: NodeId },
    List { elements: Vec<NodeId> },
    /// Any construct the analysis has no dedicated shape for.
    Other { label: String, children: Vec<NodeId> },
}

#[derive(Debug, Clone)]
pub struct AstNode {
    pub kind: NodeKind,
    pub span: Span,
    /// Source text covered by `span`.
    pub text: Box<str>,
    /// Compiler-generated, absent from the source.
    pub synthetic: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Ast {
    nodes: Vec<AstNode>,
    root: Option<NodeId>,
}

impl Ast {
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> Option<&AstNode> {
        self.nodes.get(id.index())
    }

    /// # Panics
    /// When `id` was not allocated by this tree.
    pub fn node(&self, id: NodeId) -> &AstNode {
        &self.nodes[id.index()]
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.node(id).kind
    }

    pub fn span(&self, id: NodeId) -> Span {
        self.node(id).span
    }

    pub fn text(&self, id: NodeId) -> &str {
        &self.node(id).text
    }

    /// Statements of the outermost block.
    pub fn module_statements(&self) -> &[NodeId] {
        match self.root.map(|root| self.kind(root)) {
            Some(NodeKind::Module { statements }) => statements,
            _ => &[],
        }
    }

    /// Children in visiting order.
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        match self.kind(id) {
            NodeKind::Module { statements } | NodeKind::Block { statements } => statements.clone(),
            NodeKind::ExpressionStatement { expression } => vec![*expression],
            NodeKind::MethodCall {
                receiver,
                method,
                arguments,
            } => vec![*receiver, *method, *arguments],
            NodeKind::ArgumentList { arguments } => arguments.clone(),
            NodeKind::Closure { parameters, body } => {
                let mut children = parameters.clone();
                children.push(*body);
                children
            }
            NodeKind::Binary { left, right, .. } => vec![*left, *right],
            NodeKind::Property { object, property } => vec![*object, *property],
            NodeKind::GString { parts, .. } => parts.clone(),
            NodeKind::Map { entries } => entries.clone(),
            NodeKind::MapEntry { key, value } => vec![*key, *value],
            NodeKind::List { elements } => elements.clone(),
            NodeKind::Other { children, .. } => children.clone(),
            NodeKind::Variable { .. } | NodeKind::Constant { .. } => Vec::new(),
        }
    }

    /// Arguments of a call's argument list.
    pub fn call_arguments(&self, call: NodeId) -> &[NodeId] {
        let NodeKind::MethodCall { arguments, .. } = self.kind(call) else {
            return &[];
        };
        match self.kind(*arguments) {
            NodeKind::ArgumentList { arguments } => arguments,
            _ => &[],
        }
    }

    /// Static method name of a call. `None` for interpolated method names.
    pub fn method_name(&self, call: NodeId) -> Option<&str> {
        let NodeKind::MethodCall { method, .. } = self.kind(call) else {
            return None;
        };
        match self.kind(*method) {
            NodeKind::Constant { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Whether `id` is a reference to `this`, implicit or written out.
    pub fn is_this(&self, id: NodeId) -> bool {
        matches!(self.kind(id), NodeKind::Variable { name } if name == "this")
    }
}

/// Allocates nodes and assembles an [`Ast`].
#[derive(Debug, Default)]
pub struct AstBuilder {
    nodes: Vec<AstNode>,
}

impl AstBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: NodeKind, span: Span, text: impl Into<Box<str>>) -> NodeId {
        self.alloc(AstNode {
            kind,
            span,
            text: text.into(),
            synthetic: false,
        })
    }

    pub fn push_synthetic(&mut self, kind: NodeKind) -> NodeId {
        self.alloc(AstNode {
            kind,
            span: Span::default(),
            text: "".into(),
            synthetic: true,
        })
    }

    /// The implicit receiver of a bare call.
    pub fn implicit_this(&mut self) -> NodeId {
        self.push_synthetic(NodeKind::Variable {
            name: "this".to_string(),
        })
    }

    pub fn get(&self, id: NodeId) -> Option<&AstNode> {
        self.nodes.get(id.index())
    }

    pub fn finish(self, root: NodeId) -> Ast {
        Ast {
            nodes: self.nodes,
            root: Some(root),
        }
    }

    fn alloc(&mut self, node: AstNode) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoted_literal_ranges_drop_delimiters() {
        // `"g:a:1.0"` starting at column 5 of line 2
        let span = Span::new(2, 5, 2, 14, 9);
        assert_eq!(span.to_range(), Range::new(1, 4, 1, 13));
        let (lead, trail) = LiteralStyle::DoubleQuoted.delimiters();
        assert_eq!(span.trimmed_range(lead, trail), Range::new(1, 5, 1, 12));
    }

    #[test]
    fn literal_style_is_inferred_from_delimiters() {
        assert_eq!(LiteralStyle::of("'a'"), LiteralStyle::SingleQuoted);
        assert_eq!(LiteralStyle::of("\"\"\"a\"\"\""), LiteralStyle::TripleDoubleQuoted);
        assert_eq!(LiteralStyle::of("$/a/$"), LiteralStyle::DollarSlashy);
        assert_eq!(LiteralStyle::of("42"), LiteralStyle::Bare);
        assert_eq!(LiteralStyle::TripleSingleQuoted.unquote("'''x'''"), "x");
        assert_eq!(LiteralStyle::DoubleQuoted.unquote("\""), "\"");
    }

    #[test]
    fn children_follow_visiting_order() {
        let mut builder = AstBuilder::new();
        let receiver = builder.implicit_this();
        let method = builder.push(
            NodeKind::Constant {
                value: "apply".into(),
                style: LiteralStyle::Bare,
            },
            Span::new(1, 1, 1, 6, 5),
            "apply",
        );
        let arguments = builder.push(NodeKind::ArgumentList { arguments: vec![] }, Span::default(), "");
        let call = builder.push(
            NodeKind::MethodCall {
                receiver,
                method,
                arguments,
            },
            Span::new(1, 1, 1, 6, 5),
            "apply",
        );
        let module = builder.push(NodeKind::Module { statements: vec![call] }, Span::new(1, 1, 1, 6, 5), "apply");
        let ast = builder.finish(module);

        assert_eq!(ast.children(call), vec![receiver, method, arguments]);
        assert_eq!(ast.method_name(call), Some("apply"));
        assert!(ast.is_this(receiver));
        assert!(ast.node(receiver).synthetic);
        assert_eq!(ast.module_statements(), &[call]);
    }
}
