//! Builds small syntax trees straight from source text, for tests that
//! should not depend on a real front-end.
//!
//! Every helper locates its text in the source (the first occurrence not yet
//! taken by an earlier node of the same text) and derives the span from it.
//! Build inner expressions before the calls that contain them.

use crate::ast::{Ast, AstBuilder, LineIndex, LiteralStyle, NodeId, NodeKind};
use std::collections::HashSet;

pub struct Sketch {
    source: String,
    builder: AstBuilder,
    extents: Vec<(usize, usize)>,
    claimed: HashSet<(usize, usize)>,
}

impl Sketch {
    pub fn new(source: &str) -> Self {
        Self {
            source: source.to_string(),
            builder: AstBuilder::new(),
            extents: Vec::new(),
            claimed: HashSet::new(),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// A quoted, slashy or bare literal. Double-quoted text containing `$`
    /// becomes an interpolated string.
    pub fn string(&mut self, raw: &str) -> NodeId {
        let start = self.locate(raw, 0);
        let style = LiteralStyle::of(raw);
        let value = style.unquote(raw).to_string();
        let interpolated = matches!(
            style,
            LiteralStyle::DoubleQuoted | LiteralStyle::TripleDoubleQuoted | LiteralStyle::Slashy | LiteralStyle::DollarSlashy
        ) && value.contains('$');
        let kind = if interpolated {
            NodeKind::GString {
                value,
                style,
                parts: Vec::new(),
            }
        } else {
            NodeKind::Constant { value, style }
        };
        self.node(kind, start, start + raw.len())
    }

    pub fn var(&mut self, name: &str) -> NodeId {
        let start = self.locate(name, 0);
        self.node(NodeKind::Variable { name: name.to_string() }, start, start + name.len())
    }

    /// `a.b.c` as nested property accesses.
    pub fn property(&mut self, dotted: &str) -> NodeId {
        let start = self.locate(dotted, 0);
        self.property_at(dotted, start)
    }

    /// `key: value`, where `value` is written as in [`Sketch::expr`].
    pub fn entry(&mut self, key: &str, value: &str) -> NodeId {
        let key_start = self.locate(key, 0);
        let key_node = self.node(
            NodeKind::Constant {
                value: key.to_string(),
                style: LiteralStyle::Bare,
            },
            key_start,
            key_start + key.len(),
        );
        let value_node = self.expr_from(value, key_start + key.len());
        let end = self.end_of(value_node);
        self.node(
            NodeKind::MapEntry {
                key: key_node,
                value: value_node,
            },
            key_start,
            end,
        )
    }

    /// Literal, property access or variable, chosen from the text's shape.
    pub fn expr(&mut self, text: &str) -> NodeId {
        self.expr_from(text, 0)
    }

    /// Bare call with comma-separated arguments: `implementation "g:a:1.0"`.
    pub fn command(&mut self, name: &str, arguments: Vec<NodeId>) -> NodeId {
        let start = self.locate(name, 0);
        let end = arguments
            .iter()
            .map(|&arg| self.end_of(arg))
            .fold(start + name.len(), usize::max);
        self.call(None, name, start, arguments, start, end)
    }

    /// Bare call with parentheses: `implementation("g:a:1.0")`.
    pub fn call_paren(&mut self, name: &str, arguments: Vec<NodeId>) -> NodeId {
        let start = self.locate(name, 0);
        let open = self.find_char('(', start + name.len());
        let end = self.matching(open, '(', ')');
        self.call(None, name, start, arguments, start, end)
    }

    /// Bare call whose last argument is a closure: `repositories { ... }`.
    pub fn block_call(&mut self, name: &str, statements: Vec<NodeId>) -> NodeId {
        self.block_call_with(name, Vec::new(), statements)
    }

    /// `project(':app') { ... }`
    pub fn block_call_with(&mut self, name: &str, mut arguments: Vec<NodeId>, statements: Vec<NodeId>) -> NodeId {
        let start = self.locate(name, 0);
        let after_args = arguments
            .iter()
            .map(|&arg| self.end_of(arg))
            .fold(start + name.len(), usize::max);
        let closure = self.closure_after(after_args, statements);
        let end = self.end_of(closure);
        arguments.push(closure);
        self.call(None, name, start, arguments, start, end)
    }

    /// `receiver.name { ... }` with an explicit receiver variable.
    pub fn qualified_block(&mut self, receiver: &str, name: &str, statements: Vec<NodeId>) -> NodeId {
        let dotted = format!("{}.{}", receiver, name);
        let start = self.locate(&dotted, 0);
        let receiver_node = self.node(
            NodeKind::Variable {
                name: receiver.to_string(),
            },
            start,
            start + receiver.len(),
        );
        let name_start = start + receiver.len() + 1;
        self.claimed.insert((name_start, name.len()));
        let closure = self.closure_after(start + dotted.len(), statements);
        let end = self.end_of(closure);
        self.call(Some(receiver_node), name, name_start, vec![closure], start, end)
    }

    pub fn assign(&mut self, lhs: &str, rhs: &str) -> NodeId {
        self.binary(lhs, "=", rhs)
    }

    pub fn binary(&mut self, lhs: &str, operator: &str, rhs: &str) -> NodeId {
        let left = self.expr(lhs);
        let op_start = self.find_str(operator, self.end_of(left));
        let right = self.expr_from(rhs, op_start + operator.len());
        let (start, end) = (self.start_of(left), self.end_of(right));
        self.node(
            NodeKind::Binary {
                left,
                operator: operator.to_string(),
                right,
            },
            start,
            end,
        )
    }

    /// Wrap top-level expressions into statements of a module spanning the
    /// whole source.
    pub fn finish(mut self, expressions: Vec<NodeId>) -> Ast {
        let statements = expressions.into_iter().map(|e| self.statement(e)).collect();
        let end = self.source.len();
        let module = self.node(NodeKind::Module { statements }, 0, end);
        self.builder.finish(module)
    }

    fn statement(&mut self, expression: NodeId) -> NodeId {
        let (start, end) = (self.start_of(expression), self.end_of(expression));
        self.node(NodeKind::ExpressionStatement { expression }, start, end)
    }

    fn call(
        &mut self,
        receiver: Option<NodeId>,
        name: &str,
        name_start: usize,
        arguments: Vec<NodeId>,
        start: usize,
        end: usize,
    ) -> NodeId {
        let receiver = match receiver {
            Some(receiver) => receiver,
            None => {
                let this = self.builder.implicit_this();
                self.record(this, 0, 0);
                this
            }
        };
        let method = self.node(
            NodeKind::Constant {
                value: name.to_string(),
                style: LiteralStyle::Bare,
            },
            name_start,
            name_start + name.len(),
        );
        let (args_start, args_end) = match (arguments.first(), arguments.last()) {
            (Some(&first), Some(&last)) => (self.start_of(first), self.end_of(last)),
            _ => (name_start + name.len(), name_start + name.len()),
        };
        let arguments = self.node(NodeKind::ArgumentList { arguments }, args_start, args_end);
        self.node(
            NodeKind::MethodCall {
                receiver,
                method,
                arguments,
            },
            start,
            end,
        )
    }

    fn closure_after(&mut self, from: usize, statements: Vec<NodeId>) -> NodeId {
        let open = self.find_char('{', from);
        let close = self.matching(open, '{', '}');
        let statements = statements.into_iter().map(|e| self.statement(e)).collect();
        let body = self.node(NodeKind::Block { statements }, open, close);
        self.node(
            NodeKind::Closure {
                parameters: Vec::new(),
                body,
            },
            open,
            close,
        )
    }

    fn property_at(&mut self, dotted: &str, start: usize) -> NodeId {
        let Some((object_text, name)) = dotted.rsplit_once('.') else {
            return self.node(
                NodeKind::Variable {
                    name: dotted.to_string(),
                },
                start,
                start + dotted.len(),
            );
        };
        let object = self.property_at(object_text, start);
        let name_start = start + object_text.len() + 1;
        let property = self.node(
            NodeKind::Constant {
                value: name.to_string(),
                style: LiteralStyle::Bare,
            },
            name_start,
            name_start + name.len(),
        );
        self.node(NodeKind::Property { object, property }, start, start + dotted.len())
    }

    fn expr_from(&mut self, text: &str, from: usize) -> NodeId {
        let first = text.chars().next().unwrap_or(' ');
        if matches!(first, '\'' | '"' | '/' | '$') || first.is_ascii_digit() || text == "true" || text == "false" {
            let start = self.locate(text, from);
            let style = LiteralStyle::of(text);
            let kind = NodeKind::Constant {
                value: style.unquote(text).to_string(),
                style,
            };
            return self.node(kind, start, start + text.len());
        }
        let start = self.locate(text, from);
        if text.contains('.') {
            self.property_at(text, start)
        } else {
            self.node(NodeKind::Variable { name: text.to_string() }, start, start + text.len())
        }
    }

    fn node(&mut self, kind: NodeKind, start: usize, end: usize) -> NodeId {
        let span = LineIndex::new(&self.source).span(start, end);
        let text = self.source[start..end].to_string();
        let id = self.builder.push(kind, span, text);
        self.record(id, start, end);
        id
    }

    fn record(&mut self, id: NodeId, start: usize, end: usize) {
        if self.extents.len() <= id.index() {
            self.extents.resize(id.index() + 1, (0, 0));
        }
        self.extents[id.index()] = (start, end);
    }

    fn start_of(&self, id: NodeId) -> usize {
        self.extents.get(id.index()).map(|e| e.0).unwrap_or(0)
    }

    fn end_of(&self, id: NodeId) -> usize {
        self.extents.get(id.index()).map(|e| e.1).unwrap_or(0)
    }

    fn locate(&mut self, text: &str, from: usize) -> usize {
        let mut search = from;
        while let Some(found) = self.source[search..].find(text) {
            let start = search + found;
            if self.on_word_boundary(text, start) && self.claimed.insert((start, text.len())) {
                return start;
            }
            search = start + text.len().max(1);
        }
        panic!("`{}` not found in sketch source after byte {}", text, from);
    }

    fn on_word_boundary(&self, text: &str, start: usize) -> bool {
        let is_word = |c: char| c.is_alphanumeric() || c == '_';
        if !text.chars().all(|c| is_word(c) || c == '.') {
            return true;
        }
        let before = self.source[..start].chars().next_back();
        let after = self.source[start + text.len()..].chars().next();
        !before.is_some_and(is_word) && !after.is_some_and(is_word)
    }

    fn find_char(&self, needle: char, from: usize) -> usize {
        self.source[from..]
            .find(needle)
            .map(|i| from + i)
            .unwrap_or_else(|| panic!("`{}` not found in sketch source after byte {}", needle, from))
    }

    fn find_str(&self, needle: &str, from: usize) -> usize {
        self.source[from..]
            .find(needle)
            .map(|i| from + i)
            .unwrap_or_else(|| panic!("`{}` not found in sketch source after byte {}", needle, from))
    }

    /// Byte offset one past the bracket closing the one at `open`.
    fn matching(&self, open: usize, open_char: char, close_char: char) -> usize {
        let mut depth = 0usize;
        for (i, c) in self.source[open..].char_indices() {
            if c == open_char {
                depth += 1;
            } else if c == close_char {
                depth -= 1;
                if depth == 0 {
                    return open + i + c.len_utf8();
                }
            }
        }
        panic!("unbalanced `{}` at byte {}", open_char, open);
    }
}
