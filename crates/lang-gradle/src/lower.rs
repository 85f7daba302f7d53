//! Lowering of the tree-sitter concrete syntax tree into the analysis tree.
//!
//! Grammar node kinds are matched by name. Several spellings are accepted for
//! each construct so that grammar revisions keep lowering to the same shapes;
//! anything unrecognized becomes [`NodeKind::Other`] with its named children
//! lowered underneath.

use buildscope_core::ast::{Ast, AstBuilder, LineIndex, LiteralStyle, NodeId, NodeKind};
use tree_sitter::Node;

const CALLS: &[&str] = &[
    "function_call",
    "juxt_function_call",
    "method_call",
    "method_invocation",
    "command_expression",
    "call_expression",
];
const CLOSURES: &[&str] = &["closure", "closure_expression", "lambda_expression"];
const BLOCKS: &[&str] = &["block", "closure_body"];
const STRINGS: &[&str] = &[
    "string",
    "string_literal",
    "gstring",
    "slashy_string",
    "dollar_slashy_string",
    "character_literal",
];
const LITERALS: &[&str] = &[
    "number_literal",
    "integer_literal",
    "decimal_literal",
    "decimal_integer_literal",
    "decimal_floating_point_literal",
    "hex_integer_literal",
    "octal_integer_literal",
    "binary_integer_literal",
    "hex_floating_point_literal",
    "number",
    "true",
    "false",
    "null",
    "boolean_literal",
    "null_literal",
];
const IDENTIFIERS: &[&str] = &["identifier", "type_identifier", "this", "super"];
const PATHS: &[&str] = &[
    "dotted_identifier",
    "field_access",
    "access_op",
    "property_expression",
    "scoped_identifier",
    "qualified_name",
];
const BINARIES: &[&str] = &["assignment", "assignment_expression", "binary_op", "binary_expression"];
const DECLARATIONS: &[&str] = &["declaration", "variable_declaration", "local_variable_declaration"];
const MAPS: &[&str] = &["map", "map_literal"];
const MAP_ENTRIES: &[&str] = &["map_item", "map_entry", "named_argument"];
const LISTS: &[&str] = &["list", "list_literal", "array_literal"];
const ARGUMENT_LISTS: &[&str] = &["argument_list", "arguments"];
const PARAMETER_LISTS: &[&str] = &["parameter_list", "closure_parameters", "parameters", "formal_parameters"];
const PARAMETERS: &[&str] = &["parameter", "formal_parameter"];
const INTERPOLATIONS: &[&str] = &[
    "interpolation",
    "string_interpolation",
    "template_substitution",
    "gstring_interpolation",
];
const WRAPPERS: &[&str] = &["expression_statement", "parenthesized_expression", "statement"];
const COMMENTS: &[&str] = &["comment", "line_comment", "block_comment", "groovy_doc", "shebang"];

/// Lower a parsed script. The module spans the whole source.
pub fn lower(root: Node<'_>, source: &str) -> Ast {
    let mut lowering = Lowering {
        source,
        lines: LineIndex::new(source),
        builder: AstBuilder::new(),
    };
    let statements = lowering.statements(named_children(root));
    let module = lowering.push(NodeKind::Module { statements }, 0, source.len());
    lowering.builder.finish(module)
}

fn is(node: Node<'_>, kinds: &[&str]) -> bool {
    kinds.contains(&node.kind())
}

/// Named children without comments.
fn named_children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| !child.is_extra() && !is(*child, COMMENTS))
        .collect()
}

/// The expression under statement wrappers.
fn unwrap_statement(node: Node<'_>) -> Node<'_> {
    if matches!(node.kind(), "expression_statement" | "statement")
        && let [inner] = named_children(node).as_slice()
    {
        return unwrap_statement(*inner);
    }
    node
}

/// Declarators of a variable declaration; `None` for any other node.
fn declarators(node: Node<'_>) -> Option<Vec<Node<'_>>> {
    if !is(node, DECLARATIONS) {
        return None;
    }
    let mut cursor = node.walk();
    let declarators: Vec<_> = node.children_by_field_name("declarator", &mut cursor).collect();
    Some(if declarators.is_empty() { vec![node] } else { declarators })
}

fn looks_like_path(text: &str) -> bool {
    let text = text.trim();
    !text.is_empty()
        && !text.starts_with('.')
        && !text.ends_with('.')
        && !text.contains("..")
        && text
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '$' || c == '.' || c.is_whitespace())
}

/// A command call whose last argument is a bare name, followed on the same
/// line by a block or parenthesized expression. The grammar emits these as
/// sibling statements; Groovy reads `task hello { }` as `task(hello({ }))`.
struct Command<'t> {
    call: Node<'t>,
    function: Node<'t>,
    args: Node<'t>,
    leading: Vec<Node<'t>>,
    target: Node<'t>,
    tail: Node<'t>,
}

struct Lowering<'s> {
    source: &'s str,
    lines: LineIndex<'s>,
    builder: AstBuilder,
}

impl<'s> Lowering<'s> {
    fn push(&mut self, kind: NodeKind, start: usize, end: usize) -> NodeId {
        let span = self.lines.span(start, end);
        let text = self.slice(start, end);
        self.builder.push(kind, span, text)
    }

    fn push_node(&mut self, kind: NodeKind, node: Node<'_>) -> NodeId {
        self.push(kind, node.start_byte(), node.end_byte())
    }

    fn slice(&self, start: usize, end: usize) -> &'s str {
        self.source.get(start..end).unwrap_or_default()
    }

    fn text(&self, node: Node<'_>) -> &'s str {
        self.slice(node.start_byte(), node.end_byte())
    }

    fn trim(&self, start: usize, end: usize) -> (usize, usize) {
        let text = self.slice(start, end);
        let start = start + (text.len() - text.trim_start().len());
        let end = end - (text.len() - text.trim_end().len());
        (start, end.max(start))
    }

    fn statement(&mut self, node: Node<'_>) -> NodeId {
        let expression = self.expression(node);
        let (start, end) = self.trim(node.start_byte(), node.end_byte());
        self.push(NodeKind::ExpressionStatement { expression }, start, end)
    }

    /// Statement list with command calls rejoined and multi-variable
    /// declarations split into one statement per declarator.
    fn statements(&mut self, nodes: Vec<Node<'_>>) -> Vec<NodeId> {
        let mut statements = Vec::with_capacity(nodes.len());
        let mut nodes = nodes.into_iter().peekable();
        while let Some(node) = nodes.next() {
            if let Some(command) = nodes.peek().and_then(|next| self.command(node, *next)) {
                nodes.next();
                statements.push(self.command_statement(command));
                continue;
            }
            match declarators(unwrap_statement(node)) {
                Some(declarators) if declarators.len() > 1 => {
                    for declarator in declarators {
                        let expression = self.declarator(declarator);
                        let (start, end) = self.trim(declarator.start_byte(), declarator.end_byte());
                        statements.push(self.push(NodeKind::ExpressionStatement { expression }, start, end));
                    }
                }
                _ => statements.push(self.statement(node)),
            }
        }
        statements
    }

    fn command<'t>(&self, node: Node<'t>, next: Node<'t>) -> Option<Command<'t>> {
        let call = unwrap_statement(node);
        if call.kind() != "juxt_function_call" {
            return None;
        }
        let function = call.child_by_field_name("name")?;
        let args = call.child_by_field_name("args")?;
        let mut leading = named_children(args);
        let target = leading.pop()?;
        let tail = unwrap_statement(next);
        if target.kind() != "identifier" || !matches!(tail.kind(), "block" | "parenthesized_expression") {
            return None;
        }
        let gap = self.source.get(target.end_byte()..tail.start_byte())?;
        if gap.contains('\n') || !gap.trim().is_empty() {
            return None;
        }
        Some(Command {
            call,
            function,
            args,
            leading,
            target,
            tail,
        })
    }

    fn command_statement(&mut self, command: Command<'_>) -> NodeId {
        let Command {
            call,
            function,
            args,
            leading,
            target,
            tail,
        } = command;
        let end = tail.end_byte();

        let inner_arguments = if tail.kind() == "block" {
            let statements = self.statements(named_children(tail));
            let body = self.push_node(NodeKind::Block { statements }, tail);
            vec![self.push_node(
                NodeKind::Closure {
                    parameters: Vec::new(),
                    body,
                },
                tail,
            )]
        } else {
            self.expressions(named_children(tail))
        };
        let inner_list = self.push_node(NodeKind::ArgumentList { arguments: inner_arguments }, tail);
        let receiver = self.builder.implicit_this();
        let method = self.name(target.start_byte(), target.end_byte());
        let inner = self.push(
            NodeKind::MethodCall {
                receiver,
                method,
                arguments: inner_list,
            },
            target.start_byte(),
            end,
        );

        let (receiver, method) = self.callee(function);
        let mut arguments = self.expressions(leading);
        arguments.push(inner);
        let arguments = self.push(NodeKind::ArgumentList { arguments }, args.start_byte(), end);
        let expression = self.push(
            NodeKind::MethodCall {
                receiver,
                method,
                arguments,
            },
            call.start_byte(),
            end,
        );
        self.push(NodeKind::ExpressionStatement { expression }, call.start_byte(), end)
    }

    fn expression(&mut self, node: Node<'_>) -> NodeId {
        if is(node, WRAPPERS) {
            return match named_children(node).as_slice() {
                [inner] => self.expression(*inner),
                _ => self.other(node),
            };
        }
        if is(node, CALLS) {
            self.call(node)
        } else if is(node, CLOSURES) {
            self.closure(node)
        } else if is(node, BLOCKS) {
            let statements = self.statements(named_children(node));
            self.push_node(NodeKind::Block { statements }, node)
        } else if is(node, STRINGS) {
            self.string(node)
        } else if is(node, LITERALS) {
            self.name(node.start_byte(), node.end_byte())
        } else if is(node, IDENTIFIERS) {
            let name = self.text(node).to_string();
            self.push_node(NodeKind::Variable { name }, node)
        } else if is(node, PATHS) && looks_like_path(self.text(node)) {
            self.path(node.start_byte(), node.end_byte())
        } else if is(node, BINARIES) {
            self.binary(node)
        } else if is(node, DECLARATIONS) {
            self.declaration(node)
        } else if is(node, MAPS) {
            let entries = self.expressions(named_children(node));
            self.push_node(NodeKind::Map { entries }, node)
        } else if is(node, MAP_ENTRIES) {
            self.entry(node)
        } else if is(node, LISTS) {
            let elements = self.expressions(named_children(node));
            self.push_node(NodeKind::List { elements }, node)
        } else {
            self.other(node)
        }
    }

    fn expressions(&mut self, nodes: Vec<Node<'_>>) -> Vec<NodeId> {
        nodes.into_iter().map(|node| self.expression(node)).collect()
    }

    fn other(&mut self, node: Node<'_>) -> NodeId {
        let children = self.expressions(named_children(node));
        let label = node.kind().to_string();
        self.push_node(NodeKind::Other { label, children }, node)
    }

    /// Bare constant such as a method name, map key or number.
    fn name(&mut self, start: usize, end: usize) -> NodeId {
        let value = self.slice(start, end).to_string();
        self.push(
            NodeKind::Constant {
                value,
                style: LiteralStyle::Bare,
            },
            start,
            end,
        )
    }

    /// `a.b.c` as nested property accesses over a variable.
    fn path(&mut self, start: usize, end: usize) -> NodeId {
        let (start, end) = self.trim(start, end);
        let text = self.slice(start, end);
        match text.rfind('.') {
            Some(dot) => {
                let object = self.path(start, start + dot);
                let (name_start, name_end) = self.trim(start + dot + 1, end);
                let property = self.name(name_start, name_end);
                self.push(NodeKind::Property { object, property }, start, end)
            }
            None => self.push(NodeKind::Variable { name: text.to_string() }, start, end),
        }
    }

    fn call(&mut self, node: Node<'_>) -> NodeId {
        let children = named_children(node);
        let object = node.child_by_field_name("object");
        let function = node
            .child_by_field_name("function")
            .or_else(|| node.child_by_field_name("name"))
            .or_else(|| children.first().copied());
        let Some(function) = function else {
            return self.other(node);
        };

        let (receiver, method) = match object {
            Some(object) => {
                let receiver = self.expression(object);
                let method = self.name(function.start_byte(), function.end_byte());
                (receiver, method)
            }
            None => self.callee(function),
        };

        let mut argument_list = None;
        let mut argument_nodes = Vec::new();
        for child in children {
            if child.id() == function.id() || object.is_some_and(|o| o.id() == child.id()) {
                continue;
            }
            if is(child, ARGUMENT_LISTS) {
                argument_list.get_or_insert(child);
                argument_nodes.extend(named_children(child));
            } else {
                argument_nodes.push(child);
            }
        }

        let (args_start, args_end) = match (argument_list, argument_nodes.first(), argument_nodes.last()) {
            (Some(list), _, Some(last)) => (list.start_byte(), list.end_byte().max(last.end_byte())),
            (Some(list), _, None) => (list.start_byte(), list.end_byte()),
            (None, Some(first), Some(last)) => (first.start_byte(), last.end_byte()),
            _ => (function.end_byte(), function.end_byte()),
        };
        let arguments = self.expressions(argument_nodes);
        let arguments = self.push(NodeKind::ArgumentList { arguments }, args_start, args_end);

        self.push_node(
            NodeKind::MethodCall {
                receiver,
                method,
                arguments,
            },
            node,
        )
    }

    /// Receiver and method name of a call target. A dotted target splits at
    /// its last segment; a bare name gets the implicit receiver.
    fn callee(&mut self, function: Node<'_>) -> (NodeId, NodeId) {
        let (start, end) = self.trim(function.start_byte(), function.end_byte());
        let text = self.slice(start, end);
        if looks_like_path(text)
            && let Some(dot) = text.rfind('.')
        {
            let receiver = self.path(start, start + dot);
            let (name_start, name_end) = self.trim(start + dot + 1, end);
            return (receiver, self.name(name_start, name_end));
        }
        let receiver = self.builder.implicit_this();
        (receiver, self.name(start, end))
    }

    fn closure(&mut self, node: Node<'_>) -> NodeId {
        let mut parameters = Vec::new();
        let mut body_nodes = Vec::new();
        for child in named_children(node) {
            if is(child, PARAMETER_LISTS) {
                for parameter in named_children(child) {
                    parameters.push(self.parameter(parameter));
                }
            } else if is(child, PARAMETERS) {
                parameters.push(self.parameter(child));
            } else {
                body_nodes.push(child);
            }
        }
        let statements = match body_nodes.as_slice() {
            [single] if is(*single, BLOCKS) => self.statements(named_children(*single)),
            _ => self.statements(body_nodes),
        };
        let body = self.push_node(NodeKind::Block { statements }, node);
        self.push_node(NodeKind::Closure { parameters, body }, node)
    }

    fn parameter(&mut self, node: Node<'_>) -> NodeId {
        let name = node.child_by_field_name("name").unwrap_or(node);
        let text = self.text(name).trim().to_string();
        self.push_node(NodeKind::Variable { name: text }, name)
    }

    fn string(&mut self, node: Node<'_>) -> NodeId {
        let raw = self.text(node);
        let style = LiteralStyle::of(raw);
        let value = style.unquote(raw).to_string();

        let mut parts = Vec::new();
        for child in named_children(node) {
            if is(child, INTERPOLATIONS) {
                let part = match named_children(child).as_slice() {
                    [inner] => self.expression(*inner),
                    _ => self.other(child),
                };
                parts.push(part);
            }
        }
        let kind = if parts.is_empty() {
            NodeKind::Constant { value, style }
        } else {
            NodeKind::GString { value, style, parts }
        };
        self.push_node(kind, node)
    }

    fn binary(&mut self, node: Node<'_>) -> NodeId {
        let children = named_children(node);
        let left = node.child_by_field_name("left").or_else(|| children.first().copied());
        let right = node.child_by_field_name("right").or_else(|| children.last().copied());
        let (Some(left), Some(right)) = (left, right) else {
            return self.other(node);
        };
        if left.id() == right.id() {
            return self.other(node);
        }
        let operator = match node.child_by_field_name("operator") {
            Some(operator) => self.text(operator).trim().to_string(),
            None => self.slice(left.end_byte(), right.start_byte()).trim().to_string(),
        };
        let left = self.expression(left);
        let right = self.expression(right);
        self.push_node(NodeKind::Binary { left, operator, right }, node)
    }

    fn declaration(&mut self, node: Node<'_>) -> NodeId {
        match declarators(node).as_deref() {
            Some([single]) => self.declarator(*single),
            Some(many) if !many.is_empty() => {
                let children = many.iter().map(|d| self.declarator(*d)).collect();
                let label = node.kind().to_string();
                self.push_node(NodeKind::Other { label, children }, node)
            }
            _ => self.other(node),
        }
    }

    /// `def name = value` reads as an assignment to `name`. A declarator
    /// without an initializer is just the variable.
    fn declarator(&mut self, node: Node<'_>) -> NodeId {
        let Some(name) = node.child_by_field_name("name") else {
            return self.other(node);
        };
        let variable = self.text(name).to_string();
        let left = self.push_node(NodeKind::Variable { name: variable }, name);
        let Some(value) = node.child_by_field_name("value") else {
            return left;
        };
        let right = self.expression(value);
        self.push(
            NodeKind::Binary {
                left,
                operator: "=".to_string(),
                right,
            },
            name.start_byte(),
            value.end_byte(),
        )
    }

    fn entry(&mut self, node: Node<'_>) -> NodeId {
        let children = named_children(node);
        let key = node.child_by_field_name("key").or_else(|| children.first().copied());
        let value = node.child_by_field_name("value").or_else(|| children.last().copied());
        let (Some(key), Some(value)) = (key, value) else {
            return self.other(node);
        };
        if key.id() == value.id() {
            return self.other(node);
        }
        let raw = self.text(key).trim_end_matches(':');
        let style = LiteralStyle::of(raw);
        let value_text = style.unquote(raw).to_string();
        let key = self.push(
            NodeKind::Constant {
                value: value_text,
                style,
            },
            key.start_byte(),
            key.start_byte() + raw.len(),
        );
        let value = self.expression(value);
        self.push_node(NodeKind::MapEntry { key, value }, node)
    }
}
