use super::keywords::DslKeyword;
use super::walker::AstVisitor;
use crate::ast::{Ast, NodeId, NodeKind};
use buildscope_api::{DocumentSymbol, SymbolKind};

const ASSIGNMENT_OPERATORS: &[&str] = &[
    "=", "+=", "-=", "*=", "/=", "%=", "**=", "<<=", ">>=", ">>>=", "&=", "|=", "^=", "?=",
];

/// Outline of one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolTable {
    /// One entry per recognized top-level statement, in source order.
    pub symbols: Vec<DocumentSymbol>,
    /// Declared dependencies of every top-level `dependencies` block.
    pub dependencies: Vec<DocumentSymbol>,
}

/// Builds the outline from the statements of the outermost block.
///
/// Statements that are neither a call nor an assignment to a variable or
/// property are skipped.
#[derive(Debug, Default)]
pub struct SymbolBuilder {
    table: SymbolTable,
}

impl SymbolBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn finish(self) -> SymbolTable {
        self.table
    }

    fn statement(&mut self, ast: &Ast, expression: NodeId) {
        let symbol = match ast.kind(expression) {
            NodeKind::MethodCall { .. } => self.call_symbol(ast, expression),
            NodeKind::Binary { left, operator, right } if ASSIGNMENT_OPERATORS.contains(&operator.as_str()) => {
                assignment_symbol(ast, *left, *right)
            }
            _ => None,
        };
        if let Some(symbol) = symbol {
            self.table.symbols.push(symbol);
        }
    }

    fn call_symbol(&mut self, ast: &Ast, call: NodeId) -> Option<DocumentSymbol> {
        let name = call_name(ast, call)?;
        let NodeKind::MethodCall { method, .. } = ast.kind(call) else {
            return None;
        };
        let mut symbol = DocumentSymbol::new(
            name,
            SymbolKind::Function,
            ast.span(call).to_range(),
            ast.span(*method).to_range(),
        );
        if DslKeyword::from_name(&symbol.name) == Some(DslKeyword::Dependencies) {
            let dependencies = dependencies_of(ast, call);
            self.table.dependencies.extend(dependencies.iter().cloned());
            symbol.children = dependencies;
        }
        Some(symbol)
    }
}

impl AstVisitor for SymbolBuilder {
    fn enter(&mut self, ast: &Ast, node: NodeId, parent: Option<NodeId>) {
        if parent.is_none() || parent != ast.root() {
            return;
        }
        if let NodeKind::ExpressionStatement { expression } = ast.kind(node) {
            self.statement(ast, *expression);
        }
    }
}

/// Outline name of a call.
///
/// Calls on the implicit receiver use the method name followed by the names
/// of calls among the arguments (`task hello`). Other calls use their source
/// text up to the argument list or closure, with whitespace removed.
pub fn call_name(ast: &Ast, call: NodeId) -> Option<String> {
    let NodeKind::MethodCall { receiver, .. } = ast.kind(call) else {
        return None;
    };
    if ast.is_this(*receiver) {
        let mut name = ast.method_name(call)?.to_string();
        for &argument in ast.call_arguments(call) {
            if matches!(ast.kind(argument), NodeKind::MethodCall { .. })
                && let Some(inner) = call_name(ast, argument)
            {
                name.push(' ');
                name.push_str(&inner);
            }
        }
        return Some(name);
    }
    let text = ast.text(call);
    let cut = text.find('(').or_else(|| text.find('{')).unwrap_or(text.len());
    let name: String = text[..cut].chars().filter(|c| !c.is_whitespace()).collect();
    (!name.is_empty()).then_some(name)
}

fn assignment_symbol(ast: &Ast, left: NodeId, right: NodeId) -> Option<DocumentSymbol> {
    let name = match ast.kind(left) {
        NodeKind::Variable { name } => name.clone(),
        NodeKind::Property { .. } => ast.text(left).to_string(),
        _ => return None,
    };
    let range = ast.span(left).to_range();
    let symbol = DocumentSymbol::new(name, SymbolKind::Property, range, range);
    Some(match ast.kind(right) {
        NodeKind::Constant { value, .. } => symbol.with_detail(value.clone()),
        _ => symbol,
    })
}

fn dependencies_of(ast: &Ast, call: NodeId) -> Vec<DocumentSymbol> {
    let mut symbols = Vec::new();
    for &argument in ast.call_arguments(call) {
        let NodeKind::Closure { body, .. } = ast.kind(argument) else {
            continue;
        };
        let NodeKind::Block { statements } = ast.kind(*body) else {
            continue;
        };
        for &statement in statements {
            if let NodeKind::ExpressionStatement { expression } = ast.kind(statement)
                && matches!(ast.kind(*expression), NodeKind::MethodCall { .. })
            {
                collect_declarations(ast, *expression, None, &mut symbols);
            }
        }
    }
    symbols
}

/// Literal arguments of a configuration call, descending into nested calls.
/// Nested calls inherit the outermost configuration name.
fn collect_declarations<'a>(
    ast: &'a Ast,
    call: NodeId,
    configuration: Option<&'a str>,
    out: &mut Vec<DocumentSymbol>,
) {
    let configuration = configuration.or_else(|| ast.method_name(call));
    for &argument in ast.call_arguments(call) {
        match ast.kind(argument) {
            NodeKind::Constant { value, style } | NodeKind::GString { value, style, .. } => {
                if value.trim().is_empty() {
                    continue;
                }
                let (leading, trailing) = style.delimiters();
                let range = ast.span(argument).trimmed_range(leading, trailing);
                let mut symbol = DocumentSymbol::new(value.clone(), SymbolKind::Constant, range, range);
                if let Some(configuration) = configuration {
                    symbol = symbol.with_detail(configuration);
                }
                out.push(symbol);
            }
            NodeKind::MethodCall { .. } => collect_declarations(ast, argument, configuration, out),
            _ => {}
        }
    }
}
