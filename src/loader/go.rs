//! Go source lowering using native tree-sitter.
//!
//! Parses Go code and lowers the concrete tree into the analyzer's
//! syntax model. Statement shapes the analyzer cares about become
//! `Stmt::Expr` / `Stmt::Assign`; everything else is kept as a generic
//! block so nested calls are still reached.
//!
//! Lowering runs on an explicit task stack: a node is planned into its
//! children, the children are lowered, then the node is rebuilt from their
//! results. Nesting depth (e.g. a long `a + b + c + ...` chain) therefore
//! never grows the thread stack.

use crate::syntax::{CompilationUnit, Expr, Stmt};
use crate::utils::error::LoadError;
use log::debug;
use std::fs;
use std::path::Path;
use tree_sitter::{Node, Parser};

/// Read and parse one Go file
///
/// # Errors
/// * `LoadError::ReadFailed` - File cannot be read
/// * `LoadError::SyntaxError` - File does not parse cleanly
pub fn load_go_file(path: &Path) -> Result<CompilationUnit, LoadError> {
    let source = fs::read_to_string(path).map_err(|source| LoadError::ReadFailed {
        path: path.to_path_buf(),
        source,
    })?;
    parse_go_source(&source, path)
}

/// Parse Go source text into a compilation unit
pub fn parse_go_source(source: &str, path: &Path) -> Result<CompilationUnit, LoadError> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_go::LANGUAGE.into())
        .map_err(|e| LoadError::ParserSetup(e.to_string()))?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| LoadError::ParserSetup("parser returned no tree".to_string()))?;

    let root = tree.root_node();
    if root.has_error() {
        return Err(LoadError::SyntaxError {
            path: path.to_path_buf(),
            line: first_error_line(root).unwrap_or(1),
        });
    }

    let lowering = Lowering {
        source: source.as_bytes(),
    };
    let stmts = named_children(root)
        .into_iter()
        .filter_map(|node| lowering.lower(node, Role::Stmt).and_then(Lowered::into_stmt))
        .collect();

    debug!("Parsed {}", path.display());

    Ok(CompilationUnit::new(path, stmts))
}

/// 1-based line of the first error or missing node
fn first_error_line(root: Node) -> Option<usize> {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.is_error() || node.is_missing() {
            return Some(node.start_position().row + 1);
        }
        let mut cursor = node.walk();
        let failing: Vec<Node> = node
            .children(&mut cursor)
            .filter(|child| child.has_error())
            .collect();
        stack.extend(failing.into_iter().rev());
    }
    None
}

/// Named children without comments; comments would shift argument positions
fn named_children(node: Node) -> Vec<Node> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| child.kind() != "comment")
        .collect()
}

/// Elements of an `expression_list` field (or the single expression)
fn field_list<'t>(node: Node<'t>, field: &str) -> Vec<Node<'t>> {
    match node.child_by_field_name(field) {
        Some(list) if list.kind() == "expression_list" => named_children(list),
        Some(single) => vec![single],
        None => Vec::new(),
    }
}

fn is_expression(kind: &str) -> bool {
    matches!(
        kind,
        "identifier" | "func_literal" | "composite_literal" | "expression_list"
    ) || kind.ends_with("_expression")
}

fn as_exprs(nodes: Vec<Node>) -> Vec<(Node, Role)> {
    nodes.into_iter().map(|node| (node, Role::Expr)).collect()
}

/// Which side of the model a node is lowered into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Stmt,
    Expr,
}

/// Result of lowering one node
enum Lowered {
    Stmt(Stmt),
    Expr(Expr),
}

impl Lowered {
    fn into_stmt(self) -> Option<Stmt> {
        match self {
            Lowered::Stmt(stmt) => Some(stmt),
            Lowered::Expr(_) => None,
        }
    }

    fn into_expr(self) -> Option<Expr> {
        match self {
            Lowered::Expr(expr) => Some(expr),
            Lowered::Stmt(_) => None,
        }
    }
}

/// How a node is rebuilt once its children are lowered
enum Shape {
    ExprStmt,
    /// The first `lhs` children are targets, the rest values
    Assign { lhs: usize },
    Block,
    Call { has_callee: bool },
    Selector { has_operand: bool, field: String },
    FuncLit,
    Other,
}

enum Plan<'t> {
    Leaf(Expr),
    Node(Shape, Vec<(Node<'t>, Role)>),
}

enum Task<'t> {
    Lower(Node<'t>, Role),
    Build(Shape, usize),
}

impl Shape {
    fn build(self, parts: Vec<Lowered>) -> Lowered {
        match self {
            Shape::ExprStmt => Lowered::Stmt(
                parts
                    .into_iter()
                    .find_map(Lowered::into_expr)
                    .map(Stmt::Expr)
                    .unwrap_or_else(|| Stmt::block(Vec::new())),
            ),
            Shape::Assign { lhs } => {
                let mut targets: Vec<Expr> =
                    parts.into_iter().filter_map(Lowered::into_expr).collect();
                let values = targets.split_off(lhs.min(targets.len()));
                Lowered::Stmt(Stmt::assign(targets, values))
            }
            Shape::Block => {
                let mut exprs = Vec::new();
                let mut stmts = Vec::new();
                for part in parts {
                    match part {
                        Lowered::Expr(expr) => exprs.push(expr),
                        Lowered::Stmt(stmt) => stmts.push(stmt),
                    }
                }
                Lowered::Stmt(Stmt::Block { exprs, stmts })
            }
            Shape::Call { has_callee } => {
                let mut exprs = parts.into_iter().filter_map(Lowered::into_expr);
                let callee = if has_callee { exprs.next() } else { None };
                Lowered::Expr(Expr::call(
                    callee.unwrap_or_else(Expr::opaque),
                    exprs.collect(),
                ))
            }
            Shape::Selector { has_operand, field } => {
                let operand = if has_operand {
                    parts.into_iter().find_map(Lowered::into_expr)
                } else {
                    None
                };
                Lowered::Expr(Expr::selector(operand.unwrap_or_else(Expr::opaque), field))
            }
            Shape::FuncLit => Lowered::Expr(Expr::FuncLit {
                body: parts.into_iter().filter_map(Lowered::into_stmt).collect(),
            }),
            Shape::Other => Lowered::Expr(Expr::Other(
                parts.into_iter().filter_map(Lowered::into_expr).collect(),
            )),
        }
    }
}

struct Lowering<'s> {
    source: &'s [u8],
}

impl Lowering<'_> {
    fn text(&self, node: Node) -> String {
        node.utf8_text(self.source).unwrap_or("").to_string()
    }

    /// Lower `node` and everything below it
    fn lower(&self, node: Node, role: Role) -> Option<Lowered> {
        let mut tasks = vec![Task::Lower(node, role)];
        let mut done: Vec<Lowered> = Vec::new();

        while let Some(task) = tasks.pop() {
            match task {
                Task::Lower(node, role) => {
                    let plan = match role {
                        Role::Stmt => self.stmt_plan(node),
                        Role::Expr => self.expr_plan(node),
                    };
                    match plan {
                        Plan::Leaf(expr) => done.push(Lowered::Expr(expr)),
                        Plan::Node(shape, children) => {
                            tasks.push(Task::Build(shape, children.len()));
                            tasks.extend(
                                children
                                    .into_iter()
                                    .rev()
                                    .map(|(child, role)| Task::Lower(child, role)),
                            );
                        }
                    }
                }
                Task::Build(shape, count) => {
                    let parts = done.split_off(done.len().saturating_sub(count));
                    done.push(shape.build(parts));
                }
            }
        }

        done.pop()
    }

    fn stmt_plan<'t>(&self, node: Node<'t>) -> Plan<'t> {
        match node.kind() {
            "expression_statement" => Plan::Node(
                Shape::ExprStmt,
                as_exprs(named_children(node).into_iter().take(1).collect()),
            ),
            "short_var_declaration" | "assignment_statement" => {
                assign_plan(field_list(node, "left"), field_list(node, "right"))
            }
            "var_spec" if node.child_by_field_name("value").is_some() => {
                let mut cursor = node.walk();
                let names: Vec<Node> = node.children_by_field_name("name", &mut cursor).collect();
                assign_plan(names, field_list(node, "value"))
            }
            _ => Plan::Node(
                Shape::Block,
                named_children(node)
                    .into_iter()
                    .map(|child| {
                        let role = if is_expression(child.kind()) {
                            Role::Expr
                        } else {
                            Role::Stmt
                        };
                        (child, role)
                    })
                    .collect(),
            ),
        }
    }

    fn expr_plan<'t>(&self, node: Node<'t>) -> Plan<'t> {
        match node.kind() {
            "identifier" | "blank_identifier" => Plan::Leaf(Expr::Ident(self.text(node))),
            "call_expression" => {
                let callee = node.child_by_field_name("function");
                let mut children: Vec<Node> = callee.into_iter().collect();
                if let Some(list) = node.child_by_field_name("arguments") {
                    children.extend(named_children(list));
                }
                Plan::Node(
                    Shape::Call {
                        has_callee: callee.is_some(),
                    },
                    as_exprs(children),
                )
            }
            "selector_expression" => {
                let operand = node.child_by_field_name("operand");
                let field = node
                    .child_by_field_name("field")
                    .map(|f| self.text(f))
                    .unwrap_or_default();
                Plan::Node(
                    Shape::Selector {
                        has_operand: operand.is_some(),
                        field,
                    },
                    as_exprs(operand.into_iter().collect()),
                )
            }
            "func_literal" => Plan::Node(
                Shape::FuncLit,
                node.child_by_field_name("body")
                    .into_iter()
                    .map(|body| (body, Role::Stmt))
                    .collect(),
            ),
            _ => Plan::Node(Shape::Other, as_exprs(named_children(node))),
        }
    }
}

fn assign_plan<'t>(lhs: Vec<Node<'t>>, rhs: Vec<Node<'t>>) -> Plan<'t> {
    let targets = lhs.len();
    let mut children = lhs;
    children.extend(rhs);
    Plan::Node(Shape::Assign { lhs: targets }, as_exprs(children))
}
