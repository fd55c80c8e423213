//! Minimal syntax tree consumed by the call-site analyzer.
//!
//! Only the shapes the analyzer distinguishes are modelled: identifiers,
//! calls, selectors, function literals, expression statements and
//! assignments. Everything else is kept as an opaque node whose children
//! are still walked, so no call expression is lost.

use std::path::PathBuf;

/// One source file's tree, the unit of independent traversal
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompilationUnit {
    pub path: PathBuf,
    pub stmts: Vec<Stmt>,
}

impl CompilationUnit {
    pub fn new(path: impl Into<PathBuf>, stmts: Vec<Stmt>) -> Self {
        Self {
            path: path.into(),
            stmts,
        }
    }
}

// Long expression chains nest as deep as they are long; tear the tree down
// with an explicit stack so dropping a unit never recurses.
impl Drop for CompilationUnit {
    fn drop(&mut self) {
        let mut stmts = std::mem::take(&mut self.stmts);
        let mut exprs: Vec<Expr> = Vec::new();

        loop {
            if let Some(stmt) = stmts.pop() {
                match stmt {
                    Stmt::Expr(expr) => exprs.push(expr),
                    Stmt::Assign(Assign { lhs, rhs }) => {
                        exprs.extend(lhs);
                        exprs.extend(rhs);
                    }
                    Stmt::Block {
                        exprs: nested_exprs,
                        stmts: nested_stmts,
                    } => {
                        exprs.extend(nested_exprs);
                        stmts.extend(nested_stmts);
                    }
                }
            } else if let Some(expr) = exprs.pop() {
                match expr {
                    Expr::Call(call) => {
                        let CallExpr { callee, args } = *call;
                        exprs.push(callee);
                        exprs.extend(args);
                    }
                    Expr::Selector { operand, .. } => exprs.push(*operand),
                    Expr::FuncLit { body } => stmts.extend(body),
                    Expr::Other(children) => exprs.extend(children),
                    Expr::Ident(_) => {}
                }
            } else {
                break;
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// Expression evaluated for its effect, e.g. `foo(x)` on its own line
    Expr(Expr),

    /// `lhs... = rhs...`, `:=`, compound operators, `var` with initializer
    Assign(Assign),

    /// Any other statement or declaration
    Block { exprs: Vec<Expr>, stmts: Vec<Stmt> },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Assign {
    pub lhs: Vec<Expr>,
    pub rhs: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Ident(String),
    Call(Box<CallExpr>),
    Selector { operand: Box<Expr>, field: String },
    FuncLit { body: Vec<Stmt> },
    Other(Vec<Expr>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub callee: Expr,
    pub args: Vec<Expr>,
}

impl Expr {
    pub fn ident(name: impl Into<String>) -> Self {
        Expr::Ident(name.into())
    }

    pub fn call(callee: Expr, args: Vec<Expr>) -> Self {
        Expr::Call(Box::new(CallExpr { callee, args }))
    }

    pub fn selector(operand: Expr, field: impl Into<String>) -> Self {
        Expr::Selector {
            operand: Box::new(operand),
            field: field.into(),
        }
    }

    /// Opaque leaf: a literal or anything else without children
    pub fn opaque() -> Self {
        Expr::Other(Vec::new())
    }

    pub fn as_ident(&self) -> Option<&str> {
        match self {
            Expr::Ident(name) => Some(name),
            _ => None,
        }
    }

    pub fn as_call(&self) -> Option<&CallExpr> {
        match self {
            Expr::Call(call) => Some(call),
            _ => None,
        }
    }
}

impl Stmt {
    pub fn assign(lhs: Vec<Expr>, rhs: Vec<Expr>) -> Self {
        Stmt::Assign(Assign { lhs, rhs })
    }

    pub fn block(stmts: Vec<Stmt>) -> Self {
        Stmt::Block {
            exprs: Vec::new(),
            stmts,
        }
    }
}
