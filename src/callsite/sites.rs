//! Single-pass walk over a compilation unit yielding call sites.
//!
//! Every call expression in the tree is yielded exactly once. A call that
//! an assignment (or a bare expression statement) binds results for is
//! yielded as [`CallSite::Assigned`]; every other call is
//! [`CallSite::Plain`]. The callee and arguments of an assigned call are
//! still walked, so receivers in a chain and nested calls are not lost.

use crate::syntax::{Assign, CallExpr, CompilationUnit, Expr, Stmt};
use std::slice;

/// One classified call expression
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CallSite<'a> {
    /// Call whose results are not bound by a statement
    Plain(&'a CallExpr),

    /// Call whose results are bound to `targets` (empty when discarded)
    Assigned {
        call: &'a CallExpr,
        targets: &'a [Expr],
        /// Part of a multi-assignment pairing several calls
        combined: bool,
    },
}

impl<'a> CallSite<'a> {
    pub fn call(&self) -> &'a CallExpr {
        match *self {
            CallSite::Plain(call) => call,
            CallSite::Assigned { call, .. } => call,
        }
    }
}

enum Work<'a> {
    Stmt(&'a Stmt),
    Expr(&'a Expr),
    Site(CallSite<'a>),
}

/// Lazy iterator over the call sites of one unit
pub struct CallSites<'a> {
    stack: Vec<Work<'a>>,
}

impl<'a> CallSites<'a> {
    pub fn new(unit: &'a CompilationUnit) -> Self {
        let mut sites = Self { stack: Vec::new() };
        sites.push_stmts(&unit.stmts);
        sites
    }

    fn push_stmts(&mut self, stmts: &'a [Stmt]) {
        self.stack.extend(stmts.iter().rev().map(Work::Stmt));
    }

    fn push_exprs(&mut self, exprs: &'a [Expr]) {
        self.stack.extend(exprs.iter().rev().map(Work::Expr));
    }

    fn push_call_parts(&mut self, call: &'a CallExpr) {
        self.push_exprs(&call.args);
        self.stack.push(Work::Expr(&call.callee));
    }

    fn push_assign(&mut self, assign: &'a Assign) {
        let bindings = bind_assignment(assign);

        // Pushed in reverse so sites come out in source order: bound calls,
        // then the right-hand side, then the targets.
        self.push_exprs(&assign.lhs);
        for (index, expr) in assign.rhs.iter().enumerate().rev() {
            match bindings.iter().find(|b| b.rhs_index == index) {
                Some(binding) => self.push_call_parts(binding.call),
                None => self.stack.push(Work::Expr(expr)),
            }
        }
        for binding in bindings.into_iter().rev() {
            self.stack.push(Work::Site(CallSite::Assigned {
                call: binding.call,
                targets: binding.targets,
                combined: binding.combined,
            }));
        }
    }
}

impl<'a> Iterator for CallSites<'a> {
    type Item = CallSite<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(work) = self.stack.pop() {
            match work {
                Work::Site(site) => return Some(site),
                Work::Stmt(Stmt::Expr(Expr::Call(call))) => {
                    self.push_call_parts(call);
                    return Some(CallSite::Assigned {
                        call,
                        targets: &[],
                        combined: false,
                    });
                }
                Work::Stmt(Stmt::Expr(expr)) => self.stack.push(Work::Expr(expr)),
                Work::Stmt(Stmt::Assign(assign)) => self.push_assign(assign),
                Work::Stmt(Stmt::Block { exprs, stmts }) => {
                    self.push_stmts(stmts);
                    self.push_exprs(exprs);
                }
                Work::Expr(Expr::Call(call)) => {
                    self.push_call_parts(call);
                    return Some(CallSite::Plain(call));
                }
                Work::Expr(Expr::Selector { operand, .. }) => self.stack.push(Work::Expr(operand)),
                Work::Expr(Expr::FuncLit { body }) => self.push_stmts(body),
                Work::Expr(Expr::Other(children)) => self.push_exprs(children),
                Work::Expr(Expr::Ident(_)) => {}
            }
        }
        None
    }
}

struct Binding<'a> {
    rhs_index: usize,
    call: &'a CallExpr,
    targets: &'a [Expr],
    combined: bool,
}

/// Decide which right-hand calls an assignment binds results for.
///
/// A single call on the right owns every target. With several right-hand
/// expressions each call owns the target at its index; if the two sides
/// differ in length nothing is bound.
fn bind_assignment(assign: &Assign) -> Vec<Binding<'_>> {
    match assign.rhs.as_slice() {
        [] => Vec::new(),
        [single] => single
            .as_call()
            .map(|call| Binding {
                rhs_index: 0,
                call,
                targets: &assign.lhs,
                combined: false,
            })
            .into_iter()
            .collect(),
        rhs if rhs.len() != assign.lhs.len() => Vec::new(),
        rhs => rhs
            .iter()
            .zip(&assign.lhs)
            .enumerate()
            .filter_map(|(rhs_index, (expr, target))| {
                expr.as_call().map(|call| Binding {
                    rhs_index,
                    call,
                    targets: slice::from_ref(target),
                    combined: true,
                })
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(unit: &CompilationUnit) -> Vec<String> {
        CallSites::new(unit)
            .map(|site| match &site.call().callee {
                Expr::Ident(name) => name.clone(),
                Expr::Selector { field, .. } => field.clone(),
                _ => "?".to_string(),
            })
            .collect()
    }

    #[test]
    fn test_nested_calls_visited_once_each() {
        // x := f(g(a), h())
        let unit = CompilationUnit::new(
            "a.go",
            vec![Stmt::assign(
                vec![Expr::ident("x")],
                vec![Expr::call(
                    Expr::ident("f"),
                    vec![
                        Expr::call(Expr::ident("g"), vec![Expr::ident("a")]),
                        Expr::call(Expr::ident("h"), vec![]),
                    ],
                )],
            )],
        );

        let sites: Vec<_> = CallSites::new(&unit).collect();
        assert_eq!(sites.len(), 3);
        assert!(matches!(sites[0], CallSite::Assigned { combined: false, .. }));
        assert!(matches!(sites[1], CallSite::Plain(_)));
        assert!(matches!(sites[2], CallSite::Plain(_)));
        assert_eq!(names(&unit), vec!["f", "g", "h"]);
    }

    #[test]
    fn test_chain_receiver_is_plain() {
        // v := a.B().C()
        let chain = Expr::call(
            Expr::selector(Expr::call(Expr::selector(Expr::ident("a"), "B"), vec![]), "C"),
            vec![],
        );
        let unit = CompilationUnit::new("a.go", vec![Stmt::assign(vec![Expr::ident("v")], vec![chain])]);

        let sites: Vec<_> = CallSites::new(&unit).collect();
        assert_eq!(names(&unit), vec!["C", "B"]);
        assert!(matches!(sites[0], CallSite::Assigned { .. }));
        assert!(matches!(sites[1], CallSite::Plain(_)));
    }

    #[test]
    fn test_length_mismatch_falls_back_to_plain() {
        // a, b := f(), g(), h()
        let unit = CompilationUnit::new(
            "a.go",
            vec![Stmt::assign(
                vec![Expr::ident("a"), Expr::ident("b")],
                vec![
                    Expr::call(Expr::ident("f"), vec![]),
                    Expr::call(Expr::ident("g"), vec![]),
                    Expr::call(Expr::ident("h"), vec![]),
                ],
            )],
        );

        let sites: Vec<_> = CallSites::new(&unit).collect();
        assert_eq!(sites.len(), 3);
        assert!(sites.iter().all(|s| matches!(s, CallSite::Plain(_))));
    }

    #[test]
    fn test_calls_in_targets_and_closures_are_found() {
        // m[key()] = func() { run() }
        let unit = CompilationUnit::new(
            "a.go",
            vec![Stmt::assign(
                vec![Expr::Other(vec![
                    Expr::ident("m"),
                    Expr::call(Expr::ident("key"), vec![]),
                ])],
                vec![Expr::FuncLit {
                    body: vec![Stmt::Expr(Expr::call(Expr::ident("run"), vec![]))],
                }],
            )],
        );

        assert_eq!(names(&unit), vec!["run", "key"]);
    }
}
