//! Function identity.
//!
//! Identity is the simple callee name. Two functions sharing a name
//! (methods on different types, functions in different packages) are one
//! statistical subject.

use crate::syntax::{CallExpr, Expr};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies the function a call site is attributed to
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FuncId {
    pub function_name: String,
}

impl FuncId {
    pub fn new(function_name: impl Into<String>) -> Self {
        Self {
            function_name: function_name.into(),
        }
    }

    /// Resolve the identity of the outermost invoked function.
    ///
    /// `f(..)` is `f`, `x.M(..)` is `M` whatever `x` is, including another
    /// call in a chain. Other callee shapes resolve to `None`.
    pub fn from_call(call: &CallExpr) -> Option<FuncId> {
        let name = match &call.callee {
            Expr::Ident(name) => name,
            Expr::Selector { field, .. } => field,
            _ => return None,
        };
        if name.is_empty() {
            return None;
        }
        Some(FuncId::new(name.as_str()))
    }
}

impl fmt::Display for FuncId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.function_name)
    }
}
