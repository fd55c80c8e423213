//! Human-readable rendering of call-site statistics.
//!
//! Each function becomes a block of aligned rows:
//! `x<calls>:  <return names>  = <name>(<argument names>)`

pub mod table;
pub mod text;

// Re-export main types
pub use text::{rank_names, render_to_string, TextRenderer};
