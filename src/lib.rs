//! Call-Site Stats
//!
//! Aggregate statistics of how each function in a Go codebase is called:
//! how often, which identifier names appear at each argument position,
//! how results are bound (named, discarded, spread over several targets),
//! and how often a call shares one assignment with other calls.
//!
//! This crate provides the core implementation for the
//! `callsite-stats` CLI tool.
//!
//! ## Getting Started
//!
//! ```bash
//! callsite-stats collect ./...
//! callsite-stats collect ./... --format text
//! ```
//!
//! Library users can skip the loader and feed syntax trees directly:
//!
//! ```ignore
//! use callsite_stats::callsite::{collect_func_call_site_stats, FuncCallSiteStatsRepo};
//!
//! let mut repo = FuncCallSiteStatsRepo::new();
//! collect_func_call_site_stats(&unit, &mut repo);
//! let snapshot = repo.get_all();
//! ```
//!
//! Functions are identified by simple name only, so two functions sharing
//! a name are counted as one.

pub mod callsite;
pub mod commands;
pub mod loader;
pub mod output;
pub mod render;
pub mod syntax;
pub mod utils;
