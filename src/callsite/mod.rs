//! Call-site statistics: extraction, aggregation and identity.
//!
//! The analyzer walks one compilation unit, classifies each call expression
//! and assignment statement, and adds one partial record per call site to a
//! [`FuncCallSiteStatsRepo`].
//!
//! # Example
//! ```ignore
//! let mut repo = FuncCallSiteStatsRepo::new();
//! for unit in &units {
//!     collect_func_call_site_stats(unit, &mut repo);
//! }
//! for (id, stats) in repo.ranked() {
//!     println!("{}: {}", id, stats.call_count);
//! }
//! ```

pub mod analyzer;
pub mod id;
pub mod repo;
pub mod sites;
pub mod stats;

// Re-export main types and functions
pub use analyzer::{analyze_call_site, analyze_units, collect_func_call_site_stats};
pub use id::FuncId;
pub use repo::FuncCallSiteStatsRepo;
pub use sites::{CallSite, CallSites};
pub use stats::{FuncCallSiteStats, NameCount};
