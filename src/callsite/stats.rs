//! Per-function call-site statistics and their merge rule.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Name -> occurrences at one argument or return position
pub type NameCount = BTreeMap<String, u64>;

/// Aggregated details about the call sites of one function
///
/// Merging with [`FuncCallSiteStats::incr_by`] is commutative and
/// associative, so partial records can be combined in any order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuncCallSiteStats {
    pub call_count: u64,

    /// One map per argument position
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub argument_name_count: Vec<NameCount>,

    /// One map per assignment target position
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub return_name_count: Vec<NameCount>,

    pub return_ignored_count: u64,
    pub multiple_assignment_count: u64,
    pub multiple_assignment_with_other_count: u64,
}

impl FuncCallSiteStats {
    /// Increments current object by values from other statistics object
    pub fn incr_by(&mut self, from: &FuncCallSiteStats) {
        add_slice_count_map(&mut self.argument_name_count, &from.argument_name_count);
        add_slice_count_map(&mut self.return_name_count, &from.return_name_count);
        self.call_count += from.call_count;
        self.return_ignored_count += from.return_ignored_count;
        self.multiple_assignment_count += from.multiple_assignment_count;
        self.multiple_assignment_with_other_count += from.multiple_assignment_with_other_count;
    }

    /// Largest number of distinct names seen at any position
    pub fn max_distinct_names(&self) -> usize {
        self.argument_name_count
            .iter()
            .chain(&self.return_name_count)
            .map(BTreeMap::len)
            .max()
            .unwrap_or(0)
    }
}

fn add_slice_count_map(to: &mut Vec<NameCount>, from: &[NameCount]) {
    if to.len() < from.len() {
        to.resize_with(from.len(), NameCount::new);
    }
    for (dst, src) in to.iter_mut().zip(from) {
        add_count_map(dst, src);
    }
}

fn add_count_map(to: &mut NameCount, from: &NameCount) {
    for (name, count) in from {
        *to.entry(name.clone()).or_insert(0) += count;
    }
}

/// Build a single-name map, the contribution of one call site at one position
pub fn single(name: &str) -> NameCount {
    NameCount::from([(name.to_string(), 1)])
}
