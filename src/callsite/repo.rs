//! Repository of per-function statistics.

use super::id::FuncId;
use super::stats::FuncCallSiteStats;
use std::collections::BTreeMap;

/// Container mapping functions to their statistics.
///
/// Entries are created on first observation and only ever grow.
/// Writers need `&mut self`, so a snapshot borrowed through
/// [`get_all`](Self::get_all) can never observe a merge in progress.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FuncCallSiteStatsRepo {
    stats: BTreeMap<FuncId, FuncCallSiteStats>,
}

impl FuncCallSiteStatsRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add statistics for a function
    pub fn add(&mut self, id: FuncId, stats: &FuncCallSiteStats) {
        self.stats.entry(id).or_default().incr_by(stats);
    }

    /// Fold every record of `other` into this repository
    pub fn merge(&mut self, other: FuncCallSiteStatsRepo) {
        for (id, stats) in other.stats {
            match self.stats.get_mut(&id) {
                Some(existing) => existing.incr_by(&stats),
                None => {
                    self.stats.insert(id, stats);
                }
            }
        }
    }

    /// Combine two repositories, used as a parallel reduction step
    pub fn merged(mut self, other: FuncCallSiteStatsRepo) -> Self {
        if self.stats.len() < other.stats.len() {
            let mut other = other;
            other.merge(self);
            return other;
        }
        self.merge(other);
        self
    }

    /// All statistics objects
    pub fn get_all(&self) -> &BTreeMap<FuncId, FuncCallSiteStats> {
        &self.stats
    }

    pub fn get(&self, function_name: &str) -> Option<&FuncCallSiteStats> {
        self.stats.get(&FuncId::new(function_name))
    }

    pub fn len(&self) -> usize {
        self.stats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    /// Most called functions first, ties broken by name
    pub fn ranked(&self) -> Vec<(&FuncId, &FuncCallSiteStats)> {
        let mut entries: Vec<_> = self.stats.iter().collect();
        entries.sort_by(|(a_id, a), (b_id, b)| {
            b.call_count
                .cmp(&a.call_count)
                .then_with(|| a_id.cmp(b_id))
        });
        entries
    }
}

impl FromIterator<(FuncId, FuncCallSiteStats)> for FuncCallSiteStatsRepo {
    fn from_iter<I: IntoIterator<Item = (FuncId, FuncCallSiteStats)>>(iter: I) -> Self {
        let mut repo = Self::new();
        for (id, stats) in iter {
            repo.add(id, &stats);
        }
        repo
    }
}
