//! Call-site analyzer: turns call sites into partial statistics.

use super::id::FuncId;
use super::repo::FuncCallSiteStatsRepo;
use super::sites::{CallSite, CallSites};
use super::stats::{single, FuncCallSiteStats, NameCount};
use crate::syntax::{CallExpr, CompilationUnit, Expr};
use crate::utils::config::DISCARD_IDENTIFIER;
use log::debug;
use rayon::prelude::*;

/// Collect statistics for every call site of one compilation unit.
///
/// Can be used in the CLI and in other static analysis tools.
/// Occurrences whose function cannot be identified are dropped.
pub fn collect_func_call_site_stats(unit: &CompilationUnit, repo: &mut FuncCallSiteStatsRepo) {
    let mut recorded = 0usize;
    let mut dropped = 0usize;

    for site in CallSites::new(unit) {
        match analyze_call_site(site) {
            Some((id, stats)) => {
                repo.add(id, &stats);
                recorded += 1;
            }
            None => dropped += 1,
        }
    }

    debug!(
        "{}: {} call sites recorded, {} unidentified",
        unit.path.display(),
        recorded,
        dropped
    );
}

/// Analyze independent units in parallel.
///
/// Each unit fills its own repository; the results are reduced with the
/// associative merge so the outcome does not depend on scheduling.
pub fn analyze_units(units: &[CompilationUnit]) -> FuncCallSiteStatsRepo {
    units
        .par_iter()
        .map(|unit| {
            let mut local = FuncCallSiteStatsRepo::new();
            collect_func_call_site_stats(unit, &mut local);
            local
        })
        .reduce(FuncCallSiteStatsRepo::new, FuncCallSiteStatsRepo::merged)
}

/// Classify one call site into its function and partial statistics
pub fn analyze_call_site(site: CallSite<'_>) -> Option<(FuncId, FuncCallSiteStats)> {
    let call = site.call();
    let id = FuncId::from_call(call)?;

    let mut stats = FuncCallSiteStats {
        call_count: 1,
        argument_name_count: argument_names(call),
        ..Default::default()
    };

    if let CallSite::Assigned {
        targets, combined, ..
    } = site
    {
        if targets.is_empty() {
            stats.return_ignored_count = 1;
        }
        if targets.len() > 1 {
            stats.multiple_assignment_count = 1;
        }
        if combined {
            stats.multiple_assignment_with_other_count = 1;
        }
        stats.return_name_count = target_names(targets);
    }

    Some((id, stats))
}

fn argument_names(call: &CallExpr) -> Vec<NameCount> {
    call.args
        .iter()
        .map(|arg| arg.as_ident().map(single).unwrap_or_default())
        .collect()
}

fn target_names(targets: &[Expr]) -> Vec<NameCount> {
    targets
        .iter()
        .map(|target| match target.as_ident() {
            Some(name) if name != DISCARD_IDENTIFIER => single(name),
            _ => NameCount::new(),
        })
        .collect()
}
