// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Cross-core dispatch.
//!
//! Runs an operation on every possible core, one core at a time, waiting for
//! each to finish before moving on. Offline cores are included: a core that
//! comes up later must find its FIQ registers already in place.


use firq_abi::Vaddr;
use tracing::{info, warn};

use crate::bootstrap::{CoreBootstrapRecord, bootstrap_this_core};
use crate::platform::{CoreAffinity, FiqBank};

/// Result of one pass over all cores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatchSummary {
    /// Cores the operation ran on.
    pub visited: usize,
    /// Cores that reported a bootstrapped `sp`.
    pub bootstrapped: usize,
}

impl DispatchSummary {
    /// Check whether every visited core was bootstrapped.
    #[inline]
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.visited == self.bootstrapped
    }
}

/// Run `op` with forced affinity on each possible core in turn.
///
/// A record only counts as bootstrapped if it came from the core it was
/// dispatched to.
pub fn run_on_all_cores<P, F>(platform: &P, mut op: F) -> DispatchSummary
where
    P: CoreAffinity + ?Sized,
    F: FnMut() -> CoreBootstrapRecord,
{
    let mut summary = DispatchSummary::default();
    for core in platform.possible_cores() {
        let record = platform.run_on(core, &mut op);
        summary.visited += 1;
        if record.core != core {
            warn!(%core, ran_on = %record.core, "bootstrap ran on the wrong core");
        } else if record.sp_set {
            summary.bootstrapped += 1;
        } else {
            warn!(%core, "FIQ sp did not stick");
        }
    }
    summary
}

/// Bootstrap the banked FIQ `sp` of every possible core.
pub fn bootstrap_all_cores<P>(platform: &P, shared: Vaddr) -> DispatchSummary
where
    P: CoreAffinity + FiqBank + ?Sized,
{
    let summary = run_on_all_cores(platform, || bootstrap_this_core(platform, shared));
    info!(
        visited = summary.visited,
        bootstrapped = summary.bootstrapped,
        sp = %shared,
        "FIQ registers set up on all cores"
    );
    summary
}
