// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Per-core FIQ register bootstrap.
//!
//! Must run on the core being bootstrapped: the banked registers are only
//! reachable from that core.

#[cfg(test)]
mod bootstrap_test;

use firq_abi::{CoreId, Vaddr};
use tracing::trace;

use crate::platform::{CoreAffinity, FiqBank};

/// Outcome of bootstrapping one core. Only lives for one dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoreBootstrapRecord {
    /// Core that ran the bootstrap.
    pub core: CoreId,
    /// The banked FIQ `sp` reads back as the shared region address.
    pub sp_set: bool,
}

/// Point the calling core's banked FIQ `sp` at `shared`.
///
/// All other banked registers keep their values.
pub fn bootstrap_this_core<P>(platform: &P, shared: Vaddr) -> CoreBootstrapRecord
where
    P: CoreAffinity + FiqBank + ?Sized,
{
    let core = platform.current_core();
    platform.set_fiq_sp(shared);
    let sp_set = platform.fiq_regs().sp() == shared;
    trace!(%core, sp = %shared, sp_set, "FIQ sp bootstrapped");
    CoreBootstrapRecord { core, sp_set }
}
