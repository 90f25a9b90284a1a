// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Shared region provisioning.
//!
//! The banked FIQ `sp` of every core points at this block, so the handler
//! reaches its data with a single `ldmia sp` and never touches memory that
//! could fault. The block is erased and written once before any core is
//! bootstrapped, and only read afterwards.

#[cfg(test)]
mod region_test;

use firq_abi::SharedRegionLayout;
use firq_abi::layout::{
    GIC_CPU_BASE_OFFSET, IRQ_LINE_OFFSET, SHARED_REGION_SIZE, TIMER_BASE_OFFSET, WORD_SIZE,
};
use tracing::debug;

use crate::error::{Fault, Resource};
use crate::platform::RegisterWindow;
use crate::resources::DeviceResources;

/// The layout the handler expects for `resources`.
#[must_use]
pub fn layout_for<W: RegisterWindow>(resources: &DeviceResources<W>) -> SharedRegionLayout {
    SharedRegionLayout {
        gic_cpu_base: resources.gic_cpu().base().as_u32(),
        irq_line: resources.line().as_u32(),
        timer_base: resources.timer().base().as_u32(),
    }
}

/// Erase the shared region in `window` and store `layout` into it.
///
/// Every word of the block is zeroed first, then the fields are stored in
/// offset order, then a barrier makes the block visible to all cores.
///
/// # Errors
///
/// Returns [`Fault::ResourceFault`] for [`Resource::SharedRegion`] if the
/// window cannot hold the block. Nothing is written in that case.
pub fn write_layout<W: RegisterWindow + ?Sized>(
    window: &W,
    layout: &SharedRegionLayout,
) -> Result<(), Fault> {
    if window.len() < SHARED_REGION_SIZE {
        return Err(Fault::ResourceFault(Resource::SharedRegion));
    }

    for offset in (0..SHARED_REGION_SIZE).step_by(WORD_SIZE) {
        window.write32(offset, 0);
    }
    for (offset, value) in layout.fields() {
        window.write32(offset, value);
    }
    window.barrier();

    debug!(
        base = %window.base(),
        gic = layout.gic_cpu_base,
        line = layout.irq_line,
        timer = layout.timer_base,
        "shared region provisioned"
    );
    Ok(())
}

/// Provision the shared region from resolved resources.
///
/// # Errors
///
/// See [`write_layout`].
pub fn provision<W: RegisterWindow>(resources: &DeviceResources<W>) -> Result<(), Fault> {
    write_layout(resources.shared(), &layout_for(resources))
}

/// Read the layout fields back as stored.
#[must_use]
pub fn read_back<W: RegisterWindow + ?Sized>(window: &W) -> SharedRegionLayout {
    SharedRegionLayout {
        gic_cpu_base: window.read32(GIC_CPU_BASE_OFFSET),
        irq_line: window.read32(IRQ_LINE_OFFSET),
        timer_base: window.read32(TIMER_BASE_OFFSET),
    }
}
