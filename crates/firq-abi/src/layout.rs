// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Shared region layout, FIQ vector constants, and the deployment memory map.
//!
//! The FIQ handler finds its data through the banked FIQ `sp`, which points at
//! the shared region. The region lives in on-chip RAM that is always mapped,
//! so the handler can load from it without ever taking a fault.
//!
//! # Shared Region (256 bytes)
//!
//! ```text
//! 0x00  GIC CPU interface base (virtual)
//! 0x04  Interrupt line number
//! 0x08  EPIT base (virtual)
//! 0x0c  zero
//!  ..   zero
//! 0xfc  zero
//! ```
//!
//! The handler blob is assembled against these offsets. Changing them breaks
//! every handler built so far.

use core::mem::{offset_of, size_of};

use crate::types::Paddr;

/// Width of one shared region word in bytes.
pub const WORD_SIZE: usize = 4;

/// Size of the shared region scratch block in bytes.
pub const SHARED_REGION_SIZE: usize = 0x100;

/// Number of words in the shared region.
pub const SHARED_REGION_WORDS: usize = SHARED_REGION_SIZE / WORD_SIZE;

/// Offset of the GIC CPU interface base address.
pub const GIC_CPU_BASE_OFFSET: usize = 0x0;

/// Offset of the interrupt line number.
pub const IRQ_LINE_OFFSET: usize = 0x4;

/// Offset of the EPIT base address.
pub const TIMER_BASE_OFFSET: usize = 0x8;

// =============================================================================
// FIQ Vector
// =============================================================================

/// Offset of the FIQ entry in the exception vector page.
///
/// FIQ is the last vector, so its handler code may run on past the vector
/// table instead of branching away.
pub const FIQ_VECTOR_OFFSET: usize = 0x1c;

/// End of the code space reserved for the FIQ handler in the vector page.
pub const FIQ_CODE_END: usize = 0x200;

/// Maximum size of an FIQ handler blob in bytes.
pub const FIQ_CODE_SPACE: usize = FIQ_CODE_END - FIQ_VECTOR_OFFSET;

// =============================================================================
// Shared Region Contents
// =============================================================================

/// Contents of the data words at the start of the shared region.
///
/// Field order matches the handler's load sequence: `ldmia sp, {r8-r10}`
/// leaves the GIC base in `r8`, the line in `r9`, and the EPIT base in `r10`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(C)]
pub struct SharedRegionLayout {
    /// Virtual base of the GIC CPU interface.
    pub gic_cpu_base: u32,
    /// Interrupt line driven by the timer.
    pub irq_line: u32,
    /// Virtual base of the EPIT.
    pub timer_base: u32,
}

impl SharedRegionLayout {
    /// Number of data words at the start of the region.
    pub const WORDS: usize = size_of::<Self>() / WORD_SIZE;

    /// Returns `(offset, value)` pairs in store order.
    #[inline]
    #[must_use]
    pub const fn fields(&self) -> [(usize, u32); Self::WORDS] {
        [
            (GIC_CPU_BASE_OFFSET, self.gic_cpu_base),
            (IRQ_LINE_OFFSET, self.irq_line),
            (TIMER_BASE_OFFSET, self.timer_base),
        ]
    }

    /// Checks whether `offset` is the offset of a data word.
    #[inline]
    #[must_use]
    pub const fn is_field_offset(offset: usize) -> bool {
        offset == GIC_CPU_BASE_OFFSET || offset == IRQ_LINE_OFFSET || offset == TIMER_BASE_OFFSET
    }
}

// =============================================================================
// Deployment Memory Map
// =============================================================================

/// A physical register window: base address and length.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    /// Physical base address.
    pub base: Paddr,
    /// Length in bytes.
    pub size: u32,
}

impl Region {
    /// Creates a region.
    #[inline]
    #[must_use]
    pub const fn new(base: u32, size: u32) -> Self {
        Self {
            base: Paddr::new(base),
            size,
        }
    }

    /// One past the last byte of the region.
    #[inline]
    #[must_use]
    pub const fn end(&self) -> Paddr {
        self.base.add(self.size)
    }
}

/// Physical locations of the three register windows the controller needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MemoryMap {
    /// GIC CPU interface.
    pub gic_cpu: Region,
    /// Always-mapped scratch memory holding the shared region.
    pub shared: Region,
    /// EPIT instance driving the interrupt.
    pub timer: Region,
}

impl MemoryMap {
    /// i.MX6: GIC CPU interface, OCRAM, EPIT2.
    pub const IMX6: Self = Self {
        gic_cpu: Region::new(0x00a0_0100, 0x100),
        shared: Region::new(0x0094_0000, 0x1000),
        timer: Region::new(0x020d_4000, 0x4000),
    };
}

// Compile-time verification of the handler-facing layout
const _: () = {
    assert!(offset_of!(SharedRegionLayout, gic_cpu_base) == GIC_CPU_BASE_OFFSET);
    assert!(offset_of!(SharedRegionLayout, irq_line) == IRQ_LINE_OFFSET);
    assert!(offset_of!(SharedRegionLayout, timer_base) == TIMER_BASE_OFFSET);
    assert!(size_of::<SharedRegionLayout>() <= SHARED_REGION_SIZE);
    assert!(SHARED_REGION_SIZE % WORD_SIZE == 0);
    assert!(FIQ_VECTOR_OFFSET < FIQ_CODE_END);
    assert!(MemoryMap::IMX6.shared.size as usize >= SHARED_REGION_SIZE);
};
