// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! AArch32 primitives for hosts implementing the platform traits.
//!
//! The banked FIQ registers can only be reached by switching the core into
//! FIQ mode. All mode switches here run with IRQ and FIQ masked and restore
//! the caller's `cpsr` before returning. Operands are pinned to `r0`-`r2`
//! because `r8`-`r12` are themselves banked in FIQ mode.

use core::arch::asm;

use firq_abi::{FiqRegisters, Vaddr};

use super::traits::FiqBank;

/// `cpsr` control field for FIQ mode with IRQ and FIQ masked.
const FIQ_MODE_MASKED: u32 = 0x11 | 0x40 | 0x80;

/// Data memory barrier.
#[inline]
pub fn dmb() {
    // SAFETY: barrier only, no register or memory side effects.
    unsafe { asm!("dmb", options(nostack, preserves_flags)) }
}

/// Mask the FIQ on the calling core.
#[inline]
pub fn local_fiq_disable() {
    // SAFETY: only sets `cpsr.F`; memory accesses must not move across it.
    unsafe { asm!("cpsid f", options(nostack, preserves_flags)) }
}

/// Unmask the FIQ on the calling core.
#[inline]
pub fn local_fiq_enable() {
    // SAFETY: only clears `cpsr.F`; memory accesses must not move across it.
    unsafe { asm!("cpsie f", options(nostack, preserves_flags)) }
}

/// Banked FIQ register access on the calling core.
#[derive(Debug, Default, Clone, Copy)]
pub struct ArmFiqBank;

impl FiqBank for ArmFiqBank {
    fn fiq_regs(&self) -> FiqRegisters {
        let mut regs = FiqRegisters::default();
        let ptr: *mut FiqRegisters = &mut regs;
        // SAFETY: `ptr` is valid for the 28 bytes of `FiqRegisters`; the
        // banked registers are only read, and `cpsr` is restored.
        unsafe {
            asm!(
                "mrs r2, cpsr",
                "msr cpsr_c, r1",
                "stmia r0!, {{r8-r12}}",
                "str sp, [r0], #4",
                "str lr, [r0], #4",
                "msr cpsr_c, r2",
                inout("r0") ptr => _,
                in("r1") FIQ_MODE_MASKED,
                out("r2") _,
                options(nostack),
            );
        }
        regs
    }

    fn set_fiq_regs(&self, regs: &FiqRegisters) {
        let ptr: *const FiqRegisters = regs;
        // SAFETY: only the FIQ-banked `r8`-`r14` change, and `cpsr` is
        // restored before any code that uses them runs.
        unsafe {
            asm!(
                "mrs r2, cpsr",
                "msr cpsr_c, r1",
                "ldmia r0!, {{r8-r12}}",
                "ldr sp, [r0], #4",
                "ldr lr, [r0], #4",
                "msr cpsr_c, r2",
                inout("r0") ptr => _,
                in("r1") FIQ_MODE_MASKED,
                out("r2") _,
                options(nostack, readonly),
            );
        }
    }

    fn set_fiq_sp(&self, sp: Vaddr) {
        // Direct store, no snapshot round trip.
        // SAFETY: only `sp_fiq` changes, and `cpsr` is restored.
        unsafe {
            asm!(
                "mrs r2, cpsr",
                "msr cpsr_c, r1",
                "mov sp, r0",
                "msr cpsr_c, r2",
                in("r0") sp.as_u32(),
                in("r1") FIQ_MODE_MASKED,
                out("r2") _,
                options(nomem, nostack),
            );
        }
    }
}
