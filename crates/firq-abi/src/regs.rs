// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Banked FIQ-mode register snapshot.
//!
//! FIQ mode banks `r8`-`r14` on every core. The controller only ever
//! changes `sp`, pointing it at the shared region so the handler can reach its
//! data with a single `ldmia sp`.

use crate::types::Vaddr;

/// Register state private to FIQ mode on one core.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(C)]
pub struct FiqRegisters {
    /// Banked `r8`-`r12`.
    pub r8_r12: [u32; 5],
    /// Banked stack pointer (`r13_fiq`).
    pub sp: u32,
    /// Banked link register (`r14_fiq`).
    pub lr: u32,
}

impl FiqRegisters {
    /// Returns a copy with only `sp` replaced.
    #[inline]
    #[must_use]
    pub const fn with_sp(self, sp: Vaddr) -> Self {
        Self {
            sp: sp.as_u32(),
            ..self
        }
    }

    /// Returns the banked stack pointer as an address.
    #[inline]
    #[must_use]
    pub const fn sp(&self) -> Vaddr {
        Vaddr::new(self.sp)
    }
}
