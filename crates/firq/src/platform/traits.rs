// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Platform abstraction traits.

use core::sync::atomic::{Ordering, fence};

use firq_abi::{CoreId, CoreSet, FiqRegisters, IrqLine, Vaddr};

use crate::error::Busy;
use crate::handler::{HandlerBlob, HandlerDescriptor};

/// A mapped window of 32-bit device registers or device memory.
///
/// All accesses are single, uncached, word-sized stores and loads at byte
/// offsets from [`base`](Self::base). Implementations bounds-check offsets in
/// debug builds.
pub trait RegisterWindow {
    /// Virtual base address of the window.
    fn base(&self) -> Vaddr;

    /// Length of the window in bytes.
    fn len(&self) -> usize;

    /// Check if the window is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read the 32-bit register at `offset`.
    fn read32(&self, offset: usize) -> u32;

    /// Write the 32-bit register at `offset`.
    fn write32(&self, offset: usize, value: u32);

    /// Read-modify-write the register at `offset`.
    fn modify32(&self, offset: usize, f: impl FnOnce(u32) -> u32) {
        let value = self.read32(offset);
        self.write32(offset, f(value));
    }

    /// Make all previous writes through this window visible to every core.
    fn barrier(&self) {
        fence(Ordering::SeqCst);
    }
}

/// The host's interrupt controller, as far as the FIQ is concerned.
pub trait InterruptHost {
    /// Claim exclusive ownership of the FIQ vector.
    ///
    /// # Errors
    ///
    /// Returns [`Busy`] if another client owns the vector.
    fn claim_vector(&self, descriptor: &HandlerDescriptor) -> Result<(), Busy>;

    /// Bind `handler` as the code executed on FIQ entry.
    ///
    /// # Errors
    ///
    /// Returns [`Busy`] if the slot holds a different handler.
    fn set_handler(&self, handler: &HandlerBlob) -> Result<(), Busy>;

    /// Give the FIQ vector back.
    fn release_vector(&self, descriptor: &HandlerDescriptor);

    /// Route `line` to the FIQ and unmask it at the distributor.
    fn enable_line(&self, line: IrqLine);

    /// Mask `line` at the distributor.
    fn disable_line(&self, line: IrqLine);

    /// Mask the FIQ on the calling core.
    fn mask_local(&self);

    /// Unmask the FIQ on the calling core.
    fn unmask_local(&self);
}

/// Core enumeration and forced-affinity execution.
pub trait CoreAffinity {
    /// All cores that may ever run, online or not.
    fn possible_cores(&self) -> CoreSet;

    /// The core executing the caller.
    fn current_core(&self) -> CoreId;

    /// Run `f` on `core` and wait for it to finish.
    fn run_on<R, F: FnOnce() -> R>(&self, core: CoreId, f: F) -> R;
}

/// Access to the calling core's banked FIQ-mode registers.
pub trait FiqBank {
    /// Snapshot the calling core's FIQ-mode registers.
    fn fiq_regs(&self) -> FiqRegisters;

    /// Load the calling core's FIQ-mode registers from `regs`.
    fn set_fiq_regs(&self, regs: &FiqRegisters);

    /// Set only the banked FIQ `sp` of the calling core.
    ///
    /// The default is a read-modify-write of the full snapshot. Platforms that
    /// can store `sp_fiq` directly should override this.
    fn set_fiq_sp(&self, sp: Vaddr) {
        let regs = self.fiq_regs();
        self.set_fiq_regs(&regs.with_sp(sp));
    }
}

/// Everything the lifecycle controller needs from the host.
pub trait Platform: InterruptHost + CoreAffinity + FiqBank {}

impl<T: InterruptHost + CoreAffinity + FiqBank> Platform for T {}
