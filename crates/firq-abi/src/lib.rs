// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Shared layout definitions between the firq controller and the FIQ handler.
//!
//! The FIQ handler is a pre-assembled blob that runs with its own banked
//! registers and must not touch anything that could fault. Everything it
//! needs is staged by the controller at fixed offsets, and this crate is the
//! contract for those offsets:
//! - Address newtypes and core/interrupt-line identifiers
//! - Shared region layout (the block the banked FIQ `sp` points at)
//! - EPIT register map used to drive the interrupt periodically
//! - Banked FIQ register snapshot
//! - Deployment memory map
//!
//! # Design Principles
//!
//! - **No dependencies**: Pure data types, 100% host-testable
//! - **Stable layout**: The handler is compiled against these offsets, so
//!   every layout type is `#[repr(C)]` and checked at compile time
//! - **32-bit only**: The banked FIQ mode exists only on AArch32 cores
//!
//! # Modules
//!
//! - [`types`]: Address and ID types (`Paddr`, `Vaddr`, `CoreId`, `IrqLine`)
//! - [`layout`]: Shared region offsets, vector constants, memory map
//! - [`epit`]: Enhanced Periodic Interrupt Timer registers and control bits
//! - [`regs`]: Banked FIQ-mode register snapshot

#![no_std]

#[cfg(test)]
extern crate std;

pub mod epit;
pub mod layout;
pub mod regs;
pub mod types;

// Re-export commonly used types at crate root
pub use epit::ClockSource;
pub use layout::{MemoryMap, Region, SharedRegionLayout};
pub use regs::FiqRegisters;
pub use types::{CoreId, CoreSet, IrqLine, Paddr, Vaddr};
