// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Core type definitions for addresses, cores, and interrupt lines.
//!
//! These newtypes prevent accidentally mixing a core index with an
//! interrupt number, or a bus address with a mapped one.

mod addr;
mod id;

#[cfg(test)]
mod id_test;

pub use addr::{Paddr, Vaddr};
pub use id::{CoreId, CoreSet, CoreSetIter, IrqLine};
