// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Physical and virtual address types.
//!
//! These newtypes prevent accidentally mixing address types at compile time.
//! Both are 32 bits wide: they end up verbatim in 32-bit words of the shared
//! region, which the FIQ handler loads without any translation.

use core::fmt;
use core::ops::Add;

/// A physical (bus) address.
///
/// Physical addresses are what the SoC memory map documents. They're used for:
/// - Register window locations handed to the host's mapping routine
/// - The deployment [`MemoryMap`](crate::layout::MemoryMap)
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Paddr(u32);

impl Paddr {
    /// Create a new physical address.
    #[inline]
    #[must_use]
    pub const fn new(addr: u32) -> Self {
        Self(addr)
    }

    /// Get the raw address value.
    #[inline]
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// Add an offset to this address.
    #[inline]
    #[must_use]
    pub const fn add(self, offset: u32) -> Self {
        Self(self.0.wrapping_add(offset))
    }

    /// Check if this address is aligned to the given alignment.
    ///
    /// Returns `None` if alignment is zero or not a power of two.
    #[inline]
    #[must_use]
    pub const fn is_aligned(self, alignment: u32) -> Option<bool> {
        if !alignment.is_power_of_two() {
            return None;
        }
        Some((self.0 & (alignment - 1)) == 0)
    }
}

impl fmt::Debug for Paddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Paddr({:#010x})", self.0)
    }
}

impl fmt::Display for Paddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

impl From<u32> for Paddr {
    fn from(addr: u32) -> Self {
        Self(addr)
    }
}

impl Add<u32> for Paddr {
    type Output = Self;

    fn add(self, rhs: u32) -> Self::Output {
        self.add(rhs)
    }
}

/// A virtual address (CPU visible, after MMU translation).
///
/// A mapped register window is identified by its virtual base. The FIQ handler
/// runs with the MMU on, so the shared region stores virtual addresses of the
/// GIC CPU interface and the timer, and the banked FIQ `sp` holds the virtual
/// address of the shared region itself.
///
/// Zero is a valid value: it is an opaque handle, never a null check.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Vaddr(u32);

impl Vaddr {
    /// Create a new virtual address.
    #[inline]
    #[must_use]
    pub const fn new(addr: u32) -> Self {
        Self(addr)
    }

    /// Get the raw address value.
    #[inline]
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// Add an offset to this address.
    #[inline]
    #[must_use]
    pub const fn add(self, offset: u32) -> Self {
        Self(self.0.wrapping_add(offset))
    }
}

impl fmt::Debug for Vaddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vaddr({:#010x})", self.0)
    }
}

impl fmt::Display for Vaddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

impl From<u32> for Vaddr {
    fn from(addr: u32) -> Self {
        Self(addr)
    }
}

impl Add<u32> for Vaddr {
    type Output = Self;

    fn add(self, rhs: u32) -> Self::Output {
        self.add(rhs)
    }
}
