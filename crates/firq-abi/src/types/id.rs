// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! ID types for processor cores and interrupt lines.

use core::fmt;

/// Index of a processor core.
///
/// Cores are numbered from 0 by the host, matching the logical CPU numbers
/// the host uses for affinity requests.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct CoreId(u8);

impl CoreId {
    /// The boot core.
    pub const BOOT: Self = Self(0);

    /// Creates a core ID, or `None` if the index exceeds [`CoreSet::MAX_CORES`].
    #[inline]
    #[must_use]
    pub const fn new(index: u8) -> Option<Self> {
        if (index as usize) < CoreSet::MAX_CORES {
            Some(Self(index))
        } else {
            None
        }
    }

    /// Returns the raw core index.
    #[inline]
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self.0
    }

    /// Returns the raw core index widened to `usize`.
    #[inline]
    #[must_use]
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for CoreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CoreId({})", self.0)
    }
}

impl fmt::Display for CoreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cpu{}", self.0)
    }
}

/// Set of processor cores, as a bitmask.
///
/// The host reports its possible cores as a `CoreSet`; the dispatcher walks it
/// in ascending order.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct CoreSet(u32);

impl CoreSet {
    /// Maximum number of cores a set can describe.
    pub const MAX_CORES: usize = 32;

    /// The empty set.
    pub const EMPTY: Self = Self(0);

    /// Creates a set from a raw bitmask (bit `n` set means core `n` present).
    #[inline]
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Creates the set of cores `0..count`.
    ///
    /// Counts above [`Self::MAX_CORES`] saturate.
    #[inline]
    #[must_use]
    pub const fn first(count: usize) -> Self {
        if count >= Self::MAX_CORES {
            Self(u32::MAX)
        } else {
            Self((1u32 << (count as u32)) - 1)
        }
    }

    /// Returns the raw bitmask.
    #[inline]
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Returns a copy of this set with `core` added.
    #[inline]
    #[must_use]
    pub const fn with(self, core: CoreId) -> Self {
        Self(self.0 | (1u32 << (core.0 as u32)))
    }

    /// Checks whether `core` is in the set.
    #[inline]
    #[must_use]
    pub const fn contains(self, core: CoreId) -> bool {
        self.0 & (1u32 << (core.0 as u32)) != 0
    }

    /// Number of cores in the set.
    #[inline]
    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Checks whether the set is empty.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterates over the cores in ascending order.
    #[inline]
    #[must_use]
    pub const fn iter(self) -> CoreSetIter {
        CoreSetIter { remaining: self.0 }
    }
}

impl fmt::Debug for CoreSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl IntoIterator for CoreSet {
    type Item = CoreId;
    type IntoIter = CoreSetIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Ascending iterator over a [`CoreSet`].
#[derive(Clone, Debug)]
pub struct CoreSetIter {
    remaining: u32,
}

impl Iterator for CoreSetIter {
    type Item = CoreId;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let index = self.remaining.trailing_zeros();
        self.remaining &= self.remaining - 1;
        // trailing_zeros of a non-zero u32 is below 32
        Some(CoreId(index as u8))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.remaining.count_ones() as usize;
        (len, Some(len))
    }
}

impl ExactSizeIterator for CoreSetIter {}

/// Interrupt line number as known to the interrupt controller.
///
/// Stored verbatim in the shared region so the FIQ handler can acknowledge
/// the interrupt at the GIC CPU interface.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct IrqLine(u32);

impl IrqLine {
    /// Creates an interrupt line ID.
    #[inline]
    #[must_use]
    pub const fn new(line: u32) -> Self {
        Self(line)
    }

    /// Converts a host-style IRQ lookup result, where a negative value means
    /// "no interrupt defined".
    #[inline]
    #[must_use]
    pub const fn from_host(raw: i32) -> Option<Self> {
        if raw < 0 { None } else { Some(Self(raw as u32)) }
    }

    /// Returns the raw line number.
    #[inline]
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for IrqLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IrqLine({})", self.0)
    }
}

impl fmt::Display for IrqLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "irq{}", self.0)
    }
}
