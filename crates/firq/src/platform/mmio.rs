// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Volatile register window over mapped device memory.
//!
//! The host maps the physical window (its `ioremap`) and hands the resulting
//! pointer to [`MmioWindow::new`]. Every access is a single volatile word
//! load or store; nothing is cached or combined.

use core::ptr::NonNull;

use firq_abi::Vaddr;

use super::traits::RegisterWindow;

/// A mapped window of device registers.
pub struct MmioWindow {
    ptr: NonNull<u32>,
    len: usize,
}

impl MmioWindow {
    /// Wrap a mapped window of `len` bytes starting at `ptr`.
    ///
    /// # Safety
    ///
    /// `ptr` must be word-aligned and valid for volatile reads and writes of
    /// `len` bytes for as long as the window exists, and nothing else may
    /// treat that memory as ordinary Rust memory.
    #[must_use]
    pub const unsafe fn new(ptr: NonNull<u32>, len: usize) -> Self {
        Self { ptr, len }
    }

    fn word_ptr(&self, offset: usize) -> *mut u32 {
        debug_assert!(offset % 4 == 0, "unaligned register offset {offset:#x}");
        debug_assert!(
            offset.checked_add(4).is_some_and(|end| end <= self.len),
            "register offset {offset:#x} beyond window of {:#x} bytes",
            self.len
        );
        self.ptr.as_ptr().wrapping_byte_add(offset)
    }
}

impl RegisterWindow for MmioWindow {
    fn base(&self) -> Vaddr {
        // Target addresses are 32 bits wide
        Vaddr::new(self.ptr.as_ptr() as usize as u32)
    }

    fn len(&self) -> usize {
        self.len
    }

    fn read32(&self, offset: usize) -> u32 {
        // SAFETY: `new` guarantees the window is mapped and word-aligned.
        unsafe { self.word_ptr(offset).read_volatile() }
    }

    fn write32(&self, offset: usize, value: u32) {
        // SAFETY: `new` guarantees the window is mapped and word-aligned.
        unsafe { self.word_ptr(offset).write_volatile(value) }
    }

    #[cfg(target_arch = "arm")]
    fn barrier(&self) {
        super::arm::dmb();
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn volatile_read_write() {
        let mut backing = [0u32; 8];
        let window = unsafe { MmioWindow::new(NonNull::from(&mut backing).cast(), 32) };

        window.write32(0x4, 0xdead_beef);
        window.modify32(0x4, |v| v & 0xffff);
        assert_eq!(window.read32(0x4), 0xbeef);
        assert_eq!(window.read32(0x0), 0);
        assert_eq!(window.len(), 32);
        assert!(!window.is_empty());
        window.barrier();

        drop(window);
        assert_eq!(backing[1], 0xbeef);
    }

    #[test]
    #[should_panic(expected = "beyond window")]
    #[cfg(debug_assertions)]
    fn out_of_bounds_write_is_caught_in_debug() {
        let mut backing = [0u32; 4];
        let window = unsafe { MmioWindow::new(NonNull::from(&mut backing).cast(), 16) };
        window.write32(0x10, 1);
    }
}
