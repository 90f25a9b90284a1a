// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! FIQ handler blob and installer.
//!
//! The handler is pre-assembled machine code placed in the image between a
//! start and an end symbol. Nothing here interprets its contents: the blob is
//! only measured, checked against the code space behind the FIQ vector, and
//! handed to the host.


use core::fmt;

use firq_abi::layout::FIQ_CODE_SPACE;
use tracing::{info, trace};

use crate::error::InstallError;
use crate::platform::InterruptHost;

/// Bytes per row of the handler hex dump.
pub const HEX_ROW_BYTES: usize = 16;

/// Identity under which the FIQ vector is claimed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandlerDescriptor {
    name: &'static str,
}

impl HandlerDescriptor {
    /// Name used when none is configured.
    pub const DEFAULT_NAME: &'static str = "fiqdemo";

    /// Create a descriptor with the given client name.
    #[inline]
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self { name }
    }

    /// Client name.
    #[inline]
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl Default for HandlerDescriptor {
    fn default() -> Self {
        Self::new(Self::DEFAULT_NAME)
    }
}

/// Opaque handler code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandlerBlob {
    code: &'static [u8],
}

impl HandlerBlob {
    /// Wrap handler code already available as a slice.
    #[inline]
    #[must_use]
    pub const fn new(code: &'static [u8]) -> Self {
        Self { code }
    }

    /// Build a blob from the start and end symbols bracketing the handler.
    ///
    /// # Errors
    ///
    /// Returns [`InstallError::Malformed`] if `end` precedes `start`. Equal
    /// symbols yield an empty blob, which [`validate`](Self::validate)
    /// rejects.
    ///
    /// # Safety
    ///
    /// `start..end` must be a single readable, immutable allocation that
    /// lives for the rest of the program.
    pub unsafe fn from_symbols(start: *const u8, end: *const u8) -> Result<Self, InstallError> {
        let len = (end as usize)
            .checked_sub(start as usize)
            .ok_or(InstallError::Malformed)?;
        if len == 0 {
            return Ok(Self::new(&[]));
        }
        // SAFETY: caller guarantees `start..end` is readable and 'static.
        let code = unsafe { core::slice::from_raw_parts(start, len) };
        Ok(Self::new(code))
    }

    /// Length in bytes.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.code.len()
    }

    /// Check if the blob has no code.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.code.is_empty()
    }

    /// The raw code bytes.
    #[inline]
    #[must_use]
    pub const fn as_bytes(&self) -> &'static [u8] {
        self.code
    }

    /// Check the blob is installable.
    ///
    /// # Errors
    ///
    /// [`InstallError::Empty`] for a zero-length blob,
    /// [`InstallError::TooLarge`] if it does not fit behind the FIQ vector.
    pub const fn validate(&self) -> Result<(), InstallError> {
        let len = self.code.len();
        if len == 0 {
            return Err(InstallError::Empty);
        }
        if len > FIQ_CODE_SPACE {
            return Err(InstallError::TooLarge { len });
        }
        Ok(())
    }

    /// Hex dump rows of [`HEX_ROW_BYTES`] bytes each.
    pub fn hex_rows(&self) -> impl Iterator<Item = HexRow> {
        self.code
            .chunks(HEX_ROW_BYTES)
            .enumerate()
            .map(|(index, bytes)| HexRow {
                offset: index * HEX_ROW_BYTES,
                bytes,
            })
    }
}

/// One row of a handler hex dump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexRow {
    /// Byte offset of the first byte in this row.
    pub offset: usize,
    /// Up to [`HEX_ROW_BYTES`] bytes.
    pub bytes: &'static [u8],
}

impl fmt::Display for HexRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}:", self.offset)?;
        for byte in self.bytes {
            write!(f, " {byte:02x}")?;
        }
        Ok(())
    }
}

/// Bind `blob` as the FIQ entry code.
///
/// The caller must already own the FIQ vector.
///
/// # Errors
///
/// Returns the validation error for an empty or oversized blob, and
/// [`InstallError::SlotOccupied`] if the host holds a different handler.
pub fn install<H: InterruptHost + ?Sized>(host: &H, blob: &HandlerBlob) -> Result<(), InstallError> {
    blob.validate()?;
    host.set_handler(blob).map_err(|_| InstallError::SlotOccupied)?;

    info!(
        start = ?blob.as_bytes().as_ptr(),
        size = blob.len(),
        "FIQ handler installed"
    );
    for row in blob.hex_rows() {
        trace!("{row}");
    }
    Ok(())
}
