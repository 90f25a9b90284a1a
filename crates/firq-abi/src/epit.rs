// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Enhanced Periodic Interrupt Timer (EPIT) register map.
//!
//! The EPIT is a 32-bit down counter. With `RLD` set it reloads from `LR`
//! on reaching zero, so once started it keeps firing without any help from
//! software. The FIQ handler only clears `SR` on each expiry.
//!
//! # Register Map
//!
//! ```text
//! 0x00  CR    control
//! 0x04  SR    status (bit 0 OCIF, write 1 to clear)
//! 0x08  LR    load (reload value)
//! 0x0c  CMPR  compare
//! 0x10  CNR   counter (read-only)
//! ```

/// Control register offset.
pub const CR: usize = 0x00;

/// Status register offset.
pub const SR: usize = 0x04;

/// Load register offset.
pub const LR: usize = 0x08;

/// Compare register offset.
pub const CMPR: usize = 0x0c;

/// Counter register offset.
pub const CNR: usize = 0x10;

/// Size of the EPIT register block in bytes.
pub const REGISTER_BLOCK_SIZE: usize = 0x14;

/// Default reload value in native clock ticks.
pub const DEFAULT_PERIOD_TICKS: u32 = 0xffff;

/// Control register bits.
pub mod cr {
    /// Counter enable.
    pub const EN: u32 = 1 << 0;
    /// Enable mode: counter restarts from `LR` when enabled.
    pub const ENMOD: u32 = 1 << 1;
    /// Output compare interrupt enable.
    pub const OCIEN: u32 = 1 << 2;
    /// Reload from `LR` on reaching zero (set-and-forget mode).
    pub const RLD: u32 = 1 << 3;
    /// Keep counting in wait mode.
    pub const WAITEN: u32 = 1 << 19;
    /// Clock source field shift.
    pub const CLKSRC_SHIFT: u32 = 24;
    /// Clock source field mask.
    pub const CLKSRC_MASK: u32 = 0b11 << CLKSRC_SHIFT;
}

/// Status register bits.
pub mod sr {
    /// Output compare interrupt flag.
    pub const OCIF: u32 = 1 << 0;
}

/// EPIT clock source selection (`CR.CLKSRC`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum ClockSource {
    /// Clock disabled.
    Off = 0,
    /// Peripheral clock.
    Peripheral = 1,
    /// High-frequency reference clock.
    HighFrequency = 2,
    /// Low-frequency 32 kHz reference clock.
    LowFrequency = 3,
}

impl ClockSource {
    /// Clock source the deployed handler was tuned against (`CLKSRC = 2`).
    pub const DEPLOYED: Self = Self::HighFrequency;

    /// Returns the clock source bits positioned for `CR`.
    #[inline]
    #[must_use]
    pub const fn cr_bits(self) -> u32 {
        (self as u32) << cr::CLKSRC_SHIFT
    }

    /// Decodes the clock source from a `CR` value.
    #[inline]
    #[must_use]
    pub const fn from_cr(cr_value: u32) -> Self {
        match (cr_value & cr::CLKSRC_MASK) >> cr::CLKSRC_SHIFT {
            0 => Self::Off,
            1 => Self::Peripheral,
            2 => Self::HighFrequency,
            _ => Self::LowFrequency,
        }
    }
}

/// Control word for a free-running periodic interrupt from `source`.
///
/// Sets `EN`, `ENMOD`, `OCIEN`, `RLD`, `WAITEN` and the clock source.
/// Deployments select [`ClockSource::DEPLOYED`].
#[inline]
#[must_use]
pub const fn periodic_control(source: ClockSource) -> u32 {
    cr::EN | cr::ENMOD | cr::OCIEN | cr::RLD | cr::WAITEN | source.cr_bits()
}

const _: () = {
    assert!(CNR + 4 == REGISTER_BLOCK_SIZE);
    assert!(periodic_control(ClockSource::Off) & cr::CLKSRC_MASK == 0);
};

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn periodic_control_word() {
        // EN | ENMOD | OCIEN | RLD | WAITEN | CLKSRC=2
        assert_eq!(periodic_control(ClockSource::HighFrequency), 0x0208_000f);
        assert_eq!(periodic_control(ClockSource::LowFrequency), 0x0308_000f);
    }

    #[test]
    fn clock_source_round_trips_through_cr() {
        for source in [
            ClockSource::Off,
            ClockSource::Peripheral,
            ClockSource::HighFrequency,
            ClockSource::LowFrequency,
        ] {
            assert_eq!(ClockSource::from_cr(periodic_control(source)), source);
        }
    }

    #[test]
    fn clock_source_ignores_other_bits() {
        assert_eq!(ClockSource::from_cr(cr::EN | cr::RLD), ClockSource::Off);
    }
}
