// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! EPIT driver used as a periodic FIQ source.
//!
//! The timer runs in set-and-forget mode: it counts down from the load value,
//! raises the compare interrupt, and reloads itself. Software never re-arms
//! it; the handler only acknowledges the status flag.


use firq_abi::epit::{self, cr, sr};
use firq_abi::{ClockSource, IrqLine};
use tracing::{debug, info};

use crate::error::{Fault, Resource};
use crate::platform::RegisterWindow;

/// An EPIT register block.
#[derive(Debug)]
pub struct PeriodicTimer<'w, W: ?Sized> {
    window: &'w W,
}

impl<'w, W: RegisterWindow + ?Sized> PeriodicTimer<'w, W> {
    /// Wrap the EPIT registers in `window`.
    ///
    /// # Errors
    ///
    /// Returns [`Fault::ResourceFault`] for [`Resource::Timer`] if the window
    /// does not cover the register block.
    pub fn new(window: &'w W) -> Result<Self, Fault> {
        if window.len() < epit::REGISTER_BLOCK_SIZE {
            return Err(Fault::ResourceFault(Resource::Timer));
        }
        Ok(Self { window })
    }

    /// Wrap a window that already passed [`new`](Self::new).
    pub(crate) fn from_checked(window: &'w W) -> Self {
        debug_assert!(window.len() >= epit::REGISTER_BLOCK_SIZE);
        Self { window }
    }

    /// Start counting `period_ticks` of `source` per interrupt on `line`.
    ///
    /// The load value and status are written both before and after enabling,
    /// so a compare event latched while reconfiguring is discarded.
    pub fn start(&self, line: IrqLine, period_ticks: u32, source: ClockSource) {
        let control = epit::periodic_control(source);

        self.window.write32(epit::CR, 0);
        self.window.write32(epit::LR, period_ticks);
        self.window.write32(epit::SR, sr::OCIF);
        self.window.write32(epit::CR, control);
        self.window.write32(epit::LR, period_ticks);
        self.window.write32(epit::SR, sr::OCIF);

        info!(
            base = %self.window.base(),
            %line,
            period_ticks,
            control,
            "periodic timer started"
        );
    }

    /// Stop counting. Only the enable bit is cleared.
    pub fn stop(&self) {
        self.window.modify32(epit::CR, |control| control & !cr::EN);
        debug!(
            base = %self.window.base(),
            clock = ?self.clock_source(),
            "periodic timer stopped"
        );
    }

    /// Clear a latched compare event.
    pub fn acknowledge(&self) {
        self.window.write32(epit::SR, sr::OCIF);
    }

    /// Check whether the counter is enabled.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.window.read32(epit::CR) & cr::EN != 0
    }

    /// Check whether a compare event is latched.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.window.read32(epit::SR) & sr::OCIF != 0
    }

    /// Current load value.
    #[must_use]
    pub fn period(&self) -> u32 {
        self.window.read32(epit::LR)
    }

    /// Clock source selected in the control register.
    #[must_use]
    pub fn clock_source(&self) -> ClockSource {
        ClockSource::from_cr(self.window.read32(epit::CR))
    }
}
