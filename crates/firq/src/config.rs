// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Controller configuration.
//!
//! Everything the host injects besides the hardware resources. Addresses are
//! not configured here; they come from [`firq_abi::MemoryMap`] through the
//! host's mapping.

use firq_abi::ClockSource;
use firq_abi::epit::DEFAULT_PERIOD_TICKS;

use crate::handler::{HandlerBlob, HandlerDescriptor};

/// Injected controller settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FiqConfig {
    /// Name under which the FIQ vector is claimed.
    pub descriptor: HandlerDescriptor,
    /// Handler code bound to the vector.
    pub handler: HandlerBlob,
    /// Timer load value in native clock ticks.
    pub period_ticks: u32,
    /// Timer clock source.
    pub clock: ClockSource,
}

impl FiqConfig {
    /// Defaults for `handler`: `"fiqdemo"`, `0xffff` ticks, deployed clock.
    #[must_use]
    pub const fn new(handler: HandlerBlob) -> Self {
        Self {
            descriptor: HandlerDescriptor::new(HandlerDescriptor::DEFAULT_NAME),
            handler,
            period_ticks: DEFAULT_PERIOD_TICKS,
            clock: ClockSource::DEPLOYED,
        }
    }

    /// Set the descriptor name.
    #[must_use]
    pub const fn with_name(mut self, name: &'static str) -> Self {
        self.descriptor = HandlerDescriptor::new(name);
        self
    }

    /// Set the timer period.
    #[must_use]
    pub const fn with_period(mut self, period_ticks: u32) -> Self {
        self.period_ticks = period_ticks;
        self
    }

    /// Set the timer clock source.
    #[must_use]
    pub const fn with_clock(mut self, clock: ClockSource) -> Self {
        self.clock = clock;
        self
    }
}
