// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Hardware resources handed in by the host.
//!
//! The host's device layer fills a [`ResourceRequest`] with whatever it could
//! map. [`ResourceRequest::resolve`] turns it into [`DeviceResources`] only if
//! nothing is missing.

#[cfg(test)]
mod resources_test;

use firq_abi::{IrqLine, MemoryMap, Region};
use tracing::{info, warn};

use crate::error::{Fault, Resource};
use crate::platform::RegisterWindow;

/// Resources as reported by the host, any of which may be missing.
#[derive(Debug)]
pub struct ResourceRequest<W> {
    gic_cpu: Option<W>,
    shared: Option<W>,
    timer: Option<W>,
    line: Option<IrqLine>,
}

impl<W> Default for ResourceRequest<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W> ResourceRequest<W> {
    /// Create a request with nothing filled in.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            gic_cpu: None,
            shared: None,
            timer: None,
            line: None,
        }
    }

    /// Set the GIC CPU interface window.
    #[must_use]
    pub fn with_gic_cpu(mut self, window: W) -> Self {
        self.gic_cpu = Some(window);
        self
    }

    /// Set the shared scratch memory window.
    #[must_use]
    pub fn with_shared(mut self, window: W) -> Self {
        self.shared = Some(window);
        self
    }

    /// Set the EPIT window.
    #[must_use]
    pub fn with_timer(mut self, window: W) -> Self {
        self.timer = Some(window);
        self
    }

    /// Set the interrupt line.
    #[must_use]
    pub fn with_line(mut self, line: IrqLine) -> Self {
        self.line = Some(line);
        self
    }

    /// Fill a request from a memory map, mapping each region with `map`.
    ///
    /// `map` plays the part of the host's `ioremap`. A region it cannot map
    /// stays missing and is reported by [`resolve`](Self::resolve).
    pub fn from_map(
        memory_map: &MemoryMap,
        line: Option<IrqLine>,
        mut map: impl FnMut(Region) -> Option<W>,
    ) -> Self {
        Self {
            gic_cpu: map(memory_map.gic_cpu),
            shared: map(memory_map.shared),
            timer: map(memory_map.timer),
            line,
        }
    }
}

impl<W: RegisterWindow> ResourceRequest<W> {
    /// Check that every resource is present.
    ///
    /// The line is checked first, then the windows in map order.
    ///
    /// # Errors
    ///
    /// Returns [`Fault::ResourceFault`] naming the first missing resource.
    pub fn resolve(self) -> Result<DeviceResources<W>, Fault> {
        let missing = |resource: Resource| {
            warn!(resource = resource.name(), "resource unavailable");
            Fault::ResourceFault(resource)
        };

        let line = self.line.ok_or_else(|| missing(Resource::Line))?;
        let gic_cpu = self.gic_cpu.ok_or_else(|| missing(Resource::GicCpu))?;
        let shared = self.shared.ok_or_else(|| missing(Resource::SharedRegion))?;
        let timer = self.timer.ok_or_else(|| missing(Resource::Timer))?;

        info!(
            gic = %gic_cpu.base(),
            shared = %shared.base(),
            timer = %timer.base(),
            %line,
            "resources resolved"
        );
        Ok(DeviceResources {
            gic_cpu,
            shared,
            timer,
            line,
        })
    }
}

/// Fully resolved resources, immutable for the lifetime of a FIQ client.
#[derive(Debug)]
pub struct DeviceResources<W> {
    gic_cpu: W,
    shared: W,
    timer: W,
    line: IrqLine,
}

impl<W: RegisterWindow> DeviceResources<W> {
    /// GIC CPU interface window.
    #[inline]
    pub const fn gic_cpu(&self) -> &W {
        &self.gic_cpu
    }

    /// Shared scratch memory window.
    #[inline]
    pub const fn shared(&self) -> &W {
        &self.shared
    }

    /// EPIT window.
    #[inline]
    pub const fn timer(&self) -> &W {
        &self.timer
    }

    /// Interrupt line driven by the timer.
    #[inline]
    #[must_use]
    pub const fn line(&self) -> IrqLine {
        self.line
    }
}
