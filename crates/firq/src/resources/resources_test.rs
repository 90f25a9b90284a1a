// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Tests for resource resolution.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::vec::Vec;

use firq_abi::{Paddr, Vaddr};

use super::*;
use crate::platform::MockWindow;

fn window(base: u32) -> MockWindow {
    MockWindow::new(Vaddr::new(base), 0x100)
}

fn full_request() -> ResourceRequest<MockWindow> {
    ResourceRequest::new()
        .with_gic_cpu(window(0xf0a0_0100))
        .with_shared(window(0xf094_0000))
        .with_timer(window(0xf20d_4000))
        .with_line(IrqLine::new(88))
}

#[test]
fn test_resolve_complete_request() {
    let resources = full_request().resolve().unwrap();
    assert_eq!(resources.gic_cpu().base(), Vaddr::new(0xf0a0_0100));
    assert_eq!(resources.shared().base(), Vaddr::new(0xf094_0000));
    assert_eq!(resources.timer().base(), Vaddr::new(0xf20d_4000));
    assert_eq!(resources.line(), IrqLine::new(88));
}

#[test]
fn test_resolve_reports_missing_line_first() {
    let request: ResourceRequest<MockWindow> = ResourceRequest::default();
    assert_eq!(
        request.resolve().unwrap_err(),
        Fault::ResourceFault(Resource::Line)
    );
}

#[test]
fn test_resolve_reports_each_missing_window() {
    let request = ResourceRequest::new()
        .with_shared(window(0x1000))
        .with_timer(window(0x2000))
        .with_line(IrqLine::new(1));
    assert_eq!(
        request.resolve().unwrap_err(),
        Fault::ResourceFault(Resource::GicCpu)
    );

    let request = ResourceRequest::new()
        .with_gic_cpu(window(0x1000))
        .with_timer(window(0x2000))
        .with_line(IrqLine::new(1));
    assert_eq!(
        request.resolve().unwrap_err(),
        Fault::ResourceFault(Resource::SharedRegion)
    );

    let request = ResourceRequest::new()
        .with_gic_cpu(window(0x1000))
        .with_shared(window(0x2000))
        .with_line(IrqLine::new(1));
    assert_eq!(
        request.resolve().unwrap_err(),
        Fault::ResourceFault(Resource::Timer)
    );
}

#[test]
fn test_from_map_maps_every_region_in_order() {
    let mut mapped = Vec::new();
    let request = ResourceRequest::from_map(&MemoryMap::IMX6, Some(IrqLine::new(88)), |region| {
        mapped.push(region.base);
        Some(MockWindow::new(
            Vaddr::new(region.base.as_u32() | 0xf000_0000),
            region.size as usize,
        ))
    });
    assert_eq!(
        mapped,
        [
            Paddr::new(0x00a0_0100),
            Paddr::new(0x0094_0000),
            Paddr::new(0x020d_4000),
        ]
    );

    let resources = request.resolve().unwrap();
    assert_eq!(resources.shared().len(), 0x1000);
    assert_eq!(resources.timer().base(), Vaddr::new(0xf20d_4000));
}

#[test]
fn test_from_map_failed_mapping_is_missing() {
    let request = ResourceRequest::from_map(&MemoryMap::IMX6, Some(IrqLine::new(88)), |region| {
        (region != MemoryMap::IMX6.timer)
            .then(|| MockWindow::new(Vaddr::new(region.base.as_u32()), 0x100))
    });
    assert_eq!(
        request.resolve().unwrap_err(),
        Fault::ResourceFault(Resource::Timer)
    );
}
