// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Tests for shared region provisioning.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use firq_abi::layout::{SHARED_REGION_SIZE, SHARED_REGION_WORDS};
use firq_abi::{IrqLine, Vaddr};
use proptest::prelude::*;

use super::*;
use crate::platform::{Event, MockPlatform, MockWindow};
use crate::resources::ResourceRequest;

fn resources(gic: u32, shared: u32, timer: u32, line: u32) -> DeviceResources<MockWindow> {
    ResourceRequest::new()
        .with_gic_cpu(MockWindow::new(Vaddr::new(gic), 0x100))
        .with_shared(MockWindow::new(Vaddr::new(shared), 0x1000))
        .with_timer(MockWindow::new(Vaddr::new(timer), 0x100))
        .with_line(IrqLine::new(line))
        .resolve()
        .unwrap()
}

#[test]
fn test_layout_for_uses_window_bases() {
    let resources = resources(0xf0a0_0100, 0xf094_0000, 0xf20d_4000, 88);
    assert_eq!(
        layout_for(&resources),
        SharedRegionLayout {
            gic_cpu_base: 0xf0a0_0100,
            irq_line: 88,
            timer_base: 0xf20d_4000,
        }
    );
}

#[test]
fn test_provision_erases_then_writes_fields() {
    let resources = resources(0xf0a0_0100, 0xf094_0000, 0xf20d_4000, 88);
    resources.shared().fill(0xa5a5_a5a5);

    provision(&resources).unwrap();

    let words = resources.shared().words();
    assert_eq!(&words[..3], &[0xf0a0_0100, 88, 0xf20d_4000]);
    assert!(words[3..SHARED_REGION_WORDS].iter().all(|&w| w == 0));
    // Only the block is erased, not the rest of the window
    assert!(words[SHARED_REGION_WORDS..].iter().all(|&w| w == 0xa5a5_a5a5));
}

#[test]
fn test_write_order_and_barrier() {
    let platform = MockPlatform::new(1);
    let window = platform.window(Vaddr::new(0x9000), SHARED_REGION_SIZE);
    let layout = SharedRegionLayout {
        gic_cpu_base: 1,
        irq_line: 2,
        timer_base: 3,
    };

    write_layout(&window, &layout).unwrap();

    let events = platform.events();
    assert_eq!(events.len(), SHARED_REGION_WORDS + 3 + 1);
    for (index, event) in events[..SHARED_REGION_WORDS].iter().enumerate() {
        assert_eq!(
            *event,
            Event::Write {
                base: Vaddr::new(0x9000),
                offset: index * 4,
                value: 0,
            }
        );
    }
    let fields: std::vec::Vec<_> = events[SHARED_REGION_WORDS..SHARED_REGION_WORDS + 3]
        .iter()
        .map(|event| match event {
            Event::Write { offset, value, .. } => (*offset, *value),
            other => panic!("unexpected event {other:?}"),
        })
        .collect();
    assert_eq!(fields, [(0, 1), (4, 2), (8, 3)]);
    assert_eq!(
        events.last(),
        Some(&Event::Barrier {
            base: Vaddr::new(0x9000)
        })
    );
}

#[test]
fn test_small_window_is_rejected_untouched() {
    let platform = MockPlatform::new(1);
    let window = platform.window(Vaddr::new(0x9000), SHARED_REGION_SIZE - 4);
    assert_eq!(
        write_layout(&window, &SharedRegionLayout::default()),
        Err(Fault::ResourceFault(Resource::SharedRegion))
    );
    assert!(platform.events().is_empty());
}

#[test]
fn test_read_back() {
    let resources = resources(0, 0xf094_0000, 0, 0);
    provision(&resources).unwrap();
    assert_eq!(read_back(resources.shared()), SharedRegionLayout::default());
}

proptest! {
    #[test]
    fn provision_holds_exactly_the_fields(
        gic in prop_oneof![Just(0u32), any::<u32>()],
        timer in prop_oneof![Just(0u32), any::<u32>()],
        line in 0u32..1020,
        junk in any::<u32>(),
    ) {
        let resources = resources(gic, 0xf094_0000, timer, line);
        resources.shared().fill(junk);

        provision(&resources).unwrap();

        let words = resources.shared().words();
        for (index, &word) in words[..SHARED_REGION_WORDS].iter().enumerate() {
            let expected = match index {
                0 => gic,
                1 => line,
                2 => timer,
                _ => 0,
            };
            prop_assert_eq!(word, expected);
        }
        prop_assert_eq!(read_back(resources.shared()), layout_for(&resources));
    }
}
