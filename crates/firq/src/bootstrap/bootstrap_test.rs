// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Tests for the per-core bootstrap.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use crate::platform::MockPlatform;

#[test]
fn test_bootstrap_sets_only_sp() {
    let platform = MockPlatform::new(2);
    let core1 = CoreId::new(1).unwrap();
    let before = platform.bank(core1);

    let record = platform.run_on(core1, || {
        bootstrap_this_core(&platform, Vaddr::new(0xf094_0000))
    });

    assert_eq!(
        record,
        CoreBootstrapRecord {
            core: core1,
            sp_set: true,
        }
    );
    let after = platform.bank(core1);
    assert_eq!(after.sp(), Vaddr::new(0xf094_0000));
    assert_eq!(after.r8_r12, before.r8_r12);
    assert_eq!(after.lr, before.lr);
}

#[test]
fn test_bootstrap_leaves_other_cores_alone() {
    let platform = MockPlatform::new(2);
    let other = platform.bank(CoreId::new(1).unwrap());

    bootstrap_this_core(&platform, Vaddr::new(0x1000));

    assert_eq!(platform.bank(CoreId::BOOT).sp, 0x1000);
    assert_eq!(platform.bank(CoreId::new(1).unwrap()), other);
}

#[test]
fn test_bootstrap_accepts_zero_address() {
    let platform = MockPlatform::new(1);
    let record = bootstrap_this_core(&platform, Vaddr::new(0));
    assert!(record.sp_set);
    assert_eq!(platform.bank(CoreId::BOOT).sp, 0);
}
