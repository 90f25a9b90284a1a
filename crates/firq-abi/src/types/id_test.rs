// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Tests for ID types.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::format;
use std::vec::Vec;

use proptest::prelude::*;

use super::id::{CoreId, CoreSet, IrqLine};

#[test]
fn core_id_bounds() {
    assert!(CoreId::new(0).is_some());
    assert!(CoreId::new(31).is_some());
    assert!(CoreId::new(32).is_none());
    assert_eq!(CoreId::BOOT.as_u8(), 0);
}

#[test]
fn core_id_display() {
    let core = CoreId::new(3).unwrap();
    assert_eq!(format!("{core}"), "cpu3");
    assert_eq!(format!("{core:?}"), "CoreId(3)");
}

#[test]
fn core_set_first() {
    assert!(CoreSet::first(0).is_empty());
    assert_eq!(CoreSet::first(4).bits(), 0b1111);
    assert_eq!(CoreSet::first(32).bits(), u32::MAX);
    assert_eq!(CoreSet::first(64).len(), 32);
}

#[test]
fn core_set_iterates_ascending() {
    let set = CoreSet::from_bits(0b1010_0101);
    let cores: Vec<u8> = set.iter().map(CoreId::as_u8).collect();
    assert_eq!(cores, [0, 2, 5, 7]);
    assert_eq!(set.iter().len(), 4);
}

#[test]
fn core_set_membership() {
    let c1 = CoreId::new(1).unwrap();
    let c2 = CoreId::new(2).unwrap();
    let set = CoreSet::EMPTY.with(c1);
    assert!(set.contains(c1));
    assert!(!set.contains(c2));
    assert_eq!(format!("{set:?}"), "{CoreId(1)}");
}

#[test]
fn irq_line_from_host() {
    assert_eq!(IrqLine::from_host(-22), None);
    assert_eq!(IrqLine::from_host(0), Some(IrqLine::new(0)));
    assert_eq!(IrqLine::from_host(88).map(IrqLine::as_u32), Some(88));
    assert_eq!(format!("{}", IrqLine::new(88)), "irq88");
}

proptest! {
    #[test]
    fn core_set_iter_matches_popcount(bits in any::<u32>()) {
        let set = CoreSet::from_bits(bits);
        let cores: Vec<CoreId> = set.iter().collect();
        prop_assert_eq!(cores.len(), bits.count_ones() as usize);
        prop_assert!(cores.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(cores.iter().all(|c| set.contains(*c)));
    }
}
