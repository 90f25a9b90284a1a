// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Tests for the ownership slot.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Barrier;
use std::thread;
use std::vec::Vec;

use super::registry::*;
use crate::error::Fault;

#[test]
fn test_new_registry_is_vacant() {
    let registry = FiqRegistry::new();
    assert_eq!(registry.state(), SlotState::Vacant);
    assert!(registry.is_vacant());
    assert!(!registry.is_active());
}

#[test]
fn test_reservation_blocks_second_reserve() {
    let registry = FiqRegistry::new();
    let reservation = registry.reserve().unwrap();
    assert_eq!(registry.state(), SlotState::Reserved);
    assert!(!registry.is_active());
    assert_eq!(registry.reserve().unwrap_err(), Fault::AlreadyActive);
    drop(reservation);
    assert!(registry.is_vacant());
}

#[test]
fn test_commit_and_release() {
    let registry = FiqRegistry::new();
    let registration = registry.reserve().unwrap().commit();
    assert!(registry.is_active());
    assert_eq!(registry.reserve().unwrap_err(), Fault::AlreadyActive);

    registration.release();
    assert!(registry.is_vacant());
    drop(registry.reserve().unwrap());
}

#[test]
fn test_dropped_registration_keeps_slot() {
    let registry = FiqRegistry::new();
    drop(registry.reserve().unwrap().commit());
    assert!(registry.is_active());
}

#[test]
fn test_concurrent_reserve_has_one_winner() {
    const THREADS: usize = 8;
    let registry = FiqRegistry::new();
    let barrier = Barrier::new(THREADS);

    let results: Vec<bool> = thread::scope(|scope| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                scope.spawn(|| {
                    barrier.wait();
                    registry.reserve().map(Reservation::commit).is_ok()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(results.iter().filter(|&&won| won).count(), 1);
    assert!(registry.is_active());
}
