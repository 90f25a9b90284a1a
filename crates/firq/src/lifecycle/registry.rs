// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Process-wide FIQ ownership slot.
//!
//! The FIQ vector, the banked registers and the shared region exist once per
//! system, so at most one client may drive them. The slot moves
//! vacant -> reserved -> active in a single compare-exchange on the way in,
//! so two concurrent starts can never both get past the check.

use core::mem;
use core::sync::atomic::{AtomicU8, Ordering};

use crate::error::Fault;

const VACANT: u8 = 0;
const RESERVED: u8 = 1;
const ACTIVE: u8 = 2;

/// Observed state of the ownership slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    /// No client.
    Vacant,
    /// A client is starting up.
    Reserved,
    /// A client is running.
    Active,
}

/// The ownership slot.
#[derive(Debug)]
pub struct FiqRegistry {
    slot: AtomicU8,
}

/// The registry every controller uses unless given another one.
pub static REGISTRY: FiqRegistry = FiqRegistry::new();

impl FiqRegistry {
    /// Create a vacant registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slot: AtomicU8::new(VACANT),
        }
    }

    /// Current slot state.
    #[must_use]
    pub fn state(&self) -> SlotState {
        match self.slot.load(Ordering::Acquire) {
            VACANT => SlotState::Vacant,
            RESERVED => SlotState::Reserved,
            _ => SlotState::Active,
        }
    }

    /// Check whether a client is running.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state() == SlotState::Active
    }

    /// Check whether the slot is free.
    #[must_use]
    pub fn is_vacant(&self) -> bool {
        self.state() == SlotState::Vacant
    }

    /// Take the slot for a client that is starting up.
    ///
    /// # Errors
    ///
    /// Returns [`Fault::AlreadyActive`] unless the slot is vacant.
    pub fn reserve(&self) -> Result<Reservation<'_>, Fault> {
        self.slot
            .compare_exchange(VACANT, RESERVED, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| Reservation { registry: self })
            .map_err(|_| Fault::AlreadyActive)
    }
}

impl Default for FiqRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// A reserved slot. Dropping it vacates the slot again.
#[derive(Debug)]
#[must_use = "dropping a reservation vacates the slot"]
pub struct Reservation<'r> {
    registry: &'r FiqRegistry,
}

impl<'r> Reservation<'r> {
    /// Mark the client as running.
    pub fn commit(self) -> Registration<'r> {
        let registry = self.registry;
        mem::forget(self);
        registry.slot.store(ACTIVE, Ordering::Release);
        Registration { registry }
    }
}

impl Drop for Reservation<'_> {
    fn drop(&mut self) {
        self.registry.slot.store(VACANT, Ordering::Release);
    }
}

/// An active slot.
///
/// Unlike [`Reservation`] this does not vacate on drop: a running FIQ
/// cannot be torn down implicitly, so the slot stays taken until
/// [`release`](Self::release).
#[derive(Debug)]
pub struct Registration<'r> {
    registry: &'r FiqRegistry,
}

impl Registration<'_> {
    /// Vacate the slot.
    pub fn release(self) {
        self.registry.slot.store(VACANT, Ordering::Release);
    }
}
