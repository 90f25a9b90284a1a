// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! # Firq
//!
//! Bootstrap and lifecycle controller for an ARM fast interrupt (FIQ).
//!
//! This crate provides:
//! - Shared region provisioning (the block every banked FIQ `sp` points at)
//! - Per-core banked register bootstrap and cross-core dispatch
//! - Handler blob validation and installation
//! - EPIT driver used as a periodic FIQ source
//! - A typestate lifecycle with a process-wide ownership slot
//!
//! Hardware and host kernel services are reached through the traits in
//! [`platform`]; the same code runs on target and against the mock platform
//! on the development host.

#![cfg_attr(not(any(test, feature = "std")), no_std)]

#[cfg(any(test, feature = "std"))]
extern crate std;

pub mod bootstrap;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod handler;
pub mod lifecycle;
pub mod platform;
pub mod region;
pub mod resources;
pub mod timer;

// Re-export commonly used types at crate root
pub use config::FiqConfig;
pub use error::{Busy, Fault, InstallError, Resource};
pub use firq_abi::{ClockSource, CoreId, IrqLine, MemoryMap, Vaddr};
pub use handler::{HandlerBlob, HandlerDescriptor};
pub use lifecycle::{
    Claimed, FiqController, FiqHandle, FiqRegistry, Installed, LifecycleState, REGISTRY, Rejected,
};
pub use resources::{DeviceResources, ResourceRequest};

/// Crate version.
pub const VERSION: &str = match option_env!("FIRQ_VERSION") {
    Some(v) => v,
    None => "unknown",
};
