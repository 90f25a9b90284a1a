// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Platform abstraction layer.
//!
//! The controller never touches hardware or assumes which core it runs on.
//! Everything goes through the traits here, so the same lifecycle code runs
//! against the real SoC and against a mock on the development host.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                  Lifecycle Controller                   │
//! │   (region, bootstrap, dispatch, handler, timer)         │
//! └─────────────────────────────────────────────────────────┘
//!                           │
//!                           ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │                   Platform Traits                       │
//! │  (`RegisterWindow`, `InterruptHost`, `CoreAffinity`,    │
//! │   `FiqBank`)                                            │
//! └─────────────────────────────────────────────────────────┘
//!            │                              │
//!            ▼                              ▼
//! ┌─────────────────────┐      ┌─────────────────────────────┐
//! │   `MockPlatform`    │      │  host kernel glue using     │
//! │   (for testing)     │      │  `MmioWindow`, `arm::*`     │
//! └─────────────────────┘      └─────────────────────────────┘
//! ```


#[cfg(target_arch = "arm")]
pub mod arm;
// Mock requires std, only available with std or test
#[cfg(any(test, feature = "std"))]
mod mock;
mod mmio;
mod traits;

#[cfg(any(test, feature = "std"))]
pub use mock::{Event, MockPlatform, MockWindow};
pub use mmio::MmioWindow;
pub use traits::{CoreAffinity, FiqBank, InterruptHost, Platform, RegisterWindow};
