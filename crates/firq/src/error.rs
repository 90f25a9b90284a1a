// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Fault taxonomy for the FIQ controller.
//!
//! Every fault is returned to the caller of `start`/`stop`. Nothing in this
//! crate retries, and nothing panics on a fault path.

use core::fmt;

use firq_abi::CoreId;

/// Host interrupt controller reports that the vector or handler slot is in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Busy;

impl fmt::Display for Busy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FIQ vector in use")
    }
}

/// A hardware resource the controller needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    /// GIC CPU interface register window.
    GicCpu,
    /// Scratch memory window holding the shared region.
    SharedRegion,
    /// EPIT register window.
    Timer,
    /// Interrupt line driven by the timer.
    Line,
}

impl Resource {
    /// Returns a human-readable name for this resource.
    #[inline]
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::GicCpu => "GIC CPU interface",
            Self::SharedRegion => "shared region",
            Self::Timer => "timer",
            Self::Line => "interrupt line",
        }
    }
}

/// Why a handler blob could not be installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallError {
    /// Blob has zero length.
    Empty,
    /// End symbol precedes the start symbol.
    Malformed,
    /// Blob does not fit the code space reserved behind the FIQ vector.
    TooLarge {
        /// Length of the rejected blob in bytes.
        len: usize,
    },
    /// FIQ vector already claimed by another client.
    VectorClaimed,
    /// Handler slot already holds a different handler.
    SlotOccupied,
}

impl fmt::Display for InstallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "handler blob is empty"),
            Self::Malformed => write!(f, "handler end symbol precedes its start"),
            Self::TooLarge { len } => write!(
                f,
                "handler blob of {len} bytes exceeds the {} byte FIQ code space",
                firq_abi::layout::FIQ_CODE_SPACE
            ),
            Self::VectorClaimed => write!(f, "FIQ vector claimed by another client"),
            Self::SlotOccupied => write!(f, "handler slot occupied by a different handler"),
        }
    }
}

/// Errors reported by the FIQ controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// Another FIQ client holds (or is acquiring) the process-wide slot.
    AlreadyActive,
    /// A required register window or the interrupt line is unavailable.
    ResourceFault(Resource),
    /// The handler blob was rejected.
    InstallFault(InstallError),
    /// The host interrupt controller reports the FIQ vector in use.
    Busy,
    /// Teardown attempted on a core other than the one that enabled the FIQ.
    WrongCore {
        /// Core that enabled the FIQ.
        owner: CoreId,
        /// Core the request ran on.
        current: CoreId,
    },
}

impl From<InstallError> for Fault {
    fn from(err: InstallError) -> Self {
        Self::InstallFault(err)
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyActive => write!(f, "a FIQ client is already active"),
            Self::ResourceFault(resource) => write!(f, "{} unavailable", resource.name()),
            Self::InstallFault(err) => write!(f, "install failed: {err}"),
            Self::Busy => write!(f, "FIQ vector in use"),
            Self::WrongCore { owner, current } => {
                write!(f, "FIQ owned by {owner}, teardown requested on {current}")
            }
        }
    }
}

impl core::error::Error for Fault {}
