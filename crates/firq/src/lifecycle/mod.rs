// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! FIQ lifecycle controller.
//!
//! Each lifecycle state is its own type, so a step can only be taken from
//! the state that permits it:
//!
//! ```text
//!  FiqController ──claim──▶ Claimed ──install──▶ Installed ──run──▶ FiqHandle
//!   (Idle)                                                          (Running)
//!      ▲                                                                │
//!      └──────────────────────────── stop (Stopping) ───────────────────┘
//! ```
//!
//! Transitions that can fail without consuming their input hand the state
//! back inside [`Rejected`]. A failed `run` rolls back completely: the vector
//! claim is released and the ownership slot vacated.
//!
//! The FIQ may only be torn down on the core that enabled it.
//! [`FiqHandle::stop`] checks this and refuses otherwise;
//! [`FiqHandle::stop_on_owner`] moves to that core first.

mod registry;
#[cfg(test)]
mod registry_test;

use core::fmt;
use core::mem;

use firq_abi::{CoreId, IrqLine};
use tracing::{debug, info, warn};

pub use registry::{FiqRegistry, REGISTRY, Registration, Reservation, SlotState};

use crate::config::FiqConfig;
use crate::dispatch::{self, DispatchSummary};
use crate::error::{Fault, InstallError};
use crate::handler::{self, HandlerDescriptor};
use crate::platform::{InterruptHost, Platform, RegisterWindow};
use crate::region;
use crate::resources::{DeviceResources, ResourceRequest};
use crate::timer::PeriodicTimer;

/// Lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// No FIQ client.
    Idle,
    /// Slot reserved and resources resolved.
    Claimed,
    /// Vector owned and handler bound.
    Installed,
    /// FIQ enabled and timer running.
    Running,
    /// Teardown in progress.
    Stopping,
}

fn transition(from: LifecycleState, to: LifecycleState) {
    debug!(?from, ?to, "FIQ lifecycle transition");
}

/// A failed transition, carrying the state it started from.
pub struct Rejected<S> {
    fault: Fault,
    state: S,
}

impl<S> Rejected<S> {
    const fn new(fault: Fault, state: S) -> Self {
        Self { fault, state }
    }

    /// Why the transition failed.
    #[inline]
    #[must_use]
    pub const fn fault(&self) -> Fault {
        self.fault
    }

    /// Take back the unchanged state.
    #[must_use]
    pub fn into_state(self) -> S {
        self.state
    }

    /// Split into fault and state.
    #[must_use]
    pub fn into_parts(self) -> (Fault, S) {
        (self.fault, self.state)
    }
}

impl<S> fmt::Debug for Rejected<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rejected")
            .field("fault", &self.fault)
            .finish_non_exhaustive()
    }
}

impl<S> fmt::Display for Rejected<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.fault, f)
    }
}

impl<S> core::error::Error for Rejected<S> {}

impl<S> From<Rejected<S>> for Fault {
    fn from(rejected: Rejected<S>) -> Self {
        rejected.fault
    }
}

/// Ownership of the FIQ vector. Released on drop unless kept.
struct VectorClaim<'a, P: InterruptHost + ?Sized> {
    host: &'a P,
    descriptor: HandlerDescriptor,
}

impl<'a, P: InterruptHost + ?Sized> VectorClaim<'a, P> {
    fn acquire(host: &'a P, descriptor: HandlerDescriptor) -> Result<Self, Fault> {
        host.claim_vector(&descriptor).map_err(|_| {
            warn!(name = descriptor.name(), "couldn't claim FIQ");
            Fault::InstallFault(InstallError::VectorClaimed)
        })?;
        Ok(Self { host, descriptor })
    }

    /// Hand responsibility for releasing the vector to the caller.
    fn keep(self) {
        mem::forget(self);
    }
}

impl<P: InterruptHost + ?Sized> Drop for VectorClaim<'_, P> {
    fn drop(&mut self) {
        self.host.release_vector(&self.descriptor);
        debug!(name = self.descriptor.name(), "FIQ vector released");
    }
}

/// Entry point: the `Idle` state.
pub struct FiqController<'a, P: ?Sized> {
    platform: &'a P,
    registry: &'a FiqRegistry,
    config: FiqConfig,
}

impl<'a, P: Platform + ?Sized> FiqController<'a, P> {
    /// Create a controller using the process-wide [`REGISTRY`].
    #[must_use]
    pub fn new(platform: &'a P, config: FiqConfig) -> Self {
        Self::with_registry(platform, &REGISTRY, config)
    }

    /// Create a controller using `registry`.
    #[must_use]
    pub const fn with_registry(
        platform: &'a P,
        registry: &'a FiqRegistry,
        config: FiqConfig,
    ) -> Self {
        Self {
            platform,
            registry,
            config,
        }
    }

    /// The controller's configuration.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> &FiqConfig {
        &self.config
    }

    /// The ownership slot this controller uses.
    #[inline]
    #[must_use]
    pub const fn registry(&self) -> &'a FiqRegistry {
        self.registry
    }

    /// Reserve the ownership slot and resolve `request`.
    ///
    /// # Errors
    ///
    /// [`Fault::AlreadyActive`] if another client holds the slot,
    /// [`Fault::ResourceFault`] if a resource is missing. The slot stays
    /// vacant on either.
    pub fn claim<W: RegisterWindow>(
        &self,
        request: ResourceRequest<W>,
    ) -> Result<Claimed<'a, P, W>, Fault> {
        let reservation = self.registry.reserve().inspect_err(|_| {
            warn!("FIQ client already active");
        })?;
        let resources = request.resolve()?;
        transition(LifecycleState::Idle, LifecycleState::Claimed);
        Ok(Claimed {
            platform: self.platform,
            config: self.config,
            reservation,
            resources,
        })
    }

    /// Claim, install and run in one go.
    ///
    /// # Errors
    ///
    /// The first fault of any step. Nothing is left behind.
    pub fn start<W: RegisterWindow>(
        &self,
        request: ResourceRequest<W>,
    ) -> Result<FiqHandle<'a, P, W>, Fault> {
        self.claim(request)?.install()?.run()
    }
}

impl<P: ?Sized> fmt::Debug for FiqController<'_, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FiqController")
            .field("config", &self.config)
            .field("slot", &self.registry.state())
            .finish_non_exhaustive()
    }
}

/// The `Claimed` state.
pub struct Claimed<'a, P: ?Sized, W> {
    platform: &'a P,
    config: FiqConfig,
    reservation: Reservation<'a>,
    resources: DeviceResources<W>,
}

impl<'a, P: Platform + ?Sized, W: RegisterWindow> Claimed<'a, P, W> {
    /// Lifecycle state of this value.
    #[inline]
    #[must_use]
    pub const fn state(&self) -> LifecycleState {
        LifecycleState::Claimed
    }

    /// Resolved resources.
    #[inline]
    #[must_use]
    pub const fn resources(&self) -> &DeviceResources<W> {
        &self.resources
    }

    /// Claim the FIQ vector and bind the handler.
    ///
    /// The blob is validated before the host is touched.
    ///
    /// # Errors
    ///
    /// [`Fault::InstallFault`] for a rejected blob, a vector owned by another
    /// client, or an occupied handler slot. The vector is not held on return.
    pub fn install(self) -> Result<Installed<'a, P, W>, Rejected<Self>> {
        if let Err(err) = self.config.handler.validate() {
            warn!(%err, "FIQ handler rejected");
            return Err(Rejected::new(err.into(), self));
        }
        let claim = match VectorClaim::acquire(self.platform, self.config.descriptor) {
            Ok(claim) => claim,
            Err(fault) => return Err(Rejected::new(fault, self)),
        };
        if let Err(err) = handler::install(self.platform, &self.config.handler) {
            warn!(%err, "FIQ handler rejected");
            drop(claim);
            return Err(Rejected::new(err.into(), self));
        }

        transition(LifecycleState::Claimed, LifecycleState::Installed);
        let Self {
            platform,
            config,
            reservation,
            resources,
        } = self;
        Ok(Installed {
            platform,
            config,
            reservation,
            resources,
            claim,
        })
    }
}

impl<P: ?Sized, W> fmt::Debug for Claimed<'_, P, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Claimed")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// The `Installed` state.
pub struct Installed<'a, P: InterruptHost + ?Sized, W> {
    platform: &'a P,
    config: FiqConfig,
    reservation: Reservation<'a>,
    resources: DeviceResources<W>,
    claim: VectorClaim<'a, P>,
}

impl<'a, P: Platform + ?Sized, W: RegisterWindow> Installed<'a, P, W> {
    /// Lifecycle state of this value.
    #[inline]
    #[must_use]
    pub const fn state(&self) -> LifecycleState {
        LifecycleState::Installed
    }

    /// Provision the shared region, bootstrap every core, enable the line and
    /// start the timer.
    ///
    /// The caller's core becomes the owner that must later stop the FIQ.
    ///
    /// # Errors
    ///
    /// [`Fault::ResourceFault`] if the shared region or timer window is too
    /// small. The vector is released and the slot vacated.
    pub fn run(self) -> Result<FiqHandle<'a, P, W>, Fault> {
        let Self {
            platform,
            config,
            reservation,
            resources,
            claim,
        } = self;

        // `claim` and `reservation` roll back on drop if anything fails here
        let summary = match Self::bring_up(platform, &config, &resources) {
            Ok(summary) => summary,
            Err(fault) => {
                warn!(%fault, "FIQ start failed, rolling back");
                return Err(fault);
            }
        };

        let owner = platform.current_core();
        claim.keep();
        let registration = reservation.commit();
        transition(LifecycleState::Installed, LifecycleState::Running);
        info!(
            %owner,
            line = %resources.line(),
            cores = summary.visited,
            "FIQ enabled"
        );
        Ok(FiqHandle {
            platform,
            config,
            registration,
            resources,
            owner,
        })
    }

    fn bring_up(
        platform: &P,
        config: &FiqConfig,
        resources: &DeviceResources<W>,
    ) -> Result<DispatchSummary, Fault> {
        let timer = PeriodicTimer::new(resources.timer())?;
        region::provision(resources)?;

        let summary = dispatch::bootstrap_all_cores(platform, resources.shared().base());
        if !summary.is_complete() {
            warn!(
                visited = summary.visited,
                bootstrapped = summary.bootstrapped,
                "not every core took the FIQ sp"
            );
        }

        platform.enable_line(resources.line());
        timer.start(resources.line(), config.period_ticks, config.clock);
        Ok(summary)
    }
}

impl<P: InterruptHost + ?Sized, W> fmt::Debug for Installed<'_, P, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Installed")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// The `Running` state: proof that this client owns the FIQ.
///
/// Dropping the handle without stopping leaves the FIQ running and the slot
/// taken.
#[must_use = "dropping the handle leaves the FIQ running"]
pub struct FiqHandle<'a, P: ?Sized, W> {
    platform: &'a P,
    config: FiqConfig,
    registration: Registration<'a>,
    resources: DeviceResources<W>,
    owner: CoreId,
}

impl<P: Platform + ?Sized, W: RegisterWindow> FiqHandle<'_, P, W> {
    /// Lifecycle state of this value.
    #[inline]
    #[must_use]
    pub const fn state(&self) -> LifecycleState {
        LifecycleState::Running
    }

    /// Core that enabled the FIQ.
    #[inline]
    #[must_use]
    pub const fn owner(&self) -> CoreId {
        self.owner
    }

    /// Interrupt line driven by the timer.
    #[inline]
    #[must_use]
    pub const fn line(&self) -> IrqLine {
        self.resources.line()
    }

    /// Resources held by the running client.
    #[inline]
    #[must_use]
    pub const fn resources(&self) -> &DeviceResources<W> {
        &self.resources
    }

    /// The running timer.
    #[must_use]
    pub fn timer(&self) -> PeriodicTimer<'_, W> {
        PeriodicTimer::from_checked(self.resources.timer())
    }

    /// Tear the FIQ down. Must run on [`owner`](Self::owner).
    ///
    /// # Errors
    ///
    /// [`Fault::WrongCore`] on any other core, with the handle untouched.
    pub fn stop(self) -> Result<(), Rejected<Self>> {
        let current = self.platform.current_core();
        if current != self.owner {
            let owner = self.owner;
            warn!(%owner, %current, "FIQ teardown on wrong core");
            return Err(Rejected::new(Fault::WrongCore { owner, current }, self));
        }

        transition(LifecycleState::Running, LifecycleState::Stopping);
        let Self {
            platform,
            config,
            registration,
            resources,
            owner,
        } = self;

        platform.mask_local();
        PeriodicTimer::from_checked(resources.timer()).stop();
        platform.disable_line(resources.line());
        platform.unmask_local();
        platform.release_vector(&config.descriptor);
        registration.release();

        transition(LifecycleState::Stopping, LifecycleState::Idle);
        info!(%owner, name = config.descriptor.name(), "FIQ removed");
        Ok(())
    }

    /// Tear the FIQ down on the owning core, wherever the caller runs.
    ///
    /// # Errors
    ///
    /// Only if the platform does not actually move to the owner.
    pub fn stop_on_owner(self) -> Result<(), Rejected<Self>> {
        let platform = self.platform;
        let owner = self.owner;
        platform.run_on(owner, move || self.stop())
    }
}

impl<P: ?Sized, W> fmt::Debug for FiqHandle<'_, P, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FiqHandle")
            .field("owner", &self.owner)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
