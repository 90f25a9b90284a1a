//! Integration tests for the FIQ lifecycle, driven the way host glue would.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use firq::platform::{CoreAffinity, FiqBank, MockPlatform, MockWindow, RegisterWindow};
use firq::region;
use firq::{
    Fault, FiqConfig, FiqController, FiqRegistry, HandlerBlob, IrqLine, LifecycleState,
    MemoryMap, REGISTRY, ResourceRequest, Vaddr,
};
use firq_abi::epit::{self, sr};
use firq_abi::{CoreId, Region};

static HANDLER: [u8; 12] = [
    0x00, 0x07, 0x9d, 0xe8, // ldmia sp, {r8-r10}
    0x04, 0x10, 0x8a, 0xe5, // str r1, [r10, #4]
    0x04, 0xf0, 0x5e, 0xe2, // subs pc, lr, #4
];

const LINE: IrqLine = IrqLine::new(88);

/// `ioremap` stand-in: physical regions land at a fixed offset.
fn ioremap(platform: &MockPlatform, region: Region) -> Option<MockWindow> {
    let virt = Vaddr::new(region.base.as_u32() | 0xf000_0000);
    if region == MemoryMap::IMX6.timer {
        Some(platform.epit(virt))
    } else {
        Some(platform.window(virt, region.size as usize))
    }
}

fn request(platform: &MockPlatform) -> ResourceRequest<MockWindow> {
    ResourceRequest::from_map(&MemoryMap::IMX6, Some(LINE), |region| {
        ioremap(platform, region)
    })
}

/// What the handler does on entry: load its data through the banked `sp`
/// and acknowledge the timer.
fn simulate_fiq(platform: &MockPlatform, shared: &MockWindow, timer: &MockWindow) {
    let sp = platform.fiq_regs().sp();
    assert_eq!(sp, shared.base(), "banked sp does not point at the shared region");
    let layout = region::read_back(shared);
    assert_eq!(Vaddr::new(layout.timer_base), timer.base());
    assert_eq!(IrqLine::new(layout.irq_line), LINE);
    timer.write32(epit::SR, sr::OCIF);
}

#[test]
fn test_global_registry_round_trip() {
    let platform = MockPlatform::new(4);
    let controller = FiqController::new(&platform, FiqConfig::new(HandlerBlob::new(&HANDLER)));
    assert!(REGISTRY.is_vacant());

    let handle = controller.start(request(&platform)).unwrap();
    assert!(REGISTRY.is_active());

    let other = FiqController::new(&platform, FiqConfig::new(HandlerBlob::new(&HANDLER)));
    assert_eq!(
        other.start(request(&platform)).unwrap_err(),
        Fault::AlreadyActive
    );

    handle.stop().unwrap();
    assert!(REGISTRY.is_vacant());
}

#[test]
fn test_fiq_runs_on_every_core_without_rearming() {
    let platform = MockPlatform::new(4);
    let registry = FiqRegistry::new();
    let controller = FiqController::with_registry(
        &platform,
        &registry,
        FiqConfig::new(HandlerBlob::new(&HANDLER)),
    );

    let handle = controller.start(request(&platform)).unwrap();
    let shared = handle.resources().shared().clone();
    let timer = handle.resources().timer().clone();
    assert_eq!(shared.base(), Vaddr::new(0xf094_0000));

    for round in 0..32u8 {
        let core = CoreId::new(round % 4).unwrap();
        assert!(timer.expire(), "timer stopped asserting its interrupt");
        assert!(handle.timer().is_pending());
        platform.run_on(core, || simulate_fiq(&platform, &shared, &timer));
        assert!(!handle.timer().is_pending());
    }
    assert_eq!(handle.timer().period(), epit::DEFAULT_PERIOD_TICKS);

    handle.stop().unwrap();
    assert!(!timer.expire());
}

#[test]
fn test_unmappable_region_is_a_resource_fault() {
    let platform = MockPlatform::new(1);
    let registry = FiqRegistry::new();
    let controller = FiqController::with_registry(
        &platform,
        &registry,
        FiqConfig::new(HandlerBlob::new(&HANDLER)),
    );
    let request = ResourceRequest::from_map(&MemoryMap::IMX6, Some(LINE), |region| {
        (region != MemoryMap::IMX6.gic_cpu).then(|| ioremap(&platform, region)).flatten()
    });

    assert_eq!(
        controller.start(request).unwrap_err(),
        Fault::ResourceFault(firq::Resource::GicCpu)
    );
    assert!(registry.is_vacant());
    assert!(platform.events().is_empty());
}

#[test]
fn test_missing_line_is_a_resource_fault() {
    let platform = MockPlatform::new(1);
    let registry = FiqRegistry::new();
    let controller = FiqController::with_registry(
        &platform,
        &registry,
        FiqConfig::new(HandlerBlob::new(&HANDLER)),
    );
    let request = ResourceRequest::from_map(&MemoryMap::IMX6, IrqLine::from_host(-6), |region| {
        ioremap(&platform, region)
    });

    assert_eq!(
        controller.start(request).unwrap_err(),
        Fault::ResourceFault(firq::Resource::Line)
    );
}

#[test]
fn test_teardown_redirects_to_owner() {
    let platform = MockPlatform::new(2);
    let registry = FiqRegistry::new();
    let controller = FiqController::with_registry(
        &platform,
        &registry,
        FiqConfig::new(HandlerBlob::new(&HANDLER)).with_period(0x100),
    );
    let handle = controller.start(request(&platform)).unwrap();
    assert_eq!(handle.timer().period(), 0x100);

    let handle = platform.run_on(CoreId::new(1).unwrap(), || {
        let rejected = handle.stop().unwrap_err();
        assert!(matches!(rejected.fault(), Fault::WrongCore { .. }));
        rejected.into_state()
    });
    assert_eq!(handle.state(), LifecycleState::Running);

    platform.set_current_core(CoreId::new(1).unwrap());
    handle.stop_on_owner().unwrap();
    assert!(registry.is_vacant());
    assert_eq!(platform.vector_owner(), None);
}
