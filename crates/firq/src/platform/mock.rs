// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Mock platform implementation for testing.
//!
//! This module provides a simulated multi-core host and register windows
//! backed by heap buffers, allowing the lifecycle to be exercised without
//! FIQ-capable hardware. Every externally visible action is appended to a
//! shared event log so tests can check ordering.

#![allow(clippy::panic)] // Test infrastructure - panicking on invalid input is correct

use core::fmt;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::vec;
use std::vec::Vec;

use firq_abi::epit::{self, cr, sr};
use firq_abi::{CoreId, CoreSet, FiqRegisters, IrqLine, Vaddr};

use super::traits::{CoreAffinity, FiqBank, InterruptHost, RegisterWindow};
use crate::error::Busy;
use crate::handler::{HandlerBlob, HandlerDescriptor};

/// Something the controller did to the mock platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Register write through a window.
    Write {
        /// Window base.
        base: Vaddr,
        /// Byte offset within the window.
        offset: usize,
        /// Value written.
        value: u32,
    },
    /// Barrier issued through a window.
    Barrier {
        /// Window base.
        base: Vaddr,
    },
    /// Affinity request; the closure ran on `core`.
    RunOn {
        /// Target core.
        core: CoreId,
    },
    /// Banked FIQ registers loaded on `core`.
    SetFiqRegs {
        /// Core whose bank changed.
        core: CoreId,
        /// New bank contents.
        regs: FiqRegisters,
    },
    /// FIQ vector claimed.
    ClaimVector {
        /// Claiming client.
        name: &'static str,
    },
    /// Handler bound to the vector.
    SetHandler {
        /// Handler length in bytes.
        len: usize,
    },
    /// FIQ vector released.
    ReleaseVector {
        /// Releasing client.
        name: &'static str,
    },
    /// Line enabled at the distributor.
    EnableLine(IrqLine),
    /// Line disabled at the distributor.
    DisableLine(IrqLine),
    /// FIQ masked on a core.
    MaskLocal(CoreId),
    /// FIQ unmasked on a core.
    UnmaskLocal(CoreId),
}

type EventLog = Rc<RefCell<Vec<Event>>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WindowKind {
    /// Plain memory: reads return what was written.
    Memory,
    /// EPIT register semantics (W1C status, read-only counter).
    Epit,
}

struct WindowState {
    base: Vaddr,
    kind: WindowKind,
    words: RefCell<Vec<u32>>,
    log: EventLog,
}

/// A mock register window backed by a heap buffer.
///
/// Clones share the same backing store, so a test can keep a clone to inspect
/// a window after handing the original to the controller.
#[derive(Clone)]
pub struct MockWindow {
    inner: Rc<WindowState>,
}

impl MockWindow {
    /// Create a plain memory window of `len` bytes with its own event log.
    #[must_use]
    pub fn new(base: Vaddr, len: usize) -> Self {
        Self::with_log(base, len, WindowKind::Memory, EventLog::default())
    }

    /// Create a window simulating an EPIT register block, with its own event log.
    #[must_use]
    pub fn epit(base: Vaddr) -> Self {
        Self::with_log(
            base,
            epit::REGISTER_BLOCK_SIZE,
            WindowKind::Epit,
            EventLog::default(),
        )
    }

    fn with_log(base: Vaddr, len: usize, kind: WindowKind, log: EventLog) -> Self {
        assert!(len % 4 == 0, "window length {len:#x} is not word-sized");
        Self {
            inner: Rc::new(WindowState {
                base,
                kind,
                words: RefCell::new(vec![0u32; len / 4]),
                log,
            }),
        }
    }

    /// Copy of the window contents, one entry per word.
    #[must_use]
    pub fn words(&self) -> Vec<u32> {
        self.inner.words.borrow().clone()
    }

    /// Fill the window with `value`, bypassing the event log.
    pub fn fill(&self, value: u32) {
        self.inner.words.borrow_mut().fill(value);
    }

    /// Let an EPIT window count down to zero once.
    ///
    /// Latches `SR.OCIF`, reloads the counter, and returns whether the
    /// interrupt output is asserted. A disabled timer does nothing.
    #[must_use]
    pub fn expire(&self) -> bool {
        assert!(
            self.inner.kind == WindowKind::Epit,
            "expire on a window that is not an EPIT"
        );
        let mut words = self.inner.words.borrow_mut();
        let control = words[epit::CR / 4];
        if control & cr::EN == 0 {
            return false;
        }
        words[epit::SR / 4] |= sr::OCIF;
        words[epit::CNR / 4] = if control & cr::RLD != 0 {
            words[epit::LR / 4]
        } else {
            u32::MAX
        };
        control & cr::OCIEN != 0
    }

    fn index(&self, offset: usize) -> usize {
        assert!(offset % 4 == 0, "unaligned register offset {offset:#x}");
        let index = offset / 4;
        assert!(
            index < self.inner.words.borrow().len(),
            "register offset {offset:#x} is beyond end of window {}",
            self.inner.base
        );
        index
    }

    fn write_epit(words: &mut [u32], index: usize, value: u32) {
        match index * 4 {
            epit::SR => words[index] &= !value,
            epit::CNR => {}
            epit::CR => {
                let previous = words[index];
                words[index] = value;
                let enabling = value & cr::EN != 0 && previous & cr::EN == 0;
                if enabling && value & cr::ENMOD != 0 {
                    words[epit::CNR / 4] = words[epit::LR / 4];
                }
            }
            _ => words[index] = value,
        }
    }
}

impl fmt::Debug for MockWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockWindow")
            .field("base", &self.inner.base)
            .field("len", &self.len())
            .field("kind", &self.inner.kind)
            .finish()
    }
}

impl RegisterWindow for MockWindow {
    fn base(&self) -> Vaddr {
        self.inner.base
    }

    fn len(&self) -> usize {
        self.inner.words.borrow().len() * 4
    }

    fn read32(&self, offset: usize) -> u32 {
        let index = self.index(offset);
        self.inner.words.borrow()[index]
    }

    fn write32(&self, offset: usize, value: u32) {
        let index = self.index(offset);
        self.inner.log.borrow_mut().push(Event::Write {
            base: self.inner.base,
            offset,
            value,
        });
        let mut words = self.inner.words.borrow_mut();
        match self.inner.kind {
            WindowKind::Memory => words[index] = value,
            WindowKind::Epit => Self::write_epit(&mut words, index, value),
        }
    }

    fn barrier(&self) {
        self.inner.log.borrow_mut().push(Event::Barrier {
            base: self.inner.base,
        });
    }
}

/// A simulated multi-core host with a GIC and banked FIQ registers.
///
/// Starts on the boot core with the FIQ vector free. Each core's bank is
/// seeded with distinct values so tests can tell whether untouched fields
/// survived.
pub struct MockPlatform {
    cores: CoreSet,
    current: Cell<CoreId>,
    banks: RefCell<[FiqRegisters; CoreSet::MAX_CORES]>,
    vector_owner: Cell<Option<&'static str>>,
    handler_len: Cell<Option<usize>>,
    foreign_handler: Cell<bool>,
    lines: RefCell<Vec<IrqLine>>,
    masked: Cell<CoreSet>,
    log: EventLog,
}

impl MockPlatform {
    /// Create a host with cores `0..core_count`.
    #[must_use]
    pub fn new(core_count: usize) -> Self {
        assert!(
            (1..=CoreSet::MAX_CORES).contains(&core_count),
            "core count {core_count} out of range"
        );
        let mut banks = [FiqRegisters::default(); CoreSet::MAX_CORES];
        for (index, bank) in (0u32..).zip(banks.iter_mut()) {
            let seed = 0x100 * index;
            bank.r8_r12 = [seed + 8, seed + 9, seed + 10, seed + 11, seed + 12];
            bank.sp = 0xdead_0000 | index;
            bank.lr = 0xc000_0000 | index;
        }
        Self {
            cores: CoreSet::first(core_count),
            current: Cell::new(CoreId::BOOT),
            banks: RefCell::new(banks),
            vector_owner: Cell::new(None),
            handler_len: Cell::new(None),
            foreign_handler: Cell::new(false),
            lines: RefCell::new(Vec::new()),
            masked: Cell::new(CoreSet::EMPTY),
            log: EventLog::default(),
        }
    }

    /// Create a plain memory window that logs into this platform's event log.
    #[must_use]
    pub fn window(&self, base: Vaddr, len: usize) -> MockWindow {
        MockWindow::with_log(base, len, WindowKind::Memory, Rc::clone(&self.log))
    }

    /// Create an EPIT window that logs into this platform's event log.
    #[must_use]
    pub fn epit(&self, base: Vaddr) -> MockWindow {
        MockWindow::with_log(
            base,
            epit::REGISTER_BLOCK_SIZE,
            WindowKind::Epit,
            Rc::clone(&self.log),
        )
    }

    /// Move the caller to `core`.
    pub fn set_current_core(&self, core: CoreId) {
        assert!(self.cores.contains(core), "core {core} not present");
        self.current.set(core);
    }

    /// Banked FIQ registers of `core`.
    #[must_use]
    pub fn bank(&self, core: CoreId) -> FiqRegisters {
        self.banks.borrow()[core.as_usize()]
    }

    /// Current owner of the FIQ vector.
    #[must_use]
    pub fn vector_owner(&self) -> Option<&'static str> {
        self.vector_owner.get()
    }

    /// Length of the bound handler, if any.
    #[must_use]
    pub fn handler_len(&self) -> Option<usize> {
        self.handler_len.get()
    }

    /// Simulate another client owning the FIQ vector.
    pub fn claim_vector_as(&self, name: &'static str) {
        self.vector_owner.set(Some(name));
    }

    /// Simulate a different handler already bound to the FIQ slot.
    pub fn occupy_handler_slot(&self) {
        self.foreign_handler.set(true);
    }

    /// Check whether `line` is enabled at the distributor.
    #[must_use]
    pub fn is_line_enabled(&self, line: IrqLine) -> bool {
        self.lines.borrow().contains(&line)
    }

    /// Check whether the FIQ is masked on `core`.
    #[must_use]
    pub fn is_locally_masked(&self, core: CoreId) -> bool {
        self.masked.get().contains(core)
    }

    /// Copy of the event log.
    #[must_use]
    pub fn events(&self) -> Vec<Event> {
        self.log.borrow().clone()
    }

    /// Forget all logged events.
    pub fn clear_events(&self) {
        self.log.borrow_mut().clear();
    }

    fn record(&self, event: Event) {
        self.log.borrow_mut().push(event);
    }
}

impl fmt::Debug for MockPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockPlatform")
            .field("cores", &self.cores)
            .field("current", &self.current.get())
            .field("vector_owner", &self.vector_owner.get())
            .finish_non_exhaustive()
    }
}

impl InterruptHost for MockPlatform {
    fn claim_vector(&self, descriptor: &HandlerDescriptor) -> Result<(), Busy> {
        if self.vector_owner.get().is_some() {
            return Err(Busy);
        }
        self.vector_owner.set(Some(descriptor.name()));
        self.record(Event::ClaimVector {
            name: descriptor.name(),
        });
        Ok(())
    }

    fn set_handler(&self, handler: &HandlerBlob) -> Result<(), Busy> {
        if self.foreign_handler.get() {
            return Err(Busy);
        }
        self.handler_len.set(Some(handler.len()));
        self.record(Event::SetHandler { len: handler.len() });
        Ok(())
    }

    fn release_vector(&self, descriptor: &HandlerDescriptor) {
        self.vector_owner.set(None);
        self.handler_len.set(None);
        self.record(Event::ReleaseVector {
            name: descriptor.name(),
        });
    }

    fn enable_line(&self, line: IrqLine) {
        let mut lines = self.lines.borrow_mut();
        if !lines.contains(&line) {
            lines.push(line);
        }
        drop(lines);
        self.record(Event::EnableLine(line));
    }

    fn disable_line(&self, line: IrqLine) {
        self.lines.borrow_mut().retain(|enabled| *enabled != line);
        self.record(Event::DisableLine(line));
    }

    fn mask_local(&self) {
        let core = self.current.get();
        self.masked.set(self.masked.get().with(core));
        self.record(Event::MaskLocal(core));
    }

    fn unmask_local(&self) {
        let core = self.current.get();
        let remaining = self.masked.get().bits() & !CoreSet::EMPTY.with(core).bits();
        self.masked.set(CoreSet::from_bits(remaining));
        self.record(Event::UnmaskLocal(core));
    }
}

impl CoreAffinity for MockPlatform {
    fn possible_cores(&self) -> CoreSet {
        self.cores
    }

    fn current_core(&self) -> CoreId {
        self.current.get()
    }

    fn run_on<R, F: FnOnce() -> R>(&self, core: CoreId, f: F) -> R {
        assert!(self.cores.contains(core), "core {core} not present");
        self.record(Event::RunOn { core });
        let previous = self.current.replace(core);
        let result = f();
        self.current.set(previous);
        result
    }
}

impl FiqBank for MockPlatform {
    fn fiq_regs(&self) -> FiqRegisters {
        self.bank(self.current.get())
    }

    fn set_fiq_regs(&self, regs: &FiqRegisters) {
        let core = self.current.get();
        self.banks.borrow_mut()[core.as_usize()] = *regs;
        self.record(Event::SetFiqRegs { core, regs: *regs });
    }
}
