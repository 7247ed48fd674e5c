//! # Scheduler
//!
//! The process table and the two-pass dispatcher. One call to
//! [`Kernel::scheduler_loop`] invokes at most a handful of workers and
//! returns; the loader calls it forever, interleaved with the timer sweep.
//!
//! ## Dispatch algorithm
//!
//! Each invocation:
//! 1. **Signal pass** — if a signal is pending, capture it and clear the
//!    slot *before* any handler runs (a handler re-raising the same signal
//!    cannot re-trigger itself this tick). Scan the table from the highest
//!    PID downward and invoke every `Signal`-state worker whose context
//!    matches; `Idle` continues the scan, any other result returns
//!    immediately.
//! 2. **Readiness pass** — reached only when no signal was pending or all
//!    matching handlers returned `Idle`. Scan downward and invoke the
//!    first `Ready` worker; `Idle` continues the scan, anything else
//!    returns.
//!
//! The descending scan makes the numerically largest PID strictly
//! highest-priority for the *next* dispatch opportunity. Nothing preempts
//! a worker mid-step.
//!
//! ## Design notes
//!
//! `Kernel` is the former pile of globals — process table, current-process
//! cursor, pending-signal slot, timer-sweep watermark — gathered into one
//! context value created once at startup and passed by reference to every
//! operation. One instance per program is the intended shape; nothing
//! enforces it, but two kernels sharing one interrupt source is an error
//! no type system catches.

use crate::config::PROCESS_TABLE_SIZE;
use crate::platform::Platform;
use crate::process::{ExecState, Pid, Process, ProcessState, Signal};
use crate::process::Worker;
use crate::time::Tick;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failures of kernel table operations. Always returned synchronously to
/// the caller; never escalated to a worker-level `Panic` by the kernel
/// itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelError {
    /// PID outside the process table.
    InvalidPid,
    /// Target slot already holds a live process.
    SlotOccupied,
    /// Target slot is empty.
    SlotEmpty,
    /// `wake_up` on a process that is not parked in `Waiting` state.
    NotWaiting,
}

// ---------------------------------------------------------------------------
// Kernel
// ---------------------------------------------------------------------------

/// The kernel context: process table, dispatch state, pending signal, and
/// the platform clock. Created once at boot, borrowed everywhere else.
pub struct Kernel<'w> {
    /// Fixed process table; the index is the PID.
    table: [Process<'w>; PROCESS_TABLE_SIZE],

    /// PID of the record currently mid-invocation. Meaningful only while
    /// a worker is on the stack; self-directed operations target it.
    current_process: Pid,

    /// The single pending-signal slot. `0` = none; a second raise before
    /// consumption overwrites the first, by contract.
    current_signal: Signal,

    /// Tick value observed by the previous timer sweep.
    pub(crate) previous_sweep: Tick,

    pub(crate) platform: &'w dyn Platform,
}

impl<'w> Kernel<'w> {
    /// Fresh kernel: every slot empty, no signal pending.
    pub fn new(platform: &'w dyn Platform) -> Self {
        Self {
            table: core::array::from_fn(|_| Process::empty()),
            current_process: 0,
            current_signal: 0,
            previous_sweep: 0,
            platform,
        }
    }

    /// The platform clock this kernel was built over.
    pub fn platform(&self) -> &'w dyn Platform {
        self.platform
    }

    // -- table management ---------------------------------------------------

    /// Install `worker` at slot `pid` and mark it `Ready`.
    ///
    /// Fails with [`KernelError::InvalidPid`] out of range and
    /// [`KernelError::SlotOccupied`] if the slot holds a live process —
    /// accidental overwrite of a running process is never silent.
    pub fn create_process(
        &mut self,
        pid: Pid,
        worker: &'w mut dyn Worker,
    ) -> Result<(), KernelError> {
        let slot = self
            .table
            .get_mut(usize::from(pid))
            .ok_or(KernelError::InvalidPid)?;

        if slot.state != ProcessState::Empty {
            return Err(KernelError::SlotOccupied);
        }

        slot.worker = Some(worker);
        slot.context = 0;
        slot.state = ProcessState::Ready;

        Ok(())
    }

    /// Free slot `pid`. Fails if it is already empty.
    pub fn kill_process(&mut self, pid: Pid) -> Result<(), KernelError> {
        let slot = self
            .table
            .get_mut(usize::from(pid))
            .ok_or(KernelError::InvalidPid)?;

        if slot.state == ProcessState::Empty {
            return Err(KernelError::SlotEmpty);
        }

        slot.state = ProcessState::Empty;
        slot.worker = None;

        Ok(())
    }

    /// Free the slot whose worker is presently executing. The worker
    /// handle is dropped when its step returns.
    pub fn kill_current_process(&mut self) {
        let slot = &mut self.table[usize::from(self.current_process)];
        slot.state = ProcessState::Empty;
    }

    /// Highest-numbered free slot, if any. Convenience for callers that do
    /// not assign PIDs themselves; note that the highest free slot is also
    /// the highest-priority one.
    pub fn first_empty_slot(&self) -> Option<Pid> {
        (0..PROCESS_TABLE_SIZE)
            .rev()
            .find(|&pid| self.table[pid].state == ProcessState::Empty)
            .map(|pid| pid as Pid)
    }

    /// Scheduling state of slot `pid`.
    pub fn process_state(&self, pid: Pid) -> Result<ProcessState, KernelError> {
        self.table
            .get(usize::from(pid))
            .map(Process::state)
            .ok_or(KernelError::InvalidPid)
    }

    pub(crate) fn slot_mut(&mut self, pid: Pid) -> Result<&mut Process<'w>, KernelError> {
        self.table
            .get_mut(usize::from(pid))
            .ok_or(KernelError::InvalidPid)
    }

    pub(crate) fn current_slot_mut(&mut self) -> &mut Process<'w> {
        &mut self.table[usize::from(self.current_process)]
    }

    // -- signal slot --------------------------------------------------------

    /// Raise a signal: unconditionally overwrite the pending-signal slot.
    /// Safe to call from interrupt context; a raise that lands before the
    /// previous signal was consumed replaces it.
    pub fn make_signal(&mut self, id: Signal) {
        self.current_signal = id;
    }

    /// The signal currently pending, `0` if none.
    pub fn pending_signal(&self) -> Signal {
        self.current_signal
    }

    // -- dispatch -----------------------------------------------------------

    /// One dispatch: signal pass, then readiness pass. Returns `Good` when
    /// nothing non-idle was found to run. `Panic` from any worker comes
    /// back unchanged — it is never retried or swallowed.
    pub fn scheduler_loop(&mut self) -> ExecState {
        if let Some(outcome) = self.signal_pass() {
            return outcome;
        }
        self.readiness_pass()
    }

    /// Dispatch handlers for the pending signal, if there is one.
    ///
    /// Returns `None` when the readiness pass should follow: no signal was
    /// pending, or every matching handler answered `Idle`.
    fn signal_pass(&mut self) -> Option<ExecState> {
        if self.current_signal == 0 {
            return None;
        }

        // Capture-then-clear before any handler runs: an interrupt or a
        // handler may raise again mid-pass without re-triggering this one.
        let signal = self.current_signal;
        self.current_signal = 0;

        for pid in (0..PROCESS_TABLE_SIZE).rev() {
            if self.table[pid].state != ProcessState::Signal {
                continue;
            }
            if self.table[pid].context != u16::from(signal) {
                continue;
            }

            match self.run_process(pid as Pid) {
                ExecState::Idle => continue,
                outcome => return Some(outcome),
            }
        }

        None
    }

    /// Dispatch the highest-PID `Ready` process that does something.
    fn readiness_pass(&mut self) -> ExecState {
        for pid in (0..PROCESS_TABLE_SIZE).rev() {
            if self.table[pid].state != ProcessState::Ready {
                continue;
            }

            match self.run_process(pid as Pid) {
                ExecState::Idle => continue,
                outcome => return outcome,
            }
        }

        ExecState::Good
    }

    /// Invoke the worker at `pid`.
    ///
    /// The handle is taken out of the slot for the duration of the step so
    /// the worker can receive `&mut Kernel`, then reinstalled — unless the
    /// worker emptied (or repopulated) its own slot meanwhile.
    fn run_process(&mut self, pid: Pid) -> ExecState {
        let Some(worker) = self.table[usize::from(pid)].worker.take() else {
            return ExecState::Idle;
        };

        self.current_process = pid;
        let outcome = worker.step(self);

        let slot = &mut self.table[usize::from(pid)];
        if slot.state != ProcessState::Empty && slot.worker.is_none() {
            slot.worker = Some(worker);
        }

        outcome
    }
}

// ---------------------------------------------------------------------------
// Unit tests (host-only)
// ---------------------------------------------------------------------------
