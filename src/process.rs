//! # Process model
//!
//! A process is one slot in the fixed-size table plus a worker: a short,
//! non-blocking step function invoked by the scheduler. Identity is
//! positional — the slot index is the PID for the record's whole lifetime
//! and doubles as its priority rank.
//!
//! ## Process state machine
//!
//! ```text
//!               create_process()
//!   ┌───────┐ ─────────────────► ┌───────┐
//!   │ Empty │                    │ Ready │ ◄──────────────┐
//!   └───────┘ ◄───────────────── └───────┘                │
//!        ▲      kill_process()     │    ▲                 │
//!        │                  wait() │    │ timer sweep     │
//!        │                         ▼    │                 │
//!        │                       ┌────────┐               │
//!        │                       │ Timer  │               │
//!        │                       └────────┘               │
//!        │        sleep()                      wake_up()  │
//!        └─── (self-kill) ────── ┌─────────┐ ─────────────┤
//!                                │ Waiting │              │
//!                                └─────────┘              │
//!              wait_for_signal() ┌─────────┐  matching    │
//!                                │ Signal  │ ─signal──────┘
//!                                └─────────┘
//! ```

use crate::scheduler::Kernel;

/// Positional process identifier. Doubles as the priority rank: both
/// dispatch passes scan the table from the highest PID downward.
pub type Pid = u8;

/// Small integer event identifier broadcast through the kernel's single
/// pending-signal slot. `0` means "no signal".
pub type Signal = u8;

// ---------------------------------------------------------------------------
// States
// ---------------------------------------------------------------------------

/// Scheduling state of one process table slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessState {
    /// The slot is free.
    Empty,
    /// Ready for the readiness pass to dispatch.
    Ready,
    /// Parked until the tick counter reaches the deadline stored in the
    /// record's context word.
    Timer,
    /// Parked with no automatic wake source; only [`Kernel::wake_up`]
    /// releases it.
    Waiting,
    /// Parked until the signal id stored in the context word is raised.
    Signal,
}

/// Tri-state result of one worker invocation, governing scheduler flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecState {
    /// Useful work was done this call.
    Good,
    /// Nothing to do; the dispatch scan continues past this process.
    Idle,
    /// Unrecoverable failure; propagates out of the scheduler unchanged
    /// and halts the system through the board panic hook.
    Panic,
}

// ---------------------------------------------------------------------------
// Worker
// ---------------------------------------------------------------------------

/// A process body: one non-blocking step, called by the scheduler whenever
/// the process is dispatched.
///
/// The implementing struct owns whatever data the step needs — it plays
/// the role of the opaque worker parameter. Workers receive the kernel so
/// they can act on themselves (`wait`, `wait_for_signal`, `sleep`,
/// `kill_current_process`) or on other processes by PID.
///
/// Workers must run to completion quickly; there is no preemption, and a
/// long step starves every other process and the timer sweep.
pub trait Worker {
    fn step(&mut self, kernel: &mut Kernel<'_>) -> ExecState;
}

// ---------------------------------------------------------------------------
// Process record
// ---------------------------------------------------------------------------

/// One slot of the process table.
pub struct Process<'w> {
    /// Current scheduling state. `Empty` means the slot is free.
    pub(crate) state: ProcessState,

    /// Overloaded per state: the wake deadline tick in `Timer` state, the
    /// awaited signal id in `Signal` state, unused otherwise.
    pub(crate) context: u16,

    /// Worker handle. `None` only while the slot is free or while the
    /// worker itself is mid-invocation (it is taken out of the slot so it
    /// can receive `&mut Kernel`).
    pub(crate) worker: Option<&'w mut dyn Worker>,
}

impl<'w> Process<'w> {
    /// A free slot.
    pub(crate) fn empty() -> Self {
        Self {
            state: ProcessState::Empty,
            context: 0,
            worker: None,
        }
    }

    /// Current scheduling state of this slot.
    pub fn state(&self) -> ProcessState {
        self.state
    }
}
