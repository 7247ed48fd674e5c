//! # coros — cooperative run-to-completion process kernel
//!
//! A process kernel for microcontrollers without an MMU and with kilobytes
//! of RAM. There is no preemption and no per-process stack: a process is a
//! short, non-blocking *step function* that the scheduler invokes to
//! completion, and every wait is expressed as a state transition on the
//! process record rather than as blocked control flow.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                   Worker step functions                    │
//! ├───────────────────────────────────────────────────────────┤
//! │    Kernel API (scheduler.rs · interface.rs · time.rs)      │
//! │  create_process() · make_signal() · wait() · sleep() · …   │
//! ├───────────────┬────────────────────┬──────────────────────┤
//! │   Scheduler   │   Time / Wakeup    │  Sync primitives     │
//! │  signal pass  │   wait()           │  Semaphore · Latch   │
//! │  ready pass   │   timer sweep      │  Buffer · ring · …   │
//! ├───────────────┴────────────────────┴──────────────────────┤
//! │          TWI slave protocol engine (twi/)                  │
//! │   interrupt-driven bus state machine over SharedMemory     │
//! ├───────────────────────────────────────────────────────────┤
//! │     Platform contract (platform.rs · arch/cortex_m.rs)     │
//! │       monotonic tick counter · bus pin/register ops        │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Execution model
//!
//! The main loop alternates one scheduler dispatch with one timer sweep:
//!
//! ```text
//! run()
//!   └─► loop:
//!         ├─► Kernel::scheduler_loop()        ← dispatch one process
//!         │     ├─ signal pass    (pending signal → matching handlers)
//!         │     └─ readiness pass (highest-PID Ready process)
//!         └─► Kernel::check_timer_processes() ← wake elapsed Timer waits
//! ```
//!
//! Interrupt handlers fire asynchronously between instructions. They never
//! dispatch anything themselves: they mutate the protocol engine's state,
//! write the shared register file, and raise a signal that the next
//! scheduler pass observes in task context.
//!
//! Numerically larger PIDs are strictly higher priority — both dispatch
//! passes scan the table downward. This is a designed contract, not an
//! accident of iteration order.
//!
//! ## Memory model
//!
//! - **No heap**: all capacities are compile-time constants
//! - **No `alloc`**: pure `core`
//! - **Fixed process table**: `[Process; PROCESS_TABLE_SIZE]`
//! - **Single pending signal**: one `u8` slot, last raise wins
//! - **ISR/task sharing**: single-writer handoff per field; on targets
//!   wider than 8 bits wrap shared accesses in `arch::critical_section`

#![no_std]

#[cfg(test)]
extern crate std;

pub mod arch;
pub mod config;
pub mod interface;
pub mod loader;
pub mod platform;
pub mod process;
pub mod scheduler;
pub mod sync;
pub mod time;
pub mod twi;
