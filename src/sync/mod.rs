//! # Synchronization primitives
//!
//! Allocation-free exchange structures carrying data across the
//! interrupt/task boundary: a counting [`Semaphore`], a one-slot
//! [`Latch`] mailbox, a drain-and-reset [`Buffer`], a wrap-around
//! [`CircularBuffer`], and the [`SharedMemory`] register file.
//!
//! None of these carry locks. Safety under concurrent ISR/task access is
//! an access discipline: every field is written from one side at a time,
//! and byte-sized fields make single accesses atomic on 8-bit targets.
//! On wider or multi-core targets, wrap any operation touching a field
//! shared across the boundary in the port layer's critical-section guard
//! (see `arch/`).
//!
//! Fallible operations return `#[must_use] bool` — failure at a capacity
//! boundary is an answer for the caller, never a panic.

mod buffer;
mod circular;
mod latch;
mod semaphore;
mod shared_memory;

pub use buffer::Buffer;
pub use circular::CircularBuffer;
pub use latch::Latch;
pub use semaphore::Semaphore;
pub use shared_memory::SharedMemory;

use crate::config::{BUFFER_SIZE, CIRCULAR_BUFFER_SIZE, SHARED_MEMORY_SIZE};

/// The system [`Buffer`], sized by [`crate::config::BUFFER_SIZE`].
pub type SystemBuffer = Buffer<BUFFER_SIZE>;

/// The system [`CircularBuffer`], sized by
/// [`crate::config::CIRCULAR_BUFFER_SIZE`].
pub type SystemCircularBuffer = CircularBuffer<CIRCULAR_BUFFER_SIZE>;

/// The bus-visible register file, sized by
/// [`crate::config::SHARED_MEMORY_SIZE`].
pub type RegisterFile = SharedMemory<SHARED_MEMORY_SIZE>;
