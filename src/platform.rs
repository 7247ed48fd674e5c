//! # Platform contract
//!
//! The kernel consumes exactly two things from the hardware: a one-time
//! initializer and a read of the monotonic tick counter. Everything else
//! (pin access, bus registers) belongs to the drivers that need it.

use crate::time::Tick;

/// Hardware services consumed by the kernel.
///
/// Implementations live in the port layer (see `arch/`); tests substitute
/// a fake clock. The trait takes `&self` so the interrupt side and the
/// task side can share one instance — a real implementation backs `now`
/// with an atomic or reads a free-running hardware counter.
pub trait Platform {
    /// Prepare the hardware timer. Called once by [`crate::loader::run`]
    /// before the boot hook.
    fn init(&self) {}

    /// Current value of the monotonic tick counter.
    fn now(&self) -> Tick;
}
