//! # Configuration
//!
//! Compile-time constants governing every fixed capacity in the system.
//! There is no runtime configuration API — change a constant and rebuild.

/// Number of slots in the process table. A process's index in the table is
/// its PID and its priority rank; higher index wins dispatch.
pub const PROCESS_TABLE_SIZE: usize = 8;

/// Capacity in bytes of the system [`Buffer`](crate::sync::SystemBuffer).
pub const BUFFER_SIZE: usize = 8;

/// Capacity in bytes of the system
/// [`CircularBuffer`](crate::sync::SystemCircularBuffer).
pub const CIRCULAR_BUFFER_SIZE: usize = 8;

/// Size in bytes of the shared-memory register file exposed on the TWI bus.
pub const SHARED_MEMORY_SIZE: usize = 8;

/// This device's 7-bit TWI slave address.
pub const TWI_ADDRESS: u8 = 0x20;

/// Tick frequency in Hz of the monotonic system counter. The 16-bit
/// counter wraps after `65536 / TICK_HZ` seconds; the timer sweep is built
/// to survive that.
pub const TICK_HZ: u32 = 1000;

/// Core clock frequency in Hz (16 MHz HSI default on the demo target).
pub const SYSTEM_CLOCK_HZ: u32 = 16_000_000;
