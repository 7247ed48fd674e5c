//! # Cortex-M Port Layer
//!
//! Hardware-specific code for ARM Cortex-M processors. Provides the
//! SysTick-driven tick counter behind [`Platform`] and the critical
//! section primitive used wherever main-line code shares state with
//! interrupt handlers.
//!
//! There is no context switching here: processes yield by returning
//! from their step function, so the only asynchronous event the port
//! has to deliver is the passage of time. SysTick increments a single
//! atomic counter at `TICK_HZ`; everything else runs in Thread mode.

use core::sync::atomic::{AtomicU16, Ordering};

use cortex_m::interrupt;
use cortex_m::peripheral::syst::SystClkSource;

use crate::config::{SYSTEM_CLOCK_HZ, TICK_HZ};
use crate::platform::Platform;
use crate::time::Tick;

// ---------------------------------------------------------------------------
// Tick counter
// ---------------------------------------------------------------------------

/// Kernel tick counter, incremented from the SysTick handler.
///
/// Wrapping is the intended behavior: deadline arithmetic in the timer
/// sweep handles the roll-over explicitly.
static TICKS: AtomicU16 = AtomicU16::new(0);

/// Advance the tick counter by one. Call this from the `SysTick`
/// exception handler of the firmware binary.
#[inline]
pub fn on_tick() {
    let now = TICKS.load(Ordering::Relaxed);
    TICKS.store(now.wrapping_add(1), Ordering::Relaxed);
}

// ---------------------------------------------------------------------------
// SysTick configuration
// ---------------------------------------------------------------------------

/// Configure the SysTick timer to fire at `TICK_HZ` from the core clock.
pub fn configure_systick(syst: &mut cortex_m::peripheral::SYST) {
    let reload = SYSTEM_CLOCK_HZ / TICK_HZ - 1;
    syst.set_reload(reload);
    syst.clear_current();
    syst.set_clock_source(SystClkSource::Core);
    syst.enable_counter();
    syst.enable_interrupt();
}

// ---------------------------------------------------------------------------
// Platform implementation
// ---------------------------------------------------------------------------

/// SysTick-backed clock source for the kernel.
///
/// The counter itself lives in a `static` so the exception handler can
/// reach it; this type is the borrowable handle the kernel holds.
pub struct SysTickClock;

impl Platform for SysTickClock {
    fn now(&self) -> Tick {
        TICKS.load(Ordering::Relaxed)
    }
}

// ---------------------------------------------------------------------------
// Critical sections
// ---------------------------------------------------------------------------

/// Execute a closure with interrupts disabled.
///
/// The interrupt handlers and the scheduler loop share the kernel and
/// the TWI engine; any main-line access to either must go through here.
/// Keep the enclosed work short to bound interrupt latency.
#[inline]
pub fn critical_section<F, R>(f: F) -> R
where
    F: FnOnce(&interrupt::CriticalSection) -> R,
{
    interrupt::free(f)
}
