//! # Time and wakeup
//!
//! Tick-based sleeps over a 16-bit monotonic counter that wraps. A
//! process parks itself with [`Kernel::wait`], which stores an absolute
//! wake deadline in its context word; the loader-driven sweep
//! [`Kernel::check_timer_processes`] promotes every `Timer` process whose
//! deadline fell inside the window since the previous sweep.
//!
//! The sweep is edge-triggered: a process is guaranteed to wake within one
//! full counter period of its deadline, provided the sweep runs often
//! enough that its window never skips a whole wrap. At 1 kHz the counter
//! wraps roughly every 65 seconds, which leaves enormous slack for a main
//! loop that sweeps every iteration.

use crate::process::ProcessState;
use crate::scheduler::Kernel;

/// One unit of the monotonic system counter.
pub type Tick = u16;

/// Largest counter value; the tick after this one wraps around.
pub const MAX_TICK: Tick = Tick::MAX;

impl<'w> Kernel<'w> {
    /// Park the calling process for `duration` ticks.
    ///
    /// The absolute deadline is computed in wrapped space: when the
    /// deadline would land past [`MAX_TICK`], it continues from the bottom
    /// of the counter range. Always succeeds; a zero duration wakes on the
    /// next sweep that observes the current tick.
    pub fn wait(&mut self, duration: Tick) {
        let now = self.platform.now();
        let until_wrap = MAX_TICK - now;

        let deadline = if until_wrap < duration {
            duration - until_wrap
        } else {
            now + duration
        };

        let slot = self.current_slot_mut();
        slot.state = ProcessState::Timer;
        slot.context = deadline;
    }

    /// Wake every `Timer` process whose deadline has elapsed.
    ///
    /// The wake window is `[previous sweep tick, current tick]`. Two wrap
    /// cases adjust it: a previous sweep that landed exactly on
    /// [`MAX_TICK`] restarts the window at zero, and a mid-range wrap
    /// clamps the window to the top of the counter, leaving the wrapped
    /// remainder for the following sweep.
    pub fn check_timer_processes(&mut self) {
        let mut window_start = self.previous_sweep;
        let mut window_end = self.platform.now();
        self.previous_sweep = window_end;

        if window_start == MAX_TICK && window_start > window_end {
            window_start = 0;
        }

        if window_start > window_end {
            // Sweep only up to the counter top; parking the watermark on
            // MAX_TICK makes the next sweep's window restart at zero, so
            // the wrapped remainder is picked up then.
            window_end = MAX_TICK;
            self.previous_sweep = MAX_TICK;
        }

        for pid in (0..crate::config::PROCESS_TABLE_SIZE).rev() {
            let pid = pid as crate::process::Pid;
            let Ok(slot) = self.slot_mut(pid) else { continue };

            if slot.state != ProcessState::Timer {
                continue;
            }

            if slot.context >= window_start && slot.context <= window_end {
                slot.state = ProcessState::Ready;
            }
        }
    }
}
