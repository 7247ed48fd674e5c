//! # Loader
//!
//! System bring-up and the main loop. The board supplies two hooks: one
//! called once after platform init and before the first dispatch (create
//! your processes here), and one called when a worker returns `Panic`,
//! after which the processor halts permanently. Availability is traded
//! away deliberately — a system with known-bad shared state does not keep
//! running.

use crate::process::ExecState;
use crate::scheduler::Kernel;

/// Board-specific boot and panic hooks.
pub trait Board<'w> {
    /// Called once, after the platform initializer and before the first
    /// scheduler dispatch.
    fn boot(&mut self, kernel: &mut Kernel<'w>);

    /// Called when the scheduler surfaces a `Panic`. The processor halts
    /// as soon as this returns; there is no reset and no recovery.
    fn on_panic(&mut self);
}

/// Run the system: platform init, boot hook, then the scheduler loop
/// interleaved with the timer sweep until a worker panics.
pub fn run<'w>(kernel: &mut Kernel<'w>, board: &mut dyn Board<'w>) -> ! {
    kernel.platform().init();
    board.boot(kernel);

    while kernel.scheduler_loop() == ExecState::Good {
        kernel.check_timer_processes();
    }

    board.on_panic();
    loop {
        core::hint::spin_loop();
    }
}
