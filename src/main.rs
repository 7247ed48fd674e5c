//! # Demo Firmware
//!
//! Reference firmware for the kernel on a Cortex-M target. Two
//! cooperating processes share a one-byte mailbox:
//!
//! | Pid | Process    | Behavior                                          |
//! |-----|------------|---------------------------------------------------|
//! | 2   | `Producer` | Every 500 ticks, pushes a beat count and signals  |
//! | 1   | `Consumer` | Sleeps on the mailbox signal, drains the latch    |
//!
//! The producer gets the higher pid so its deadline handling always runs
//! before the consumer drains. SysTick drives the tick counter; everything
//! else is cooperative.

#![cfg_attr(all(target_arch = "arm", target_os = "none"), no_std)]
#![cfg_attr(all(target_arch = "arm", target_os = "none"), no_main)]

#[cfg(all(target_arch = "arm", target_os = "none"))]
mod firmware {
    use core::cell::RefCell;

    use cortex_m::interrupt::Mutex;
    use cortex_m::singleton;
    use cortex_m_rt::{entry, exception};
    use panic_halt as _;

    use coros::arch::cortex_m as port;
    use coros::loader::{self, Board};
    use coros::process::{ExecState, Signal, Worker};
    use coros::scheduler::Kernel;
    use coros::sync::Latch;
    use coros::time::Tick;

    /// Raised by the producer when a fresh beat is in the mailbox.
    const MAILBOX_SIGNAL: Signal = 0x10;

    /// Mailbox between the two processes. Interrupt handlers never touch
    /// it, but the `Mutex` keeps access uniform with state they do share.
    static MAILBOX: Mutex<RefCell<Latch>> = Mutex::new(RefCell::new(Latch::new()));

    // -----------------------------------------------------------------------
    // Processes
    // -----------------------------------------------------------------------

    /// Periodic beat source.
    struct Producer {
        period: Tick,
        beats: u8,
    }

    impl Worker for Producer {
        fn step(&mut self, kernel: &mut Kernel<'_>) -> ExecState {
            self.beats = self.beats.wrapping_add(1);

            let delivered = port::critical_section(|cs| {
                MAILBOX.borrow(cs).borrow_mut().push(self.beats)
            });
            if delivered {
                kernel.make_signal(MAILBOX_SIGNAL);
            }

            kernel.wait(self.period);
            ExecState::Good
        }
    }

    /// Drains the mailbox whenever the producer signals.
    struct Consumer {
        last_beat: u8,
    }

    impl Worker for Consumer {
        fn step(&mut self, kernel: &mut Kernel<'_>) -> ExecState {
            let beat = port::critical_section(|cs| {
                let mut mailbox = MAILBOX.borrow(cs).borrow_mut();
                mailbox.is_set().then(|| mailbox.pop())
            });
            if let Some(beat) = beat {
                self.last_beat = beat;
            }

            kernel.wait_for_signal(MAILBOX_SIGNAL);
            ExecState::Good
        }
    }

    // -----------------------------------------------------------------------
    // Board
    // -----------------------------------------------------------------------

    struct DemoBoard;

    impl Board<'static> for DemoBoard {
        fn boot(&mut self, kernel: &mut Kernel<'static>) {
            let producer = singleton!(: Producer = Producer { period: 500, beats: 0 })
                .expect("producer already created");
            let consumer = singleton!(: Consumer = Consumer { last_beat: 0 })
                .expect("consumer already created");

            kernel
                .create_process(2, producer)
                .expect("pid 2 occupied");
            kernel
                .create_process(1, consumer)
                .expect("pid 1 occupied");
        }

        fn on_panic(&mut self) {}
    }

    // -----------------------------------------------------------------------
    // Entry and exceptions
    // -----------------------------------------------------------------------

    #[exception]
    fn SysTick() {
        port::on_tick();
    }

    #[entry]
    fn main() -> ! {
        let mut cp = cortex_m::Peripherals::take().expect("peripherals taken twice");
        port::configure_systick(&mut cp.SYST);

        let clock = singleton!(: port::SysTickClock = port::SysTickClock)
            .expect("clock already created");
        let kernel = singleton!(: Kernel<'static> = Kernel::new(clock))
            .expect("kernel already created");

        let mut board = DemoBoard;
        loader::run(kernel, &mut board)
    }
}

#[cfg(not(all(target_arch = "arm", target_os = "none")))]
fn main() {}
