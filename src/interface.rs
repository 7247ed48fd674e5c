//! # Process interface
//!
//! The operations workers use to park themselves and each other: signal
//! waits, indefinite sleeps, and explicit wake-ups. Raising a signal lives
//! here too, though it is just as often called from interrupt context.
//!
//! All of these are state transitions on process records. None of them
//! block — a worker that wants to wait changes its state, returns from its
//! step, and is simply not dispatched until the condition arrives.

use crate::process::{Pid, ProcessState, Signal};
use crate::scheduler::{Kernel, KernelError};

impl<'w> Kernel<'w> {
    /// Park the calling process until `id` is raised.
    pub fn wait_for_signal(&mut self, id: Signal) {
        let slot = self.current_slot_mut();
        slot.state = ProcessState::Signal;
        slot.context = u16::from(id);
    }

    /// Park process `pid` until `id` is raised. Fails on an empty slot.
    pub fn to_wait_for_signal(&mut self, pid: Pid, id: Signal) -> Result<(), KernelError> {
        let slot = self.slot_mut(pid)?;

        if slot.state == ProcessState::Empty {
            return Err(KernelError::SlotEmpty);
        }

        slot.state = ProcessState::Signal;
        slot.context = u16::from(id);

        Ok(())
    }

    /// Park the calling process with no automatic wake source. Only
    /// [`Kernel::wake_up`] releases it.
    pub fn sleep(&mut self) {
        self.current_slot_mut().state = ProcessState::Waiting;
    }

    /// Park process `pid` indefinitely. Fails on an empty slot.
    pub fn to_sleep(&mut self, pid: Pid) -> Result<(), KernelError> {
        let slot = self.slot_mut(pid)?;

        if slot.state == ProcessState::Empty {
            return Err(KernelError::SlotEmpty);
        }

        slot.state = ProcessState::Waiting;

        Ok(())
    }

    /// Release process `pid` from its `Waiting` park.
    ///
    /// Waking a process that is not parked is a contract violation, not a
    /// no-op: the caller's bookkeeping is wrong and gets told so.
    pub fn wake_up(&mut self, pid: Pid) -> Result<(), KernelError> {
        let slot = self.slot_mut(pid)?;

        if slot.state != ProcessState::Waiting {
            return Err(KernelError::NotWaiting);
        }

        slot.state = ProcessState::Ready;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::testing::FakeClock;
    use crate::process::{ExecState, Worker};

    struct Napper;

    impl Worker for Napper {
        fn step(&mut self, kernel: &mut Kernel<'_>) -> ExecState {
            kernel.sleep();
            ExecState::Good
        }
    }

    #[test]
    fn targeted_waits_require_a_live_process() {
        let clock = FakeClock::new();
        let mut kernel = Kernel::new(&clock);

        assert_eq!(kernel.to_wait_for_signal(3, 0x10), Err(KernelError::SlotEmpty));
        assert_eq!(kernel.to_sleep(3), Err(KernelError::SlotEmpty));
        assert_eq!(kernel.to_sleep(200), Err(KernelError::InvalidPid));
    }

    #[test]
    fn sleeping_process_stays_parked_until_woken() {
        let clock = FakeClock::new();
        let mut napper = Napper;
        let mut kernel = Kernel::new(&clock);

        kernel.create_process(2, &mut napper).unwrap();
        assert_eq!(kernel.scheduler_loop(), ExecState::Good);
        assert_eq!(kernel.process_state(2), Ok(ProcessState::Waiting));

        // No wake source: dispatch finds nothing.
        assert_eq!(kernel.scheduler_loop(), ExecState::Good);
        assert_eq!(kernel.process_state(2), Ok(ProcessState::Waiting));

        kernel.wake_up(2).unwrap();
        assert_eq!(kernel.process_state(2), Ok(ProcessState::Ready));
    }

    #[test]
    fn wake_up_rejects_non_waiting_targets() {
        let clock = FakeClock::new();
        let mut napper = Napper;
        let mut kernel = Kernel::new(&clock);

        assert_eq!(kernel.wake_up(1), Err(KernelError::NotWaiting));

        kernel.create_process(1, &mut napper).unwrap();
        // Ready, not Waiting.
        assert_eq!(kernel.wake_up(1), Err(KernelError::NotWaiting));

        kernel.to_sleep(1).unwrap();
        assert_eq!(kernel.wake_up(1), Ok(()));
        assert_eq!(kernel.wake_up(1), Err(KernelError::NotWaiting));
    }

    #[test]
    fn targeted_signal_wait_overwrites_previous_park() {
        let clock = FakeClock::new();
        let mut napper = Napper;
        let mut kernel = Kernel::new(&clock);

        kernel.create_process(4, &mut napper).unwrap();
        kernel.to_sleep(4).unwrap();
        kernel.to_wait_for_signal(4, 0x22).unwrap();
        assert_eq!(kernel.process_state(4), Ok(ProcessState::Signal));
    }
}
