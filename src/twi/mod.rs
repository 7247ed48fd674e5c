//! # TWI slave protocol engine
//!
//! A bit-level TWI (I2C) slave state machine driven entirely from
//! interrupt handlers. The engine exposes a [`SharedMemory`] register
//! file to the bus master and signals task context when bytes move:
//! the classic address-then-data register-file convention, where the
//! first byte the master writes after the address phase selects a
//! register and every following byte streams sequentially with wrap.
//!
//! Hardware is reached only through the [`TwiBus`] trait — the pin
//! direction, data register, and counter-arming operations of a USI-style
//! serial unit. The engine itself never touches a register address, which
//! is what lets the whole transition table run under test on a host.
//!
//! ## State machine
//!
//! ```text
//!                     start/stop edge (any state)
//!                    ┌──────────────────────────────┐
//!                    ▼                              │
//!          ┌─────────────────────┐   addr mismatch  │
//!          │ VerifyPolledAddress │ ───────────────► BusOff ◄─── NACK
//!          └─────────────────────┘                    ▲
//!             write │      │ read                     │
//!                   ▼      └───────────────┐          │
//!   ┌───────────────────────┐              ▼          │
//!   │ ReceiveDataFromMaster │ ◄──┐  ┌──────────────────┐
//!   └───────────────────────┘    │  │ SendDataToMaster │ ─ ack ─┐
//!        byte armed │            │  └──────────────────┘        │
//!                   ▼            │          ▲    raises         ▼
//!   ┌───────────────────────────┐│          │  data-sent  loads next
//!   │ SendConfirmationToMaster  ││          │              byte
//!   └───────────────────────────┘│  ┌───────────────────────────────┐
//!     pointer unset: set pointer │  │ ReceiveConfirmationFromMaster │
//!     pointer set: store byte,  ─┘  └───────────────────────────────┘
//!     raise data-received
//! ```

use crate::process::Signal;
use crate::scheduler::Kernel;
use crate::sync::RegisterFile;

/// Raised from interrupt context after a register byte was sent to the
/// master.
pub const DATA_SENT_SIGNAL: Signal = 0x52;

/// Raised from interrupt context after a register byte arrived from the
/// master.
pub const DATA_RECEIVED_SIGNAL: Signal = 0x53;

/// The acknowledgment bit as it sits in the data register: SDA low.
const ACK: u8 = 0x00;

// ---------------------------------------------------------------------------
// Frame decoding
// ---------------------------------------------------------------------------

/// Direction requested by the master in the address frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransmissionMode {
    /// Master writes to this slave.
    Write,
    /// Master reads from this slave.
    Read,
}

/// 7-bit slave address carried in an address frame.
pub fn frame_address(frame: u8) -> u8 {
    frame >> 1
}

/// R/W bit carried in an address frame.
pub fn frame_mode(frame: u8) -> TransmissionMode {
    if frame & 0x01 == 0 {
        TransmissionMode::Write
    } else {
        TransmissionMode::Read
    }
}

// ---------------------------------------------------------------------------
// Bus state
// ---------------------------------------------------------------------------

/// Where the engine stands in the current bus transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TwiState {
    /// Idle, or another device was polled; every unit-complete event is
    /// ignored until the next start condition.
    BusOff,
    /// A start (or stop) edge was seen; the next byte is an address frame.
    VerifyPolledAddress,
    /// A data byte from the master just finished; acknowledge it and
    /// interpret it.
    SendConfirmationToMaster,
    /// Our data byte went out; arm to catch the master's ack/nack bit.
    ReceiveConfirmationFromMaster,
    /// The master's ack/nack bit just arrived; on ack, load the next
    /// register byte onto the bus.
    SendDataToMaster,
    /// Arm the counter to clock in one data byte from the master.
    ReceiveDataFromMaster,
}

// ---------------------------------------------------------------------------
// Hardware contract
// ---------------------------------------------------------------------------

/// Register and pin operations of the serial unit the engine drives.
///
/// The split between SDA *direction* and SDA *level* mirrors the
/// underlying port hardware: the ack bit only needs the pin driven as
/// output (low), while real data bytes additionally need the port level
/// raised so ones can appear on the wire.
pub trait TwiBus {
    /// SDA pin to input.
    fn set_sda_input(&mut self);
    /// SDA pin to output.
    fn set_sda_output(&mut self);
    /// Raise the SDA port level so arbitrary data bits can go out.
    fn drive_sda(&mut self);
    /// Drop the SDA port level so the pull-up is free to work.
    fn release_sda(&mut self);

    /// Last fully shifted unit (byte or ack bit) in the data register.
    fn data(&self) -> u8;
    /// Load the data register with the next unit to shift out.
    fn set_data(&mut self, data: u8);

    /// A start/stop edge is still in flight (clock high, data held low).
    fn start_stop_in_progress(&self) -> bool;
    /// After the edge settles: `true` for a stop condition.
    fn stop_detected(&self) -> bool;

    /// Control configuration after a start: unit-complete interrupts on.
    fn listen_for_start(&mut self);
    /// Control configuration after a stop: low power, edge detector only.
    fn listen_after_stop(&mut self);

    /// Clear edge flags and the unit counter after a start/stop edge.
    fn reset_unit_counter(&mut self);
    /// Arm the counter to fire after one byte (8 bits).
    fn expect_byte(&mut self);
    /// Arm the counter to fire after a single bit.
    fn expect_bit(&mut self);
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// The TWI slave interface: bus state, our address, and the register file
/// the master reads and writes.
///
/// Created once at boot and owned wherever the interrupt glue can reach
/// it. Only the two handlers and the register-file accessors mutate it.
pub struct TwiSlave {
    state: TwiState,
    address: u8,
    /// The bus-visible register file, shared with task-context consumers.
    pub shared: RegisterFile,
}

impl TwiSlave {
    /// New engine for the given 7-bit slave `address`, bus off.
    pub const fn new(address: u8) -> Self {
        Self {
            state: TwiState::BusOff,
            address,
            shared: RegisterFile::new(),
        }
    }

    /// Current bus state.
    pub fn state(&self) -> TwiState {
        self.state
    }

    /// Start/stop-edge handler.
    ///
    /// Either edge means the same thing to a slave: whatever transaction
    /// was in flight is over, and the next byte on the wire is an address
    /// frame. A stop additionally drops the unit into its low-power
    /// edge-detector configuration until the next start.
    pub fn on_start_condition<B: TwiBus>(&mut self, bus: &mut B) {
        bus.set_sda_input();

        while bus.start_stop_in_progress() {}

        if bus.stop_detected() {
            bus.listen_after_stop();
        } else {
            bus.listen_for_start();
        }

        bus.reset_unit_counter();
        self.state = TwiState::VerifyPolledAddress;
    }

    /// Unit-complete handler: one byte or one ack bit finished shifting.
    ///
    /// Exactly one transition of the state machine above. Raises
    /// [`DATA_RECEIVED_SIGNAL`] when a register byte lands and
    /// [`DATA_SENT_SIGNAL`] when one is presented to the master.
    pub fn on_counter_overflow<B: TwiBus>(&mut self, bus: &mut B, kernel: &mut Kernel<'_>) {
        let frame = bus.data();

        match self.state {
            TwiState::BusOff => {}

            TwiState::VerifyPolledAddress => {
                // Another device's transaction: go quiet until the next
                // start condition.
                if frame_address(frame) != self.address {
                    self.state = TwiState::BusOff;
                    return;
                }

                self.send_confirmation(bus);

                if frame_mode(frame) == TransmissionMode::Write {
                    // The first data byte will be a register address.
                    self.shared.reset_pointer();
                    self.state = TwiState::ReceiveDataFromMaster;
                } else {
                    self.state = TwiState::SendDataToMaster;
                }
            }

            TwiState::SendConfirmationToMaster => {
                self.send_confirmation(bus);
                self.state = TwiState::ReceiveDataFromMaster;

                if self.shared.pointer_is_set() {
                    self.shared.write_next(frame);
                    kernel.make_signal(DATA_RECEIVED_SIGNAL);
                } else {
                    self.shared.set_pointer(usize::from(frame));
                }
            }

            TwiState::ReceiveConfirmationFromMaster => {
                bus.set_sda_input();
                bus.release_sda();
                bus.set_data(0x00);
                bus.expect_bit();
                self.state = TwiState::SendDataToMaster;
            }

            TwiState::SendDataToMaster => {
                // The data register holds the master's ack/nack bit; any
                // set bit is a NACK and ends the transaction.
                if frame != 0x00 {
                    self.state = TwiState::BusOff;
                    return;
                }

                bus.set_sda_output();
                bus.drive_sda();
                bus.set_data(self.shared.read_next());
                bus.expect_byte();
                self.state = TwiState::ReceiveConfirmationFromMaster;

                kernel.make_signal(DATA_SENT_SIGNAL);
            }

            TwiState::ReceiveDataFromMaster => {
                bus.set_sda_input();
                bus.expect_byte();
                self.state = TwiState::SendConfirmationToMaster;
            }
        }
    }

    /// Put the ack bit on the wire: data register low, SDA as output,
    /// counter armed for one bit. The port level stays low — an ack is
    /// a zero, so there is nothing to drive high.
    fn send_confirmation<B: TwiBus>(&mut self, bus: &mut B) {
        bus.set_data(ACK);
        bus.set_sda_output();
        bus.expect_bit();
    }
}

// ---------------------------------------------------------------------------
// Unit tests (host-only)
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TWI_ADDRESS;
    use crate::platform::testing::FakeClock;

    /// Scriptable bus double: the test plays the master by loading the
    /// data register before each unit-complete event.
    #[derive(Default)]
    struct MockBus {
        data: u8,
        sda_is_output: bool,
        sda_driven: bool,
        stop: bool,
        low_power: bool,
        bit_armed: u32,
        byte_armed: u32,
    }

    impl TwiBus for MockBus {
        fn set_sda_input(&mut self) {
            self.sda_is_output = false;
        }
        fn set_sda_output(&mut self) {
            self.sda_is_output = true;
        }
        fn drive_sda(&mut self) {
            self.sda_driven = true;
        }
        fn release_sda(&mut self) {
            self.sda_driven = false;
        }
        fn data(&self) -> u8 {
            self.data
        }
        fn set_data(&mut self, data: u8) {
            self.data = data;
        }
        fn start_stop_in_progress(&self) -> bool {
            false
        }
        fn stop_detected(&self) -> bool {
            self.stop
        }
        fn listen_for_start(&mut self) {
            self.low_power = false;
        }
        fn listen_after_stop(&mut self) {
            self.low_power = true;
        }
        fn reset_unit_counter(&mut self) {}
        fn expect_byte(&mut self) {
            self.byte_armed += 1;
        }
        fn expect_bit(&mut self) {
            self.bit_armed += 1;
        }
    }

    /// This device's configured address, as the two kinds of address
    /// frame a master would put on the wire.
    const ADDRESS: u8 = TWI_ADDRESS;
    const WRITE_FRAME: u8 = ADDRESS << 1;
    const READ_FRAME: u8 = (ADDRESS << 1) | 0x01;

    /// Shift a master-sent byte into the register and fire the handler.
    fn master_sends(
        slave: &mut TwiSlave,
        bus: &mut MockBus,
        kernel: &mut Kernel<'_>,
        byte: u8,
    ) {
        bus.data = byte;
        slave.on_counter_overflow(bus, kernel);
    }

    #[test]
    fn start_edge_arms_address_verification() {
        let mut slave = TwiSlave::new(ADDRESS);
        let mut bus = MockBus::default();

        slave.on_start_condition(&mut bus);

        assert_eq!(slave.state(), TwiState::VerifyPolledAddress);
        assert!(!bus.low_power);
        assert!(!bus.sda_is_output);
    }

    #[test]
    fn stop_edge_drops_to_low_power_but_still_awaits_address() {
        let mut slave = TwiSlave::new(ADDRESS);
        let mut bus = MockBus { stop: true, ..MockBus::default() };

        slave.on_start_condition(&mut bus);

        assert_eq!(slave.state(), TwiState::VerifyPolledAddress);
        assert!(bus.low_power);
    }

    #[test]
    fn foreign_address_turns_the_bus_off() {
        let clock = FakeClock::new();
        let mut kernel = Kernel::new(&clock);
        let mut slave = TwiSlave::new(ADDRESS);
        let mut bus = MockBus::default();

        slave.on_start_condition(&mut bus);
        master_sends(&mut slave, &mut bus, &mut kernel, 0x31 << 1);

        assert_eq!(slave.state(), TwiState::BusOff);
        assert_eq!(kernel.pending_signal(), 0);

        // Subsequent unit events are ignored entirely.
        master_sends(&mut slave, &mut bus, &mut kernel, 0xFF);
        assert_eq!(slave.state(), TwiState::BusOff);
    }

    #[test]
    fn write_transaction_sets_pointer_then_stores_data() {
        let clock = FakeClock::new();
        let mut kernel = Kernel::new(&clock);
        let mut slave = TwiSlave::new(ADDRESS);
        let mut bus = MockBus::default();

        // Our address, write mode.
        slave.on_start_condition(&mut bus);
        master_sends(&mut slave, &mut bus, &mut kernel, WRITE_FRAME);
        assert_eq!(slave.state(), TwiState::ReceiveDataFromMaster);
        assert_eq!(bus.data, ACK);
        assert!(bus.sda_is_output);
        assert!(!slave.shared.pointer_is_set());

        // Byte armed; the register address byte arrives.
        slave.on_counter_overflow(&mut bus, &mut kernel);
        assert_eq!(slave.state(), TwiState::SendConfirmationToMaster);
        master_sends(&mut slave, &mut bus, &mut kernel, 0x03);
        assert_eq!(slave.shared.cursor(), Some(3));
        assert_eq!(kernel.pending_signal(), 0); // address byte: no signal

        // The first data byte lands at register 3.
        slave.on_counter_overflow(&mut bus, &mut kernel);
        master_sends(&mut slave, &mut bus, &mut kernel, 0xAA);
        assert_eq!(slave.shared.read_at(3), 0xAA);
        assert_eq!(slave.shared.cursor(), Some(4));
        assert_eq!(kernel.pending_signal(), DATA_RECEIVED_SIGNAL);
    }

    #[test]
    fn read_transaction_streams_registers_until_nack() {
        let clock = FakeClock::new();
        let mut kernel = Kernel::new(&clock);
        let mut slave = TwiSlave::new(ADDRESS);
        let mut bus = MockBus::default();

        slave.shared.write_at(3, 0xAA);
        slave.shared.set_pointer(3);

        // Our address, read mode.
        slave.on_start_condition(&mut bus);
        master_sends(&mut slave, &mut bus, &mut kernel, READ_FRAME);
        assert_eq!(slave.state(), TwiState::SendDataToMaster);

        // Our ack finished shifting; register is clear, so the engine
        // treats it as "acked" and loads the first register byte.
        master_sends(&mut slave, &mut bus, &mut kernel, 0x00);
        assert_eq!(bus.data, 0xAA);
        assert!(bus.sda_is_output);
        assert!(bus.sda_driven);
        assert_eq!(slave.state(), TwiState::ReceiveConfirmationFromMaster);
        assert_eq!(kernel.pending_signal(), DATA_SENT_SIGNAL);

        // Byte went out; arm for the master's ack/nack bit.
        slave.on_counter_overflow(&mut bus, &mut kernel);
        assert_eq!(slave.state(), TwiState::SendDataToMaster);
        assert!(!bus.sda_is_output);

        // Master NACKs: transaction over, no further signal.
        kernel.make_signal(0);
        master_sends(&mut slave, &mut bus, &mut kernel, 0x80);
        assert_eq!(slave.state(), TwiState::BusOff);
        assert_eq!(kernel.pending_signal(), 0);
    }

    #[test]
    fn master_ack_continues_the_sequential_read() {
        let clock = FakeClock::new();
        let mut kernel = Kernel::new(&clock);
        let mut slave = TwiSlave::new(ADDRESS);
        let mut bus = MockBus::default();

        slave.shared.write_at(0, 0x11);
        slave.shared.write_at(1, 0x22);
        slave.shared.set_pointer(0);

        slave.on_start_condition(&mut bus);
        master_sends(&mut slave, &mut bus, &mut kernel, READ_FRAME);
        master_sends(&mut slave, &mut bus, &mut kernel, 0x00);
        assert_eq!(bus.data, 0x11);

        slave.on_counter_overflow(&mut bus, &mut kernel); // arm ack window
        master_sends(&mut slave, &mut bus, &mut kernel, 0x00); // master ACK
        assert_eq!(bus.data, 0x22);
        assert_eq!(slave.state(), TwiState::ReceiveConfirmationFromMaster);
    }

    #[test]
    fn sequential_write_wraps_at_region_size() {
        let clock = FakeClock::new();
        let mut kernel = Kernel::new(&clock);
        let mut slave = TwiSlave::new(ADDRESS);
        let mut bus = MockBus::default();

        let size = crate::config::SHARED_MEMORY_SIZE;

        slave.on_start_condition(&mut bus);
        master_sends(&mut slave, &mut bus, &mut kernel, WRITE_FRAME);
        slave.on_counter_overflow(&mut bus, &mut kernel);
        master_sends(&mut slave, &mut bus, &mut kernel, (size - 1) as u8);

        for byte in [0xD1, 0xD2] {
            slave.on_counter_overflow(&mut bus, &mut kernel);
            master_sends(&mut slave, &mut bus, &mut kernel, byte);
        }

        assert_eq!(slave.shared.read_at(size - 1), 0xD1);
        assert_eq!(slave.shared.read_at(0), 0xD2);
    }

    #[test]
    fn fresh_start_recovers_a_bus_off_engine() {
        let clock = FakeClock::new();
        let mut kernel = Kernel::new(&clock);
        let mut slave = TwiSlave::new(ADDRESS);
        let mut bus = MockBus::default();

        slave.on_start_condition(&mut bus);
        master_sends(&mut slave, &mut bus, &mut kernel, 0x31 << 1);
        assert_eq!(slave.state(), TwiState::BusOff);

        slave.on_start_condition(&mut bus);
        master_sends(&mut slave, &mut bus, &mut kernel, WRITE_FRAME);
        assert_eq!(slave.state(), TwiState::ReceiveDataFromMaster);
    }

    #[test]
    fn address_decode_helpers() {
        assert_eq!(frame_address(0x41), 0x20);
        assert_eq!(frame_mode(0x41), TransmissionMode::Read);
        assert_eq!(frame_mode(0x40), TransmissionMode::Write);
    }
}
