//! Wrap-around byte ring with no occupancy tracking.

/// Circular buffer whose read and write positions wrap modulo `N`
/// independently.
///
/// There is deliberately no overflow or underflow detection: this
/// primitive serves protocols where producer and consumer rates are
/// synchronized externally (a UART ISR feeding a drain process, say), and
/// the bookkeeping would cost RAM the target does not have. Keeping
/// reads and writes balanced is the caller's contract.
pub struct CircularBuffer<const N: usize> {
    read_position: usize,
    write_position: usize,
    buffer: [u8; N],
}

impl<const N: usize> CircularBuffer<N> {
    pub const fn new() -> Self {
        Self {
            read_position: 0,
            write_position: 0,
            buffer: [0; N],
        }
    }

    /// Store a byte at the write position and advance it, wrapping at `N`.
    pub fn write(&mut self, data: u8) {
        self.buffer[self.write_position] = data;
        self.write_position = (self.write_position + 1) % N;
    }

    /// Take the byte at the read position and advance it, wrapping at `N`.
    pub fn read(&mut self) -> u8 {
        let data = self.buffer[self.read_position];
        self.read_position = (self.read_position + 1) % N;
        data
    }
}

impl<const N: usize> Default for CircularBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}
