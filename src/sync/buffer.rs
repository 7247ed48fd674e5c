//! Bounded drain-and-reset FIFO: a one-shot queue, not a ring.

/// Byte buffer with independent read and write positions.
///
/// Invariant: `read_position <= write_position <= N`. Writes past
/// capacity fail. Reading the last unread byte resets both positions to
/// zero, so the buffer is reusable once fully drained — but never wraps
/// while data is in flight.
pub struct Buffer<const N: usize> {
    read_position: usize,
    write_position: usize,
    buffer: [u8; N],
}

impl<const N: usize> Buffer<N> {
    pub const fn new() -> Self {
        Self {
            read_position: 0,
            write_position: 0,
            buffer: [0; N],
        }
    }

    /// Unread data is present.
    pub fn is_readable(&self) -> bool {
        self.read_position < self.write_position
    }

    /// Room for another byte.
    pub fn is_writable(&self) -> bool {
        self.write_position < N
    }

    /// Drop all contents and start over.
    pub fn reset(&mut self) {
        self.read_position = 0;
        self.write_position = 0;
    }

    /// Append a byte. Returns `false` at capacity, leaving contents
    /// untouched.
    #[must_use]
    pub fn write(&mut self, data: u8) -> bool {
        if !self.is_writable() {
            return false;
        }

        self.buffer[self.write_position] = data;
        self.write_position += 1;
        true
    }

    /// Take the next unread byte; `None` when drained. Draining the last
    /// byte auto-resets the buffer.
    pub fn read(&mut self) -> Option<u8> {
        if !self.is_readable() {
            return None;
        }

        let data = self.buffer[self.read_position];
        self.read_position += 1;

        if self.read_position == self.write_position {
            self.reset();
        }

        Some(data)
    }
}

impl<const N: usize> Default for Buffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fifo_round_trip_preserves_order() {
        let mut buffer: Buffer<4> = Buffer::new();

        for byte in [10, 20, 30] {
            assert!(buffer.write(byte));
        }
        assert_eq!(buffer.read(), Some(10));
        assert_eq!(buffer.read(), Some(20));
        assert_eq!(buffer.read(), Some(30));
        assert_eq!(buffer.read(), None);
    }

    #[test]
    fn write_past_capacity_fails_and_preserves_contents() {
        let mut buffer: Buffer<2> = Buffer::new();

        assert!(buffer.write(1));
        assert!(buffer.write(2));
        assert!(!buffer.write(3));

        assert_eq!(buffer.read(), Some(1));
        assert_eq!(buffer.read(), Some(2));
    }

    #[test]
    fn full_drain_resets_for_reuse() {
        let mut buffer: Buffer<2> = Buffer::new();

        assert!(buffer.write(1));
        assert!(buffer.write(2));
        assert_eq!(buffer.read(), Some(1));
        assert_eq!(buffer.read(), Some(2));

        // Fully drained: capacity is available again.
        assert!(buffer.write(3));
        assert_eq!(buffer.read(), Some(3));
    }

    #[test]
    fn partial_drain_does_not_reclaim_capacity() {
        let mut buffer: Buffer<2> = Buffer::new();

        assert!(buffer.write(1));
        assert!(buffer.write(2));
        assert_eq!(buffer.read(), Some(1));

        // One byte still in flight: no wrap, no reuse.
        assert!(!buffer.write(3));
    }
}
