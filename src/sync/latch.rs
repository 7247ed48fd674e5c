//! Single-slot mailbox: one byte plus a full/empty flag.

/// One-byte latch. `push` refuses to overwrite an unconsumed byte; `pop`
/// always succeeds, clearing the flag and returning whatever the slot
/// holds — zero if nothing was ever pushed, which is data, not an error.
#[derive(Default)]
pub struct Latch {
    data: u8,
    set: bool,
}

impl Latch {
    pub const fn new() -> Self {
        Self { data: 0, set: false }
    }

    /// Store a byte. Returns `false` while the previous byte is
    /// unconsumed.
    #[must_use]
    pub fn push(&mut self, data: u8) -> bool {
        if self.set {
            return false;
        }

        self.set = true;
        self.data = data;
        true
    }

    /// Take the stored byte and mark the latch empty.
    pub fn pop(&mut self) -> u8 {
        self.set = false;
        self.data
    }

    /// Whether an unconsumed byte is present.
    pub fn is_set(&self) -> bool {
        self.set
    }

    /// The stored byte, without consuming it.
    pub fn peek(&self) -> u8 {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_pop_round_trip() {
        let mut latch = Latch::new();

        assert!(latch.push(0x5A));
        assert!(latch.is_set());
        assert_eq!(latch.pop(), 0x5A);
        assert!(!latch.is_set());
    }

    #[test]
    fn push_fails_while_full_and_keeps_contents() {
        let mut latch = Latch::new();

        assert!(latch.push(0x01));
        assert!(!latch.push(0x02));
        assert_eq!(latch.pop(), 0x01);
    }

    #[test]
    fn pop_of_untouched_latch_yields_zero() {
        let mut latch = Latch::new();
        assert_eq!(latch.pop(), 0x00);
    }

    #[test]
    fn peek_does_not_consume() {
        let mut latch = Latch::new();

        assert!(latch.push(0x7F));
        assert_eq!(latch.peek(), 0x7F);
        assert!(latch.is_set());
        assert_eq!(latch.pop(), 0x7F);
    }
}
