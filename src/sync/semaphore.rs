//! Counting semaphore. Created at its maximum; `down` acquires, `up`
//! releases, and both saturate at the bounds rather than wrapping.

/// Counting semaphore with a fixed ceiling.
///
/// Invariant: `0 <= count <= max`.
pub struct Semaphore {
    count: u8,
    max: u8,
}

impl Semaphore {
    /// New semaphore holding `max` permits, all available.
    pub const fn new(max: u8) -> Self {
        Self { count: max, max }
    }

    /// Take one permit. Returns `false` when none are left.
    #[must_use]
    pub fn down(&mut self) -> bool {
        if self.count == 0 {
            return false;
        }

        self.count -= 1;
        true
    }

    /// Return one permit. Returns `false` at the ceiling — an unbalanced
    /// release is a caller bug worth noticing.
    #[must_use]
    pub fn up(&mut self) -> bool {
        if self.count >= self.max {
            return false;
        }

        self.count += 1;
        true
    }

    /// Permits currently available.
    pub fn count(&self) -> u8 {
        self.count
    }

    /// Restore every permit.
    pub fn reset(&mut self) {
        self.count = self.max;
    }
}
