//! Shared memory: a fixed byte area plus an auto-incrementing cursor,
//! used as the register-file abstraction behind serial bus slaves.
//!
//! Two access modes coexist. *Direct* access names an explicit address
//! (wrapped modulo the size) and leaves the cursor alone — this is how
//! task-context consumers read the registers a bus master filled in.
//! *Sequential* access goes through the cursor, post-incrementing and
//! wrapping — this is how a byte-at-a-time bus protocol streams through
//! the area after the master names a start address.

/// Fixed byte area with a sequential-access cursor.
///
/// The cursor value `N` is the "unset" sentinel: a bus transaction that
/// has not yet named a register address parks the cursor there, and the
/// protocol engine uses [`SharedMemory::pointer_is_set`] to tell the
/// address byte from the first data byte.
pub struct SharedMemory<const N: usize> {
    pointer: usize,
    area: [u8; N],
}

impl<const N: usize> SharedMemory<N> {
    /// Zeroed area, cursor unset.
    pub const fn new() -> Self {
        Self { pointer: N, area: [0; N] }
    }

    // -- cursor -------------------------------------------------------------

    /// Park the cursor on the "unset" sentinel.
    pub fn reset_pointer(&mut self) {
        self.pointer = N;
    }

    /// Whether the cursor currently addresses the area.
    pub fn pointer_is_set(&self) -> bool {
        self.pointer != N
    }

    /// Place the cursor at `address`, wrapped into the area.
    pub fn set_pointer(&mut self, address: usize) {
        self.pointer = address % N;
    }

    /// Current cursor position, `None` when unset.
    pub fn cursor(&self) -> Option<usize> {
        if self.pointer_is_set() {
            Some(self.pointer)
        } else {
            None
        }
    }

    // -- direct access ------------------------------------------------------

    /// Read the byte at `address` (wrapped). The cursor does not move.
    pub fn read_at(&self, address: usize) -> u8 {
        self.area[address % N]
    }

    /// Write `data` at `address` (wrapped). The cursor does not move.
    pub fn write_at(&mut self, address: usize, data: u8) {
        self.area[address % N] = data;
    }

    // -- sequential access --------------------------------------------------

    /// Read the byte under the cursor and advance it, wrapping at `N`.
    /// An unset cursor reads from address zero.
    pub fn read_next(&mut self) -> u8 {
        self.pointer %= N;
        let data = self.area[self.pointer];
        self.pointer += 1;
        data
    }

    /// Write `data` under the cursor and advance it, wrapping at `N`.
    /// An unset cursor writes at address zero.
    pub fn write_next(&mut self, data: u8) {
        self.pointer %= N;
        self.area[self.pointer] = data;
        self.pointer += 1;
    }

    /// Zero the whole area. The cursor is untouched.
    pub fn clear_area(&mut self) {
        self.area = [0; N];
    }
}

impl<const N: usize> Default for SharedMemory<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_memory_has_unset_cursor_and_zeroed_area() {
        let shared: SharedMemory<8> = SharedMemory::new();

        assert!(!shared.pointer_is_set());
        assert_eq!(shared.cursor(), None);
        for address in 0..8 {
            assert_eq!(shared.read_at(address), 0);
        }
    }

    #[test]
    fn direct_access_wraps_address_and_leaves_cursor_alone() {
        let mut shared: SharedMemory<4> = SharedMemory::new();

        shared.write_at(9, 0xAB); // 9 % 4 == 1
        assert_eq!(shared.read_at(1), 0xAB);
        assert_eq!(shared.read_at(5), 0xAB);
        assert!(!shared.pointer_is_set());
    }

    #[test]
    fn sequential_writes_wrap_from_start_pointer() {
        let mut shared: SharedMemory<4> = SharedMemory::new();

        shared.set_pointer(2);
        for byte in [1, 2, 3] {
            shared.write_next(byte);
        }

        // Landed at area[2], area[3], area[0].
        assert_eq!(shared.read_at(2), 1);
        assert_eq!(shared.read_at(3), 2);
        assert_eq!(shared.read_at(0), 3);

        // A sequential read from the same start reproduces the stream.
        shared.set_pointer(2);
        assert_eq!(shared.read_next(), 1);
        assert_eq!(shared.read_next(), 2);
        assert_eq!(shared.read_next(), 3);
        assert_eq!(shared.cursor(), Some(1));
    }

    #[test]
    fn unset_cursor_behaves_as_address_zero() {
        let mut shared: SharedMemory<4> = SharedMemory::new();

        shared.reset_pointer();
        shared.write_next(0x11);
        assert_eq!(shared.read_at(0), 0x11);
        assert_eq!(shared.cursor(), Some(1));
    }

    #[test]
    fn clear_area_zeroes_without_touching_cursor() {
        let mut shared: SharedMemory<4> = SharedMemory::new();

        shared.set_pointer(3);
        shared.write_at(0, 0xFF);
        shared.clear_area();

        assert_eq!(shared.read_at(0), 0);
        assert_eq!(shared.cursor(), Some(3));
    }
}
