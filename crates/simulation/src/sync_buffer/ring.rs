//! Fixed-capacity ring with overwrite-oldest semantics.
//!
//! ```text
//!   slots: [T; N]   head: index of the oldest entry   len: live entries (<= N)
//!
//!   push_back(v):  slots[(head + len) % N] = v
//!                  full  -> head advances (oldest dropped)
//!                  else  -> len += 1
//!   pop_front():   slots[head], head advances, len -= 1
//! ```
//!
//! Logical index 0 is always the oldest live entry. A full ring holds exactly
//! `N` entries; no slot is kept empty to tell "full" from "empty".

/// Bounded FIFO that silently overwrites its oldest entry when full.
#[derive(Debug, Clone)]
pub struct HistoryRing<T: Copy + Default, const N: usize> {
    slots: [T; N],
    head: usize,
    len: usize,
    overwritten: u64,
}

impl<T: Copy + Default, const N: usize> HistoryRing<T, N> {
    pub fn new() -> Self {
        const { assert!(N > 0, "HistoryRing capacity must be at least 1") };
        Self {
            slots: [T::default(); N],
            head: 0,
            len: 0,
            overwritten: 0,
        }
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == N
    }

    /// Number of entries dropped by overwrite since construction.
    pub fn overwritten(&self) -> u64 {
        self.overwritten
    }

    /// Append `value`, dropping the oldest entry if the ring is full.
    /// Returns `true` when an entry was overwritten.
    pub fn push_back(&mut self, value: T) -> bool {
        let tail = (self.head + self.len) % N;
        self.slots[tail] = value;
        if self.len == N {
            self.head = (self.head + 1) % N;
            self.overwritten += 1;
            true
        } else {
            self.len += 1;
            false
        }
    }

    /// Oldest live entry.
    pub fn front(&self) -> Option<&T> {
        self.get(0)
    }

    /// Newest live entry.
    pub fn back(&self) -> Option<&T> {
        self.len.checked_sub(1).and_then(|last| self.get(last))
    }

    /// Remove and return the oldest live entry.
    pub fn pop_front(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        let value = self.slots[self.head];
        self.head = (self.head + 1) % N;
        self.len -= 1;
        Some(value)
    }

    /// Entry at logical position `index` (0 = oldest).
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len {
            return None;
        }
        Some(&self.slots[(self.head + index) % N])
    }

    /// Iterate live entries oldest to newest.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator + '_ {
        (0..self.len).map(move |i| &self.slots[(self.head + i) % N])
    }

    /// Drop every live entry. The overwrite counter is kept.
    pub fn clear(&mut self) {
        self.head = 0;
        self.len = 0;
    }
}

impl<T: Copy + Default, const N: usize> Default for HistoryRing<T, N> {
    fn default() -> Self {
        Self::new()
    }
}
