//! Single-slot shared value exchanged between preemptively scheduled tasks.
//!
//! A `SharedCell` is the only communication channel between the thermal
//! watch, the extinguish sequencer and the two limit-switch tasks.  It
//! holds one `Copy` value behind a critical-section mutex: the section
//! covers the copy in or out and nothing else, so no task ever holds it
//! across a scheduling boundary and neither `get` nor `put` can block on
//! another task's body.
//!
//! Readers must treat the value as **level-triggered state**.  There is
//! no change notification; a write becomes visible to whichever task
//! reads next.

use core::cell::Cell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

/// Race-free single-value cell with atomic `get` / `put`.
pub struct SharedCell<T: Copy> {
    inner: Mutex<CriticalSectionRawMutex, Cell<T>>,
}

impl<T: Copy> SharedCell<T> {
    /// Create a cell holding `initial`.  `const` so it can live in a
    /// `static` created once at boot.
    pub const fn new(initial: T) -> Self {
        Self {
            inner: Mutex::new(Cell::new(initial)),
        }
    }

    /// Current value.  Never blocks; callable from any task at any time.
    pub fn get(&self) -> T {
        self.inner.lock(Cell::get)
    }

    /// Store `value`.  No other task can observe a partially written value.
    pub fn put(&self, value: T) {
        self.inner.lock(|cell| cell.set(value));
    }
}

impl<T: Copy + PartialEq> SharedCell<T> {
    /// Store `to` only if the cell currently holds `from`.
    ///
    /// Guard and store happen inside one critical section.  Returns `true`
    /// if the store happened.
    pub fn advance(&self, from: T, to: T) -> bool {
        self.inner.lock(|cell| {
            if cell.get() == from {
                cell.set(to);
                true
            } else {
                false
            }
        })
    }
}

impl<T: Copy + Default> Default for SharedCell<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Copy + core::fmt::Debug> core::fmt::Debug for SharedCell<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("SharedCell").field(&self.get()).finish()
    }
}
