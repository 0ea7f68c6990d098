//! Growable array with a hard capacity ceiling.
//!
//! [`BoundedVec`] owns a single inline buffer of [`MAX_CAPACITY`] elements
//! and tracks a *logical* capacity that starts at [`INITIAL_CAPACITY`] and
//! doubles on demand. Once the ceiling is reached, further pushes are
//! dropped without any error. The memory footprint is fixed at compile time,
//! so no heap allocation ever takes place.

use core::ops::{Index, IndexMut};
use core::slice;

/// Hard upper bound on the number of stored elements.
pub const MAX_CAPACITY: usize = 128;

/// Logical capacity of a freshly constructed vector.
pub const INITIAL_CAPACITY: usize = 16;

/// Fixed-ceiling growable array.
///
/// # Overflow
///
/// [`push_back()`](Self::push_back) on a full vector (`len == 128`) is a
/// silent no-op. Scene setup relies on this: surplus channel assignments
/// are discarded rather than reported.
///
/// # Examples
///
/// ```
/// use midi_dmx_bridge::vector::{BoundedVec, MAX_CAPACITY};
///
/// let mut v: BoundedVec<u8> = (0..=255).collect();
/// assert_eq!(v.len(), MAX_CAPACITY);
///
/// v.push_back(1); // dropped
/// assert_eq!(v.len(), MAX_CAPACITY);
/// assert_eq!(v[127], 127);
/// ```
#[derive(Debug, Clone)]
pub struct BoundedVec<T> {
    data: [T; MAX_CAPACITY],
    len: usize,
    capacity: usize,
}

impl<T: Copy + Default> Default for BoundedVec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy + Default> BoundedVec<T> {
    /// Create an empty vector with a logical capacity of [`INITIAL_CAPACITY`].
    pub fn new() -> Self {
        Self {
            data: [T::default(); MAX_CAPACITY],
            len: 0,
            capacity: INITIAL_CAPACITY,
        }
    }

    /// Create a vector holding `count` default elements.
    ///
    /// The capacity doubles from [`INITIAL_CAPACITY`] until it covers
    /// `count`. Counts of [`MAX_CAPACITY`] or more yield a full vector.
    pub fn with_len(count: usize) -> Self {
        let mut vec = Self::new();
        if count < MAX_CAPACITY {
            vec.len = count;
            while vec.len > vec.capacity {
                vec.capacity *= 2;
            }
        } else {
            vec.len = MAX_CAPACITY;
            vec.capacity = MAX_CAPACITY;
        }
        vec
    }

    /// Build a vector by pushing every element of `values` in order.
    ///
    /// Elements past [`MAX_CAPACITY`] are dropped.
    pub fn from_slice(values: &[T]) -> Self {
        values.iter().copied().collect()
    }

    /// Append `value`, growing the logical capacity if needed.
    ///
    /// Dropped silently when the vector already holds [`MAX_CAPACITY`]
    /// elements.
    pub fn push_back(&mut self, value: T) {
        if self.len == self.capacity {
            self.grow();
        }

        if self.len < self.capacity {
            self.data[self.len] = value;
            self.len += 1;
        } else {
            #[cfg(feature = "defmt")]
            defmt::debug!("BoundedVec full ({} elements), push dropped", MAX_CAPACITY);
        }
    }

    /// Remove the last element and reset its storage to `T::default()`.
    ///
    /// Returns `None` (and does nothing) when the vector is empty.
    pub fn pop_back(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        let value = self.data[self.len];
        self.data[self.len] = T::default();
        Some(value)
    }

    fn grow(&mut self) {
        self.capacity = (self.capacity * 2).min(MAX_CAPACITY);
    }
}

impl<T> BoundedVec<T> {
    /// Number of stored elements.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current logical capacity (16, 32, 64 or 128).
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The hard ceiling, always [`MAX_CAPACITY`].
    pub const fn max_size(&self) -> usize {
        MAX_CAPACITY
    }

    /// The stored elements in insertion order.
    pub fn as_slice(&self) -> &[T] {
        &self.data[..self.len]
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data[..self.len]
    }

    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }
}

/// Positional access into the backing buffer.
///
/// Only `index < MAX_CAPACITY` is checked; positions at or beyond
/// [`len()`](BoundedVec::len) return whatever the buffer currently holds.
impl<T> Index<usize> for BoundedVec<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.data[index]
    }
}

impl<T> IndexMut<usize> for BoundedVec<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.data[index]
    }
}

impl<T: PartialEq> PartialEq for BoundedVec<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for BoundedVec<T> {}

impl<T: Copy + Default> FromIterator<T> for BoundedVec<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut vec = Self::new();
        for value in iter {
            vec.push_back(value);
        }
        vec
    }
}

impl<'a, T> IntoIterator for &'a BoundedVec<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(feature = "defmt")]
impl<T: defmt::Format> defmt::Format for BoundedVec<T> {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "BoundedVec {{ len: {}, capacity: {}, items: {} }}",
            self.len,
            self.capacity,
            self.as_slice()
        );
    }
}
