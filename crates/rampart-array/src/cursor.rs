// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Bounds-checked random-access cursors.
//!
//! A cursor is a position in `0..=len` over an array borrowed for `'a`:
//! index `len` is the end position, which can be reached but not
//! dereferenced. Every move is checked against that range before it is
//! applied, so a failed move leaves the cursor where it was.

use core::cmp::Ordering;
use core::fmt;
use core::ops::{Deref, DerefMut};

use crate::error::ArrayError;

// `owner` is the address of the array the cursor was taken from. Empty and
// zero-sized-type arrays share a dangling data pointer, so the slice itself
// cannot tell two arrays apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Position {
    owner: usize,
    index: usize,
    len: usize,
}

impl Position {
    fn out_of_range(&self, offset: isize) -> ArrayError {
        ArrayError::OutOfRange {
            index: self.index,
            offset,
            len: self.len,
        }
    }

    fn advance_by(&mut self, n: usize) -> Result<(), ArrayError> {
        self.index = self
            .index
            .checked_add(n)
            .filter(|&target| target <= self.len)
            .ok_or_else(|| self.out_of_range(isize::try_from(n).unwrap_or(isize::MAX)))?;

        Ok(())
    }

    fn retreat_by(&mut self, n: usize) -> Result<(), ArrayError> {
        self.index = self
            .index
            .checked_sub(n)
            .ok_or_else(|| self.out_of_range(isize::try_from(n).map_or(isize::MIN, |n| -n)))?;

        Ok(())
    }

    fn offset(&mut self, delta: isize) -> Result<(), ArrayError> {
        self.index = self
            .index
            .checked_add_signed(delta)
            .filter(|&target| target <= self.len)
            .ok_or_else(|| self.out_of_range(delta))?;

        Ok(())
    }

    fn same_owner(&self, other: &Self) -> bool {
        self.owner == other.owner
    }

    // Saturates at isize::MAX in magnitude; only zero-sized-type arrays can
    // be long enough to need it.
    fn distance_to(&self, other: &Self) -> isize {
        if other.index >= self.index {
            isize::try_from(other.index - self.index).unwrap_or(isize::MAX)
        } else {
            isize::try_from(self.index - other.index).map_or(-isize::MAX, |d| -d)
        }
    }
}

/// Shared cursor into a [`ResizableArray`](crate::ResizableArray).
///
/// `Copy`, non-owning, and valid for as long as the array stays borrowed.
///
/// # Example
///
/// ```rust
/// use rampart_array::{ArrayError, ResizableArray};
///
/// let array = ResizableArray::from_values(&['a', 'b', 'c']).unwrap();
/// let mut cursor = array.begin();
///
/// cursor.advance().unwrap();
/// assert_eq!(*cursor, 'b');
///
/// cursor.retreat().unwrap();
/// assert!(matches!(cursor.retreat(), Err(ArrayError::OutOfRange { index: 0, .. })));
///
/// cursor.advance_by(3).unwrap();
/// assert_eq!(cursor, array.end());
/// assert_eq!(cursor.get(), None);
/// ```
pub struct Cursor<'a, T> {
    slice: &'a [T],
    position: Position,
}

impl<'a, T> Cursor<'a, T> {
    pub(crate) fn new(slice: &'a [T], owner: usize, index: usize) -> Self {
        debug_assert!(index <= slice.len());

        Self {
            position: Position {
                owner,
                index,
                len: slice.len(),
            },
            slice,
        }
    }

    /// Current index, in `0..=len`.
    #[inline]
    pub fn index(&self) -> usize {
        self.position.index
    }

    /// Returns `true` at the end position.
    #[inline]
    pub fn is_end(&self) -> bool {
        self.position.index == self.position.len
    }

    /// Element under the cursor, or `None` at the end position.
    #[inline]
    pub fn get(&self) -> Option<&'a T> {
        self.slice.get(self.position.index)
    }

    /// Elements from the cursor to the end.
    pub fn remaining(&self) -> &'a [T] {
        &self.slice[self.position.index..]
    }

    /// Moves forward by one element.
    ///
    /// # Errors
    ///
    /// [`ArrayError::OutOfRange`] at the end position.
    pub fn advance(&mut self) -> Result<(), ArrayError> {
        self.position.advance_by(1)
    }

    /// Moves forward by `n` elements.
    ///
    /// # Errors
    ///
    /// [`ArrayError::OutOfRange`] if the move would pass the end position.
    pub fn advance_by(&mut self, n: usize) -> Result<(), ArrayError> {
        self.position.advance_by(n)
    }

    /// Moves back by one element.
    ///
    /// # Errors
    ///
    /// [`ArrayError::OutOfRange`] at index 0.
    pub fn retreat(&mut self) -> Result<(), ArrayError> {
        self.position.retreat_by(1)
    }

    /// Moves back by `n` elements.
    ///
    /// # Errors
    ///
    /// [`ArrayError::OutOfRange`] if the move would go before index 0.
    pub fn retreat_by(&mut self, n: usize) -> Result<(), ArrayError> {
        self.position.retreat_by(n)
    }

    /// Moves by a signed number of elements.
    ///
    /// # Errors
    ///
    /// [`ArrayError::OutOfRange`] if the target is outside `0..=len`.
    pub fn offset(&mut self, delta: isize) -> Result<(), ArrayError> {
        self.position.offset(delta)
    }

    /// Signed number of elements from `self` to `other`.
    ///
    /// Both cursors must come from the same array. The result saturates at
    /// `isize::MAX` in magnitude.
    pub fn distance_to(&self, other: &Self) -> isize {
        debug_assert!(self.position.same_owner(&other.position));
        self.position.distance_to(&other.position)
    }
}

impl<T> Clone for Cursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Cursor<'_, T> {}

impl<T> Deref for Cursor<'_, T> {
    type Target = T;

    /// # Panics
    ///
    /// At the end position, like out-of-bounds slice indexing.
    fn deref(&self) -> &Self::Target {
        &self.slice[self.position.index]
    }
}

impl<T> PartialEq for Cursor<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position
    }
}

impl<T> Eq for Cursor<'_, T> {}

impl<T> PartialOrd for Cursor<'_, T> {
    /// Cursors into different arrays are unordered.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.position
            .same_owner(&other.position)
            .then(|| self.position.index.cmp(&other.position.index))
    }
}

impl<T> fmt::Debug for Cursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("index", &self.position.index)
            .field("len", &self.position.len)
            .finish_non_exhaustive()
    }
}

/// Exclusive cursor into a [`ResizableArray`](crate::ResizableArray).
///
/// Same movement rules as [`Cursor`], plus mutable access to the element
/// under it.
///
/// ```rust
/// use rampart_array::ResizableArray;
///
/// let mut array = ResizableArray::<u8>::sized(3).unwrap();
/// let mut cursor = array.begin_mut();
///
/// cursor.advance_by(2).unwrap();
/// *cursor = 42;
///
/// assert_eq!(array.as_slice(), &[0, 0, 42]);
/// ```
pub struct CursorMut<'a, T> {
    slice: &'a mut [T],
    position: Position,
}

impl<'a, T> CursorMut<'a, T> {
    pub(crate) fn new(slice: &'a mut [T], owner: usize, index: usize) -> Self {
        debug_assert!(index <= slice.len());

        Self {
            position: Position {
                owner,
                index,
                len: slice.len(),
            },
            slice,
        }
    }

    /// Current index, in `0..=len`.
    #[inline]
    pub fn index(&self) -> usize {
        self.position.index
    }

    /// Returns `true` at the end position.
    #[inline]
    pub fn is_end(&self) -> bool {
        self.position.index == self.position.len
    }

    /// Element under the cursor, or `None` at the end position.
    #[inline]
    pub fn get(&self) -> Option<&T> {
        self.slice.get(self.position.index)
    }

    /// Mutable element under the cursor, or `None` at the end position.
    #[inline]
    pub fn get_mut(&mut self) -> Option<&mut T> {
        self.slice.get_mut(self.position.index)
    }

    /// Read-only cursor at the same position, borrowing `self`.
    pub fn as_cursor(&self) -> Cursor<'_, T> {
        Cursor::new(&*self.slice, self.position.owner, self.position.index)
    }

    /// Moves forward by one element.
    ///
    /// # Errors
    ///
    /// [`ArrayError::OutOfRange`] at the end position.
    pub fn advance(&mut self) -> Result<(), ArrayError> {
        self.position.advance_by(1)
    }

    /// Moves forward by `n` elements.
    ///
    /// # Errors
    ///
    /// [`ArrayError::OutOfRange`] if the move would pass the end position.
    pub fn advance_by(&mut self, n: usize) -> Result<(), ArrayError> {
        self.position.advance_by(n)
    }

    /// Moves back by one element.
    ///
    /// # Errors
    ///
    /// [`ArrayError::OutOfRange`] at index 0.
    pub fn retreat(&mut self) -> Result<(), ArrayError> {
        self.position.retreat_by(1)
    }

    /// Moves back by `n` elements.
    ///
    /// # Errors
    ///
    /// [`ArrayError::OutOfRange`] if the move would go before index 0.
    pub fn retreat_by(&mut self, n: usize) -> Result<(), ArrayError> {
        self.position.retreat_by(n)
    }

    /// Moves by a signed number of elements.
    ///
    /// # Errors
    ///
    /// [`ArrayError::OutOfRange`] if the target is outside `0..=len`.
    pub fn offset(&mut self, delta: isize) -> Result<(), ArrayError> {
        self.position.offset(delta)
    }
}

impl<T> Deref for CursorMut<'_, T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.slice[self.position.index]
    }
}

impl<T> DerefMut for CursorMut<'_, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.slice[self.position.index]
    }
}

impl<T> fmt::Debug for CursorMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CursorMut")
            .field("index", &self.position.index)
            .field("len", &self.position.len)
            .finish_non_exhaustive()
    }
}
