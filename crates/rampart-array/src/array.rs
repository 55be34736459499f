// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use alloc::alloc::handle_alloc_error;
use alloc::vec::Vec;
use core::convert::Infallible;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::mem;
use core::ops::{Deref, DerefMut};
use core::ptr;
use core::slice;

use crate::cursor::{Cursor, CursorMut};
use crate::element::{Teardown, TryDefault};
use crate::error::{ArrayError, TeardownFailure};
use crate::raw::{InitGuard, RawStorage};

/// Test behaviour for injecting failures into `ResizableArray` assignments.
///
/// This is only available with the `test_utils` feature and lets users
/// exercise the failure path of copy-and-swap without exhausting memory.
///
/// The behaviour is sticky - once set, it remains active until changed. It
/// belongs to the instance and is not exchanged by assignments.
///
/// Only the fallible assignments (`assign_from`, `try_assign_with`) consult
/// it. `Clone::clone_from` always performs the real assignment.
///
/// # Example
///
/// ```rust
/// // test_utils feature required in dev-dependencies
/// use rampart_array::{ArrayBehaviour, ArrayError, ResizableArray};
///
/// #[cfg(test)]
/// mod tests {
///     use super::*;
///
///     #[test]
///     fn test_handles_allocation_failure() -> Result<(), ArrayError> {
///         let source = ResizableArray::from_values(&[1u8, 2, 3])?;
///         let mut target = ResizableArray::from_values(&[9u8])?;
///
///         target.change_behaviour(ArrayBehaviour::FailAtAllocation);
///         assert!(target.assign_from(&source).is_err());
///         assert_eq!(target.as_slice(), &[9]);
///
///         target.change_behaviour(ArrayBehaviour::None);
///         target.assign_from(&source)?;
///         assert_eq!(target.as_slice(), &[1, 2, 3]);
///         Ok(())
///     }
/// }
/// ```
#[cfg(any(test, feature = "test_utils"))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ArrayBehaviour {
    /// Normal behaviour - no injected failures.
    #[default]
    None,
    /// Every assignment fails to allocate its temporary copy.
    FailAtAllocation,
}

/// A contiguous, exactly-sized array of `T` with atomic bulk construction.
///
/// Storage is reserved once, at construction, for exactly the requested
/// number of elements. There is no growth: assignments build a complete
/// replacement and swap it in.
///
/// Every bulk constructor either yields a fully populated array or returns
/// an [`ArrayError`] after dropping whatever prefix it had built. A partially
/// constructed array is never observable.
///
/// # Example
///
/// ```rust
/// use rampart_array::{ArrayError, ResizableArray};
///
/// fn example() -> Result<(), ArrayError> {
///     let zeros = ResizableArray::<u32>::sized(3)?;
///     assert_eq!(zeros.as_slice(), &[0, 0, 0]);
///
///     let mut values = ResizableArray::from_values(&[7u32, 8, 9])?;
///     let mut cursor = values.begin();
///     cursor.advance_by(2)?;
///     assert_eq!(*cursor, 9);
///
///     values.assign_from(&zeros)?;
///     assert_eq!(values, zeros);
///     Ok(())
/// }
/// # example().unwrap();
/// ```
pub struct ResizableArray<T> {
    storage: RawStorage<T>,
    len: usize,
    #[cfg(any(test, feature = "test_utils"))]
    behaviour: ArrayBehaviour,
}

impl<T> ResizableArray<T> {
    /// Creates an empty array. Does not allocate.
    pub const fn new() -> Self {
        Self {
            storage: RawStorage::empty(),
            len: 0,
            #[cfg(any(test, feature = "test_utils"))]
            behaviour: ArrayBehaviour::None,
        }
    }

    /// Builds an array of `len` elements where element `i` is `f(i)`.
    ///
    /// Elements are constructed in increasing index order, in place, right
    /// after the storage is allocated. If `f` fails (or panics) at index `k`,
    /// elements `[0, k)` are dropped exactly once each and the storage is
    /// released before the error is returned.
    ///
    /// # Errors
    ///
    /// - [`ArrayError::CapacityOverflow`] / [`ArrayError::Allocation`] if the
    ///   block cannot be obtained. `f` is never called.
    /// - [`ArrayError::ElementConstruction`] if `f` fails.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rampart_array::{ArrayError, ResizableArray};
    ///
    /// let squares = ResizableArray::try_from_fn(4, |i| Ok::<_, ()>(i * i)).unwrap();
    /// assert_eq!(squares.as_slice(), &[0, 1, 4, 9]);
    ///
    /// let failed = ResizableArray::try_from_fn(4, |i| if i < 2 { Ok(i) } else { Err("boom") });
    /// assert!(matches!(failed, Err(ArrayError::ElementConstruction { index: 2, .. })));
    /// ```
    pub fn try_from_fn<E, F>(len: usize, mut f: F) -> Result<Self, ArrayError>
    where
        E: fmt::Debug + Send + Sync + 'static,
        F: FnMut(usize) -> Result<T, E>,
    {
        let mut storage = RawStorage::allocate(len)?;
        let mut guard = InitGuard::new(&mut storage);

        while guard.initialized() < len {
            let index = guard.initialized();

            match f(index) {
                Ok(value) => guard.push(value),
                Err(cause) => {
                    diag_warn!(index, len, ?cause, "element construction failed, prefix dropped");
                    return Err(ArrayError::element_construction(index, cause));
                }
            }
        }

        let len = guard.finish();

        Ok(Self {
            storage,
            len,
            #[cfg(any(test, feature = "test_utils"))]
            behaviour: ArrayBehaviour::None,
        })
    }

    /// Builds an array from an iterator that reports its exact length.
    ///
    /// # Errors
    ///
    /// Allocation errors as for [`try_from_fn`](Self::try_from_fn), and
    /// [`ArrayError::ElementConstruction`] if the iterator yields fewer
    /// items than it announced. Surplus items are not consumed.
    pub fn from_exact_iter<I>(iter: I) -> Result<Self, ArrayError>
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        let mut iter = iter.into_iter();
        let len = iter.len();

        Self::try_from_fn(len, |_| {
            iter.next()
                .ok_or("iterator exhausted before its reported length")
        })
    }

    /// Number of live elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the array holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of element slots in the storage block.
    ///
    /// Always equal to `len()` for arrays built by this crate.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.storage.capacity()
    }

    /// Returns a raw pointer to the first slot.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.storage.as_ptr()
    }

    /// Returns a raw mutable pointer to the first slot.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.storage.as_mut_ptr()
    }

    /// Returns the live elements as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY (PRECONDITIONS ARE MET): slots [0, len) are live and the
        // pointer is non-null and aligned even when nothing was allocated.
        unsafe { slice::from_raw_parts(self.storage.as_ptr(), self.len) }
    }

    /// Returns the live elements as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY (PRECONDITIONS ARE MET): as in as_slice(), plus &mut self
        // guarantees exclusive access.
        unsafe { slice::from_raw_parts_mut(self.storage.as_mut_ptr(), self.len) }
    }

    /// Cursor positioned at the first element.
    pub fn begin(&self) -> Cursor<'_, T> {
        Cursor::new(self.as_slice(), self.owner_id(), 0)
    }

    /// Cursor positioned one past the last element.
    pub fn end(&self) -> Cursor<'_, T> {
        Cursor::new(self.as_slice(), self.owner_id(), self.len)
    }

    /// Mutable cursor positioned at the first element.
    pub fn begin_mut(&mut self) -> CursorMut<'_, T> {
        let owner = self.owner_id();
        CursorMut::new(self.as_mut_slice(), owner, 0)
    }

    /// Builds a full replacement with `f` and swaps it in.
    ///
    /// Strong guarantee: if any element copy fails, `self` is unchanged and
    /// the partially built replacement has been dropped.
    ///
    /// # Errors
    ///
    /// As for [`try_from_fn`](Self::try_from_fn).
    pub fn try_assign_with<E, F>(&mut self, other: &Self, mut f: F) -> Result<(), ArrayError>
    where
        E: fmt::Debug + Send + Sync + 'static,
        F: FnMut(&T) -> Result<T, E>,
    {
        self.check_behaviour(other.len)?;

        let source = other.as_slice();
        let mut replacement = Self::try_from_fn(source.len(), |i| f(&source[i]))?;
        self.swap_contents(&mut replacement);

        Ok(())
    }

    /// Drops every element, then releases the storage, reporting nothing.
    ///
    /// Equivalent to `drop(self)`; kept for symmetry with
    /// [`try_release`](Self::try_release).
    pub fn release(self) {
        drop(self);
    }

    /// Tears every element down, then drops them and releases the storage.
    ///
    /// Teardown runs in increasing index order and continues past failures,
    /// so every element gets its teardown call and every element is dropped
    /// exactly once.
    ///
    /// # Errors
    ///
    /// [`ArrayError::ElementTeardown`] listing every failed index.
    pub fn try_release(mut self) -> Result<(), ArrayError>
    where
        T: Teardown,
    {
        let mut failures = Vec::new();

        for (index, element) in self.as_mut_slice().iter_mut().enumerate() {
            if let Err(cause) = element.teardown() {
                diag_warn!(index, ?cause, "element teardown failed");
                failures.push(TeardownFailure::new(index, cause));
            }
        }

        drop(self);

        if failures.is_empty() {
            return Ok(());
        }

        Err(ArrayError::ElementTeardown { failures })
    }

    /// Changes the test behaviour for this array.
    ///
    /// This is only available with the `test_utils` feature and allows
    /// injecting failures for testing error handling paths.
    #[cfg(any(test, feature = "test_utils"))]
    pub fn change_behaviour(&mut self, behaviour: ArrayBehaviour) {
        self.behaviour = behaviour;
    }

    #[inline(always)]
    fn check_behaviour(&self, #[allow(unused)] capacity: usize) -> Result<(), ArrayError> {
        #[cfg(any(test, feature = "test_utils"))]
        if matches!(self.behaviour, ArrayBehaviour::FailAtAllocation) {
            return Err(ArrayError::Allocation {
                capacity,
                layout: alloc::alloc::Layout::array::<T>(capacity)
                    .map_err(|_| ArrayError::CapacityOverflow { capacity })?,
            });
        }

        Ok(())
    }

    // Stable while any cursor borrows the array.
    fn owner_id(&self) -> usize {
        ptr::from_ref(self).addr()
    }

    fn swap_contents(&mut self, other: &mut Self) {
        mem::swap(&mut self.storage, &mut other.storage);
        mem::swap(&mut self.len, &mut other.len);
    }
}

impl<T: Default> ResizableArray<T> {
    /// Allocates exactly `len` slots and default-constructs each element.
    ///
    /// # Errors
    ///
    /// [`ArrayError::CapacityOverflow`] or [`ArrayError::Allocation`].
    pub fn sized(len: usize) -> Result<Self, ArrayError> {
        Self::try_from_fn(len, |_| Ok::<T, Infallible>(T::default()))
    }
}

impl<T: TryDefault> ResizableArray<T> {
    /// Allocates exactly `len` slots and constructs each element with
    /// [`TryDefault::try_default`].
    ///
    /// Fails atomically: if element `k` fails, the `k` elements already
    /// built are dropped and no array is returned.
    ///
    /// # Errors
    ///
    /// As for [`try_from_fn`](Self::try_from_fn).
    pub fn try_sized(len: usize) -> Result<Self, ArrayError> {
        Self::try_from_fn(len, |_| T::try_default())
    }
}

impl<T: Default + Clone> ResizableArray<T> {
    /// Copies `other` by default-constructing `other.len()` elements and then
    /// copy-assigning each one with [`Clone::clone_from`].
    ///
    /// # Errors
    ///
    /// [`ArrayError::CapacityOverflow`] or [`ArrayError::Allocation`].
    pub fn copy_from(other: &Self) -> Result<Self, ArrayError> {
        Self::from_values(other.as_slice())
    }

    /// Equivalent to [`sized`](Self::sized) followed by copy-assigning each
    /// of `values` into the slot with the same index.
    ///
    /// # Errors
    ///
    /// [`ArrayError::CapacityOverflow`] or [`ArrayError::Allocation`].
    pub fn from_values(values: &[T]) -> Result<Self, ArrayError> {
        let mut array = Self::sized(values.len())?;

        for (slot, value) in array.as_mut_slice().iter_mut().zip(values) {
            slot.clone_from(value);
        }

        Ok(array)
    }

    /// Copy-and-swap assignment.
    ///
    /// Builds a complete copy of `other` with [`copy_from`](Self::copy_from)
    /// and exchanges storage and length with it. The old contents are
    /// dropped together with the temporary.
    ///
    /// # Errors
    ///
    /// If the copy cannot be built, `self` is left exactly as it was.
    pub fn assign_from(&mut self, other: &Self) -> Result<(), ArrayError> {
        self.check_behaviour(other.len)?;

        let mut replacement = Self::copy_from(other)?;
        self.swap_contents(&mut replacement);

        Ok(())
    }
}

/// Aborts through the allocation error handler the way `Vec`'s infallible
/// constructors do.
fn or_alloc_failure<U>(result: Result<U, ArrayError>) -> U {
    match result {
        Ok(value) => value,
        Err(ArrayError::Allocation { layout, .. }) => handle_alloc_error(layout),
        Err(error) => panic!("{error}"),
    }
}

impl<T> Default for ResizableArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for ResizableArray<T> {
    fn drop(&mut self) {
        let live = ptr::slice_from_raw_parts_mut(self.storage.as_mut_ptr(), self.len);

        // SAFETY (PRECONDITIONS ARE MET): slots [0, len) are live and owned by
        // self. If an element's drop panics the remaining ones are still
        // dropped and `storage` is released by its own Drop during unwinding.
        unsafe { ptr::drop_in_place(live) };

        diag_debug!(len = self.len, capacity = self.storage.capacity(), "array released");
    }
}

impl<T: Clone> Clone for ResizableArray<T> {
    fn clone(&self) -> Self {
        let source = self.as_slice();
        or_alloc_failure(Self::try_from_fn(source.len(), |i| {
            Ok::<T, Infallible>(source[i].clone())
        }))
    }

    // Ignores the injected behaviour: `Clone` has no error channel, so a
    // simulated failure here could only abort.
    fn clone_from(&mut self, source: &Self) {
        let mut replacement = source.clone();
        self.swap_contents(&mut replacement);
    }
}

impl<T> From<Vec<T>> for ResizableArray<T> {
    fn from(values: Vec<T>) -> Self {
        or_alloc_failure(Self::from_exact_iter(values))
    }
}

impl<T, const N: usize> From<[T; N]> for ResizableArray<T> {
    fn from(values: [T; N]) -> Self {
        or_alloc_failure(Self::from_exact_iter(values))
    }
}

impl<T> FromIterator<T> for ResizableArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<T>>())
    }
}

impl<T> Deref for ResizableArray<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T> DerefMut for ResizableArray<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

impl<'a, T> IntoIterator for &'a ResizableArray<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<'a, T> IntoIterator for &'a mut ResizableArray<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_mut_slice().iter_mut()
    }
}

impl<T: PartialEq> PartialEq for ResizableArray<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for ResizableArray<T> {}

impl<T: PartialEq> PartialEq<[T]> for ResizableArray<T> {
    fn eq(&self, other: &[T]) -> bool {
        self.as_slice() == other
    }
}

impl<T: Hash> Hash for ResizableArray<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl<T: fmt::Debug> fmt::Debug for ResizableArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResizableArray")
            .field("data", &self.as_slice())
            .field("len", &self.len)
            .field("capacity", &self.capacity())
            .finish()
    }
}
