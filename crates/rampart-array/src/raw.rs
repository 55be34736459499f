// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Raw storage blocks and the prefix guard used while filling them.
//!
//! `RawStorage<T>` only owns memory: it never reads, writes or drops a `T`.
//! `InitGuard` tracks how many leading slots hold live values and drops
//! exactly that prefix if construction exits early.

use alloc::alloc::{Layout, alloc, dealloc};
use core::marker::PhantomData;
use core::mem;
use core::ptr::{self, NonNull};

use crate::error::ArrayError;

/// An uninitialized block of `capacity` slots for `T`.
///
/// Capacity is always counted in elements. Zero capacity and zero-sized `T`
/// never touch the allocator.
pub(crate) struct RawStorage<T> {
    ptr: NonNull<T>,
    capacity: usize,
    _marker: PhantomData<T>,
}

// Safety: RawStorage exclusively owns its block, like Box<[T]>.
unsafe impl<T: Send> Send for RawStorage<T> {}
unsafe impl<T: Sync> Sync for RawStorage<T> {}

impl<T> RawStorage<T> {
    pub(crate) const fn empty() -> Self {
        Self {
            ptr: NonNull::dangling(),
            capacity: 0,
            _marker: PhantomData,
        }
    }

    /// Requests a block for exactly `capacity` elements.
    pub(crate) fn allocate(capacity: usize) -> Result<Self, ArrayError> {
        if capacity == 0 {
            return Ok(Self::empty());
        }

        let layout = Layout::array::<T>(capacity).map_err(|_| {
            diag_error!(capacity, "capacity overflow");
            ArrayError::CapacityOverflow { capacity }
        })?;

        if layout.size() == 0 {
            return Ok(Self {
                ptr: NonNull::dangling(),
                capacity,
                _marker: PhantomData,
            });
        }

        // SAFETY (PRECONDITIONS ARE MET): layout has a non-zero size.
        let raw = unsafe { alloc(layout) };

        let Some(ptr) = NonNull::new(raw.cast::<T>()) else {
            diag_error!(capacity, bytes = layout.size(), "allocation failed");
            return Err(ArrayError::Allocation { capacity, layout });
        };

        diag_debug!(capacity, bytes = layout.size(), "storage allocated");

        Ok(Self {
            ptr,
            capacity,
            _marker: PhantomData,
        })
    }

    #[inline(always)]
    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline(always)]
    pub(crate) fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    #[inline(always)]
    pub(crate) fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr.as_ptr()
    }

    fn layout(&self) -> Option<Layout> {
        if self.capacity == 0 || mem::size_of::<T>() == 0 {
            return None;
        }

        // SAFETY (PRECONDITIONS ARE MET): the same layout was validated by
        // Layout::array in allocate().
        Some(unsafe {
            Layout::from_size_align_unchecked(
                mem::size_of::<T>() * self.capacity,
                mem::align_of::<T>(),
            )
        })
    }
}

impl<T> Drop for RawStorage<T> {
    fn drop(&mut self) {
        if let Some(layout) = self.layout() {
            // SAFETY (PRECONDITIONS ARE MET): ptr was returned by alloc() with this layout.
            unsafe { dealloc(self.ptr.as_ptr().cast::<u8>(), layout) };
        }
    }
}

/// Fills a [`RawStorage`] front to back.
///
/// Dropping the guard drops the constructed prefix `[0, initialized)` in
/// increasing index order. [`InitGuard::finish`] disarms it.
pub(crate) struct InitGuard<'a, T> {
    storage: &'a mut RawStorage<T>,
    initialized: usize,
}

impl<'a, T> InitGuard<'a, T> {
    pub(crate) fn new(storage: &'a mut RawStorage<T>) -> Self {
        Self {
            storage,
            initialized: 0,
        }
    }

    #[inline(always)]
    pub(crate) fn initialized(&self) -> usize {
        self.initialized
    }

    /// Writes `value` into the next free slot.
    #[inline(always)]
    pub(crate) fn push(&mut self, value: T) {
        assert!(
            self.initialized < self.storage.capacity(),
            "InitGuard::push: storage is full"
        );

        // SAFETY (PRECONDITIONS ARE MET): initialized < capacity, so the slot
        // lies inside the block and holds no live value.
        unsafe { self.storage.as_mut_ptr().add(self.initialized).write(value) };
        self.initialized += 1;
    }

    /// Disarms the guard and returns the number of live elements.
    pub(crate) fn finish(self) -> usize {
        let initialized = self.initialized;
        mem::forget(self);
        initialized
    }
}

impl<T> Drop for InitGuard<'_, T> {
    fn drop(&mut self) {
        let prefix = ptr::slice_from_raw_parts_mut(self.storage.as_mut_ptr(), self.initialized);

        // SAFETY (PRECONDITIONS ARE MET): exactly the first `initialized`
        // slots were written by push() and nothing else owns them.
        unsafe { ptr::drop_in_place(prefix) };
    }
}
