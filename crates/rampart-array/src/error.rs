// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Error types for rampart-array.

use alloc::alloc::Layout;
use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use thiserror::Error;

/// Opaque element failure, as reported by the element type or the closure
/// that produced it.
pub type ElementCause = Box<dyn fmt::Debug + Send + Sync + 'static>;

/// Errors returned by [`ResizableArray`](crate::ResizableArray) and its cursors.
#[derive(Debug, Error)]
pub enum ArrayError {
    /// The requested slot count does not fit in `isize::MAX` bytes.
    #[error("capacity overflow: {capacity} element slots exceed isize::MAX bytes")]
    CapacityOverflow {
        /// Requested number of element slots.
        capacity: usize,
    },

    /// The global allocator could not provide the storage block.
    #[error("allocation of {capacity} element slots ({} bytes) failed", .layout.size())]
    Allocation {
        /// Requested number of element slots.
        capacity: usize,
        /// Layout of the failed request.
        layout: Layout,
    },

    /// Constructing or copying the element at `index` failed.
    ///
    /// Every element before `index` had been constructed and has been
    /// dropped exactly once; the storage has been released.
    #[error("element {index} failed to construct: {cause:?}")]
    ElementConstruction {
        /// Index of the element that failed.
        index: usize,
        /// Failure reported for that element.
        cause: ElementCause,
    },

    /// One or more element teardowns failed.
    ///
    /// Teardown continued past each failure; every element was still dropped
    /// and the storage released.
    #[error("{} element teardown(s) failed", .failures.len())]
    ElementTeardown {
        /// Failures in increasing index order.
        failures: Vec<TeardownFailure>,
    },

    /// A cursor move would leave the valid range `0..=len`.
    #[error("cursor at {index} cannot move by {offset} within 0..={len}")]
    OutOfRange {
        /// Cursor index before the move.
        index: usize,
        /// Requested signed displacement.
        offset: isize,
        /// Length of the container the cursor points into.
        len: usize,
    },
}

impl ArrayError {
    /// Creates an `ElementConstruction` error from any element failure.
    pub fn element_construction<E>(index: usize, cause: E) -> Self
    where
        E: fmt::Debug + Send + Sync + 'static,
    {
        Self::ElementConstruction {
            index,
            cause: Box::new(cause),
        }
    }

    /// Returns `true` for allocation and capacity overflow failures.
    pub fn is_allocation_failure(&self) -> bool {
        matches!(self, Self::Allocation { .. } | Self::CapacityOverflow { .. })
    }
}

/// A single failed element teardown.
#[derive(Debug)]
pub struct TeardownFailure {
    index: usize,
    cause: ElementCause,
}

impl TeardownFailure {
    pub(crate) fn new<E>(index: usize, cause: E) -> Self
    where
        E: fmt::Debug + Send + Sync + 'static,
    {
        Self {
            index,
            cause: Box::new(cause),
        }
    }

    /// Index of the element whose teardown failed.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Failure reported by the element.
    pub fn cause(&self) -> &(dyn fmt::Debug + Send + Sync + 'static) {
        &*self.cause
    }
}
