// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Exact-capacity resizable array with atomic bulk construction.
//!
//! `ResizableArray<T>` owns one contiguous block sized to exactly the number
//! of elements it was built with. Memory is reserved first, then elements are
//! constructed in place; if an element fails to construct, the prefix built
//! so far is dropped and the block is released before the error is returned.
//!
//! # Core Guarantees
//!
//! - **Exact capacity**: storage is reserved once, for exactly `len`
//!   elements, and never grows. Capacity is always counted in elements.
//! - **Atomic construction**: `sized`, `try_sized`, `try_from_fn`,
//!   `copy_from` and `from_values` either return a complete array or an
//!   error. Each element that was built is dropped exactly once.
//! - **Strong assignment**: `assign_from` and `try_assign_with` use
//!   copy-and-swap, so a failed copy leaves the target untouched.
//! - **Complete teardown**: `try_release` tears every element down even
//!   when some fail, and reports every failure.
//! - **Checked cursors**: `begin()`/`end()` cursors refuse to move outside
//!   `0..=len` and are tied to the array's borrow.
//!
//! # Example: Construction and Cursors
//!
//! ```rust
//! use rampart_array::{ArrayError, ResizableArray};
//!
//! fn example() -> Result<(), ArrayError> {
//!     let array = ResizableArray::from_values(&[10u16, 20, 30])?;
//!
//!     let mut cursor = array.begin();
//!     cursor.advance()?;
//!     cursor.advance()?;
//!     assert_eq!(*cursor, 30);
//!
//!     cursor.advance()?;
//!     assert_eq!(cursor, array.end());
//!
//!     // Moving past either bound fails and leaves the cursor in place.
//!     assert!(cursor.advance().is_err());
//!     assert!(array.begin().retreat().is_err());
//!     Ok(())
//! }
//! # example().unwrap();
//! ```
//!
//! # Example: Atomic Construction
//!
//! ```rust
//! use rampart_array::{ArrayError, ResizableArray};
//!
//! let result = ResizableArray::try_from_fn(5, |i| {
//!     if i == 3 { Err("sensor offline") } else { Ok(i as u8) }
//! });
//!
//! match result {
//!     Err(ArrayError::ElementConstruction { index, .. }) => assert_eq!(index, 3),
//!     other => panic!("unexpected: {other:?}"),
//! }
//! ```
//!
//! # Features
//!
//! - `diagnostics` (default): emits `tracing` events under the
//!   `rampart::array` target for allocation, construction and teardown
//!   failures.
//! - `test_utils`: exposes [`ArrayBehaviour`] to inject assignment failures.

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

extern crate alloc;

#[macro_use]
mod diag;

mod array;
mod cursor;
mod element;
mod error;
mod raw;

#[cfg(test)]
mod tests;

pub use array::ResizableArray;
pub use cursor::{Cursor, CursorMut};
pub use element::{Teardown, TryDefault};
pub use error::{ArrayError, ElementCause, TeardownFailure};

#[cfg(any(test, feature = "test_utils"))]
pub use array::ArrayBehaviour;
