// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Test utilities for Rampart crates.
//!
//! Every element type in this crate reports its lifecycle events
//! (constructions, clones, clone-assignments, drops, teardowns) into a
//! thread-local [`Counts`] tally. libtest runs each test on its own thread,
//! so tests can call [`reset`] and then assert on [`snapshot`] without
//! interfering with each other.
//!
//! ```rust
//! use rampart_test_utils::{Tracked, reset, snapshot};
//!
//! reset();
//! {
//!     let a = Tracked::new(1);
//!     let _b = a.clone();
//! }
//!
//! let counts = snapshot();
//! assert_eq!(counts.constructed, 1);
//! assert_eq!(counts.cloned, 1);
//! assert_eq!(counts.dropped, 2);
//! assert_eq!(counts.live(), 0);
//! ```
//!
//! ## License
//!
//! GPL-3.0-only

mod flaky;
mod tally;
mod tracked;

pub use flaky::{FailAt, FailurePlan, Flaky, FlakyError};
pub use tally::{Counts, reset, snapshot};
pub use tracked::Tracked;
