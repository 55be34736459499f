// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::cell::Cell;

/// Lifecycle counters for instrumented elements on the current thread.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Counts {
    /// Values created from scratch (`new`, `Default`, successful `try_create`).
    pub constructed: usize,
    /// Values created through `Clone::clone` or a successful `try_copy`.
    pub cloned: usize,
    /// Existing values overwritten through `Clone::clone_from`.
    pub clone_assigned: usize,
    /// Values dropped.
    pub dropped: usize,
    /// Teardown attempts, successful or not.
    pub teardowns: usize,
}

impl Counts {
    const ZERO: Self = Self {
        constructed: 0,
        cloned: 0,
        clone_assigned: 0,
        dropped: 0,
        teardowns: 0,
    };

    /// Number of values created and not yet dropped.
    pub fn live(&self) -> usize {
        (self.constructed + self.cloned).saturating_sub(self.dropped)
    }
}

thread_local! {
    static COUNTS: Cell<Counts> = const { Cell::new(Counts::ZERO) };
}

pub(crate) fn record<F>(f: F)
where
    F: FnOnce(&mut Counts),
{
    COUNTS.with(|cell| {
        let mut counts = cell.get();
        f(&mut counts);
        cell.set(counts);
    });
}

/// Resets the current thread's counters to zero.
pub fn reset() {
    COUNTS.with(|cell| cell.set(Counts::ZERO));
}

/// Returns a copy of the current thread's counters.
pub fn snapshot() -> Counts {
    COUNTS.with(Cell::get)
}
