// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use crate::tally::record;

/// An element that records every construction, copy and drop.
///
/// `Clone::clone` counts as a copy-construction and `Clone::clone_from`
/// as a copy-assignment, so tests can tell the two apart.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct Tracked {
    value: u64,
}

impl Tracked {
    /// Creates a tracked value.
    pub fn new(value: u64) -> Self {
        record(|c| c.constructed += 1);
        Self { value }
    }

    /// Returns the carried value.
    pub fn value(&self) -> u64 {
        self.value
    }

    /// Overwrites the carried value without touching the tally.
    pub fn set_value(&mut self, value: u64) {
        self.value = value;
    }
}

impl Default for Tracked {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        record(|c| c.cloned += 1);
        Self { value: self.value }
    }

    fn clone_from(&mut self, source: &Self) {
        record(|c| c.clone_assigned += 1);
        self.value = source.value;
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        record(|c| c.dropped += 1);
    }
}
