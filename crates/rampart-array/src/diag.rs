// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Diagnostic events.
//!
//! With the `diagnostics` feature the macros forward to `tracing` under the
//! [`TARGET`] target. Without it they expand to nothing; failures are still
//! returned to the caller either way.

/// Target used by every event emitted from this crate.
#[cfg_attr(not(feature = "diagnostics"), allow(dead_code))]
pub(crate) const TARGET: &str = "rampart::array";

#[cfg(feature = "diagnostics")]
macro_rules! diag_error {
    ($($arg:tt)+) => {
        tracing::error!(target: $crate::diag::TARGET, $($arg)+)
    };
}

#[cfg(feature = "diagnostics")]
macro_rules! diag_warn {
    ($($arg:tt)+) => {
        tracing::warn!(target: $crate::diag::TARGET, $($arg)+)
    };
}

#[cfg(feature = "diagnostics")]
macro_rules! diag_debug {
    ($($arg:tt)+) => {
        tracing::debug!(target: $crate::diag::TARGET, $($arg)+)
    };
}

#[cfg(not(feature = "diagnostics"))]
macro_rules! diag_error {
    ($($arg:tt)+) => {{}};
}

#[cfg(not(feature = "diagnostics"))]
macro_rules! diag_warn {
    ($($arg:tt)+) => {{}};
}

#[cfg(not(feature = "diagnostics"))]
macro_rules! diag_debug {
    ($($arg:tt)+) => {{}};
}
