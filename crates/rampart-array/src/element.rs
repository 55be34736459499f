// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::fmt;

/// Default construction that may fail.
///
/// Used by [`ResizableArray::try_sized`](crate::ResizableArray::try_sized).
/// Types whose default cannot fail should implement [`Default`] and use
/// [`ResizableArray::sized`](crate::ResizableArray::sized) instead.
///
/// # Example
///
/// ```rust
/// use rampart_array::{ResizableArray, TryDefault};
///
/// struct Port(u16);
///
/// impl TryDefault for Port {
///     type Error = &'static str;
///
///     fn try_default() -> Result<Self, Self::Error> {
///         Ok(Port(8080))
///     }
/// }
///
/// let ports = ResizableArray::<Port>::try_sized(2).unwrap();
/// assert_eq!(ports[1].0, 8080);
/// ```
pub trait TryDefault: Sized {
    /// Failure reported when construction fails.
    type Error: fmt::Debug + Send + Sync + 'static;

    /// Constructs a default value.
    fn try_default() -> Result<Self, Self::Error>;
}

/// Explicit, fallible release of an element's resources.
///
/// [`ResizableArray::try_release`](crate::ResizableArray::try_release) calls
/// `teardown` on every element before dropping it, collecting failures
/// instead of stopping at the first one. `Drop` still runs afterwards, so
/// `teardown` must leave the value droppable.
pub trait Teardown {
    /// Failure reported when teardown fails.
    type Error: fmt::Debug + Send + Sync + 'static;

    /// Releases the element's resources.
    fn teardown(&mut self) -> Result<(), Self::Error>;
}
