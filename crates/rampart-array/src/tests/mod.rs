// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

mod error;
mod raw;

use rampart_test_utils::{Flaky, FlakyError};

use crate::element::{Teardown, TryDefault};

impl TryDefault for Flaky {
    type Error = FlakyError;

    fn try_default() -> Result<Self, Self::Error> {
        Flaky::try_create()
    }
}

impl Teardown for Flaky {
    type Error = FlakyError;

    fn teardown(&mut self) -> Result<(), Self::Error> {
        self.try_teardown()
    }
}
