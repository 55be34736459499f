// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::cell::RefCell;
use std::collections::BTreeSet;

use thiserror::Error;

use crate::tally::record;
use crate::tracked::Tracked;

/// Injected failure raised by [`Flaky`] and [`FailAt`].
///
/// The payload is the zero-based call number that failed.
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum FlakyError {
    /// A planned construction failure.
    #[error("construction call #{0} failed")]
    Construction(usize),

    /// A planned copy failure.
    #[error("copy call #{0} failed")]
    Copy(usize),

    /// A planned teardown failure.
    #[error("teardown call #{0} failed")]
    Teardown(usize),
}

/// Which calls on the current thread should fail.
///
/// Call numbers are zero-based and counted per operation kind from the
/// moment the plan is installed. The plan is sticky until replaced.
///
/// ```rust
/// use rampart_test_utils::{FailurePlan, Flaky};
///
/// FailurePlan::new().fail_construction_at(1).install();
///
/// assert!(Flaky::try_create().is_ok());
/// assert!(Flaky::try_create().is_err());
/// assert!(Flaky::try_create().is_ok());
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FailurePlan {
    construction: Option<usize>,
    copy: Option<usize>,
    teardown: BTreeSet<usize>,
}

#[derive(Debug, Default)]
struct PlanState {
    plan: FailurePlan,
    constructions: usize,
    copies: usize,
    teardowns: usize,
}

thread_local! {
    static PLAN: RefCell<PlanState> = RefCell::new(PlanState::default());
}

impl FailurePlan {
    /// A plan with no injected failures.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails the `call`-th construction.
    pub fn fail_construction_at(mut self, call: usize) -> Self {
        self.construction = Some(call);
        self
    }

    /// Fails the `call`-th copy.
    pub fn fail_copy_at(mut self, call: usize) -> Self {
        self.copy = Some(call);
        self
    }

    /// Fails the `call`-th teardown. May be given several times.
    pub fn fail_teardown_at(mut self, call: usize) -> Self {
        self.teardown.insert(call);
        self
    }

    /// Installs the plan on the current thread and restarts call numbering.
    pub fn install(self) {
        PLAN.with(|state| {
            *state.borrow_mut() = PlanState {
                plan: self,
                ..PlanState::default()
            };
        });
    }
}

/// An element whose construction, copy and teardown fail on demand.
///
/// Failures follow the [`FailurePlan`] installed on the current thread.
/// Lifecycle events are recorded like [`Tracked`].
#[derive(Debug, PartialEq, Eq)]
pub struct Flaky {
    inner: Tracked,
}

impl Flaky {
    /// Constructs a value, or fails if the plan says so.
    ///
    /// Successful values carry their construction call number.
    pub fn try_create() -> Result<Self, FlakyError> {
        let (call, fails) = PLAN.with(|state| {
            let mut state = state.borrow_mut();
            let call = state.constructions;
            state.constructions += 1;
            (call, state.plan.construction == Some(call))
        });

        if fails {
            return Err(FlakyError::Construction(call));
        }

        Ok(Self {
            inner: Tracked::new(call as u64),
        })
    }

    /// Copies the value, or fails if the plan says so.
    pub fn try_copy(&self) -> Result<Self, FlakyError> {
        let failed = PLAN.with(|state| {
            let mut state = state.borrow_mut();
            let call = state.copies;
            state.copies += 1;
            (state.plan.copy == Some(call)).then_some(call)
        });

        match failed {
            Some(call) => Err(FlakyError::Copy(call)),
            None => Ok(Self {
                inner: self.inner.clone(),
            }),
        }
    }

    /// Tears the value down, or fails if the plan says so.
    ///
    /// Every attempt is counted in [`Counts::teardowns`](crate::Counts::teardowns).
    pub fn try_teardown(&mut self) -> Result<(), FlakyError> {
        record(|c| c.teardowns += 1);

        let failed = PLAN.with(|state| {
            let mut state = state.borrow_mut();
            let call = state.teardowns;
            state.teardowns += 1;
            state.plan.teardown.contains(&call).then_some(call)
        });

        match failed {
            Some(call) => Err(FlakyError::Teardown(call)),
            None => Ok(()),
        }
    }

    /// Returns the carried value.
    pub fn value(&self) -> u64 {
        self.inner.value()
    }
}

/// A factory that yields [`Tracked`] values and fails on one call.
///
/// Meant to be driven from a `try_from_fn` style constructor closure.
///
/// ```rust
/// use rampart_test_utils::{FailAt, FlakyError};
///
/// let mut factory = FailAt::new(2);
///
/// assert_eq!(factory.call().map(|t| t.value()), Ok(0));
/// assert_eq!(factory.call().map(|t| t.value()), Ok(1));
/// assert_eq!(factory.call().map(|t| t.value()), Err(FlakyError::Construction(2)));
/// ```
#[derive(Debug, Clone)]
pub struct FailAt {
    at: usize,
    calls: usize,
}

impl FailAt {
    /// Fails the `at`-th call (zero-based).
    pub fn new(at: usize) -> Self {
        Self { at, calls: 0 }
    }

    /// Produces the next value or the injected failure.
    pub fn call(&mut self) -> Result<Tracked, FlakyError> {
        let call = self.calls;
        self.calls += 1;

        if call == self.at {
            return Err(FlakyError::Construction(call));
        }

        Ok(Tracked::new(call as u64))
    }

    /// Number of calls made so far.
    pub fn calls(&self) -> usize {
        self.calls
    }
}
