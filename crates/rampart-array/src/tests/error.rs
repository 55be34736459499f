// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use alloc::alloc::Layout;

use crate::error::{ArrayError, TeardownFailure};

// =============================================================================
// Display
// =============================================================================

#[test]
fn test_display_capacity_overflow() {
    let err = ArrayError::CapacityOverflow { capacity: 7 };

    assert_eq!(
        err.to_string(),
        "capacity overflow: 7 element slots exceed isize::MAX bytes"
    );
}

#[test]
fn test_display_allocation_reports_bytes() {
    let err = ArrayError::Allocation {
        capacity: 4,
        layout: Layout::array::<u64>(4).expect("Failed to build layout"),
    };

    assert_eq!(
        err.to_string(),
        "allocation of 4 element slots (32 bytes) failed"
    );
}

#[test]
fn test_display_element_construction() {
    let err = ArrayError::element_construction(2, "boom");

    assert_eq!(err.to_string(), "element 2 failed to construct: \"boom\"");
}

#[test]
fn test_display_element_teardown() {
    let err = ArrayError::ElementTeardown {
        failures: vec![TeardownFailure::new(0, 'x'), TeardownFailure::new(3, 'y')],
    };

    assert_eq!(err.to_string(), "2 element teardown(s) failed");
}

#[test]
fn test_display_out_of_range() {
    let err = ArrayError::OutOfRange {
        index: 0,
        offset: -1,
        len: 3,
    };

    assert_eq!(err.to_string(), "cursor at 0 cannot move by -1 within 0..=3");
}

// =============================================================================
// ArrayError helpers
// =============================================================================

#[test]
fn test_element_construction_keeps_index_and_cause() {
    let err = ArrayError::element_construction(5, 42u32);

    match err {
        ArrayError::ElementConstruction { index, cause } => {
            assert_eq!(index, 5);
            assert_eq!(format!("{cause:?}"), "42");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_is_allocation_failure() {
    let overflow = ArrayError::CapacityOverflow { capacity: 1 };
    let allocation = ArrayError::Allocation {
        capacity: 1,
        layout: Layout::new::<u8>(),
    };
    let construction = ArrayError::element_construction(0, ());
    let out_of_range = ArrayError::OutOfRange {
        index: 1,
        offset: 1,
        len: 1,
    };

    assert!(overflow.is_allocation_failure());
    assert!(allocation.is_allocation_failure());
    assert!(!construction.is_allocation_failure());
    assert!(!out_of_range.is_allocation_failure());
}

#[test]
fn test_array_error_is_std_error() {
    fn assert_error<E: std::error::Error + Send + Sync + 'static>() {}

    assert_error::<ArrayError>();
}

// =============================================================================
// TeardownFailure
// =============================================================================

#[test]
fn test_teardown_failure_accessors() {
    let failure = TeardownFailure::new(9, "stuck");

    assert_eq!(failure.index(), 9);
    assert_eq!(format!("{:?}", failure.cause()), "\"stuck\"");
}
