// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use rampart_test_utils::{Tracked, reset, snapshot};

use crate::error::ArrayError;
use crate::raw::{InitGuard, RawStorage};

// =============================================================================
// RawStorage::allocate()
// =============================================================================

#[test]
fn test_allocate_zero_capacity_does_not_allocate() {
    let storage = RawStorage::<u64>::allocate(0).expect("Failed to allocate(0)");

    assert_eq!(storage.capacity(), 0);
    assert_eq!(
        storage.as_ptr(),
        core::ptr::NonNull::<u64>::dangling().as_ptr().cast_const()
    );
}

#[test]
fn test_allocate_counts_elements_not_bytes() {
    let storage = RawStorage::<u64>::allocate(16).expect("Failed to allocate(16)");

    assert_eq!(storage.capacity(), 16);
    assert_eq!(storage.as_ptr() as usize % core::mem::align_of::<u64>(), 0);
}

#[test]
fn test_allocate_zero_sized_type() {
    let storage = RawStorage::<()>::allocate(usize::MAX).expect("Failed to allocate ZST");

    assert_eq!(storage.capacity(), usize::MAX);
}

#[test]
fn test_allocate_capacity_overflow() {
    let result = RawStorage::<u64>::allocate(usize::MAX);

    assert!(matches!(
        result,
        Err(ArrayError::CapacityOverflow {
            capacity: usize::MAX
        })
    ));
}

#[test]
fn test_allocate_failure_is_reported() {
    // Fits in isize::MAX bytes, but no allocator can hand it out.
    let capacity = (isize::MAX as usize) / 8;
    let result = RawStorage::<u64>::allocate(capacity);

    match result {
        Err(ArrayError::Allocation {
            capacity: reported,
            layout,
        }) => {
            assert_eq!(reported, capacity);
            assert_eq!(layout.size(), capacity * 8);
        }
        Err(other) => panic!("unexpected error: {other:?}"),
        Ok(_) => panic!("allocation of {capacity} u64 slots unexpectedly succeeded"),
    }
}

// =============================================================================
// InitGuard
// =============================================================================

#[test]
fn test_init_guard_finish_keeps_elements_alive() {
    reset();

    let mut storage = RawStorage::<Tracked>::allocate(3).expect("Failed to allocate(3)");
    let mut guard = InitGuard::new(&mut storage);

    guard.push(Tracked::new(1));
    guard.push(Tracked::new(2));
    guard.push(Tracked::new(3));

    assert_eq!(guard.finish(), 3);
    assert_eq!(snapshot().dropped, 0);

    // Hand the live prefix back to a slice drop so the test doesn't leak.
    let live = core::ptr::slice_from_raw_parts_mut(storage.as_mut_ptr(), 3);
    unsafe { core::ptr::drop_in_place(live) };

    assert_eq!(snapshot().dropped, 3);
}

#[test]
fn test_init_guard_drop_releases_exact_prefix() {
    reset();

    let mut storage = RawStorage::<Tracked>::allocate(5).expect("Failed to allocate(5)");

    {
        let mut guard = InitGuard::new(&mut storage);
        guard.push(Tracked::new(1));
        guard.push(Tracked::new(2));

        assert_eq!(guard.initialized(), 2);
    }

    let counts = snapshot();

    assert_eq!(counts.constructed, 2);
    assert_eq!(counts.dropped, 2);
    assert_eq!(counts.live(), 0);
}

#[test]
#[should_panic(expected = "storage is full")]
fn test_init_guard_push_past_capacity_panics() {
    let mut storage = RawStorage::<u8>::allocate(1).expect("Failed to allocate(1)");
    let mut guard = InitGuard::new(&mut storage);

    guard.push(1);
    guard.push(2);
}
