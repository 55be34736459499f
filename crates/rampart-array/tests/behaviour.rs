// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

#[cfg(test)]
mod behaviour_tests {
    use rampart_array::{ArrayBehaviour, ArrayError, ResizableArray};

    #[test]
    fn test_fail_at_allocation_blocks_every_assignment() {
        let source = ResizableArray::from_values(&[1u32, 2, 3]).expect("Failed to from_values");
        let mut target = ResizableArray::from_values(&[7u32]).expect("Failed to from_values");

        target.change_behaviour(ArrayBehaviour::FailAtAllocation);

        assert!(matches!(
            target.assign_from(&source),
            Err(ArrayError::Allocation { capacity: 3, .. })
        ));
        assert!(
            target
                .try_assign_with(&source, |v| Ok::<_, ()>(*v))
                .expect_err("try_assign_with(..) should fail")
                .is_allocation_failure()
        );
        assert_eq!(target.as_slice(), &[7]);

        target.change_behaviour(ArrayBehaviour::None);
        target.assign_from(&source).expect("Failed to assign_from(..)");

        assert_eq!(target, source);
    }

    #[test]
    fn test_default_behaviour_is_none() {
        assert_eq!(ArrayBehaviour::default(), ArrayBehaviour::None);
    }
}
