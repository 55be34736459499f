// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

#[cfg(test)]
mod element_traits_tests {
    use rampart_array::{ArrayError, ResizableArray, Teardown, TryDefault};

    #[derive(Debug)]
    struct Connection {
        open: bool,
        stuck: bool,
    }

    #[derive(Debug, PartialEq)]
    enum ConnectionError {
        Stuck,
    }

    impl TryDefault for Connection {
        type Error = ConnectionError;

        fn try_default() -> Result<Self, Self::Error> {
            Ok(Connection {
                open: true,
                stuck: false,
            })
        }
    }

    impl Teardown for Connection {
        type Error = ConnectionError;

        fn teardown(&mut self) -> Result<(), Self::Error> {
            self.open = false;

            if self.stuck {
                return Err(ConnectionError::Stuck);
            }

            Ok(())
        }
    }

    #[test]
    fn test_try_sized_with_external_type() {
        let pool = ResizableArray::<Connection>::try_sized(3).expect("Failed to try_sized(3)");

        assert_eq!(pool.len(), 3);
        assert!(pool.iter().all(|c| c.open));
    }

    #[test]
    fn test_try_release_reports_external_failure() {
        let mut pool =
            ResizableArray::<Connection>::try_sized(3).expect("Failed to try_sized(3)");
        pool[2].stuck = true;

        let result = pool.try_release();

        match result {
            Err(ArrayError::ElementTeardown { failures }) => {
                assert_eq!(failures.len(), 1);
                assert_eq!(failures[0].index(), 2);
                assert_eq!(format!("{:?}", failures[0].cause()), "Stuck");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_error_converts_to_boxed_std_error() {
        let err: Box<dyn std::error::Error + Send + Sync> =
            Box::new(ArrayError::element_construction(1, ConnectionError::Stuck));

        assert_eq!(err.to_string(), "element 1 failed to construct: Stuck");
    }
}
