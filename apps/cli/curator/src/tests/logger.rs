// Unit tests for logger module initialization logic
// Tests focus on thread-safety and error handling

use crate::logger::initialize;

use log::LevelFilter;

/// **VALUE**: Verifies that calling initialize() multiple times doesn't panic or fail.
///
/// **WHY THIS MATTERS**: fern refuses to install a second global logger. A
/// repeated call must degrade to a warning instead of aborting the run.
///
/// **BUG THIS CATCHES**: Would catch if the Once or AtomicBool guards are removed,
/// causing fern to fail when trying to set a global logger twice.
#[test]
fn given_logger_initialized_when_called_again_then_returns_ok() {
    // GIVEN: A valid temporary directory
    let temp_dir = tempfile::TempDir::new().expect("tempdir");

    // WHEN: Calling initialize twice
    let result1 = initialize(temp_dir.path(), Some(LevelFilter::Debug));
    let result2 = initialize(temp_dir.path(), None);

    // THEN: Both should return Ok (second one logs warning but doesn't error)
    assert!(result1.is_ok(), "First initialization should succeed");
    assert!(
        result2.is_ok(),
        "Second initialization should succeed (idempotent)"
    );
}
