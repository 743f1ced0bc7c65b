use crate::ErrorLocation;
use std::panic::Location;

/// **VALUE**: Verifies that `#[track_caller]` helpers report their call site.
///
/// **WHY THIS MATTERS**: Every error in the workspace is built from a `#[track_caller]`
/// conversion. If the caller location stops propagating, every logged failure points at
/// the conversion function instead of the code that failed.
///
/// **BUG THIS CATCHES**: Would catch if `ErrorLocation::from()` is changed to capture its
/// own position, or if `#[track_caller]` is dropped from a helper.
#[test]
fn given_two_call_sites_when_capturing_location_then_lines_differ() {
    #[track_caller]
    fn capture() -> ErrorLocation {
        ErrorLocation::from(Location::caller())
    }

    let first = capture();
    let second = capture();

    assert_eq!(first.file, second.file);
    assert_eq!(first.line + 1, second.line, "Lines should be sequential");
    assert!(first.file.ends_with("error_location.rs"));
}

/// **VALUE**: Verifies the `[file:line:column]` display format used in every error message.
#[test]
fn given_error_location_when_formatted_then_produces_bracketed_triple() {
    let location = ErrorLocation {
        file: "src/session/mod.rs",
        line: 42,
        column: 7,
    };

    assert_eq!(location.to_string(), "[src/session/mod.rs:42:7]");
}
