use crate::HttpStatusCode;

/// **VALUE**: Verifies which status codes are treated as transient.
///
/// **WHY THIS MATTERS**: The domain catalog load retries only transient failures. Retrying a
/// 404 or 422 wastes the whole backoff window before the catalog is declared unavailable.
///
/// **BUG THIS CATCHES**: Would catch if a client error slips into the retryable set or a
/// gateway timeout drops out of it.
#[test]
fn given_status_codes_when_checking_retryable_then_only_transient_codes_match() {
    for code in [429, 502, 503, 504] {
        assert!(HttpStatusCode(code).is_retryable(), "{code} should be retryable");
    }

    for code in [400, 404, 422, 500, 501] {
        assert!(!HttpStatusCode(code).is_retryable(), "{code} should not be retryable");
    }
}

#[test]
fn given_status_codes_when_classifying_then_ranges_are_exclusive() {
    let not_found = HttpStatusCode::from(404);
    let internal = HttpStatusCode::from(500);

    assert!(not_found.is_client_error());
    assert!(!not_found.is_server_error());
    assert!(internal.is_server_error());
    assert!(!internal.is_client_error());
    assert_eq!(internal.to_string(), "500");
}
