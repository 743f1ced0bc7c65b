// Unit tests for confidence classification
// Tests threshold boundaries and degenerate scores

use crate::confidence::{ConfidenceLabel, classify};

/// **VALUE**: Verifies the label at and around each threshold.
///
/// **WHY THIS MATTERS**: Thresholds are inclusive lower bounds; an off-by-one
/// comparison shows the wrong badge for scores exactly on a boundary.
///
/// **BUG THIS CATCHES**: Would catch `>` used instead of `>=`.
#[test]
fn given_boundary_scores_when_classify_then_labels_follow_inclusive_thresholds() {
    assert_eq!(classify(0.95).label, ConfidenceLabel::High);
    assert_eq!(classify(0.8).label, ConfidenceLabel::High);
    assert_eq!(classify(0.79).label, ConfidenceLabel::Medium);
    assert_eq!(classify(0.6).label, ConfidenceLabel::Medium);
    assert_eq!(classify(0.59).label, ConfidenceLabel::Low);
    assert_eq!(classify(0.0).label, ConfidenceLabel::Low);
}

/// **VALUE**: Verifies the displayed percentage is rounded.
///
/// **WHY THIS MATTERS**: Users see "High Confidence (95%)", never a fraction.
///
/// **BUG THIS CATCHES**: Would catch truncation (0.79 * 100 = 78.99.. shown as 78).
#[test]
fn given_score_when_classify_then_percent_is_rounded() {
    assert_eq!(classify(0.95).percent, 95);
    assert_eq!(classify(0.79).percent, 79);
    assert_eq!(classify(0.0).percent, 0);
    assert_eq!(classify(1.0).percent, 100);
}

/// **VALUE**: Verifies classification never panics on odd input.
///
/// **WHY THIS MATTERS**: The score comes from a remote service.
///
/// **BUG THIS CATCHES**: Would catch NaN mapped to High or a percent overflow.
#[test]
fn given_nan_or_out_of_range_score_when_classify_then_result_is_clamped() {
    let nan = classify(f64::NAN);
    assert_eq!(nan.label, ConfidenceLabel::Low);
    assert_eq!(nan.percent, 0);

    assert_eq!(classify(1.7).percent, 100);
    assert_eq!(classify(-0.3).percent, 0);
    assert_eq!(classify(-0.3).label, ConfidenceLabel::Low);
}

#[test]
fn given_high_score_when_displayed_then_reads_as_badge_text() {
    assert_eq!(classify(0.95).to_string(), "High Confidence (95%)");
    assert_eq!(classify(0.65).to_string(), "Medium Confidence (65%)");
}
