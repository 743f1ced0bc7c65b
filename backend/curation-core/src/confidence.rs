//! Discrete confidence labels for extraction scores.

use serde::Serialize;

/// Lower bound (inclusive) of the High label.
pub const HIGH_CONFIDENCE_THRESHOLD: f64 = 0.8;

/// Lower bound (inclusive) of the Medium label.
pub const MEDIUM_CONFIDENCE_THRESHOLD: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConfidenceLabel {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for ConfidenceLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ConfidenceLabel::High => "High",
            ConfidenceLabel::Medium => "Medium",
            ConfidenceLabel::Low => "Low",
        };
        f.write_str(label)
    }
}

/// Label plus the whole-number percentage shown next to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Confidence {
    pub label: ConfidenceLabel,
    pub percent: u8,
}

/// Classify an extraction confidence score.
///
/// Total over `f64`: NaN classifies as Low with 0%, and the percentage is
/// clamped to `0..=100`.
pub fn classify(score: f64) -> Confidence {
    let label = if score >= HIGH_CONFIDENCE_THRESHOLD {
        ConfidenceLabel::High
    } else if score >= MEDIUM_CONFIDENCE_THRESHOLD {
        ConfidenceLabel::Medium
    } else {
        ConfidenceLabel::Low
    };

    // `as` saturates and maps NaN to 0
    let percent = (score * 100.0).round().clamp(0.0, 100.0) as u8;

    Confidence { label, percent }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} Confidence ({}%)", self.label, self.percent)
    }
}
