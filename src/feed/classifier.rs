// src/feed/classifier.rs

use super::models::Severity;

/// Rule-based stand-in for the severity model.
///
/// Low-confidence observations are discounted by up to half before the
/// score is mapped onto the usual severity bands.
pub fn predict_severity(severity_score: f64, confidence_score: f64) -> Severity {
    let confidence = confidence_score.clamp(0.0, 1.0);
    let weighted = severity_score.clamp(0.0, 10.0) * (0.5 + 0.5 * confidence);
    Severity::from_score(weighted)
}
