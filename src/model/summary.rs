use super::{AnalysisResult, Severity};
use crate::utils::percent;

/// Display-ready projection of an [`AnalysisResult`]. Optional sections are
/// `None` when the result does not carry them.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSummary<'a> {
    pub condition: &'a str,
    pub severity: Option<Severity>,
    pub probability_percent: u8,
    pub confidence_percent: u8,
    pub affected_areas: Option<&'a [String]>,
    pub recommendations: Option<&'a [String]>,
    pub overlay_reference: Option<&'a str>,
}

impl<'a> ResultSummary<'a> {
    pub fn from_result(result: &'a AnalysisResult) -> Self {
        Self {
            condition: &result.disease_name,
            severity: result.severity(),
            probability_percent: percent(result.probability),
            confidence_percent: percent(result.confidence),
            affected_areas: result.affected_areas(),
            recommendations: result.recommendations(),
            overlay_reference: result.segmented_image.as_deref(),
        }
    }

    pub fn probability_label(&self) -> String {
        format!("{}%", self.probability_percent)
    }

    pub fn confidence_label(&self) -> String {
        format!("{}%", self.confidence_percent)
    }

    /// Line used by the completion notice.
    pub fn headline(&self) -> String {
        format!(
            "Detected: {} ({}% confidence)",
            self.condition, self.probability_percent
        )
    }
}
