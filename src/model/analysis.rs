pub const DEFAULT_DISEASE_NAME: &str = "Unknown condition";

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    pub disease_name: String,
    /// Always within `[0, 1]`.
    pub probability: f64,
    /// Always within `[0, 1]`.
    pub confidence: f64,
    pub segmented_image: Option<String>,
    pub additional_info: Option<AdditionalInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdditionalInfo {
    pub severity: Option<String>,
    pub recommendations: Option<Vec<String>>,
    pub affected_areas: Option<Vec<String>>,
}

impl AdditionalInfo {
    pub fn is_empty(&self) -> bool {
        self.severity.is_none() && self.recommendations.is_none() && self.affected_areas.is_none()
    }
}

impl AnalysisResult {
    /// Demo record substituted when the analysis server cannot be reached.
    pub fn fallback() -> Self {
        Self {
            disease_name: "Diabetic Retinopathy".to_string(),
            probability: 0.87,
            confidence: 0.92,
            segmented_image: None,
            additional_info: Some(AdditionalInfo {
                severity: Some("Moderate".to_string()),
                recommendations: Some(vec![
                    "Schedule follow-up examination within 6 months".to_string(),
                    "Monitor blood glucose levels closely".to_string(),
                    "Consider laser photocoagulation treatment".to_string(),
                    "Maintain regular ophthalmologist visits".to_string(),
                ]),
                affected_areas: Some(vec![
                    "Macula".to_string(),
                    "Optic Disc".to_string(),
                    "Blood Vessels".to_string(),
                ]),
            }),
        }
    }

    pub fn severity(&self) -> Option<Severity> {
        self.additional_info
            .as_ref()
            .and_then(|info| info.severity.as_deref())
            .map(Severity::parse)
    }

    pub fn recommendations(&self) -> Option<&[String]> {
        self.additional_info
            .as_ref()
            .and_then(|info| info.recommendations.as_deref())
    }

    pub fn affected_areas(&self) -> Option<&[String]> {
        self.additional_info
            .as_ref()
            .and_then(|info| info.affected_areas.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Severity {
    Mild,
    Moderate,
    Severe,
    /// Anything else the server reports, kept verbatim for display.
    Unspecified(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeverityTone {
    Affirmative,
    Warning,
    Neutral,
}

impl Severity {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "mild" => Self::Mild,
            "moderate" => Self::Moderate,
            "severe" => Self::Severe,
            _ => Self::Unspecified(raw.trim().to_string()),
        }
    }

    pub fn tone(&self) -> SeverityTone {
        match self {
            Self::Mild => SeverityTone::Affirmative,
            Self::Moderate | Self::Severe => SeverityTone::Warning,
            Self::Unspecified(_) => SeverityTone::Neutral,
        }
    }

    pub fn label(&self) -> String {
        match self {
            Self::Mild => "Mild".to_string(),
            Self::Moderate => "Moderate".to_string(),
            Self::Severe => "Severe".to_string(),
            Self::Unspecified(raw) => crate::utils::capitalize(raw),
        }
    }
}
