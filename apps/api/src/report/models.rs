use serde::{de::Error as _, Deserialize, Deserializer, Serialize};

/// User-facing message carried by every failed report.
pub const ANALYSIS_FAILED_MESSAGE: &str = "Failed to analyze resume formatting. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionType {
    General,
    Contact,
    Experience,
    Skills,
    Education,
    Length,
    Error,
}

impl SuggestionType {
    /// Parses a taxonomy label, ignoring case and surrounding whitespace.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "general" => Some(SuggestionType::General),
            "contact" => Some(SuggestionType::Contact),
            "experience" => Some(SuggestionType::Experience),
            "skills" => Some(SuggestionType::Skills),
            "education" => Some(SuggestionType::Education),
            "length" => Some(SuggestionType::Length),
            "error" => Some(SuggestionType::Error),
            _ => None,
        }
    }
}

/// Urgency tier. Variant order gives `High > Medium > Low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "high" => Some(Priority::High),
            "medium" => Some(Priority::Medium),
            "low" => Some(Priority::Low),
            _ => None,
        }
    }
}

/// An unclassified suggestion as received from the analysis service.
#[derive(Debug, Clone, PartialEq)]
pub enum RawSuggestion {
    Text(String),
    Structured {
        message: Option<String>,
        kind: Option<String>,
        priority: Option<String>,
    },
}

impl RawSuggestion {
    pub fn text(&self) -> &str {
        match self {
            RawSuggestion::Text(text) => text,
            RawSuggestion::Structured { message, .. } => message.as_deref().unwrap_or(""),
        }
    }
}

impl From<&str> for RawSuggestion {
    fn from(text: &str) -> Self {
        RawSuggestion::Text(text.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub message: String,
    #[serde(rename = "type")]
    pub kind: SuggestionType,
    pub priority: Priority,
}

/// Quantitative facts about a resume. `None` means unknown, never zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Metrics {
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "whole_count")]
    pub word_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "whole_count")]
    pub bullet_point_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "whole_count")]
    pub section_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_email: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_phone: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_summary: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "whole_count")]
    pub education_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "whole_count")]
    pub experience_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "whole_count")]
    pub skills_count: Option<u32>,

    // Match results reported by the analysis service.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_percentage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matching_skills: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing_skills: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_skills: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub years_required: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub years_actual: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meets_minimum: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meets_preferred: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ats_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ats_issues: Option<Vec<String>>,
}

/// Counts arrive as `300` or `300.0` depending on the emitter; both mean 300.
fn whole_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<f64>::deserialize(deserializer)? {
        None => Ok(None),
        Some(n) if n.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&n) => {
            Ok(Some(n as u32))
        }
        Some(n) => Err(D::Error::custom(format!(
            "expected a whole non-negative count, got {n}"
        ))),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Ok,
    Degraded,
    Error,
}

/// Canonical analysis output handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub overall_score: u32, // 0 – 100
    pub suggestions: Vec<Suggestion>,
    pub strengths: Vec<String>,
    pub metrics: Metrics,
    pub status: ReportStatus,
}

impl Report {
    /// No usable data: zero score, nothing to show.
    pub fn degraded() -> Self {
        Self {
            overall_score: 0,
            suggestions: vec![],
            strengths: vec![],
            metrics: Metrics::default(),
            status: ReportStatus::Degraded,
        }
    }

    /// The analysis could not be obtained or decoded.
    pub fn failed() -> Self {
        Self {
            overall_score: 0,
            suggestions: vec![Suggestion {
                message: ANALYSIS_FAILED_MESSAGE.to_string(),
                kind: SuggestionType::Error,
                priority: Priority::High,
            }],
            strengths: vec![],
            metrics: Metrics::default(),
            status: ReportStatus::Error,
        }
    }
}
