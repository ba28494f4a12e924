//! Normalizer — adapts raw analysis-service payloads into the canonical `Report`.
//!
//! All shape uncertainty lives in `decode`, which tags a payload as one of the
//! `Payload` variants, tried in this order:
//!
//! | variant        | detected by                                                  |
//! |----------------|--------------------------------------------------------------|
//! | `Canonical`    | `overallScore` (a previously produced `Report`)              |
//! | `Detailed`     | `detailedAnalysis`                                           |
//! | `Legacy`       | any of `matchPercentage`, `missingKeywords`, `suggestedSkills` |
//! | `FormatCheck`  | `suggestions` only                                           |
//! | `Unrecognized` | anything else, including non-objects and `{}`                |
//!
//! A recognized payload whose nested fields have the wrong types fails to decode and
//! produces `Report::failed()`. A canonical payload that is already degraded or failed
//! comes back as the fixed `Report::degraded()` / `Report::failed()`, whatever else it
//! carries. `normalize` itself never fails.

use serde::{de::DeserializeOwned, Deserialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, warn};

use crate::report::classifier::classify;
use crate::report::models::{Metrics, RawSuggestion, Report, ReportStatus};
use crate::report::ranker::rank;
use crate::report::scorer::{clamp_score, score};
use crate::report::strengths::derive_strengths;

/// How many list entries feed a synthesized legacy suggestion.
const SYNTHESIZED_ENTRY_LIMIT: usize = 3;

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("malformed field '{field}': {source}")]
    Malformed {
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("field '{0}' must be a list")]
    NotAList(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
enum Payload {
    Canonical {
        reported_score: Option<f64>,
        status: ReportStatus,
        suggestions: Vec<RawSuggestion>,
        metrics: Metrics,
    },
    Detailed {
        reported_score: Option<f64>,
        suggestions: Vec<RawSuggestion>,
        metrics: Metrics,
    },
    Legacy {
        match_percentage: Option<f64>,
        suggestions: Vec<RawSuggestion>,
        metrics: Metrics,
    },
    FormatCheck {
        suggestions: Vec<RawSuggestion>,
        metrics: Metrics,
    },
    Unrecognized,
}

impl Payload {
    fn shape(&self) -> &'static str {
        match self {
            Payload::Canonical { .. } => "canonical",
            Payload::Detailed { .. } => "detailed",
            Payload::Legacy { .. } => "legacy",
            Payload::FormatCheck { .. } => "format_check",
            Payload::Unrecognized => "unrecognized",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// detailedAnalysis sub-structures
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct DetailedAnalysis {
    skills: Option<SkillsAnalysis>,
    experience: Option<ExperienceAnalysis>,
    ats: Option<AtsAnalysis>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct SkillsAnalysis {
    match_percentage: Option<f64>,
    matching_skills: Option<Vec<String>>,
    missing_skills: Option<Vec<String>>,
    suggested_skills: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ExperienceAnalysis {
    years_required: Option<f64>,
    years_actual: Option<f64>,
    meets_minimum: Option<bool>,
    meets_preferred: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AtsAnalysis {
    score: Option<f64>,
    issues: Option<Vec<String>>,
}

// ────────────────────────────────────────────────────────────────────────────
// Entry point
// ────────────────────────────────────────────────────────────────────────────

/// Normalizes any raw payload into a well-formed `Report`. Total: never panics, never errors.
pub fn normalize(raw: &Value) -> Report {
    let payload = match decode(raw) {
        Ok(payload) => payload,
        Err(e) => {
            warn!("Analysis payload failed to decode: {e}");
            return Report::failed();
        }
    };

    debug!("Decoded analysis payload as {} shape", payload.shape());

    match payload {
        Payload::Unrecognized => {
            warn!("Analysis payload has no recognizable shape; returning degraded report");
            Report::degraded()
        }
        Payload::Canonical {
            status: ReportStatus::Degraded,
            ..
        } => Report::degraded(),
        Payload::Canonical {
            status: ReportStatus::Error,
            ..
        } => Report::failed(),
        Payload::Canonical {
            reported_score,
            status: ReportStatus::Ok,
            suggestions,
            metrics,
        } => assemble(suggestions, metrics, reported_score, ReportStatus::Ok),
        Payload::Detailed {
            reported_score,
            suggestions,
            metrics,
        } => assemble(suggestions, metrics, reported_score, ReportStatus::Ok),
        Payload::Legacy {
            match_percentage,
            suggestions,
            metrics,
        } => assemble(
            suggestions,
            metrics,
            Some(match_percentage.unwrap_or(0.0)),
            ReportStatus::Ok,
        ),
        Payload::FormatCheck {
            suggestions,
            metrics,
        } => assemble(suggestions, metrics, None, ReportStatus::Ok),
    }
}

/// Classifies, ranks, scores, and derives strengths. Non-ok reports always score 0.
fn assemble(
    raw_suggestions: Vec<RawSuggestion>,
    metrics: Metrics,
    reported_score: Option<f64>,
    status: ReportStatus,
) -> Report {
    let suggestions = rank(raw_suggestions.iter().map(classify).collect());

    let overall_score = match status {
        ReportStatus::Ok => reported_score
            .map(clamp_score)
            .unwrap_or_else(|| score(&suggestions)),
        ReportStatus::Degraded | ReportStatus::Error => 0,
    };

    let strengths = derive_strengths(&metrics);

    Report {
        overall_score,
        suggestions,
        strengths,
        metrics,
        status,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Shape decoding
// ────────────────────────────────────────────────────────────────────────────

fn decode(raw: &Value) -> Result<Payload, NormalizeError> {
    let map = match raw.as_object() {
        Some(map) if !map.is_empty() => map,
        _ => return Ok(Payload::Unrecognized),
    };

    if map.contains_key("overallScore") {
        return decode_canonical(map);
    }
    if map.contains_key("detailedAnalysis") {
        return decode_detailed(map);
    }
    if ["matchPercentage", "missingKeywords", "suggestedSkills"]
        .iter()
        .any(|key| map.contains_key(*key))
    {
        return decode_legacy(map);
    }
    if map.contains_key("suggestions") {
        return Ok(Payload::FormatCheck {
            suggestions: suggestion_list(map, "suggestions")?,
            metrics: metrics_at(map)?,
        });
    }

    Ok(Payload::Unrecognized)
}

fn decode_canonical(map: &Map<String, Value>) -> Result<Payload, NormalizeError> {
    let status = typed::<ReportStatus>(map.get("status"), "status")?;
    Ok(Payload::Canonical {
        reported_score: lenient_number(map.get("overallScore")),
        status: status.unwrap_or(ReportStatus::Ok),
        suggestions: suggestion_list(map, "suggestions")?,
        metrics: metrics_at(map)?,
    })
}

fn decode_detailed(map: &Map<String, Value>) -> Result<Payload, NormalizeError> {
    let analysis = typed::<DetailedAnalysis>(map.get("detailedAnalysis"), "detailedAnalysis")?
        .unwrap_or_default();

    let mut metrics = metrics_at(map)?;
    if let Some(skills) = analysis.skills {
        merge(&mut metrics.match_percentage, skills.match_percentage);
        merge(&mut metrics.matching_skills, skills.matching_skills);
        merge(&mut metrics.missing_skills, skills.missing_skills);
        merge(&mut metrics.suggested_skills, skills.suggested_skills);
    }
    if let Some(experience) = analysis.experience {
        merge(&mut metrics.years_required, experience.years_required);
        merge(&mut metrics.years_actual, experience.years_actual);
        merge(&mut metrics.meets_minimum, experience.meets_minimum);
        merge(&mut metrics.meets_preferred, experience.meets_preferred);
    }
    if let Some(ats) = analysis.ats {
        merge(&mut metrics.ats_score, ats.score);
        merge(&mut metrics.ats_issues, ats.issues);
    }

    let mut suggestions = suggestion_list(map, "improvementSuggestions")?;
    suggestions.extend(suggestion_list(map, "suggestions")?);

    Ok(Payload::Detailed {
        reported_score: lenient_number(map.get("overallMatch")),
        suggestions,
        metrics,
    })
}

fn decode_legacy(map: &Map<String, Value>) -> Result<Payload, NormalizeError> {
    let match_percentage = lenient_number(map.get("matchPercentage"));
    let missing = typed::<Vec<String>>(map.get("missingKeywords"), "missingKeywords")?;
    let suggested = typed::<Vec<String>>(map.get("suggestedSkills"), "suggestedSkills")?;

    let mut suggestions = suggestion_list(map, "suggestions")?;
    if let Some(message) = synthesize("Add these keywords", missing.as_deref()) {
        suggestions.push(RawSuggestion::Text(message));
    }
    if let Some(message) = synthesize("Consider adding these skills", suggested.as_deref()) {
        suggestions.push(RawSuggestion::Text(message));
    }

    let mut metrics = metrics_at(map)?;
    merge(&mut metrics.match_percentage, match_percentage);
    merge(&mut metrics.missing_skills, missing);
    merge(&mut metrics.suggested_skills, suggested);

    Ok(Payload::Legacy {
        match_percentage,
        suggestions,
        metrics,
    })
}

/// "`lead`: a, b, c" from the first few entries; nothing for an absent or empty list.
fn synthesize(lead: &str, entries: Option<&[String]>) -> Option<String> {
    let entries = entries.filter(|e| !e.is_empty())?;
    let shown: Vec<&str> = entries
        .iter()
        .take(SYNTHESIZED_ENTRY_LIMIT)
        .map(String::as_str)
        .collect();
    Some(format!("{lead}: {}", shown.join(", ")))
}

// ────────────────────────────────────────────────────────────────────────────
// Field helpers
// ────────────────────────────────────────────────────────────────────────────

fn merge<T>(slot: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *slot = value;
    }
}

/// Strict typed decode of an optional field. Absent and `null` both decode to `None`.
fn typed<T: DeserializeOwned>(
    value: Option<&Value>,
    field: &'static str,
) -> Result<Option<T>, NormalizeError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(v) => T::deserialize(v)
            .map(Some)
            .map_err(|source| NormalizeError::Malformed { field, source }),
    }
}

fn metrics_at(map: &Map<String, Value>) -> Result<Metrics, NormalizeError> {
    Ok(typed::<Metrics>(map.get("metrics"), "metrics")?.unwrap_or_default())
}

/// Numbers and numeric strings; anything else is treated as unknown.
fn lenient_number(value: Option<&Value>) -> Option<f64> {
    let number = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}

/// Decodes a list of raw suggestions. Entries that are neither strings nor objects are dropped.
fn suggestion_list(
    map: &Map<String, Value>,
    field: &'static str,
) -> Result<Vec<RawSuggestion>, NormalizeError> {
    let entries = match map.get(field) {
        None | Some(Value::Null) => return Ok(vec![]),
        Some(Value::Array(entries)) => entries,
        Some(_) => return Err(NormalizeError::NotAList(field)),
    };

    let decoded: Vec<RawSuggestion> = entries.iter().filter_map(raw_suggestion).collect();
    if decoded.len() < entries.len() {
        debug!(
            "Dropped {} unusable entries from '{field}'",
            entries.len() - decoded.len()
        );
    }
    Ok(decoded)
}

fn raw_suggestion(value: &Value) -> Option<RawSuggestion> {
    let text_field = |obj: &Map<String, Value>, key: &str| {
        obj.get(key).and_then(Value::as_str).map(str::to_string)
    };

    match value {
        Value::String(text) => Some(RawSuggestion::Text(text.clone())),
        Value::Object(obj) => Some(RawSuggestion::Structured {
            message: text_field(obj, "message"),
            kind: text_field(obj, "type"),
            priority: text_field(obj, "priority"),
        }),
        _ => None,
    }
}
