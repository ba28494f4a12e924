//! Job recommendations — normalizes the recommendation service's job list.
//!
//! Accepts a bare array or an object wrapping it under `recommendations` or `jobs`.
//! Entries without a usable title are dropped; everything else is defaulted.

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::report::scorer::clamp_score;

const WRAPPER_KEYS: &[&str] = &["recommendations", "jobs"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchBand {
    Strong,   // > 70
    Moderate, // > 40
    Weak,
}

impl MatchBand {
    pub fn from_score(score: u32) -> Self {
        match score {
            s if s > 70 => MatchBand::Strong,
            s if s > 40 => MatchBand::Moderate,
            _ => MatchBand::Weak,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecommendation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub company: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub description: String,
    pub match_score: u32, // 0 – 100
    pub band: MatchBand,
}

/// Normalizes a raw recommendation payload. Total; sorted by match score, best first.
pub fn normalize_recommendations(raw: &Value) -> Vec<JobRecommendation> {
    let entries = match raw {
        Value::Array(entries) => entries,
        Value::Object(map) => match WRAPPER_KEYS
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_array))
        {
            Some(entries) => entries,
            None => return vec![],
        },
        _ => return vec![],
    };

    let mut jobs: Vec<JobRecommendation> = entries
        .iter()
        .filter_map(Value::as_object)
        .filter_map(job_from)
        .collect();

    if jobs.len() < entries.len() {
        debug!(
            "Dropped {} unusable job recommendation entries",
            entries.len() - jobs.len()
        );
    }

    // Stable: equal scores keep the service's order.
    jobs.sort_by_key(|job| Reverse(job.match_score));
    jobs
}

fn job_from(obj: &Map<String, Value>) -> Option<JobRecommendation> {
    let text = |key: &str| {
        obj.get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    let title = text("title")?;

    let id = match obj.get("id") {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    };

    let match_score = obj
        .get("matchScore")
        .and_then(score_value)
        .or_else(|| obj.get("matchPercentage").and_then(score_value))
        .map(clamp_score)
        .unwrap_or(0);

    Some(JobRecommendation {
        id,
        title,
        company: text("company").unwrap_or_default(),
        location: text("location"),
        description: text("description").unwrap_or_default(),
        match_score,
        band: MatchBand::from_score(match_score),
    })
}

fn score_value(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}
