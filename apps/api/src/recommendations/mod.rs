// Job recommendations
// Normalizes the recommendation service's job list into a ranked, scored sequence.

pub mod handlers;
pub mod jobs;

pub use jobs::{normalize_recommendations, JobRecommendation};
