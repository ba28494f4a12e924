use crate::report::models::Metrics;

const MIN_WORD_COUNT: u32 = 300;
const MIN_BULLET_POINTS: u32 = 10;
const MIN_SECTIONS: u32 = 4;
const MIN_SKILLS: u32 = 5;

/// Derives qualitative strengths from resume metrics, in a fixed check order.
///
/// A check only fires when its metric is present and meets the threshold;
/// an unknown metric never counts as satisfied.
pub fn derive_strengths(metrics: &Metrics) -> Vec<String> {
    let mut strengths = Vec::new();

    if metrics.word_count.is_some_and(|n| n >= MIN_WORD_COUNT) {
        strengths.push("Resume length gives recruiters enough detail to evaluate you".to_string());
    }
    if let Some(n) = metrics.bullet_point_count.filter(|n| *n >= MIN_BULLET_POINTS) {
        strengths.push(format!("Uses {n} bullet points to detail accomplishments"));
    }
    if let Some(n) = metrics.section_count.filter(|n| *n >= MIN_SECTIONS) {
        strengths.push(format!("Well structured with {n} distinct sections"));
    }
    if metrics.has_email == Some(true) && metrics.has_phone == Some(true) {
        strengths.push("Complete contact information (email and phone)".to_string());
    }
    if metrics.education_count.is_some_and(|n| n >= 1) {
        strengths.push("Education background is listed".to_string());
    }
    if metrics.experience_count.is_some_and(|n| n >= 1) {
        strengths.push("Work experience is documented".to_string());
    }
    if let Some(n) = metrics.skills_count.filter(|n| *n >= MIN_SKILLS) {
        strengths.push(format!("Highlights {n} relevant skills"));
    }
    if metrics.has_summary == Some(true) {
        strengths.push("Opens with a professional summary".to_string());
    }

    strengths
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_absent_yields_nothing() {
        assert!(derive_strengths(&Metrics::default()).is_empty());
    }

    #[test]
    fn test_word_count_threshold() {
        let below = Metrics {
            word_count: Some(299),
            ..Metrics::default()
        };
        let at = Metrics {
            word_count: Some(300),
            ..Metrics::default()
        };
        assert!(derive_strengths(&below).is_empty());
        assert_eq!(derive_strengths(&at).len(), 1);
    }

    #[test]
    fn test_counts_are_embedded() {
        let metrics = Metrics {
            bullet_point_count: Some(14),
            section_count: Some(5),
            skills_count: Some(9),
            ..Metrics::default()
        };
        let strengths = derive_strengths(&metrics);
        assert_eq!(strengths.len(), 3);
        assert!(strengths[0].contains("14"));
        assert!(strengths[1].contains('5'));
        assert!(strengths[2].contains('9'));
    }

    #[test]
    fn test_contact_requires_both_email_and_phone() {
        let email_only = Metrics {
            has_email: Some(true),
            ..Metrics::default()
        };
        let both = Metrics {
            has_email: Some(true),
            has_phone: Some(true),
            ..Metrics::default()
        };
        assert!(derive_strengths(&email_only).is_empty());
        assert_eq!(derive_strengths(&both).len(), 1);
    }

    #[test]
    fn test_zero_counts_do_not_qualify() {
        let metrics = Metrics {
            education_count: Some(0),
            experience_count: Some(0),
            has_summary: Some(false),
            ..Metrics::default()
        };
        assert!(derive_strengths(&metrics).is_empty());
    }

    #[test]
    fn test_emission_follows_check_order() {
        let metrics = Metrics {
            word_count: Some(650),
            bullet_point_count: Some(12),
            section_count: Some(6),
            has_email: Some(true),
            has_phone: Some(true),
            has_summary: Some(true),
            education_count: Some(1),
            experience_count: Some(3),
            skills_count: Some(10),
            ..Metrics::default()
        };
        let strengths = derive_strengths(&metrics);
        assert_eq!(strengths.len(), 8);
        assert!(strengths[0].starts_with("Resume length"));
        assert!(strengths[3].starts_with("Complete contact"));
        assert!(strengths[4].starts_with("Education"));
        assert!(strengths[5].starts_with("Work experience"));
        assert_eq!(strengths[7], "Opens with a professional summary");
    }
}
