use std::cmp::Reverse;

use crate::report::models::Suggestion;

/// Orders suggestions high → medium → low. The sort is stable, so equal-priority
/// suggestions keep their input order.
pub fn rank(mut suggestions: Vec<Suggestion>) -> Vec<Suggestion> {
    suggestions.sort_by_key(|s| Reverse(s.priority));
    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::models::{Priority, SuggestionType};

    fn s(message: &str, priority: Priority) -> Suggestion {
        Suggestion {
            message: message.to_string(),
            kind: SuggestionType::General,
            priority,
        }
    }

    fn messages(ranked: &[Suggestion]) -> Vec<&str> {
        ranked.iter().map(|s| s.message.as_str()).collect()
    }

    #[test]
    fn test_equal_priorities_keep_input_order() {
        let ranked = rank(vec![
            s("A", Priority::High),
            s("B", Priority::Medium),
            s("C", Priority::High),
            s("D", Priority::Medium),
        ]);
        assert_eq!(messages(&ranked), vec!["A", "C", "B", "D"]);
    }

    #[test]
    fn test_low_sinks_to_bottom() {
        let ranked = rank(vec![
            s("low", Priority::Low),
            s("medium", Priority::Medium),
            s("high", Priority::High),
        ]);
        assert_eq!(messages(&ranked), vec!["high", "medium", "low"]);
    }

    #[test]
    fn test_empty_list() {
        assert!(rank(vec![]).is_empty());
    }

    #[test]
    fn test_rank_is_reproducible() {
        let input = vec![
            s("x", Priority::Medium),
            s("y", Priority::Medium),
            s("z", Priority::High),
        ];
        assert_eq!(rank(input.clone()), rank(input));
    }
}
