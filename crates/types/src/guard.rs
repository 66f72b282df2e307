use tracing::debug;

use super::validation::{Field, ValidationError};

/// Words a post may not contain, in match priority order.
pub const FORBIDDEN_WORDS: [&str; 4] = ["캄보디아", "프놈펜", "불법체류", "텔레그램"];

/// Returns the first denylisted word contained in `text`.
/// Plain case-sensitive substring match, no normalization.
pub fn contains_forbidden_word(text: &str) -> Option<&'static str> {
    FORBIDDEN_WORDS.iter().copied().find(|word| text.contains(word))
}

/// Scans the title, then the body, stopping at the first violation.
pub fn check_post_content(title: &str, body: &str) -> Result<(), ValidationError> {
    for (field, text) in [(Field::Title, title), (Field::Body, body)] {
        if let Some(word) = contains_forbidden_word(text) {
            debug!("Rejected post content: {} contains a forbidden word", field);
            return Err(ValidationError::ForbiddenWord { field, word });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_passes() {
        assert_eq!(contains_forbidden_word("주말 여행 후기"), None);
        assert!(check_post_content("hello", "world").is_ok());
    }

    #[test]
    fn test_substring_match() {
        assert_eq!(contains_forbidden_word("연락은텔레그램으로"), Some("텔레그램"));
    }

    #[test]
    fn test_first_denylist_entry_wins() {
        assert_eq!(contains_forbidden_word("텔레그램 프놈펜"), Some("프놈펜"));
    }

    #[test]
    fn test_spacing_is_not_normalized() {
        let spaced = "텔 레 그 램";
        assert_eq!(contains_forbidden_word(spaced), None);
    }

    #[tracing_test::traced_test]
    #[test]
    fn test_title_checked_before_body() {
        let err = check_post_content("프놈펜 맛집", "캄보디아 여행").unwrap_err();
        assert_eq!(
            err,
            ValidationError::ForbiddenWord {
                field: Field::Title,
                word: "프놈펜"
            }
        );
        assert!(logs_contain("title contains a forbidden word"));
    }

    #[test]
    fn test_body_violation_names_word() {
        let err = check_post_content("여행", "불법체류 문의").unwrap_err();
        assert_eq!(err.field(), Field::Body);
        assert_eq!(
            err.to_string(),
            "body contains the forbidden word \"불법체류\""
        );
    }
}
