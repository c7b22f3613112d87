use once_cell::sync::Lazy;
use regex::Regex;

pub const MAX_SLUG_LEN: usize = 60;

static NON_SLUG_RUN_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9]+").unwrap());

/// Lowercase, collapse every run outside `[a-z0-9]` to one hyphen, trim
/// hyphens from both ends, then cut to 60 characters.
///
/// Distinct titles can produce the same slug; collisions are not resolved.
pub fn slugify(text: &str) -> String {
    let lower = text.to_lowercase();
    let hyphenated = NON_SLUG_RUN_PATTERN.replace_all(&lower, "-");
    let trimmed = hyphenated.trim_matches('-');
    // Output is ASCII, so byte and char counts agree
    trimmed.chars().take(MAX_SLUG_LEN).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_slug() {
        assert_eq!(slugify("Yale Center for British Art"), "yale-center-for-british-art");
    }

    #[test]
    fn test_runs_collapse_to_single_hyphen() {
        assert_eq!(slugify("Web & iOS -- Apps!!"), "web-ios-apps");
        assert_eq!(slugify("  ...Leading and trailing...  "), "leading-and-trailing");
    }

    #[test]
    fn test_non_ascii_is_treated_as_separator() {
        assert_eq!(slugify("Café Menü"), "caf-men");
    }

    #[test]
    fn test_truncates_to_sixty() {
        let title = "a".repeat(80);
        assert_eq!(slugify(&title).len(), MAX_SLUG_LEN);
    }

    #[test]
    fn test_truncation_may_leave_trailing_hyphen() {
        let title = format!("{} tail", "x".repeat(59));
        assert_eq!(slugify(&title), format!("{}-", "x".repeat(59)));
    }

    #[test]
    fn test_idempotent_on_valid_slug() {
        for slug in ["campus-portal", "a1-b2-c3", "x"] {
            assert_eq!(slugify(slug), slug);
            assert_eq!(slugify(&slugify(slug)), slugify(slug));
        }
    }

    #[test]
    fn test_collisions_are_not_resolved() {
        assert_eq!(slugify("Art & Music"), slugify("art music"));
    }

    #[test]
    fn test_empty_and_symbol_only() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!!"), "");
    }
}
