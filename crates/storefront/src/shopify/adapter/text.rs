//! Text normalizers.

const MAX_SUMMARY_CHARS: usize = 100;

/// Reduce a description to its first sentence.
///
/// Returns the text up to and including the first `.`, `!` or `?`. Text
/// without a terminator is cut to 100 characters with a trailing `...`
/// when longer than that.
#[must_use]
pub fn first_sentence(text: &str) -> String {
    let cleaned = text.trim();

    if let Some(end) = cleaned.find(['.', '!', '?']) {
        // Terminators are single-byte, so `end + 1` is a char boundary.
        return cleaned[..=end].trim().to_string();
    }

    if cleaned.chars().count() > MAX_SUMMARY_CHARS {
        let head: String = cleaned.chars().take(MAX_SUMMARY_CHARS).collect();
        return format!("{}...", head.trim());
    }

    cleaned.to_string()
}

/// Derive an id from an option name or value: lower-case, whitespace runs
/// become a single `-`.
#[must_use]
pub fn slugify_option(name: &str) -> String {
    let lower = name.to_lowercase();
    let mut slug = String::with_capacity(lower.len());
    let mut in_space = false;

    for c in lower.chars() {
        if c.is_whitespace() {
            if !in_space {
                slug.push('-');
            }
            in_space = true;
        } else {
            slug.push(c);
            in_space = false;
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_sentence_stops_at_terminator() {
        assert_eq!(
            first_sentence("  Soft cotton tee. Machine washable!  "),
            "Soft cotton tee."
        );
        assert_eq!(first_sentence("Really? Yes."), "Really?");
    }

    #[test]
    fn test_first_sentence_truncates_long_text() {
        let text = "word ".repeat(30);
        let summary = first_sentence(&text);
        assert!(summary.ends_with("..."));
        assert_eq!(summary.chars().count(), 99 + 3);
    }

    #[test]
    fn test_first_sentence_short_and_empty() {
        assert_eq!(first_sentence("  A short note "), "A short note");
        assert_eq!(first_sentence(""), "");
        assert_eq!(first_sentence("   "), "");
    }

    #[test]
    fn test_slugify_option() {
        assert_eq!(slugify_option("Navy Blue"), "navy-blue");
        assert_eq!(slugify_option("Extra  Large"), "extra-large");
        assert_eq!(slugify_option("Size"), "size");
    }
}
