use crate::errors::ValidationError;

/// Reserved input that bypasses summarization entirely.
pub const SENTINEL: &str = "whoami";

/// Canned reply for [`SENTINEL`].
pub const IDENTITY_REPLY: &str = "I am Markie, an AI model trained by Makky.";

/// Instructions sent ahead of the user's text to the primary model.
pub const PRIMARY_TEMPLATE: &str = "\
You are an intelligent summarizer for educational material, such as research papers, textbooks, or student notes.

Instructions:
1. Write a short, clear, and simple summary in plain text. Do not use bold, italics, asterisks, or any Markdown formatting.
2. Explain the material in simple language as if teaching a student, avoiding complex terms unless necessary.
3. Start with a brief paragraph summarizing the main ideas in an easy-to-understand way.
4. Below the paragraph, list the key points on separate lines, each starting with a simple dash or bullet. Keep them minimal and easy to read.
5. Use natural spacing, line breaks, and indentation for readability in a web browser.
6. Do not include headings, labels like \"Summary\" or \"Document Type\", mindmaps, or any extra formatting.

Produce a clean, plain text summary that is concise, easy to read, and structured for display on a web page.

Here is the text to summarize:
";

/// Wraps `text` in [`PRIMARY_TEMPLATE`]. Only the primary provider gets this.
#[must_use]
pub fn build_primary_prompt(text: &str) -> String {
    format!("{PRIMARY_TEMPLATE}{text}")
}

/// Rejects empty, whitespace-only and number-only input.
pub fn validate_input(text: &str) -> Result<(), ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty);
    }
    if is_numeric_only(trimmed) {
        return Err(ValidationError::NumericOnly);
    }
    Ok(())
}

/// True when the whole string reads as a single number ("42", "-3.5", "1e9",
/// "0x1F", "0b101", "0o17").
///
/// Words that `f64` happens to accept, like "inf" or "NaN", are text.
#[must_use]
pub fn is_numeric_only(text: &str) -> bool {
    let trimmed = text.trim();
    if is_radix_literal(trimmed) {
        return true;
    }
    trimmed.chars().any(|c| c.is_ascii_digit()) && trimmed.parse::<f64>().is_ok()
}

/// Unsigned hex, binary or octal integer literal with a `0x`/`0b`/`0o` prefix.
fn is_radix_literal(text: &str) -> bool {
    let Some(prefix) = text.get(..2) else {
        return false;
    };
    let radix = match prefix.to_ascii_lowercase().as_str() {
        "0x" => 16,
        "0b" => 2,
        "0o" => 8,
        _ => return false,
    };
    let digits = &text[2..];
    !digits.is_empty() && digits.chars().all(|c| c.is_digit(radix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_ends_with_text() {
        let prompt = build_primary_prompt("The mitochondria is the powerhouse of the cell.");
        assert!(prompt.starts_with(PRIMARY_TEMPLATE));
        assert!(prompt.ends_with("The mitochondria is the powerhouse of the cell."));
    }

    #[test]
    fn test_template_has_no_markdown_emphasis() {
        assert!(!PRIMARY_TEMPLATE.contains("**"));
        assert!(!PRIMARY_TEMPLATE.contains('#'));
    }

    #[test]
    fn test_numeric_detection() {
        assert!(is_numeric_only("42"));
        assert!(is_numeric_only("  -3.25 "));
        assert!(is_numeric_only("1e9"));
        assert!(!is_numeric_only("inf"));
        assert!(!is_numeric_only("NaN"));
        assert!(is_numeric_only("0x1F"));
        assert!(is_numeric_only("0B101"));
        assert!(is_numeric_only(" 0o17 "));
        assert!(!is_numeric_only("0x"));
        assert!(!is_numeric_only("0xZZ"));
        assert!(!is_numeric_only("0b102"));
        assert!(!is_numeric_only("42 apples"));
        assert!(!is_numeric_only(""));
    }
}
