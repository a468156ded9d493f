//! Line classification for generated study guides.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuideLine {
    Heading(String),
    /// A line that contained `**bold**` markers, with the markers removed.
    Emphasis(String),
    Numbered(String),
    Bullet(String),
    Paragraph(String),
    Blank,
}

pub fn format_study_guide(text: &str) -> Vec<GuideLine> {
    text.lines().map(classify).collect()
}

fn classify(line: &str) -> GuideLine {
    let trimmed = line.trim();

    if trimmed.is_empty() {
        return GuideLine::Blank;
    }
    if trimmed.starts_with('#') {
        return GuideLine::Heading(trimmed.trim_start_matches('#').trim().to_string());
    }
    if is_shouted(trimmed) {
        return GuideLine::Heading(trimmed.to_string());
    }
    if trimmed.contains("**") {
        return GuideLine::Emphasis(trimmed.replace("**", ""));
    }
    if is_numbered(trimmed) {
        return GuideLine::Numbered(trimmed.to_string());
    }
    if let Some(rest) = trimmed
        .strip_prefix('-')
        .or_else(|| trimmed.strip_prefix('•'))
    {
        return GuideLine::Bullet(rest.trim().to_string());
    }

    GuideLine::Paragraph(trimmed.to_string())
}

/// ALL-CAPS multi-word lines without a period read as section titles.
fn is_shouted(line: &str) -> bool {
    line.contains(' ')
        && !line.contains('.')
        && line.chars().any(char::is_alphabetic)
        && line == line.to_uppercase()
}

fn is_numbered(line: &str) -> bool {
    let digits = line.chars().take_while(char::is_ascii_digit).count();
    digits > 0 && line[digits..].starts_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classifies_each_kind() {
        let text = "## Key Learning Areas\n\
                    STUDY STRATEGIES\n\
                    **Deductibles**: what you pay first\n\
                    1. Review riders\n\
                    - Use flashcards\n\
                    • Space your practice\n\
                    \n\
                    Insurance spreads risk.";

        assert_eq!(
            format_study_guide(text),
            vec![
                GuideLine::Heading("Key Learning Areas".to_string()),
                GuideLine::Heading("STUDY STRATEGIES".to_string()),
                GuideLine::Emphasis("Deductibles: what you pay first".to_string()),
                GuideLine::Numbered("1. Review riders".to_string()),
                GuideLine::Bullet("Use flashcards".to_string()),
                GuideLine::Bullet("Space your practice".to_string()),
                GuideLine::Blank,
                GuideLine::Paragraph("Insurance spreads risk.".to_string()),
            ]
        );
    }

    #[test]
    fn test_caps_sentence_is_not_a_heading() {
        assert_eq!(
            classify("DO NOT PANIC."),
            GuideLine::Paragraph("DO NOT PANIC.".to_string())
        );
        assert_eq!(classify("HMO"), GuideLine::Paragraph("HMO".to_string()));
    }

    #[test]
    fn test_year_is_not_numbered() {
        assert_eq!(
            classify("2024 rules changed"),
            GuideLine::Paragraph("2024 rules changed".to_string())
        );
    }
}
