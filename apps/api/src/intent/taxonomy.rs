//! Intent taxonomy paths — dotted, lowercase, non-empty segments.

use crate::errors::AppError;

/// A validated taxonomy path such as `creative.writing.fiction`.
/// Parsing trims surrounding whitespace and lowercases the path so lookups
/// against the `intents` table are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntentPath(String);

impl IntentPath {
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(AppError::InvalidArgument(
                "intent_path must be a non-empty dotted path".to_string(),
            ));
        }
        if trimmed.split('.').any(|segment| segment.is_empty()) {
            return Err(AppError::InvalidArgument(format!(
                "intent_path has an empty segment: '{raw}'"
            )));
        }
        Ok(Self(trimmed.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_dotted_path() {
        let path = IntentPath::parse("creative.writing.fiction").unwrap();
        assert_eq!(path.as_str(), "creative.writing.fiction");
    }

    #[test]
    fn test_parse_normalizes_case_and_whitespace() {
        let path = IntentPath::parse("  Creative.Writing  ").unwrap();
        assert_eq!(path.as_str(), "creative.writing");
    }

    #[test]
    fn test_parse_accepts_single_segment() {
        assert!(IntentPath::parse("summarization").is_ok());
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!(matches!(
            IntentPath::parse(""),
            Err(AppError::InvalidArgument(_))
        ));
        assert!(matches!(
            IntentPath::parse("   "),
            Err(AppError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_parse_rejects_empty_segments() {
        for bad in ["creative..writing", ".creative", "creative."] {
            assert!(
                matches!(IntentPath::parse(bad), Err(AppError::InvalidArgument(_))),
                "expected '{bad}' to be rejected"
            );
        }
    }
}
