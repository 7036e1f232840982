use regex::Regex;
use std::sync::OnceLock;
use crate::error::{AppError, AppResult};

fn separators() -> &'static Regex {
    static SEPARATORS: OnceLock<Regex> = OnceLock::new();
    SEPARATORS.get_or_init(|| Regex::new(r"[\s\-().]").expect("valid separator pattern"))
}

/// Drops spacing and punctuation so the same number typed two ways is
/// caught by the uniqueness check.
pub fn normalize_phone(phone: &str) -> AppResult<String> {
    let normalized = separators().replace_all(phone.trim(), "").into_owned();
    if normalized.is_empty() {
        return Err(AppError::ValidationError(
            "Phone number is required".to_string(),
        ));
    }
    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_phone() {
        assert_eq!(normalize_phone("0712 345 678").unwrap(), "0712345678");
        assert_eq!(normalize_phone("+255 (712) 345-678").unwrap(), "+255712345678");
        assert_eq!(normalize_phone("0712345678").unwrap(), "0712345678");
    }

    #[test]
    fn test_blank_phone_is_rejected() {
        assert!(normalize_phone("   ").is_err());
        assert!(normalize_phone("").is_err());
    }
}
