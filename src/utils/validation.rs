use crate::utils::error::{ContentError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(ContentError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(ContentError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(ContentError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(ContentError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

/// Blank values count as missing: required settings have no built-in fallback.
pub fn validate_required_value(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ContentError::MissingConfigError {
            field: field_name.to_string(),
        });
    }
    Ok(())
}

/// Rejects `${VAR}` references left behind by substitution.
pub fn validate_no_placeholder(field_name: &str, value: &str) -> Result<()> {
    if value.contains("${") {
        return Err(ContentError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Environment variable reference was not resolved".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(ContentError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("intermediary.base_url", "https://example.com").is_ok());
        assert!(validate_url("intermediary.base_url", "http://localhost:3001").is_ok());
        assert!(validate_url("intermediary.base_url", "").is_err());
        assert!(validate_url("intermediary.base_url", "invalid-url").is_err());
        assert!(validate_url("intermediary.base_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("notion.max_pages", 5, 1).is_ok());
        assert!(validate_positive_number("notion.max_pages", 0, 1).is_err());
    }

    #[test]
    fn test_validate_required_value() {
        assert!(validate_required_value("notion.token", "secret").is_ok());
        assert!(matches!(
            validate_required_value("notion.token", "   "),
            Err(ContentError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_validate_no_placeholder() {
        assert!(validate_no_placeholder("notion.token", "secret").is_ok());
        assert!(validate_no_placeholder("notion.token", "${NOTION_TOKEN}").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("notion.page_size", 100u32, 1, 100).is_ok());
        assert!(validate_range("notion.page_size", 0u32, 1, 100).is_err());
        assert!(validate_range("notion.page_size", 101u32, 1, 100).is_err());
    }
}
