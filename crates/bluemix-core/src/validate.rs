//! Answer validation and normalization
//!
//! Every validator takes the raw answer as typed by the user and either
//! rejects it with a reason or returns the normalized, typed value.

use crate::error::ValidationError;
use regex::Regex;
use std::sync::LazyLock;

/// Dot-separated labels ending in an alphabetic TLD (e.g. `mybluemix.net`)
static DOMAIN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?\.)+[A-Za-z]{2,}$")
        .expect("domain pattern is valid")
});

/// Anything without whitespace or `/ @ + % :`. Dots are allowed so the
/// derived default host and typed values like `cool.app` both pass.
static HOST_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^/@\s+%:]+$").expect("host pattern is valid")
});

/// A validated, normalized answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// Size in megabytes
    Megabytes(u32),
    /// Plain positive count
    Count(u32),
    Text(String),
    YesNo(bool),
}

impl Answer {
    pub fn as_u32(&self) -> Option<u32> {
        match self {
            Answer::Megabytes(n) | Answer::Count(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Answer::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Answer::YesNo(b) => Some(*b),
            _ => None,
        }
    }
}

fn positive_integer(field: &'static str, raw: &str) -> Result<u32, ValidationError> {
    let value = raw.trim();
    let invalid = || ValidationError::NotPositiveInteger {
        field,
        value: value.to_string(),
    };

    // u32 parsing alone would accept a leading '+'
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    match value.parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(invalid()),
    }
}

/// Memory for each app instance, in megabytes
pub fn validate_app_memory(raw: &str) -> Result<Answer, ValidationError> {
    positive_integer("Memory", raw).map(Answer::Megabytes)
}

pub fn validate_app_instances(raw: &str) -> Result<Answer, ValidationError> {
    positive_integer("Instance count", raw).map(Answer::Count)
}

/// Disk quota for each app instance, in megabytes
pub fn validate_app_disk_quota(raw: &str) -> Result<Answer, ValidationError> {
    positive_integer("Disk quota", raw).map(Answer::Megabytes)
}

pub fn validate_app_domain(raw: &str) -> Result<Answer, ValidationError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(ValidationError::Empty { field: "Domain" });
    }
    if !DOMAIN_PATTERN.is_match(value) {
        return Err(ValidationError::InvalidDomain {
            value: value.to_string(),
        });
    }
    Ok(Answer::Text(value.to_string()))
}

pub fn validate_app_host(raw: &str) -> Result<Answer, ValidationError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(ValidationError::Empty { field: "Subdomain" });
    }
    if !HOST_PATTERN.is_match(value) {
        return Err(ValidationError::InvalidHost {
            value: value.to_string(),
        });
    }
    Ok(Answer::Text(value.to_string()))
}

/// Accepts exactly `yes` or `no`; only `no` normalizes to false
pub fn validate_yes_no(raw: &str) -> Result<Answer, ValidationError> {
    match raw.trim() {
        "no" => Ok(Answer::YesNo(false)),
        "yes" => Ok(Answer::YesNo(true)),
        other => Err(ValidationError::NotYesNo {
            value: other.to_string(),
        }),
    }
}

/// Render a boolean the way the yes/no questions expect it
pub fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_accepts_positive_integers() {
        assert_eq!(validate_app_memory("256"), Ok(Answer::Megabytes(256)));
        assert_eq!(validate_app_memory(" 1280 "), Ok(Answer::Megabytes(1280)));
    }

    #[test]
    fn test_numbers_reject_zero_signs_and_text() {
        for raw in ["0", "-1", "+5", "12M", "", "  ", "1.5", "99999999999"] {
            assert!(validate_app_memory(raw).is_err(), "accepted {raw:?}");
            assert!(validate_app_instances(raw).is_err(), "accepted {raw:?}");
            assert!(validate_app_disk_quota(raw).is_err(), "accepted {raw:?}");
        }
    }

    #[test]
    fn test_rejection_reason_names_the_field() {
        let err = validate_app_instances("many").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Instance count must be a positive integer, got 'many'"
        );
    }

    #[test]
    fn test_domain_validation() {
        assert_eq!(
            validate_app_domain("my.blue.mix.net"),
            Ok(Answer::Text("my.blue.mix.net".to_string()))
        );
        assert!(validate_app_domain("mybluemix.net").is_ok());
        assert_eq!(
            validate_app_domain(""),
            Err(ValidationError::Empty { field: "Domain" })
        );
        assert!(validate_app_domain("localhost").is_err());
        assert!(validate_app_domain("-bad.net").is_err());
        assert!(validate_app_domain("bad..net").is_err());
        assert!(validate_app_domain("my app.net").is_err());
    }

    #[test]
    fn test_host_validation() {
        assert!(validate_app_host("cool-app").is_ok());
        assert!(validate_app_host("cool.app").is_ok());
        assert!(validate_app_host("My-App-Test-1").is_ok());
        assert!(validate_app_host("").is_err());
        assert!(validate_app_host("has space").is_err());
        assert!(validate_app_host("at@sign").is_err());
        assert!(validate_app_host("a/b").is_err());
        assert!(validate_app_host("port:80").is_err());
    }

    #[test]
    fn test_derived_app_names_are_valid_hosts() {
        for dir in ["my_app", "app.", ".app", "a//b", "100%", "café", "a#b(c)", "x+y@z"] {
            let name = crate::mode::default_app_name(dir);
            assert!(
                validate_app_host(&name).is_ok(),
                "derived host '{name}' from '{dir}' was rejected"
            );
        }
    }

    #[test]
    fn test_yes_no_is_case_sensitive() {
        assert_eq!(validate_yes_no("yes"), Ok(Answer::YesNo(true)));
        assert_eq!(validate_yes_no("no"), Ok(Answer::YesNo(false)));
        assert!(validate_yes_no("Yes").is_err());
        assert!(validate_yes_no("NO").is_err());
        assert!(validate_yes_no("y").is_err());
    }
}
