use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{AttendlyError, Result};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}$").expect("Invalid email regex")
});

/// 去掉首尾空白后不能为空
pub fn require_non_blank<'a>(value: &'a str, message: &str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AttendlyError::bad_input(message));
    }
    Ok(trimmed)
}

pub fn validate_email(email: &str) -> std::result::Result<(), &'static str> {
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}
