//! Shared field validators. Each returns `None` when the value is valid,
//! or the message to aggregate into the 400 response.

use crate::types::internal::auth::Role;

pub fn username(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some("Username cannot be empty".to_string());
    }
    if trimmed.len() < 3 {
        return Some("Username must be at least 3 characters".to_string());
    }
    if trimmed.len() > 50 {
        return Some("Username cannot exceed 50 characters".to_string());
    }
    None
}

pub fn email(value: &str) -> Option<String> {
    let trimmed = value.trim();
    let mut parts = trimmed.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let domain = parts.next().unwrap_or("");
    let well_formed = !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !trimmed.contains(char::is_whitespace);
    if well_formed {
        None
    } else {
        Some("Please enter a valid email address".to_string())
    }
}

pub fn password(value: &str) -> Option<String> {
    if value.len() < 8 {
        return Some("Password must be at least 8 characters".to_string());
    }
    if value.len() > 128 {
        return Some("Password cannot exceed 128 characters".to_string());
    }
    None
}

/// E.164 Philippine mobile format: +639 followed by 9 digits.
pub fn phone_number(value: &str) -> Option<String> {
    let valid = value.len() == 13
        && value.starts_with("+639")
        && value[1..].chars().all(|c| c.is_ascii_digit());
    if valid {
        None
    } else {
        Some("Phone number must be in E.164 format (e.g., +639123456789)".to_string())
    }
}

pub fn role(value: &str) -> Option<String> {
    if Role::parse(value).is_some() {
        None
    } else {
        Some("Role must be one of: admin, adviser, officer, student".to_string())
    }
}

pub fn otp_code(value: &str) -> Option<String> {
    if value.len() != 6 {
        return Some("The OTP must be exactly 6 digits.".to_string());
    }
    if !value.chars().all(|c| c.is_ascii_digit()) {
        return Some("The OTP must only contain numbers.".to_string());
    }
    None
}

/// Entity ids are UUID strings.
pub fn entity_id(value: &str, field: &str) -> Option<String> {
    if uuid::Uuid::parse_str(value).is_ok() {
        None
    } else {
        Some(format!("Invalid {field} id"))
    }
}

pub fn max_length(value: &str, max: usize, field: &str) -> Option<String> {
    if value.len() > max {
        Some(format!("{field} cannot exceed {max} characters"))
    } else {
        None
    }
}

pub fn required(value: &str, field: &str) -> Option<String> {
    if value.trim().is_empty() {
        Some(format!("{field} is required"))
    } else {
        None
    }
}

/// Lowercased, trimmed email for storage and lookups.
pub fn normalize_email(value: &str) -> String {
    value.trim().to_lowercase()
}
