// Input validation: non-aborting field checks aggregated into one 400.
pub mod fields;

use crate::errors::ApiError;

/// Pagination defaults shared by every list endpoint
pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 10;
pub const MAX_LIMIT: u64 = 100;

/// Turn collected field messages into a single validation error, joining
/// every message so clients see all failures at once.
pub fn finish(errors: Vec<String>) -> Result<(), ApiError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::validation(errors.join(", ")))
    }
}

/// Normalize page/limit query values, collecting range violations.
pub fn page_params(
    page: Option<u64>,
    limit: Option<u64>,
    errors: &mut Vec<String>,
) -> (u64, u64) {
    let page = page.unwrap_or(DEFAULT_PAGE);
    let limit = limit.unwrap_or(DEFAULT_LIMIT);
    if page < 1 {
        errors.push("Page must be at least 1".to_string());
    }
    if limit < 1 {
        errors.push("Limit must be at least 1".to_string());
    }
    if limit > MAX_LIMIT {
        errors.push("Limit cannot exceed 100".to_string());
    }
    (page, limit)
}
