use super::ApiError;

const MAX_SEARCH_LENGTH: usize = 200;

/// Only local absolute paths are honoured as post-login destinations.
#[must_use]
pub fn sanitize_redirect(target: Option<&str>) -> String {
    match target.map(str::trim) {
        Some(path) if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') => {
            path.to_string()
        }
        _ => "/".to_string(),
    }
}

pub fn validate_search_query(query: &str) -> Result<&str, ApiError> {
    let trimmed = query.trim();
    if trimmed.chars().count() > MAX_SEARCH_LENGTH {
        return Err(ApiError::validation(format!(
            "Search query must be {MAX_SEARCH_LENGTH} characters or less"
        )));
    }
    Ok(trimmed)
}

pub fn validate_required(field: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::validation(format!("{field} is required")));
    }
    Ok(())
}
