use crate::core::{AppError, Result};

/// Require a non-blank text field no longer than `max_len` characters
pub fn require_text(field: &str, value: &str, max_len: usize) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{} is required", field)));
    }

    if value.chars().count() > max_len {
        return Err(AppError::validation(format!(
            "{} cannot exceed {} characters",
            field, max_len
        )));
    }

    Ok(())
}

/// Same as `require_text` for fields that may be omitted
pub fn optional_text(field: &str, value: Option<&str>, max_len: usize) -> Result<()> {
    match value {
        Some(v) if v.chars().count() > max_len => Err(AppError::validation(format!(
            "{} cannot exceed {} characters",
            field, max_len
        ))),
        _ => Ok(()),
    }
}

/// Trim a value and drop it when nothing is left
pub fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
