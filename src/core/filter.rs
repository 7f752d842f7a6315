use std::str::FromStr;

use crate::core::{AppError, Result};

/// Search and status filter shared by the document list endpoints
///
/// `search` is a case-insensitive substring matched against the customer
/// name, customer phone and document number. `status` is an exact match;
/// a missing status or the value `all` disables it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListFilter<S> {
    pub search: Option<String>,
    pub status: Option<S>,
}

impl<S> Default for ListFilter<S> {
    fn default() -> Self {
        Self {
            search: None,
            status: None,
        }
    }
}

impl<S> ListFilter<S>
where
    S: FromStr<Err = String>,
{
    /// Build a filter from raw query parameters
    pub fn parse(search: Option<String>, status: Option<String>) -> Result<Self> {
        let search = search
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let status = match status.as_deref().map(str::trim) {
            None | Some("") | Some("all") => None,
            Some(raw) => Some(S::from_str(raw).map_err(AppError::Validation)?),
        };

        Ok(Self { search, status })
    }
}

impl<S> ListFilter<S> {
    /// Lowercased `LIKE` pattern with wildcards escaped, e.g. `%ali%`
    pub fn like_pattern(&self) -> Option<String> {
        self.search.as_ref().map(|term| {
            let escaped = term
                .to_lowercase()
                .replace('\\', "\\\\")
                .replace('%', "\\%")
                .replace('_', "\\_");
            format!("%{}%", escaped)
        })
    }
}
