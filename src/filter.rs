//! Exclusion filter based on glob patterns.
//!
//! The pattern is wrapped as `*PATTERN*`, so it matches as a substring-glob:
//! against file base names for the local backend, and against full object keys
//! for the S3 backend.

use glob::Pattern;

use crate::Result;

#[derive(Debug, Clone, Default)]
pub struct ExcludeFilter {
    pattern: Option<Pattern>,
}

impl ExcludeFilter {
    /// Build a filter from an optional exclusion pattern.
    ///
    /// # Errors
    /// Returns error if the pattern is not valid glob syntax.
    pub fn new(pattern: Option<&str>) -> Result<Self> {
        let pattern = pattern
            .map(|p| Pattern::new(&format!("*{p}*")))
            .transpose()?;
        Ok(Self { pattern })
    }

    /// Check if the given name should be skipped.
    pub fn is_excluded(&self, name: &str) -> bool {
        match &self.pattern {
            Some(pattern) => pattern.matches(name),
            None => false,
        }
    }
}
