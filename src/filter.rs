//! Message suppression filter for trace output
//!
//! A filter holds a regular expression; any composed trace line it matches
//! anywhere (search, not full match) is suppressed. An empty pattern never
//! suppresses anything.

use regex::Regex;

use crate::error::{Error, Result};

#[derive(Debug, Clone)]
enum Matcher {
    Regex(Regex),
    /// Pattern that failed to compile, matched as a plain substring
    Literal(String),
}

/// Filter that determines which composed messages to hide
#[derive(Debug, Clone)]
pub struct MessageFilter {
    /// Raw pattern as set by the caller (empty = no filter)
    pattern: String,
    matcher: Option<Matcher>,
}

impl Default for MessageFilter {
    fn default() -> Self {
        Self::none()
    }
}

impl MessageFilter {
    /// Create a filter that lets every message through
    pub const fn none() -> Self {
        Self {
            pattern: String::new(),
            matcher: None,
        }
    }

    /// Compile `pattern` as a regular expression
    ///
    /// An empty pattern yields the pass-through filter.
    pub fn new(pattern: &str) -> Result<Self> {
        if pattern.is_empty() {
            return Ok(Self::none());
        }

        let regex = Regex::new(pattern).map_err(|source| Error::InvalidFilter {
            pattern: pattern.to_string(),
            source,
        })?;

        Ok(Self {
            pattern: pattern.to_string(),
            matcher: Some(Matcher::Regex(regex)),
        })
    }

    /// Compile `pattern`, falling back to literal substring matching when it
    /// is not a valid regular expression
    pub fn lenient(pattern: &str) -> Self {
        match Self::new(pattern) {
            Ok(filter) => filter,
            Err(err) => {
                tracing::warn!(%err, "trace filter is not a valid regex, matching it literally");
                Self {
                    pattern: pattern.to_string(),
                    matcher: Some(Matcher::Literal(pattern.to_string())),
                }
            }
        }
    }

    /// Raw pattern this filter was built from
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// True when no pattern is set
    pub fn is_empty(&self) -> bool {
        self.matcher.is_none()
    }

    /// True when the pattern fell back to literal matching
    pub fn is_literal(&self) -> bool {
        matches!(self.matcher, Some(Matcher::Literal(_)))
    }

    /// Check if a composed message should be hidden
    pub fn suppresses(&self, message: &str) -> bool {
        match &self.matcher {
            None => false, // No filter = show all
            Some(Matcher::Regex(regex)) => regex.is_match(message),
            Some(Matcher::Literal(needle)) => message.contains(needle.as_str()),
        }
    }
}
