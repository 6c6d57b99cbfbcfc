//! Trace configuration from TOML files and the environment
//!
//! ```toml
//! level = 1
//! filter = "PRIVATE-TOKEN"
//! ```

use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::trace::{self, Tracer};

/// Environment variable holding the trace level
pub const ENV_LEVEL: &str = "DEVOPS_TRACE_LEVEL";
/// Environment variable holding the trace filter pattern
pub const ENV_FILTER: &str = "DEVOPS_TRACE_FILTER";

/// Settings for a [`Tracer`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TraceConfig {
    /// Verbosity threshold (0 normal, 1 info, 2 verbose)
    pub level: i32,
    /// Suppression filter pattern
    pub filter: Option<String>,
}

impl TraceConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read trace config {}", path.display()))?;
        let config = Self::from_toml_str(&text)
            .with_context(|| format!("Failed to parse trace config {}", path.display()))?;
        Ok(config)
    }

    /// Read `DEVOPS_TRACE_LEVEL` and `DEVOPS_TRACE_FILTER`
    ///
    /// Unset variables keep their defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_LEVEL) {
            config.level = raw.trim().parse().map_err(|_| {
                Error::Config(format!("{} must be an integer, got '{}'", ENV_LEVEL, raw))
            })?;
        }

        config.filter = lookup(ENV_FILTER).filter(|pattern| !pattern.is_empty());
        Ok(config)
    }

    /// Install these settings on the process-wide tracer
    pub fn apply(&self) {
        tracing::debug!(level = self.level, filter = ?self.filter, "applying trace config");
        trace::install(Tracer::from_config(self));
    }
}
