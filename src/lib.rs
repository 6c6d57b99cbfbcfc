//! devops-fun - small helpers for DevOps automation scripts
//!
//! This library provides leveled, regex-filterable trace output with fixed
//! severity tags, redaction of sensitive values, and a few string/number
//! predicates.

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod filter;
pub mod numeric;
pub mod sanitize;
pub mod text;
pub mod trace;

pub use config::TraceConfig;
pub use error::{Error, ErrorKind, Result};
pub use numeric::{is_float, is_integer};
pub use sanitize::{sanitize, sanitize_opt, MASK};
pub use text::replace_from_right;
pub use trace::{Severity, Tracer};
