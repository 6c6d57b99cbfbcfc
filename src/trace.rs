//! Leveled, filterable trace output
//!
//! A [`Tracer`] holds two settings: a verbosity threshold and an optional
//! suppression filter. A line tagged with level `L` is written only when
//! `L <= level`; a line that passes the level check is then dropped if the
//! filter matches the space-joined message. Lines are the parts joined by a
//! single space plus a trailing newline.
//!
//! The free functions in this module operate on a process-wide tracer
//! guarded by a mutex, so callers on different threads are serialized. The
//! `trace_*!` macros accept any `Display` arguments and forward to them.
//!
//! # Example
//!
//! ```
//! use devops_fun::trace::{Severity, Tracer};
//!
//! let tracer = Tracer::new().with_level(1).with_filter("password");
//! let mut out = Vec::new();
//! tracer.log_to(&mut out, Severity::Inf, &["connected"]).unwrap();
//! tracer.log_to(&mut out, Severity::Inf, &["password", "accepted"]).unwrap();
//! tracer.log_to(&mut out, Severity::Dbg, &["too verbose"]).unwrap();
//! assert_eq!(String::from_utf8(out).unwrap(), "-I- connected\n");
//! ```

use std::fmt::Display;
use std::io::{self, Write};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::config::TraceConfig;
use crate::error::{Error, ErrorKind, Result};
use crate::filter::MessageFilter;

/// Always shown
pub const LEVEL_NORMAL: i32 = 0;
/// Shown at "info" verbosity and above
pub const LEVEL_INFO: i32 = 1;
/// Shown only at "verbose" verbosity
pub const LEVEL_VERBOSE: i32 = 2;

/// Severity tags prepended by the named helpers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Highlighted line (`***`)
    Ast,
    /// Error (`-E-`)
    Err,
    /// Warning (`-W-`)
    Wrn,
    /// Normal output, indented by three spaces
    Nrm,
    /// Informational (`-I-`), level 1
    Inf,
    /// Debug (`-D-`), level 2
    Dbg,
}

impl Severity {
    /// Every severity, in table order
    pub const ALL: [Severity; 6] = [
        Severity::Ast,
        Severity::Err,
        Severity::Wrn,
        Severity::Nrm,
        Severity::Inf,
        Severity::Dbg,
    ];

    /// Trace level this severity is emitted at
    pub const fn level(self) -> i32 {
        match self {
            Severity::Ast | Severity::Err | Severity::Wrn | Severity::Nrm => LEVEL_NORMAL,
            Severity::Inf => LEVEL_INFO,
            Severity::Dbg => LEVEL_VERBOSE,
        }
    }

    /// Token written before the message parts
    pub const fn tag(self) -> &'static str {
        match self {
            Severity::Ast => "***",
            Severity::Err => "-E-",
            Severity::Wrn => "-W-",
            Severity::Nrm => "   ",
            Severity::Inf => "-I-",
            Severity::Dbg => "-D-",
        }
    }
}

/// Trace settings plus the emission logic that applies them
#[derive(Debug, Clone, Default)]
pub struct Tracer {
    level: i32,
    filter: MessageFilter,
}

impl Tracer {
    /// Level 0, no filter
    pub const fn new() -> Self {
        Self {
            level: LEVEL_NORMAL,
            filter: MessageFilter::none(),
        }
    }

    /// Build a tracer from loaded configuration
    pub fn from_config(config: &TraceConfig) -> Self {
        let mut tracer = Self::new().with_level(config.level);
        if let Some(pattern) = &config.filter {
            tracer.set_filter(pattern);
        }
        tracer
    }

    pub fn with_level(mut self, level: i32) -> Self {
        self.level = level;
        self
    }

    pub fn with_filter(mut self, pattern: &str) -> Self {
        self.set_filter(pattern);
        self
    }

    pub fn level(&self) -> i32 {
        self.level
    }

    /// Raw filter pattern, empty when unset
    pub fn filter(&self) -> &str {
        self.filter.pattern()
    }

    pub fn set_level(&mut self, level: i32) {
        self.level = level;
    }

    /// Set the suppression filter; an empty pattern clears it
    ///
    /// A pattern that is not a valid regex is matched as a literal
    /// substring instead.
    pub fn set_filter(&mut self, pattern: &str) {
        self.filter = MessageFilter::lenient(pattern);
    }

    /// Set the suppression filter, rejecting invalid regexes
    ///
    /// On error the previous filter is left in place.
    pub fn try_set_filter(&mut self, pattern: &str) -> Result<()> {
        self.filter = MessageFilter::new(pattern)?;
        Ok(())
    }

    /// Whether a line at `level` passes the verbosity threshold
    pub fn enabled(&self, level: i32) -> bool {
        level <= self.level
    }

    /// Compose the line for `parts` at `level`, or `None` if it is suppressed
    ///
    /// The level check runs before the filter is consulted.
    pub fn compose<S: AsRef<str>>(&self, level: i32, parts: &[S]) -> Option<String> {
        if !self.enabled(level) {
            return None;
        }

        let message = join_parts(parts);
        if self.filter.suppresses(&message) {
            return None;
        }
        Some(message)
    }

    /// Write one line to `out` unless suppressed; returns whether it was written
    pub fn emit_to<W: Write, S: AsRef<str>>(
        &self,
        out: &mut W,
        level: i32,
        parts: &[S],
    ) -> io::Result<bool> {
        match self.compose(level, parts) {
            Some(line) => {
                writeln!(out, "{}", line)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Write one line to stdout unless suppressed
    pub fn emit<S: AsRef<str>>(&self, level: i32, parts: &[S]) {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        if let Err(err) = self.emit_to(&mut out, level, parts) {
            tracing::debug!(%err, "failed to write trace line to stdout");
        }
    }

    /// Prepend the severity tag and write to `out`
    pub fn log_to<W: Write, S: AsRef<str>>(
        &self,
        out: &mut W,
        severity: Severity,
        parts: &[S],
    ) -> io::Result<bool> {
        self.emit_to(out, severity.level(), &tagged(severity, parts))
    }

    /// Prepend the severity tag and write to stdout
    pub fn log<S: AsRef<str>>(&self, severity: Severity, parts: &[S]) {
        self.emit(severity.level(), &tagged(severity, parts));
    }

    /// Write each item as its own `Nrm` line; returns how many were written
    ///
    /// With `counter`, lines are prefixed `[ 1] `, `[ 2] `, ... (1-based,
    /// width 2). With `quoted`, items are wrapped in single quotes.
    pub fn list_items_to<W: Write, S: Display>(
        &self,
        out: &mut W,
        counter: bool,
        quoted: bool,
        items: &[S],
    ) -> io::Result<usize> {
        let mut written = 0;
        for (index, item) in items.iter().enumerate() {
            let line = list_line(index + 1, counter, quoted, item);
            if self.log_to(out, Severity::Nrm, &[line])? {
                written += 1;
            }
        }
        Ok(written)
    }

    /// [`Tracer::list_items_to`] on stdout
    pub fn list_items<S: Display>(&self, counter: bool, quoted: bool, items: &[S]) {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        if let Err(err) = self.list_items_to(&mut out, counter, quoted, items) {
            tracing::debug!(%err, "failed to write trace list to stdout");
        }
    }

    /// Log `message` at `Err` severity to `out`, then build the error
    ///
    /// The returned error carries only `message`; it has no source.
    pub fn raise_with_log_to<W: Write>(
        &self,
        out: &mut W,
        message: impl Into<String>,
        kind: Option<ErrorKind>,
    ) -> Error {
        let message = message.into();
        if let Err(err) = self.log_to(out, Severity::Err, &[message.as_str()]) {
            tracing::debug!(%err, "failed to write trace line");
        }
        kind.unwrap_or_default().into_error(message)
    }

    /// [`Tracer::raise_with_log_to`] on stdout
    pub fn raise_with_log(&self, message: impl Into<String>, kind: Option<ErrorKind>) -> Error {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.raise_with_log_to(&mut out, message, kind)
    }
}

fn join_parts<S: AsRef<str>>(parts: &[S]) -> String {
    let mut message = String::new();
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            message.push(' ');
        }
        message.push_str(part.as_ref());
    }
    message
}

fn tagged<S: AsRef<str>>(severity: Severity, parts: &[S]) -> Vec<&str> {
    let mut all = Vec::with_capacity(parts.len() + 1);
    all.push(severity.tag());
    all.extend(parts.iter().map(|part| part.as_ref()));
    all
}

fn list_line<S: Display>(index: usize, counter: bool, quoted: bool, item: &S) -> String {
    let quote = if quoted { "'" } else { "" };
    if counter {
        format!("[{:>2}] {}{}{}", index, quote, item, quote)
    } else {
        format!("{}{}{}", quote, item, quote)
    }
}

// Process-wide tracer

static GLOBAL: Mutex<Tracer> = Mutex::new(Tracer::new());

fn global() -> MutexGuard<'static, Tracer> {
    // Two plain fields, never left half-updated
    GLOBAL.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Current process-wide filter pattern (empty when unset)
pub fn get_filter() -> String {
    global().filter().to_string()
}

/// Current process-wide trace level
pub fn get_level() -> i32 {
    global().level()
}

pub fn set_filter(pattern: &str) {
    global().set_filter(pattern);
    tracing::debug!(pattern, "trace filter changed");
}

pub fn try_set_filter(pattern: &str) -> Result<()> {
    global().try_set_filter(pattern)?;
    tracing::debug!(pattern, "trace filter changed");
    Ok(())
}

pub fn set_level(level: i32) {
    global().set_level(level);
    tracing::debug!(level, "trace level changed");
}

/// Copy of the process-wide tracer's current settings
pub fn snapshot() -> Tracer {
    global().clone()
}

/// Replace the process-wide tracer
pub fn install(tracer: Tracer) {
    *global() = tracer;
}

/// Emit `parts` at `level` through the process-wide tracer
pub fn emit<S: AsRef<str>>(level: i32, parts: &[S]) {
    global().emit(level, parts);
}

/// Emit `parts` with a severity tag through the process-wide tracer
pub fn log<S: AsRef<str>>(severity: Severity, parts: &[S]) {
    global().log(severity, parts);
}

pub fn ast<S: AsRef<str>>(parts: &[S]) {
    log(Severity::Ast, parts);
}

pub fn err<S: AsRef<str>>(parts: &[S]) {
    log(Severity::Err, parts);
}

pub fn wrn<S: AsRef<str>>(parts: &[S]) {
    log(Severity::Wrn, parts);
}

pub fn nrm<S: AsRef<str>>(parts: &[S]) {
    log(Severity::Nrm, parts);
}

pub fn inf<S: AsRef<str>>(parts: &[S]) {
    log(Severity::Inf, parts);
}

pub fn dbg<S: AsRef<str>>(parts: &[S]) {
    log(Severity::Dbg, parts);
}

/// One `Nrm` line per item through the process-wide tracer
pub fn list_items<S: Display>(counter: bool, quoted: bool, items: &[S]) {
    global().list_items(counter, quoted, items);
}

/// Log `message` as an error, then return a fresh error of `kind`
/// (default [`ErrorKind::Runtime`]) carrying it
pub fn raise_with_log(message: impl Into<String>, kind: Option<ErrorKind>) -> Error {
    global().raise_with_log(message, kind)
}

/// [`raise_with_log`] wrapped in `Err`, for use with `?`
pub fn fail_with_log<T>(message: impl Into<String>, kind: Option<ErrorKind>) -> Result<T> {
    Err(raise_with_log(message, kind))
}

/// Emit `Display` arguments at a trace level
#[macro_export]
macro_rules! trace_emit {
    ($level:expr $(, $part:expr)* $(,)?) => {
        $crate::trace::emit(
            $level,
            &[$(::std::string::ToString::to_string(&$part)),*] as &[::std::string::String],
        )
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __trace_severity {
    ($severity:ident $(, $part:expr)* $(,)?) => {
        $crate::trace::log(
            $crate::trace::Severity::$severity,
            &[$(::std::string::ToString::to_string(&$part)),*] as &[::std::string::String],
        )
    };
}

/// `***` line at level 0
#[macro_export]
macro_rules! trace_ast {
    ($($part:expr),* $(,)?) => { $crate::__trace_severity!(Ast $(, $part)*) };
}

/// `-E-` line at level 0
#[macro_export]
macro_rules! trace_err {
    ($($part:expr),* $(,)?) => { $crate::__trace_severity!(Err $(, $part)*) };
}

/// `-W-` line at level 0
#[macro_export]
macro_rules! trace_wrn {
    ($($part:expr),* $(,)?) => { $crate::__trace_severity!(Wrn $(, $part)*) };
}

/// Indented line at level 0
#[macro_export]
macro_rules! trace_nrm {
    ($($part:expr),* $(,)?) => { $crate::__trace_severity!(Nrm $(, $part)*) };
}

/// `-I-` line at level 1
#[macro_export]
macro_rules! trace_inf {
    ($($part:expr),* $(,)?) => { $crate::__trace_severity!(Inf $(, $part)*) };
}

/// `-D-` line at level 2
#[macro_export]
macro_rules! trace_dbg {
    ($($part:expr),* $(,)?) => { $crate::__trace_severity!(Dbg $(, $part)*) };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capture(tracer: &Tracer, severity: Severity, parts: &[&str]) -> String {
        let mut out = Vec::new();
        tracer.log_to(&mut out, severity, parts).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_severity_table() {
        let expected = [
            (Severity::Ast, 0, "***"),
            (Severity::Err, 0, "-E-"),
            (Severity::Wrn, 0, "-W-"),
            (Severity::Nrm, 0, "   "),
            (Severity::Inf, 1, "-I-"),
            (Severity::Dbg, 2, "-D-"),
        ];
        for (severity, level, tag) in expected {
            assert_eq!(severity.level(), level, "{:?}", severity);
            assert_eq!(severity.tag(), tag, "{:?}", severity);
        }
        assert_eq!(Severity::ALL.len(), expected.len());
    }

    #[test]
    fn test_defaults() {
        let tracer = Tracer::new();
        assert_eq!(tracer.level(), 0);
        assert_eq!(tracer.filter(), "");
        let default = Tracer::default();
        assert_eq!(default.level(), 0);
        assert_eq!(default.filter(), "");
    }

    #[test]
    fn test_level_boundary() {
        let tracer = Tracer::new().with_level(1);
        let mut out = Vec::new();
        assert!(tracer.emit_to(&mut out, 1, &["at"]).unwrap());
        assert!(!tracer.emit_to(&mut out, 2, &["above"]).unwrap());
        assert!(tracer.emit_to(&mut out, 0, &["below"]).unwrap());
        assert_eq!(String::from_utf8(out).unwrap(), "at\nbelow\n");
    }

    #[test]
    fn test_parts_are_space_joined() {
        let tracer = Tracer::new();
        let mut out = Vec::new();
        tracer.emit_to(&mut out, 0, &["a", "b", "c"]).unwrap();
        assert_eq!(out, b"a b c\n");
    }

    #[test]
    fn test_no_parts_writes_empty_line() {
        let tracer = Tracer::new();
        let mut out = Vec::new();
        let parts: [&str; 0] = [];
        assert!(tracer.emit_to(&mut out, 0, &parts).unwrap());
        assert_eq!(out, b"\n");
    }

    #[test]
    fn test_severity_prefixes() {
        let tracer = Tracer::new().with_level(LEVEL_VERBOSE);
        let expected = ["*** x\n", "-E- x\n", "-W- x\n", "    x\n", "-I- x\n", "-D- x\n"];
        for (severity, line) in Severity::ALL.into_iter().zip(expected) {
            assert_eq!(capture(&tracer, severity, &["x"]), line, "{:?}", severity);
        }
    }

    #[test]
    fn test_severities_gated_by_their_level() {
        for threshold in [LEVEL_NORMAL, LEVEL_INFO, LEVEL_VERBOSE] {
            let tracer = Tracer::new().with_level(threshold);
            for severity in Severity::ALL {
                let shown = !capture(&tracer, severity, &["x"]).is_empty();
                assert_eq!(shown, severity.level() <= threshold, "{:?} at {}", severity, threshold);
            }
        }
    }

    #[test]
    fn test_info_and_debug_hidden_at_level_zero() {
        let tracer = Tracer::new();
        assert_eq!(capture(&tracer, Severity::Inf, &["x"]), "");
        assert_eq!(capture(&tracer, Severity::Dbg, &["x"]), "");
        assert_eq!(capture(&tracer, Severity::Err, &["x"]), "-E- x\n");
    }

    #[test]
    fn test_filter_sees_tag() {
        let tracer = Tracer::new().with_filter("^-E-");
        assert_eq!(capture(&tracer, Severity::Err, &["failed"]), "");
        assert_eq!(capture(&tracer, Severity::Wrn, &["careful"]), "-W- careful\n");
    }

    #[test]
    fn test_filter_matches_across_parts() {
        let tracer = Tracer::new().with_filter("user 42");
        assert_eq!(capture(&tracer, Severity::Wrn, &["user", "42"]), "");
        assert_eq!(capture(&tracer, Severity::Wrn, &["user", "43"]), "-W- user 43\n");
    }

    #[test]
    fn test_compose_checks_level_first() {
        // Would match the filter, but never reaches it
        let tracer = Tracer::new().with_filter(".*");
        assert_eq!(tracer.compose(1, &["x"]), None);
        assert_eq!(tracer.compose(0, &["x"]), None);
        let open = Tracer::new();
        assert_eq!(open.compose(0, &["x", "y"]), Some("x y".to_string()));
    }

    #[test]
    fn test_clearing_filter() {
        let mut tracer = Tracer::new().with_filter("x");
        assert_eq!(tracer.filter(), "x");
        tracer.set_filter("");
        assert_eq!(tracer.filter(), "");
        assert_eq!(capture(&tracer, Severity::Nrm, &["x"]), "    x\n");
    }

    #[test]
    fn test_try_set_filter_keeps_previous_on_error() {
        let mut tracer = Tracer::new().with_filter("keep");
        assert!(tracer.try_set_filter("(unclosed").is_err());
        assert_eq!(tracer.filter(), "keep");
        tracer.try_set_filter("new").unwrap();
        assert_eq!(tracer.filter(), "new");
    }

    #[test]
    fn test_invalid_filter_matches_literally() {
        let mut tracer = Tracer::new();
        tracer.set_filter("(unclosed");
        assert_eq!(tracer.filter(), "(unclosed");
        assert_eq!(capture(&tracer, Severity::Nrm, &["a (unclosed paren"]), "");
        assert_eq!(capture(&tracer, Severity::Nrm, &["balanced"]), "    balanced\n");
    }

    #[test]
    fn test_negative_level_hides_everything() {
        let tracer = Tracer::new().with_level(-1);
        assert_eq!(capture(&tracer, Severity::Err, &["x"]), "");
    }

    #[test]
    fn test_list_items_counter_and_quotes() {
        let tracer = Tracer::new();
        let mut out = Vec::new();
        let written = tracer.list_items_to(&mut out, true, true, &["a", "bb"]).unwrap();
        assert_eq!(written, 2);
        assert_eq!(String::from_utf8(out).unwrap(), "    [ 1] 'a'\n    [ 2] 'bb'\n");
    }

    #[test]
    fn test_list_items_plain() {
        let tracer = Tracer::new();
        let mut out = Vec::new();
        tracer.list_items_to(&mut out, false, false, &[1, 2]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "    1\n    2\n");
    }

    #[test]
    fn test_list_items_counter_width() {
        let items: Vec<String> = (1..=12).map(|i| format!("i{}", i)).collect();
        let tracer = Tracer::new();
        let mut out = Vec::new();
        tracer.list_items_to(&mut out, true, false, &items).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "    [ 1] i1");
        assert_eq!(lines[9], "    [10] i10");
        assert_eq!(lines[11], "    [12] i12");
    }

    #[test]
    fn test_list_items_respects_filter() {
        let tracer = Tracer::new().with_filter("'b'");
        let mut out = Vec::new();
        let written = tracer.list_items_to(&mut out, false, true, &["a", "b", "c"]).unwrap();
        assert_eq!(written, 2);
        assert_eq!(String::from_utf8(out).unwrap(), "    'a'\n    'c'\n");
    }

    #[test]
    fn test_raise_with_log_default_kind() {
        let tracer = Tracer::new();
        let mut out = Vec::new();
        let err = tracer.raise_with_log_to(&mut out, "boom", None);
        assert_eq!(String::from_utf8(out).unwrap(), "-E- boom\n");
        assert!(matches!(err, Error::Runtime(ref m) if m == "boom"));
    }

    #[test]
    fn test_raise_with_log_custom_kind() {
        let tracer = Tracer::new();
        let mut out = Vec::new();
        let err = tracer.raise_with_log_to(&mut out, "no admin", Some(ErrorKind::PermissionDenied));
        assert_eq!(err.kind(), Some(ErrorKind::PermissionDenied));
        assert_eq!(err.message(), Some("no admin"));
    }

    #[test]
    fn test_raise_with_log_still_fails_when_filtered() {
        let tracer = Tracer::new().with_filter("boom");
        let mut out = Vec::new();
        let err = tracer.raise_with_log_to(&mut out, "boom", None);
        assert!(out.is_empty());
        assert_eq!(err.message(), Some("boom"));
    }

    #[test]
    fn test_from_config() {
        let config = TraceConfig {
            level: 2,
            filter: Some("token".to_string()),
        };
        let tracer = Tracer::from_config(&config);
        assert_eq!(tracer.level(), 2);
        assert_eq!(tracer.filter(), "token");
        assert_eq!(capture(&tracer, Severity::Dbg, &["token=abc"]), "");
        assert_eq!(capture(&tracer, Severity::Dbg, &["ok"]), "-D- ok\n");
    }
}
