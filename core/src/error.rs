//! Parse outcomes and error types.
//!
//! A parse either succeeds or stops at the first error it meets. The failure
//! carries an [`ErrorKind`] and a context string (the offending token or
//! argument name) borrowed from the argument vector or the schema.

use std::fmt;

use thiserror::Error;

/// Category of a parse failure.
///
/// The `Display` text is the fixed message for each kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A value-taking option had neither `=value` nor a following token.
    MissingValue,
    /// A token could not be converted to the field's type.
    InvalidValue,
    /// An option token matched no declared option.
    UnknownOption,
    /// A required positional argument was not supplied.
    MissingRequiredArg,
    /// A positional token had no declaration and no variadic collector.
    TooManyArgs,
}

impl ErrorKind {
    /// The fixed message for this kind.
    pub fn message(self) -> &'static str {
        match self {
            Self::MissingValue => "Missing value for option",
            Self::InvalidValue => "Invalid value",
            Self::UnknownOption => "Unknown option",
            Self::MissingRequiredArg => "Missing required argument",
            Self::TooManyArgs => "Too many arguments",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for ErrorKind {}

/// Result of one [`Parser::parse`](crate::Parser::parse) call.
///
/// `Display` renders the diagnostic line: nothing on success,
/// `Error: {message}` or `Error: {message} '{context}'` on failure.
///
/// # Examples
///
/// ```
/// use argschema_core::{ErrorKind, ParseOutcome};
///
/// let ok = ParseOutcome::success();
/// assert!(ok.is_ok());
/// assert_eq!(ok.message(), "Success");
///
/// let failed = ParseOutcome::failure(ErrorKind::UnknownOption, "--nope");
/// assert_eq!(failed.kind(), Some(ErrorKind::UnknownOption));
/// assert_eq!(failed.to_string(), "Error: Unknown option '--nope'");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[must_use]
pub struct ParseOutcome<'a> {
    kind: Option<ErrorKind>,
    context: &'a str,
}

impl<'a> ParseOutcome<'a> {
    pub const fn success() -> Self {
        Self {
            kind: None,
            context: "",
        }
    }

    pub const fn failure(kind: ErrorKind, context: &'a str) -> Self {
        Self {
            kind: Some(kind),
            context,
        }
    }

    pub const fn is_ok(&self) -> bool {
        self.kind.is_none()
    }

    /// The error kind, or `None` on success.
    pub const fn kind(&self) -> Option<ErrorKind> {
        self.kind
    }

    /// The offending token or argument name; empty when there is none.
    pub const fn context(&self) -> &'a str {
        self.context
    }

    /// "Success" or the message of the error kind.
    pub fn message(&self) -> &'static str {
        self.kind.map_or("Success", ErrorKind::message)
    }

    /// Converts into a `Result` with an owned error, for use with `?`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] when the outcome is a failure.
    pub fn into_result(self) -> Result<()> {
        match self.kind {
            None => Ok(()),
            Some(kind) => Err(ParseError {
                kind,
                context: self.context.to_string(),
            }),
        }
    }
}

impl fmt::Display for ParseOutcome<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(kind) = self.kind else {
            return Ok(());
        };
        if self.context.is_empty() {
            write!(f, "Error: {kind}")
        } else {
            write!(f, "Error: {kind} '{}'", self.context)
        }
    }
}

/// Owned parse failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", render_error(.kind, .context))]
pub struct ParseError {
    pub kind: ErrorKind,
    pub context: String,
}

fn render_error(kind: &ErrorKind, context: &str) -> String {
    if context.is_empty() {
        kind.to_string()
    } else {
        format!("{kind} '{context}'")
    }
}

/// Convenience alias for results with [`ParseError`].
pub type Result<T> = std::result::Result<T, ParseError>;
