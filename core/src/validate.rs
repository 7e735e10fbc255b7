//! Schema validation.
//!
//! The parser relies on a few declaration invariants it never enforces:
//! option names that can actually be matched, unique names, a single
//! variadic collector, and required positionals that can be reached. This
//! module checks them so a broken schema is caught at startup instead of
//! silently shadowing an option.
//!
//! # Examples
//!
//! ```
//! use argschema_core::*;
//!
//! #[derive(Default)]
//! struct Opts { verbose: bool, quiet: bool }
//!
//! let schema: Schema<'_, Opts> = Schema::new()
//!     .with_option(OptionSpec::new("-v", |o: &mut Opts| &mut o.verbose));
//! assert!(validate_schema(&schema).is_empty());
//!
//! // Invalid: second option reuses "-v"
//! let schema = schema.with_option(OptionSpec::new("-v", |o: &mut Opts| &mut o.quiet));
//! assert_eq!(
//!     validate_schema(&schema),
//!     vec![ValidationError::DuplicateOption("-v".to_string())]
//! );
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::parser::SEPARATOR;
use crate::schema::{Declaration, OptionSpec, Schema};

/// Schema validation errors.
///
/// Each variant describes a declaration the parser would handle
/// surprisingly. The `Display` impl provides a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// An option or positional name is empty.
    #[error("declaration name cannot be empty")]
    EmptyName,
    /// Option name does not start with `-`, or is `-`/`--` alone.
    #[error("invalid option name: {0}")]
    InvalidOptionName(String),
    /// Option name contains `=`, so it can never match (the name part of a
    /// token ends at the first `=`).
    #[error("option name contains '=': {0}")]
    OptionNameContainsEquals(String),
    /// Two options share a name; only the first declared is reachable.
    #[error("duplicate option name: {0}")]
    DuplicateOption(String),
    /// Two positional arguments share a name.
    #[error("duplicate argument name: {0}")]
    DuplicateArgument(String),
    /// More than one variadic collector; only the last is bound.
    #[error("schema declares more than one variadic collector")]
    MultipleVarArgs,
    /// A required positional follows an optional one.
    #[error("required argument declared after an optional one: {0}")]
    RequiredAfterOptional(String),
}

/// Validates a schema's declarations.
///
/// Every problem is reported, in declaration order.
pub fn validate_schema<T, S>(schema: &Schema<'_, T, S>) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut option_names = HashSet::new();
    let mut argument_names = HashSet::new();
    let mut seen_optional = false;
    let mut seen_var_args = false;

    for decl in schema.declarations() {
        match decl {
            Declaration::Option(option) => {
                errors.extend(validate_option(option, &mut option_names));
            }
            Declaration::Positional(arg) => {
                let name = arg.name();
                if name.trim().is_empty() {
                    errors.push(ValidationError::EmptyName);
                } else if !argument_names.insert(name) {
                    errors.push(ValidationError::DuplicateArgument(name.to_string()));
                }
                if arg.is_optional() {
                    seen_optional = true;
                } else if seen_optional {
                    errors.push(ValidationError::RequiredAfterOptional(name.to_string()));
                }
            }
            Declaration::VarArgs(_) => {
                if seen_var_args {
                    errors.push(ValidationError::MultipleVarArgs);
                }
                seen_var_args = true;
            }
        }
    }

    errors
}

fn validate_option<T>(
    option: &OptionSpec<'_, T>,
    seen: &mut HashSet<&'static str>,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for name in std::iter::once(option.name()).chain(option.alt_name()) {
        if name.is_empty() {
            errors.push(ValidationError::EmptyName);
        } else if !name.starts_with('-') || name == "-" || name == SEPARATOR {
            errors.push(ValidationError::InvalidOptionName(name.to_string()));
        } else if name.contains('=') {
            errors.push(ValidationError::OptionNameContainsEquals(name.to_string()));
        } else if !seen.insert(name) {
            errors.push(ValidationError::DuplicateOption(name.to_string()));
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ArgSpec, VarArgsSpec};
    use crate::span::ArgSpan;

    #[derive(Default)]
    struct Record {
        flag: bool,
        other: bool,
        first: Option<u32>,
        second: u32,
        rest: ArgSpan<'static>,
        more: ArgSpan<'static>,
    }

    fn flag(name: &'static str) -> OptionSpec<'static, Record> {
        OptionSpec::new(name, |r: &mut Record| &mut r.flag)
    }

    #[test]
    fn test_accepts_valid_schema() {
        let schema: Schema<'_, Record> = Schema::new()
            .with_option(flag("-f").with_alt("--flag"))
            .with_option(OptionSpec::new("-o", |r: &mut Record| &mut r.other))
            .with_arg(ArgSpec::new("second", |r: &mut Record| &mut r.second))
            .with_arg(ArgSpec::new("first", |r: &mut Record| &mut r.first))
            .with_var_args(VarArgsSpec::new(|r: &mut Record| &mut r.rest));
        assert!(validate_schema(&schema).is_empty());
    }

    #[test]
    fn test_rejects_bad_option_names() {
        let schema: Schema<'_, Record> = Schema::new().with_option(flag("f"));
        assert_eq!(
            validate_schema(&schema),
            vec![ValidationError::InvalidOptionName("f".to_string())]
        );

        let schema: Schema<'_, Record> = Schema::new().with_option(flag("-f").with_alt("--"));
        assert_eq!(
            validate_schema(&schema),
            vec![ValidationError::InvalidOptionName("--".to_string())]
        );

        let schema: Schema<'_, Record> = Schema::new().with_option(flag("--a=b"));
        assert_eq!(
            validate_schema(&schema),
            vec![ValidationError::OptionNameContainsEquals("--a=b".to_string())]
        );

        let schema: Schema<'_, Record> = Schema::new().with_option(flag(""));
        assert_eq!(validate_schema(&schema), vec![ValidationError::EmptyName]);
    }

    #[test]
    fn test_rejects_duplicate_alt_name() {
        let schema: Schema<'_, Record> = Schema::new()
            .with_option(flag("-f").with_alt("--flag"))
            .with_option(flag("--flag"));
        assert_eq!(
            validate_schema(&schema),
            vec![ValidationError::DuplicateOption("--flag".to_string())]
        );
    }

    #[test]
    fn test_rejects_positional_problems() {
        let schema: Schema<'_, Record> = Schema::new()
            .with_arg(ArgSpec::new("first", |r: &mut Record| &mut r.first))
            .with_arg(ArgSpec::new("second", |r: &mut Record| &mut r.second));
        assert_eq!(
            validate_schema(&schema),
            vec![ValidationError::RequiredAfterOptional("second".to_string())]
        );

        let schema: Schema<'_, Record> = Schema::new()
            .with_arg(ArgSpec::new("second", |r: &mut Record| &mut r.second))
            .with_arg(ArgSpec::new("second", |r: &mut Record| &mut r.first));
        assert_eq!(
            validate_schema(&schema),
            vec![ValidationError::DuplicateArgument("second".to_string())]
        );
    }

    #[test]
    fn test_reports_every_problem() {
        let schema: Schema<'_, Record> = Schema::new()
            .with_option(flag("f"))
            .with_option(flag("-x"))
            .with_option(OptionSpec::new("-x", |r: &mut Record| &mut r.other))
            .with_arg(ArgSpec::new("first", |r: &mut Record| &mut r.first))
            .with_arg(ArgSpec::new("second", |r: &mut Record| &mut r.second))
            .with_var_args(VarArgsSpec::new(|r: &mut Record| &mut r.rest))
            .with_var_args(VarArgsSpec::new(|r: &mut Record| &mut r.more));
        assert_eq!(
            validate_schema(&schema),
            vec![
                ValidationError::InvalidOptionName("f".to_string()),
                ValidationError::DuplicateOption("-x".to_string()),
                ValidationError::RequiredAfterOptional("second".to_string()),
                ValidationError::MultipleVarArgs,
            ]
        );
    }

    #[test]
    fn test_rejects_multiple_var_args() {
        let schema: Schema<'_, Record> = Schema::new()
            .with_var_args(VarArgsSpec::new(|r: &mut Record| &mut r.rest))
            .with_var_args(VarArgsSpec::new(|r: &mut Record| &mut r.more));
        assert_eq!(validate_schema(&schema), vec![ValidationError::MultipleVarArgs]);
    }
}
