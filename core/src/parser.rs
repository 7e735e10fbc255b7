//! The parsing engine.
//!
//! [`Parser`] walks the argument vector once, left to right. Each token is
//! either the `--` separator, an option (leading `-`), or a positional value.
//! After the scan the variadic tail is bound and required positionals are
//! checked. The first error stops the parse; fields assigned before it keep
//! their values.
//!
//! # Examples
//!
//! ```
//! use argschema_core::*;
//!
//! #[derive(Default)]
//! struct Opts<'a> {
//!     verbose: bool,
//!     name: &'a str,
//! }
//!
//! impl<'a> Arguments<'a> for Opts<'a> {
//!     fn schema() -> Schema<'a, Self> {
//!         Schema::new()
//!             .with_option(OptionSpec::new("-v", |o: &mut Self| &mut o.verbose).with_alt("--verbose"))
//!             .with_arg(ArgSpec::new("name", |o: &mut Self| &mut o.name))
//!     }
//! }
//!
//! let argv = ["/usr/bin/greet", "world", "-v"];
//! let mut parser = Parser::<Opts>::new(&argv);
//! assert!(parser.parse().is_ok());
//! assert_eq!(parser.program_name(), "greet");
//! assert!(parser.result().verbose);
//! assert_eq!(parser.result().name, "world");
//!
//! let argv = ["greet"];
//! let mut parser = Parser::<Opts>::new(&argv);
//! let outcome = parser.parse();
//! assert_eq!(outcome.kind(), Some(ErrorKind::MissingRequiredArg));
//! assert_eq!(outcome.context(), "name");
//! ```

use tracing::{debug, trace, warn};

use crate::error::{ErrorKind, ParseOutcome};
use crate::render::{HelpStyle, render_help};
use crate::schema::{Arguments, Schema};
use crate::span::ArgSpan;
use crate::validate::validate_schema;

/// Token that ends option and positional processing.
pub const SEPARATOR: &str = "--";

/// Parses an argument vector into a record of type `T`.
///
/// `argv[0]` is the program path; parsing starts at `argv[1]`. The parser
/// owns the record and borrows `argv`, so string fields and the variadic
/// span point into the caller's storage.
pub struct Parser<'a, T, S = &'a str> {
    record: T,
    schema: Schema<'a, T, S>,
    argv: &'a [S],
    program_name: &'a str,
}

impl<'a, T, S> Parser<'a, T, S>
where
    T: Arguments<'a, S>,
    S: AsRef<str> + 'a,
{
    /// Creates a parser with a default-constructed record.
    ///
    /// Schema declaration problems are reported as `warn` events; parsing
    /// still uses first-match semantics.
    pub fn new(argv: &'a [S]) -> Self {
        let schema = T::schema();
        for error in validate_schema(&schema) {
            warn!(error = %error, "Schema declaration problem");
        }
        Self {
            record: T::default(),
            schema,
            argv,
            program_name: program_name(argv),
        }
    }

    /// Help text for this record, rendered with `style`.
    pub fn help_with(&self, style: &HelpStyle) -> String {
        render_help(
            &self.schema.describe(),
            self.program_name,
            T::DESCRIPTION,
            style,
        )
    }

    /// Help text with the default style.
    pub fn help(&self) -> String {
        self.help_with(&HelpStyle::default())
    }
}

impl<'a, T, S> Parser<'a, T, S>
where
    S: AsRef<str> + 'a,
{
    /// Runs the parse over `argv[1..]`, mutating the record in place.
    ///
    /// Calling it again re-runs the scan against the same record; fields the
    /// second run does not touch keep their previous values.
    pub fn parse(&mut self) -> ParseOutcome<'a> {
        let argv = self.argv;
        debug!(
            program = self.program_name,
            tokens = argv.len().saturating_sub(1),
            "Parsing arguments"
        );

        let mut consumed = 0;
        let mut var_args_start = None;
        let mut index = 1;

        while index < argv.len() {
            let token: &'a str = argv[index].as_ref();
            trace!(index = index, token = token, "Dispatching token");

            if token == SEPARATOR {
                if index + 1 < argv.len() {
                    var_args_start = Some(index + 1);
                }
                break;
            }

            if token.starts_with('-') {
                let outcome = self.apply_option(token, &mut index);
                if !outcome.is_ok() {
                    return report(outcome);
                }
            } else {
                match self.schema.argument(consumed) {
                    Some(arg) => {
                        if !arg.assign(&mut self.record, token) {
                            return report(ParseOutcome::failure(ErrorKind::InvalidValue, token));
                        }
                        consumed += 1;
                    }
                    None if self.schema.has_var_args() => {
                        var_args_start = Some(index);
                        break;
                    }
                    None => {
                        return report(ParseOutcome::failure(ErrorKind::TooManyArgs, token));
                    }
                }
            }

            index += 1;
        }

        if let Some(start) = var_args_start {
            self.bind_var_args(start);
        }

        report(self.check_required(consumed))
    }

    /// The record, possibly partially filled if the last parse failed.
    pub fn result(&self) -> &T {
        &self.record
    }

    pub fn result_mut(&mut self) -> &mut T {
        &mut self.record
    }

    /// Consumes the parser, returning the record.
    pub fn into_result(self) -> T {
        self.record
    }

    /// `argv[0]` after its last `/`, or empty when `argv` is empty.
    pub fn program_name(&self) -> &'a str {
        self.program_name
    }

    pub fn schema(&self) -> &Schema<'a, T, S> {
        &self.schema
    }

    fn apply_option(&mut self, token: &'a str, index: &mut usize) -> ParseOutcome<'a> {
        let argv = self.argv;
        let (name, inline_value) = match token.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (token, None),
        };

        let Some(option) = self.schema.find_option(name) else {
            return ParseOutcome::failure(ErrorKind::UnknownOption, name);
        };

        let value = if option.needs_value() {
            match inline_value {
                Some(value) => Some(value),
                None => match argv.get(*index + 1) {
                    Some(next) => {
                        *index += 1;
                        Some(next.as_ref())
                    }
                    None => return ParseOutcome::failure(ErrorKind::MissingValue, name),
                },
            }
        } else {
            inline_value
        };

        if option.assign(&mut self.record, value) {
            ParseOutcome::success()
        } else {
            ParseOutcome::failure(ErrorKind::InvalidValue, token)
        }
    }

    fn bind_var_args(&mut self, start: usize) {
        let argv = self.argv;
        let tail = &argv[start..];
        match self.schema.var_args() {
            Some(var_args) => {
                debug!(start = start, len = tail.len(), "Binding variadic arguments");
                var_args.bind(&mut self.record, ArgSpan::new(tail));
            }
            None => {
                debug!(dropped = tail.len(), "No variadic collector, dropping trailing tokens");
            }
        }
    }

    fn check_required(&self, consumed: usize) -> ParseOutcome<'a> {
        self.schema
            .arguments()
            .find(|(position, arg)| *position >= consumed && !arg.is_optional())
            .map_or_else(ParseOutcome::success, |(_, arg)| {
                ParseOutcome::failure(ErrorKind::MissingRequiredArg, arg.name())
            })
    }
}

fn report(outcome: ParseOutcome<'_>) -> ParseOutcome<'_> {
    if let Some(kind) = outcome.kind() {
        debug!(error = %kind, context = outcome.context(), "Parse failed");
    }
    outcome
}

/// Display name derived from `argv[0]`.
///
/// # Examples
///
/// ```
/// use argschema_core::program_name;
///
/// assert_eq!(program_name(&["/usr/bin/myprogram"]), "myprogram");
/// assert_eq!(program_name(&["myprogram"]), "myprogram");
/// assert_eq!(program_name::<&str>(&[]), "");
/// ```
pub fn program_name<S: AsRef<str>>(argv: &[S]) -> &str {
    let Some(first) = argv.first() else {
        return "";
    };
    let path = first.as_ref();
    match path.rfind('/') {
        Some(slash) => &path[slash + 1..],
        None => path,
    }
}

/// Parses `argv` into a fresh `T`, converting the outcome into a `Result`.
///
/// # Errors
///
/// Returns the first [`ParseError`](crate::ParseError) the parse meets.
///
/// # Examples
///
/// ```
/// use argschema_core::*;
///
/// #[derive(Default)]
/// struct Opts { count: u32 }
///
/// impl<'a> Arguments<'a> for Opts {
///     fn schema() -> Schema<'a, Self> {
///         Schema::new().with_option(OptionSpec::new("--count", |o: &mut Self| &mut o.count))
///     }
/// }
///
/// let opts: Opts = parse_from(&["prog", "--count=3"]).unwrap();
/// assert_eq!(opts.count, 3);
///
/// let err = parse_from::<Opts, _>(&["prog", "--count"]).err().unwrap();
/// assert_eq!(err.kind, ErrorKind::MissingValue);
/// ```
pub fn parse_from<'a, T, S>(argv: &'a [S]) -> crate::Result<T>
where
    T: Arguments<'a, S>,
    S: AsRef<str> + 'a,
{
    let mut parser = Parser::<T, S>::new(argv);
    parser.parse().into_result()?;
    Ok(parser.into_result())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ArgSpec, OptionSpec, VarArgsSpec};

    #[derive(Default)]
    struct Simple<'a> {
        verbose: bool,
        count: i32,
        name: &'a str,
    }

    impl<'a> Arguments<'a> for Simple<'a> {
        fn schema() -> Schema<'a, Self> {
            Schema::new()
                .with_option(OptionSpec::new("-v", |s: &mut Self| &mut s.verbose).with_alt("--verbose"))
                .with_option(OptionSpec::new("-c", |s: &mut Self| &mut s.count).with_alt("--count"))
                .with_arg(ArgSpec::new("name", |s: &mut Self| &mut s.name))
        }
    }

    #[derive(Default)]
    struct Tail<'a, S = &'a str> {
        command: &'a str,
        args: ArgSpan<'a, S>,
    }

    impl<'a, S: AsRef<str> + Default + 'a> Arguments<'a, S> for Tail<'a, S> {
        fn schema() -> Schema<'a, Self, S> {
            Schema::new()
                .with_arg(ArgSpec::new("command", |t: &mut Self| &mut t.command))
                .with_var_args(VarArgsSpec::new(|t: &mut Self| &mut t.args))
        }
    }

    #[test]
    fn test_value_consumes_next_token_even_if_dashed() {
        let argv = ["prog", "--count", "-5", "bob"];
        let mut parser = Parser::<Simple>::new(&argv);
        assert!(parser.parse().is_ok());
        assert_eq!(parser.result().count, -5);
        assert_eq!(parser.result().name, "bob");
    }

    #[test]
    fn test_unknown_option_context_is_name_part() {
        let argv = ["prog", "--nope=3"];
        let mut parser = Parser::<Simple>::new(&argv);
        let outcome = parser.parse();
        assert_eq!(outcome.kind(), Some(ErrorKind::UnknownOption));
        assert_eq!(outcome.context(), "--nope");
    }

    #[test]
    fn test_invalid_value_context_is_full_token() {
        let argv = ["prog", "--count=x1"];
        let mut parser = Parser::<Simple>::new(&argv);
        let outcome = parser.parse();
        assert_eq!(outcome.kind(), Some(ErrorKind::InvalidValue));
        assert_eq!(outcome.context(), "--count=x1");

        let argv = ["prog", "-c", "x1"];
        let mut parser = Parser::<Simple>::new(&argv);
        assert_eq!(parser.parse().context(), "-c");
    }

    #[test]
    fn test_bare_dash_is_unknown_option() {
        let argv = ["prog", "-"];
        let mut parser = Parser::<Simple>::new(&argv);
        let outcome = parser.parse();
        assert_eq!(outcome.kind(), Some(ErrorKind::UnknownOption));
        assert_eq!(outcome.context(), "-");
    }

    #[test]
    fn test_empty_inline_value() {
        let argv = ["prog", "--count=", "bob"];
        let mut parser = Parser::<Simple>::new(&argv);
        assert_eq!(parser.parse().kind(), Some(ErrorKind::InvalidValue));
    }

    #[test]
    fn test_owned_argv() {
        let argv: Vec<String> = ["prog", "run", "a", "b"].iter().map(|s| s.to_string()).collect();
        let mut parser = Parser::<Tail<'_, String>, String>::new(&argv);
        assert!(parser.parse().is_ok());
        assert_eq!(parser.result().command, "run");
        assert_eq!(parser.result().args.iter().collect::<Vec<_>>(), ["a", "b"]);
    }

    #[test]
    fn test_separator_right_after_program() {
        let argv = ["prog", "--", "x"];
        let mut parser = Parser::<Tail>::new(&argv);
        let outcome = parser.parse();
        assert_eq!(outcome.kind(), Some(ErrorKind::MissingRequiredArg));
        assert_eq!(outcome.context(), "command");
        assert_eq!(parser.result().args.front(), Some("x"));
    }

    #[test]
    fn test_separator_without_collector_drops_tokens() {
        let argv = ["prog", "bob", "--", "extra", "more"];
        let mut parser = Parser::<Simple>::new(&argv);
        assert!(parser.parse().is_ok());
        assert_eq!(parser.result().name, "bob");
    }

    #[test]
    fn test_trailing_separator_leaves_tail_empty() {
        let argv = ["prog", "cmd", "--"];
        let mut parser = Parser::<Tail>::new(&argv);
        assert!(parser.parse().is_ok());
        assert!(parser.result().args.is_empty());
    }

    #[test]
    fn test_options_after_tail_start_are_captured() {
        let argv = ["prog", "cmd", "extra", "--flag"];
        let mut parser = Parser::<Tail>::new(&argv);
        assert!(parser.parse().is_ok());
        assert_eq!(parser.result().args.iter().collect::<Vec<_>>(), ["extra", "--flag"]);
    }

    #[test]
    fn test_program_name_empty_argv() {
        let argv: [&str; 0] = [];
        let mut parser = Parser::<Simple>::new(&argv);
        assert_eq!(parser.program_name(), "");
        assert_eq!(parser.parse().kind(), Some(ErrorKind::MissingRequiredArg));
    }

    #[test]
    fn test_parse_from() {
        let simple: Simple = parse_from(&["prog", "-v", "alice"]).unwrap();
        assert!(simple.verbose);
        assert_eq!(simple.name, "alice");

        let err = parse_from::<Simple, _>(&["prog", "a", "b"]).err().unwrap();
        assert_eq!(err.kind, ErrorKind::TooManyArgs);
        assert_eq!(err.context, "b");
    }
}
