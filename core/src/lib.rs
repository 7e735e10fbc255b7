//! Declarative command-line argument parsing into typed records.
//!
//! A record type describes what it expects once, as a [`Schema`], and the
//! [`Parser`] fills a default-constructed record from an argument vector:
//!
//! - [`OptionSpec`]: a named option (`-v`, `--count`, `--count=3`) with an
//!   optional alternate name.
//! - [`ArgSpec`]: a positional argument; `Option<_>` fields are optional.
//! - [`VarArgsSpec`]: at most one collector for the trailing tokens, bound
//!   as an [`ArgSpan`] that borrows the argument vector.
//!
//! Token conversion ([`FromToken`], [`convert`]) supports `bool`, every
//! integer width, `f32`/`f64` and `&str`. A parse stops at the first problem
//! and reports it as a [`ParseOutcome`] with an [`ErrorKind`] and the
//! offending token or argument name.
//!
//! [`validate_schema`] checks declaration invariants, [`Schema::describe`]
//! produces a serializable [`SchemaDescriptor`], and [`render_help`] turns
//! that into usage text.
//!
//! # Example
//!
//! ```
//! use argschema_core::*;
//!
//! #[derive(Default)]
//! struct Opts<'a> {
//!     verbose: bool,
//!     level: Option<i32>,
//!     command: &'a str,
//!     args: ArgSpan<'a>,
//! }
//!
//! impl<'a> Arguments<'a> for Opts<'a> {
//!     const DESCRIPTION: &'static str = "Runs a command";
//!
//!     fn schema() -> Schema<'a, Self> {
//!         Schema::new()
//!             .with_option(
//!                 OptionSpec::new("-v", |o: &mut Self| &mut o.verbose)
//!                     .with_alt("--verbose")
//!                     .with_description("Enable verbose output"),
//!             )
//!             .with_option(OptionSpec::new("-l", |o: &mut Self| &mut o.level).with_alt("--level"))
//!             .with_arg(ArgSpec::new("command", |o: &mut Self| &mut o.command))
//!             .with_var_args(VarArgsSpec::new(|o: &mut Self| &mut o.args))
//!     }
//! }
//!
//! let argv = ["./run", "--level=2", "build", "-v", "--", "--release"];
//! let mut parser = Parser::<Opts>::new(&argv);
//! let outcome = parser.parse();
//! assert!(outcome.is_ok(), "{outcome}");
//!
//! let opts = parser.result();
//! assert!(opts.verbose);
//! assert_eq!(opts.level, Some(2));
//! assert_eq!(opts.command, "build");
//! assert_eq!(opts.args.iter().collect::<Vec<_>>(), ["--release"]);
//! assert!(parser.help_with(&HelpStyle::plain()).starts_with("Runs a command\nUsage: run"));
//! ```

mod convert;
mod describe;
mod error;
mod parser;
mod render;
mod schema;
mod span;
mod validate;

pub use convert::{FALSE_LITERALS, FieldValue, FromToken, TRUE_LITERALS, ValueKind, convert};
pub use describe::{ArgDescriptor, OptionDescriptor, SchemaDescriptor, VarArgsDescriptor};
pub use error::{ErrorKind, ParseError, ParseOutcome, Result};
pub use parser::{Parser, SEPARATOR, parse_from, program_name};
pub use render::{HelpStyle, render_help};
pub use schema::{ArgSpec, Arguments, Declaration, OptionSpec, Schema, VarArgsSpec};
pub use span::{ArgSpan, Iter};
pub use validate::{ValidationError, validate_schema};
