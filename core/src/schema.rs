//! Declarative schema model.
//!
//! A [`Schema`] is the ordered list of declarations a record type exposes to
//! the parser: named options, positional arguments, and at most one variadic
//! collector. Each declaration is bound to one field of the record through an
//! accessor function fixed when the schema is built, so the parser can
//! convert a token and store it without knowing the field's type.
//!
//! Declaration order matters. Options are matched in the order they were
//! added (first match wins) and positionals are filled in the order they were
//! added.
//!
//! # Examples
//!
//! ```
//! use argschema_core::*;
//!
//! #[derive(Default)]
//! struct Opts<'a> {
//!     verbose: bool,
//!     count: Option<u32>,
//!     input: &'a str,
//!     rest: ArgSpan<'a>,
//! }
//!
//! impl<'a> Arguments<'a> for Opts<'a> {
//!     fn schema() -> Schema<'a, Self> {
//!         Schema::new()
//!             .with_option(OptionSpec::new("-v", |o: &mut Self| &mut o.verbose).with_alt("--verbose"))
//!             .with_option(OptionSpec::new("-c", |o: &mut Self| &mut o.count).with_alt("--count"))
//!             .with_arg(ArgSpec::new("input", |o: &mut Self| &mut o.input))
//!             .with_var_args(VarArgsSpec::new(|o: &mut Self| &mut o.rest))
//!     }
//! }
//!
//! let schema = Opts::schema();
//! assert_eq!(schema.option_count(), 2);
//! assert_eq!(schema.argument_count(), 1);
//! assert!(schema.has_var_args());
//! assert_eq!(schema.var_args_index(), Some(3));
//! assert!(!schema.find_option("--verbose").unwrap().needs_value());
//! assert!(schema.find_option("-c").unwrap().needs_value());
//! ```

use crate::convert::{FieldValue, FromToken, ValueKind};
use crate::describe::{ArgDescriptor, OptionDescriptor, SchemaDescriptor, VarArgsDescriptor};
use crate::span::ArgSpan;

/// A record type that can be filled from an argument vector.
///
/// The record is default-constructed before parsing; fields that no token
/// touches keep their default values.
pub trait Arguments<'a, S: AsRef<str> + 'a = &'a str>: Default + Sized {
    /// One-line program description shown at the top of the help text.
    const DESCRIPTION: &'static str = "";

    /// Declarations for this record, in matching order.
    fn schema() -> Schema<'a, Self, S>;
}

type AssignFn<'a, T> = Box<dyn Fn(&mut T, Option<&'a str>) -> bool + 'a>;

/// Type-erased write access to one record field.
struct FieldBinding<'a, T> {
    kind: ValueKind,
    optional: bool,
    assign: AssignFn<'a, T>,
}

impl<'a, T: 'a> FieldBinding<'a, T> {
    fn new<F: FieldValue<'a> + 'a>(field: fn(&mut T) -> &mut F) -> Self {
        Self {
            kind: <F::Inner as FromToken<'a>>::KIND,
            optional: F::OPTIONAL,
            assign: Box::new(move |record: &mut T, token: Option<&'a str>| {
                let value = match token {
                    Some(token) => F::Inner::from_token(token),
                    None => F::Inner::when_present(),
                };
                match value {
                    Some(value) => {
                        *field(record) = F::wrap(value);
                        true
                    }
                    None => false,
                }
            }),
        }
    }
}

/// A named option such as `-v` or `--count`.
pub struct OptionSpec<'a, T> {
    name: &'static str,
    alt_name: Option<&'static str>,
    description: Option<&'static str>,
    binding: FieldBinding<'a, T>,
}

impl<'a, T: 'a> OptionSpec<'a, T> {
    /// Declares an option writing into the field returned by `field`.
    pub fn new<F: FieldValue<'a> + 'a>(name: &'static str, field: fn(&mut T) -> &mut F) -> Self {
        Self {
            name,
            alt_name: None,
            description: None,
            binding: FieldBinding::new(field),
        }
    }
}

impl<'a, T> OptionSpec<'a, T> {
    /// Adds an alternate name (e.g. the long form when `name` is the short one).
    pub fn with_alt(mut self, alt_name: &'static str) -> Self {
        self.alt_name = Some(alt_name);
        self
    }

    /// Adds a description.
    pub fn with_description(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn alt_name(&self) -> Option<&'static str> {
        self.alt_name
    }

    pub fn description(&self) -> Option<&'static str> {
        self.description
    }

    pub fn kind(&self) -> ValueKind {
        self.binding.kind
    }

    /// Whether the field is wrapped in `Option`.
    pub fn is_optional(&self) -> bool {
        self.binding.optional
    }

    /// Checks `name` against the primary and alternate names.
    ///
    /// # Examples
    ///
    /// ```
    /// use argschema_core::OptionSpec;
    ///
    /// #[derive(Default)]
    /// struct Opts { verbose: bool }
    ///
    /// let opt = OptionSpec::new("-v", |o: &mut Opts| &mut o.verbose).with_alt("--verbose");
    /// assert!(opt.matches("-v"));
    /// assert!(opt.matches("--verbose"));
    /// assert!(!opt.matches("-V"));
    /// ```
    pub fn matches(&self, name: &str) -> bool {
        self.name == name || self.alt_name == Some(name)
    }

    /// Whether the option consumes a value. Only boolean fields do not.
    pub fn needs_value(&self) -> bool {
        self.binding.kind != ValueKind::Bool
    }

    /// Converts `value` (or the implied value when `None`) into the field.
    pub(crate) fn assign(&self, record: &mut T, value: Option<&'a str>) -> bool {
        (self.binding.assign)(record, value)
    }
}

/// A positional argument, filled by the next unconsumed plain token.
pub struct ArgSpec<'a, T> {
    name: &'static str,
    description: Option<&'static str>,
    binding: FieldBinding<'a, T>,
}

impl<'a, T: 'a> ArgSpec<'a, T> {
    /// Declares a positional argument writing into the field returned by
    /// `field`. An `Option<_>` field makes the argument optional.
    pub fn new<F: FieldValue<'a> + 'a>(name: &'static str, field: fn(&mut T) -> &mut F) -> Self {
        Self {
            name,
            description: None,
            binding: FieldBinding::new(field),
        }
    }
}

impl<'a, T> ArgSpec<'a, T> {
    /// Adds a description.
    pub fn with_description(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn description(&self) -> Option<&'static str> {
        self.description
    }

    pub fn kind(&self) -> ValueKind {
        self.binding.kind
    }

    pub fn is_optional(&self) -> bool {
        self.binding.optional
    }

    pub(crate) fn assign(&self, record: &mut T, token: &'a str) -> bool {
        (self.binding.assign)(record, Some(token))
    }
}

/// Collector for every trailing token the positionals did not consume.
pub struct VarArgsSpec<'a, T, S = &'a str> {
    description: Option<&'static str>,
    field: fn(&mut T) -> &mut ArgSpan<'a, S>,
}

impl<'a, T, S> VarArgsSpec<'a, T, S> {
    pub fn new(field: fn(&mut T) -> &mut ArgSpan<'a, S>) -> Self {
        Self {
            description: None,
            field,
        }
    }

    /// Adds a description.
    pub fn with_description(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }

    pub fn description(&self) -> Option<&'static str> {
        self.description
    }

    pub(crate) fn bind(&self, record: &mut T, span: ArgSpan<'a, S>) {
        *(self.field)(record) = span;
    }
}

/// One entry of a [`Schema`].
pub enum Declaration<'a, T, S = &'a str> {
    Option(OptionSpec<'a, T>),
    Positional(ArgSpec<'a, T>),
    VarArgs(VarArgsSpec<'a, T, S>),
}

/// Ordered declarations for a record type `T`.
pub struct Schema<'a, T, S = &'a str> {
    declarations: Vec<Declaration<'a, T, S>>,
}

impl<T, S> Default for Schema<'_, T, S> {
    fn default() -> Self {
        Self {
            declarations: Vec::new(),
        }
    }
}

impl<'a, T, S> Schema<'a, T, S> {
    /// Creates an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an option declaration.
    pub fn with_option(mut self, option: OptionSpec<'a, T>) -> Self {
        self.declarations.push(Declaration::Option(option));
        self
    }

    /// Appends a positional argument declaration.
    pub fn with_arg(mut self, arg: ArgSpec<'a, T>) -> Self {
        self.declarations.push(Declaration::Positional(arg));
        self
    }

    /// Appends the variadic collector.
    pub fn with_var_args(mut self, var_args: VarArgsSpec<'a, T, S>) -> Self {
        self.declarations.push(Declaration::VarArgs(var_args));
        self
    }

    /// All declarations in order.
    pub fn declarations(&self) -> &[Declaration<'a, T, S>] {
        &self.declarations
    }

    pub fn option_count(&self) -> usize {
        self.options().count()
    }

    pub fn argument_count(&self) -> usize {
        self.arguments().count()
    }

    pub fn has_var_args(&self) -> bool {
        self.var_args_index().is_some()
    }

    /// Index of the variadic collector in the declaration list.
    ///
    /// When more than one is declared the last one is used.
    pub fn var_args_index(&self) -> Option<usize> {
        self.declarations
            .iter()
            .rposition(|decl| matches!(decl, Declaration::VarArgs(_)))
    }

    /// Options in declaration order.
    pub fn options(&self) -> impl Iterator<Item = &OptionSpec<'a, T>> {
        self.declarations.iter().filter_map(|decl| match decl {
            Declaration::Option(option) => Some(option),
            _ => None,
        })
    }

    /// Positional arguments in declaration order, paired with their
    /// 0-based position.
    pub fn arguments(&self) -> impl Iterator<Item = (usize, &ArgSpec<'a, T>)> {
        self.declarations
            .iter()
            .filter_map(|decl| match decl {
                Declaration::Positional(arg) => Some(arg),
                _ => None,
            })
            .enumerate()
    }

    /// The positional argument at `position`, if declared.
    pub fn argument(&self, position: usize) -> Option<&ArgSpec<'a, T>> {
        self.arguments()
            .find(|(index, _)| *index == position)
            .map(|(_, arg)| arg)
    }

    /// The variadic collector, if declared.
    pub fn var_args(&self) -> Option<&VarArgsSpec<'a, T, S>> {
        self.var_args_index()
            .and_then(|index| match &self.declarations[index] {
                Declaration::VarArgs(var_args) => Some(var_args),
                _ => None,
            })
    }

    /// First option whose primary or alternate name equals `name`.
    pub fn find_option(&self, name: &str) -> Option<&OptionSpec<'a, T>> {
        self.options().find(|option| option.matches(name))
    }

    /// Serializable snapshot of the declarations, for help text and tooling.
    ///
    /// # Examples
    ///
    /// ```
    /// use argschema_core::*;
    ///
    /// #[derive(Default)]
    /// struct Opts { retries: Option<u32> }
    ///
    /// let schema: Schema<'_, Opts> = Schema::new()
    ///     .with_arg(ArgSpec::new("retries", |o: &mut Opts| &mut o.retries).with_description("Retry budget"));
    /// let descriptor = schema.describe();
    /// assert_eq!(descriptor.arguments[0].name, "retries");
    /// assert!(!descriptor.arguments[0].required);
    /// assert_eq!(descriptor.arguments[0].value_kind, ValueKind::Integer);
    /// ```
    pub fn describe(&self) -> SchemaDescriptor {
        SchemaDescriptor {
            options: self
                .options()
                .map(|option| OptionDescriptor {
                    name: option.name.to_string(),
                    alt_name: option.alt_name.map(String::from),
                    description: option.description.map(String::from),
                    value_kind: option.kind(),
                    takes_value: option.needs_value(),
                    optional: option.is_optional(),
                })
                .collect(),
            arguments: self
                .arguments()
                .map(|(position, arg)| ArgDescriptor {
                    name: arg.name.to_string(),
                    position,
                    description: arg.description.map(String::from),
                    value_kind: arg.kind(),
                    required: !arg.is_optional(),
                })
                .collect(),
            var_args: self.var_args().map(|var_args| VarArgsDescriptor {
                description: var_args.description.map(String::from),
            }),
        }
    }
}
