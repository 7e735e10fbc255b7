//! Help text rendering.
//!
//! Pure presentation over a [`SchemaDescriptor`]: nothing here touches the
//! parser or the record.
//!
//! ```text
//! A mixed options test program
//! Usage: prog [OPTIONS] <input> [output] [...]
//!
//! Arguments:
//!   input: Input file
//!   output: Output file
//!   [...]: Extra files
//!
//! Options:
//!   --debug, -d: Enable debug mode
//!   --level, -l <value>: Set level
//! ```

use std::fmt::Write;

use serde::{Deserialize, Serialize};

use crate::describe::SchemaDescriptor;

const BOLD: &str = "\x1b[1m";
const UNDERLINE: &str = "\x1b[4m";
const RESET: &str = "\x1b[0m";

/// Help rendering settings.
///
/// # Examples
///
/// ```
/// use argschema_core::HelpStyle;
///
/// assert!(HelpStyle::default().ansi);
/// assert!(!HelpStyle::plain().ansi);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelpStyle {
    /// Emit ANSI bold/underline escapes for headers and names.
    pub ansi: bool,
}

impl Default for HelpStyle {
    fn default() -> Self {
        Self { ansi: true }
    }
}

impl HelpStyle {
    /// Style without escape sequences.
    pub fn plain() -> Self {
        Self { ansi: false }
    }

    fn header(&self, text: &str) -> String {
        if self.ansi {
            format!("{BOLD}{UNDERLINE}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn strong(&self, text: &str) -> String {
        if self.ansi {
            format!("{BOLD}{text}{RESET}")
        } else {
            text.to_string()
        }
    }
}

/// Renders usage, arguments and options for `descriptor`.
///
/// `description` is printed first when non-empty. Options are listed as
/// `alt, name` when an alternate name exists.
///
/// # Examples
///
/// ```
/// use argschema_core::*;
///
/// let descriptor = SchemaDescriptor {
///     options: vec![OptionDescriptor {
///         name: "-v".into(),
///         alt_name: Some("--verbose".into()),
///         description: Some("Verbose output".into()),
///         value_kind: ValueKind::Bool,
///         takes_value: false,
///         optional: false,
///     }],
///     arguments: vec![],
///     var_args: None,
/// };
/// let help = render_help(&descriptor, "prog", "", &HelpStyle::plain());
/// assert_eq!(help, "Usage: prog [OPTIONS]\n\nOptions:\n  --verbose, -v: Verbose output\n");
/// ```
pub fn render_help(
    descriptor: &SchemaDescriptor,
    program_name: &str,
    description: &str,
    style: &HelpStyle,
) -> String {
    let mut out = String::new();

    if !description.is_empty() {
        let _ = writeln!(out, "{description}");
    }

    let _ = write!(out, "{} {program_name}", style.header("Usage:"));
    if !descriptor.options.is_empty() {
        out.push_str(" [OPTIONS]");
    }
    for arg in &descriptor.arguments {
        if arg.required {
            let _ = write!(out, " <{}>", arg.name);
        } else {
            let _ = write!(out, " [{}]", arg.name);
        }
    }
    if descriptor.var_args.is_some() {
        out.push_str(" [...]");
    }
    out.push('\n');

    if !descriptor.arguments.is_empty() || descriptor.var_args.is_some() {
        let _ = write!(out, "\n{}\n", style.header("Arguments:"));
        for arg in &descriptor.arguments {
            write_entry(&mut out, &style.strong(&arg.name), arg.description.as_deref());
        }
        if let Some(var_args) = &descriptor.var_args {
            write_entry(&mut out, &style.strong("[...]"), var_args.description.as_deref());
        }
    }

    if !descriptor.options.is_empty() {
        let _ = write!(out, "\n{}\n", style.header("Options:"));
        for option in &descriptor.options {
            let names = match &option.alt_name {
                Some(alt_name) => format!("{alt_name}, {}", option.name),
                None => option.name.clone(),
            };
            let mut label = style.strong(&names);
            if option.takes_value {
                label.push_str(" <value>");
            }
            write_entry(&mut out, &label, option.description.as_deref());
        }
    }

    out
}

fn write_entry(out: &mut String, label: &str, description: Option<&str>) {
    match description {
        Some(description) if !description.is_empty() => {
            let _ = writeln!(out, "  {label}: {description}");
        }
        _ => {
            let _ = writeln!(out, "  {label}");
        }
    }
}
