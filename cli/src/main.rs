use std::process::ExitCode;

use argschema_core::{
    ArgSpan, ArgSpec, Arguments, HelpStyle, OptionSpec, Parser, Schema, VarArgsSpec,
};
use serde::Serialize;

/// Exit status for a command line the parser rejected.
const USAGE_ERROR: u8 = 2;

#[derive(Debug, Default, Serialize)]
struct DemoArgs<'a> {
    verbose: bool,
    count: u32,
    level: Option<i32>,
    #[serde(skip)]
    help: bool,
    #[serde(skip)]
    schema: bool,
    input: &'a str,
    output: Option<&'a str>,
    rest: ArgSpan<'a, String>,
}

impl<'a> Arguments<'a, String> for DemoArgs<'a> {
    const DESCRIPTION: &'static str = "Parses its own arguments and prints them as JSON";

    fn schema() -> Schema<'a, Self, String> {
        Schema::new()
            .with_option(
                OptionSpec::new("-v", |a: &mut Self| &mut a.verbose)
                    .with_alt("--verbose")
                    .with_description("Enable verbose output"),
            )
            .with_option(
                OptionSpec::new("-c", |a: &mut Self| &mut a.count)
                    .with_alt("--count")
                    .with_description("Repeat count"),
            )
            .with_option(
                OptionSpec::new("-l", |a: &mut Self| &mut a.level)
                    .with_alt("--level")
                    .with_description("Optional level"),
            )
            .with_option(
                OptionSpec::new("-h", |a: &mut Self| &mut a.help)
                    .with_alt("--help")
                    .with_description("Print this help"),
            )
            .with_option(
                OptionSpec::new("--schema", |a: &mut Self| &mut a.schema)
                    .with_description("Print the argument schema as JSON"),
            )
            .with_arg(ArgSpec::new("input", |a: &mut Self| &mut a.input).with_description("Input file"))
            .with_arg(ArgSpec::new("output", |a: &mut Self| &mut a.output).with_description("Output file"))
            .with_var_args(
                VarArgsSpec::new(|a: &mut Self| &mut a.rest).with_description("Extra arguments"),
            )
    }
}

fn main() -> ExitCode {
    let argv: Vec<String> = std::env::args().collect();
    let mut parser = Parser::<DemoArgs, String>::new(&argv);
    let outcome = parser.parse();
    let args = parser.result();

    // Help and schema requests win over parse errors such as a missing input.
    if args.help {
        print!("{}", parser.help());
        return ExitCode::SUCCESS;
    }
    if args.schema {
        return print_json(parser.schema().describe().to_json());
    }

    if !outcome.is_ok() {
        eprintln!("{outcome}");
        eprint!("{}", parser.help_with(&HelpStyle::plain()));
        return ExitCode::from(USAGE_ERROR);
    }

    print_json(serde_json::to_string_pretty(args))
}

fn print_json(json: serde_json::Result<String>) -> ExitCode {
    match json {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
