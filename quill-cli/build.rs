use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the command tree from src/main.rs
// We need to duplicate this here since build scripts can't access src/ modules
const FORMATS: &[&str] = &["markdown", "md", "html"];

fn input(help: &'static str) -> Arg {
    Arg::new("input")
        .help(help)
        .required(true)
        .index(1)
        .value_hint(ValueHint::FilePath)
}

fn output() -> Arg {
    Arg::new("output")
        .long("output")
        .short('o')
        .help("Output file path (defaults to stdout)")
        .value_hint(ValueHint::FilePath)
}

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("quill")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert between Markdown and editor HTML")
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .help("Path to a quill.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert a document, direction from the file extension")
                .arg(input("Input file path"))
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Source format")
                        .value_parser(clap::builder::PossibleValuesParser::new(FORMATS)),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format")
                        .value_parser(clap::builder::PossibleValuesParser::new(FORMATS)),
                )
                .arg(output()),
        )
        .subcommand(
            Command::new("render")
                .about("Render Markdown to HTML")
                .arg(input("Markdown file"))
                .arg(output())
                .arg(
                    Arg::new("hydrate-cards")
                        .long("hydrate-cards")
                        .help("Replace card placeholders with default component markup")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("placeholders")
                        .long("placeholders")
                        .help("Write the card placeholder bindings as JSON")
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("serialize")
                .about("Serialize HTML to Markdown")
                .arg(input("HTML file"))
                .arg(output())
                .arg(
                    Arg::new("placeholders")
                        .long("placeholders")
                        .help("Card placeholder bindings (JSON)")
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("roundtrip")
                .about("Markdown -> HTML -> Markdown")
                .arg(input("Markdown file"))
                .arg(
                    Arg::new("check")
                        .long("check")
                        .help("Fail when a second round trip changes the text")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("table")
                .about("Pipe table helpers")
                .subcommand(Command::new("validate").arg(input("Markdown table file")))
                .subcommand(Command::new("html").arg(input("Markdown table file")))
                .subcommand(Command::new("markdown").arg(input("HTML file"))),
        )
        .subcommand(
            Command::new("frontmatter")
                .about("Print the frontmatter of a Markdown file as JSON")
                .arg(input("Markdown file")),
        );

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "quill", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "quill", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "quill", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
