// Command-line interface for quill
//
// This binary drives the quill-babel conversion core from the shell: Markdown to HTML for the
// visual editor, HTML back to Markdown for storage, and the table/frontmatter helpers the
// storage layer uses.
//
// Converting:
//
// The direction is detected from the input extension (.md/.markdown render to HTML,
// .html/.htm serialize to Markdown) and can be forced with --from / --to.
// Usage:
//  quill <input> [--to <format>] [--from <format>] [--output <file>]  - Convert (default)
//  quill convert <input> [--to <format>] [--from <format>] [-o <file>] - Same as above (explicit)
//  quill render <input.md> [--hydrate-cards] [--placeholders <file>]  - Markdown to HTML
//  quill serialize <input.html> [--placeholders <file>]               - HTML to Markdown
//  quill roundtrip <input.md> [--check]                               - Markdown -> HTML -> Markdown
//  quill table <validate|html|markdown> <input>                       - Table helpers
//  quill frontmatter <input.md>                                       - Frontmatter as JSON
//
// Extra Parameters:
//
// Configuration values can be overridden with --extra-<key> <value>.
// Example:
//  quill doc.md --to html --extra-class-prefix doc --extra-max-heading-level 6

use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use quill_babel::{
    html_to_table, parse_frontmatter, parse_table, serialize_table, table_to_html,
    validate_table, Conversion, PlaceholderBindings, RenderOptions, Renderer,
    Serializer,
};
use quill_config::{Loader, QuillConfig};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const SUBCOMMANDS: &[&str] = &[
    "convert",
    "render",
    "serialize",
    "roundtrip",
    "table",
    "frontmatter",
    "help",
];

/// Which way a document is converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    ToHtml,
    ToMarkdown,
}

/// Parse extra-* arguments from command line args
/// Returns (cleaned_args_without_extras, extra_params_map)
///
/// Supports both:
/// - `--extra-<key> <value>` (explicit value)
/// - `--extra-<key>` (boolean flag, defaults to "true")
fn parse_extra_args(args: &[String]) -> (Vec<String>, HashMap<String, String>) {
    let mut cleaned_args = Vec::new();
    let mut extra_params = HashMap::new();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        if let Some(key) = arg.strip_prefix("--extra-") {
            let has_value = args.get(i + 1).is_some_and(|next| !next.starts_with('-'));

            if has_value {
                extra_params.insert(key.to_string(), args[i + 1].clone());
                i += 2;
            } else {
                extra_params.insert(key.to_string(), "true".to_string());
                i += 1;
            }
            continue;
        }

        cleaned_args.push(arg.clone());
        i += 1;
    }

    (cleaned_args, extra_params)
}

fn input_arg(help: &'static str) -> Arg {
    Arg::new("input")
        .help(help)
        .required(true)
        .index(1)
        .value_hint(ValueHint::FilePath)
}

fn output_arg() -> Arg {
    Arg::new("output")
        .long("output")
        .short('o')
        .help("Output file path (defaults to stdout)")
        .value_hint(ValueHint::FilePath)
}

fn build_cli() -> Command {
    Command::new("quill")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert between Markdown and editor HTML")
        .long_about(
            "quill converts stored Markdown into the HTML used by the visual editor,\n\
            and edited HTML back into canonical Markdown.\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> [value] to override configuration values:\n  \
            class-prefix, max-heading-level, strip-frontmatter, bullet, emphasis, log.\n\n\
            Examples:\n  \
            quill doc.md                         # Render to HTML (stdout)\n  \
            quill page.html -o doc.md            # Serialize to Markdown file\n  \
            quill roundtrip doc.md --check       # Verify the round trip is stable\n  \
            quill table validate table.md        # Lint a pipe table",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a quill.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert a document, direction from the file extension (default command)")
                .arg(input_arg("Input file path"))
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Source format: markdown or html (auto-detected if not specified)")
                        .value_parser(["markdown", "md", "html"])
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format: markdown or html (the other side by default)")
                        .value_parser(["markdown", "md", "html"])
                        .value_hint(ValueHint::Other),
                )
                .arg(output_arg()),
        )
        .subcommand(
            Command::new("render")
                .about("Render Markdown to HTML")
                .arg(input_arg("Markdown file"))
                .arg(output_arg())
                .arg(
                    Arg::new("hydrate-cards")
                        .long("hydrate-cards")
                        .help("Replace card placeholders with default component markup")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("placeholders")
                        .long("placeholders")
                        .value_name("PATH")
                        .help("Write the card placeholder bindings as JSON")
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("serialize")
                .about("Serialize HTML to Markdown")
                .arg(input_arg("HTML file"))
                .arg(output_arg())
                .arg(
                    Arg::new("placeholders")
                        .long("placeholders")
                        .value_name("PATH")
                        .help("Card placeholder bindings (JSON) from the render that produced the HTML")
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("roundtrip")
                .about("Markdown -> HTML -> Markdown, printing the normalized Markdown")
                .arg(input_arg("Markdown file"))
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
                .subcommand_required(true)
                .subcommand(
                    Command::new("validate")
                        .about("Strictly validate a Markdown pipe table")
                        .arg(input_arg("Markdown table file")),
                )
                .subcommand(
                    Command::new("html")
                        .about("Convert a Markdown pipe table to an HTML table")
                        .arg(input_arg("Markdown table file")),
                )
                .subcommand(
                    Command::new("markdown")
                        .about("Convert the first HTML table to a Markdown pipe table")
                        .arg(input_arg("HTML file")),
                ),
        )
        .subcommand(
            Command::new("frontmatter")
                .about("Print the frontmatter of a Markdown file as JSON")
                .arg(input_arg("Markdown file")),
        )
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    // Parse extra-* arguments before clap processing
    let (cleaned_args, mut extra_params) = parse_extra_args(&args);

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&cleaned_args) {
        Ok(m) => m,
        Err(e) => {
            // A bare file path means the default convert command
            if cleaned_args.len() > 1
                && !cleaned_args[1].starts_with('-')
                && !SUBCOMMANDS.contains(&cleaned_args[1].as_str())
            {
                let mut new_args = vec![cleaned_args[0].clone(), "convert".to_string()];
                new_args.extend_from_slice(&cleaned_args[1..]);

                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    let mut config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));
    apply_config_overrides(&mut config, &mut extra_params);
    if let Err(err) = config.validate() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
    init_logging(&config.logging.filter);

    for key in extra_params.keys() {
        tracing::warn!(key = %key, "ignoring unknown --extra parameter");
    }

    match matches.subcommand() {
        Some(("convert", sub_matches)) => handle_convert_command(sub_matches, &config),
        Some(("render", sub_matches)) => handle_render_command(sub_matches, &config),
        Some(("serialize", sub_matches)) => handle_serialize_command(sub_matches, &config),
        Some(("roundtrip", sub_matches)) => handle_roundtrip_command(sub_matches, &config),
        Some(("table", sub_matches)) => handle_table_command(sub_matches),
        Some(("frontmatter", sub_matches)) => handle_frontmatter_command(sub_matches),
        _ => {
            eprintln!("Error: Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

/// Install the stderr subscriber. `QUILL_LOG` wins over the configured filter.
fn init_logging(default_filter: &str) {
    let filter =
        EnvFilter::try_from_env("QUILL_LOG").unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

fn handle_convert_command(matches: &ArgMatches, config: &QuillConfig) {
    let input = required(matches, "input");
    let direction = resolve_direction(
        input,
        matches.get_one::<String>("from").map(|s| s.as_str()),
        matches.get_one::<String>("to").map(|s| s.as_str()),
    )
    .unwrap_or_else(|message| {
        eprintln!("Error: {message}");
        std::process::exit(1);
    });

    let source = read_input(input);
    let text = match direction {
        Direction::ToHtml => renderer(config).render(&source).output,
        Direction::ToMarkdown => serializer(config, None).serialize_html(&source),
    };
    write_output(
        matches.get_one::<String>("output").map(|s| s.as_str()),
        &conversion_text(text),
    );
}

/// Pick the conversion direction. `--to` wins, then `--from`, then the file extension.
fn resolve_direction(input: &str, from: Option<&str>, to: Option<&str>) -> Result<Direction, String> {
    let from_html = from.map(is_html);
    let to_html = to.map(is_html);

    match (from_html, to_html) {
        (Some(a), Some(b)) if a == b => Err("--from and --to name the same format".to_string()),
        (_, Some(true)) => Ok(Direction::ToHtml),
        (_, Some(false)) => Ok(Direction::ToMarkdown),
        (Some(true), None) => Ok(Direction::ToMarkdown),
        (Some(false), None) => Ok(Direction::ToHtml),
        (None, None) => detect_direction(input).ok_or_else(|| {
            format!("Could not detect format from filename '{input}'; specify --from or --to")
        }),
    }
}

fn is_html(format: &str) -> bool {
    format == "html"
}

fn handle_render_command(matches: &ArgMatches, config: &QuillConfig) {
    let input = required(matches, "input");
    let source = read_input(input);
    let rendered = renderer(config).render(&source);

    if let Some(path) = matches.get_one::<String>("placeholders") {
        let json = serde_json::to_string_pretty(&rendered.placeholders).unwrap_or_else(|e| {
            eprintln!("Error: Could not encode placeholder bindings: {e}");
            std::process::exit(1);
        });
        write_file(path, &json);
    }

    let html = if matches.get_flag("hydrate-cards") {
        rendered.hydrate_default().unwrap_or_else(|e| {
            eprintln!("Error: {e}");
            std::process::exit(1);
        })
    } else {
        rendered.html().to_string()
    };

    write_output(matches.get_one::<String>("output").map(|s| s.as_str()), &html);
}

fn handle_serialize_command(matches: &ArgMatches, config: &QuillConfig) {
    let input = required(matches, "input");
    let source = read_input(input);

    let bindings = matches.get_one::<String>("placeholders").map(|path| {
        let json = read_input(path);
        serde_json::from_str::<PlaceholderBindings>(&json).unwrap_or_else(|e| {
            eprintln!("Error: Invalid placeholder bindings in '{path}': {e}");
            std::process::exit(1);
        })
    });

    let markdown = serializer(config, bindings).serialize_html(&source);
    write_output(
        matches.get_one::<String>("output").map(|s| s.as_str()),
        &conversion_text(markdown),
    );
}

fn handle_roundtrip_command(matches: &ArgMatches, config: &QuillConfig) {
    let input = required(matches, "input");
    let source = read_input(input);

    let first = roundtrip(&source, config);
    let second = roundtrip(&first, config);
    println!("{first}");

    if matches.get_flag("check") && first != second {
        eprintln!("Error: round trip is not stable for '{input}'");
        std::process::exit(1);
    }
}

fn roundtrip(markdown: &str, config: &QuillConfig) -> String {
    let rendered = renderer(config).render(markdown);
    let html = rendered.html().to_string();
    serializer(config, Some(rendered.placeholders))
        .serialize_html(&html)
        .into_text()
}

fn handle_table_command(matches: &ArgMatches) {
    match matches.subcommand() {
        Some(("validate", sub_matches)) => {
            let input = required(sub_matches, "input");
            let validation = validate_table(&read_input(input));
            if validation.valid {
                println!("valid");
            } else {
                for error in &validation.errors {
                    println!("{error}");
                }
                std::process::exit(1);
            }
        }
        Some(("html", sub_matches)) => {
            let input = required(sub_matches, "input");
            let Some(table) = parse_table(&read_input(input)) else {
                eprintln!("Error: '{input}' does not contain a pipe table");
                std::process::exit(1);
            };
            let html = table_to_html(&table).unwrap_or_else(|e| {
                eprintln!("Error: {e}");
                std::process::exit(1);
            });
            println!("{html}");
        }
        Some(("markdown", sub_matches)) => {
            let input = required(sub_matches, "input");
            let Some(table) = html_to_table(&read_input(input)) else {
                eprintln!("Error: '{input}' does not contain an HTML table");
                std::process::exit(1);
            };
            println!("{}", serialize_table(&table));
        }
        _ => {
            eprintln!("Error: Unknown table subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

fn handle_frontmatter_command(matches: &ArgMatches) {
    let input = required(matches, "input");
    let source = read_input(input);
    let frontmatter = parse_frontmatter(&source)
        .map(|(frontmatter, _)| frontmatter)
        .unwrap_or_default();

    let json = serde_json::to_string_pretty(&frontmatter).unwrap_or_else(|e| {
        eprintln!("Error: Could not encode frontmatter: {e}");
        std::process::exit(1);
    });
    println!("{json}");
}

fn renderer(config: &QuillConfig) -> Renderer {
    Renderer::new(RenderOptions::from(&config.render))
}

fn serializer(config: &QuillConfig, bindings: Option<PlaceholderBindings>) -> Serializer {
    let serializer = Serializer::new((&config.serialize).into());
    match bindings {
        Some(bindings) => serializer.with_bindings(bindings),
        None => serializer,
    }
}

fn conversion_text(conversion: Conversion) -> String {
    if let Conversion::FallbackUsed { cause, .. } = &conversion {
        eprintln!("Warning: conversion failed ({cause}), input returned unchanged");
    }
    conversion.into_text()
}

/// Direction implied by the input file's extension.
fn detect_direction(path: &str) -> Option<Direction> {
    let extension = Path::new(path).extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        "md" | "markdown" => Some(Direction::ToHtml),
        "html" | "htm" => Some(Direction::ToMarkdown),
        _ => None,
    }
}

fn required<'a>(matches: &'a ArgMatches, name: &str) -> &'a str {
    matches
        .get_one::<String>(name)
        .map(|s| s.as_str())
        .unwrap_or_else(|| {
            eprintln!("Error: missing <{name}>");
            std::process::exit(1);
        })
}

fn read_input(path: &str) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error: Could not read '{path}': {e}");
        std::process::exit(1);
    })
}

fn write_file(path: &str, text: &str) {
    fs::write(path, format!("{text}\n")).unwrap_or_else(|e| {
        eprintln!("Error: Could not write '{path}': {e}");
        std::process::exit(1);
    });
}

fn write_output(output: Option<&str>, text: &str) {
    match output {
        Some(path) => write_file(path, text),
        None => println!("{text}"),
    }
}

fn load_cli_config(explicit_path: Option<&str>) -> QuillConfig {
    let loader = Loader::new().with_optional_file("quill.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    loader.build().unwrap_or_else(|err| {
        eprintln!("Error: Failed to load configuration: {err}");
        std::process::exit(1);
    })
}

fn apply_config_overrides(config: &mut QuillConfig, extra_params: &mut HashMap<String, String>) {
    if let Some(raw) = take_override(extra_params, &["class-prefix", "prefix"]) {
        config.render.class_prefix = raw;
    }
    if let Some(raw) = take_override(extra_params, &["max-heading-level", "heading-level"]) {
        config.render.max_heading_level = raw.parse().unwrap_or_else(|_| {
            eprintln!("Error: Invalid number '{raw}' for --extra-max-heading-level");
            std::process::exit(1);
        });
    }
    if let Some(raw) = extra_params.remove("strip-frontmatter") {
        config.render.strip_frontmatter = parse_bool_arg("strip-frontmatter", &raw);
    }
    if let Some(raw) = take_override(extra_params, &["bullet", "bullet-marker"]) {
        config.serialize.bullet_marker = parse_char_arg("bullet", &raw);
    }
    if let Some(raw) = take_override(extra_params, &["emphasis", "emphasis-marker"]) {
        config.serialize.emphasis_marker = parse_char_arg("emphasis", &raw);
    }
    if let Some(raw) = take_override(extra_params, &["log", "log-filter"]) {
        config.logging.filter = raw;
    }
}

fn take_override(map: &mut HashMap<String, String>, keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Some(value) = map.remove(*key) {
            return Some(value);
        }
    }
    None
}

fn parse_bool_arg(flag: &str, raw: &str) -> bool {
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => true,
        "false" | "0" | "no" | "n" => false,
        other => {
            eprintln!("Error: Invalid boolean value '{other}' for --extra-{flag}");
            std::process::exit(1);
        }
    }
}

fn parse_char_arg(flag: &str, raw: &str) -> char {
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => c,
        _ => {
            eprintln!("Error: Invalid marker '{raw}' for --extra-{flag}: expected a single character");
            std::process::exit(1);
        }
    }
}
