//! Command-line interface for the design-token compiler
//!
//! Usage:
//!   tokens build [`<source>`...] [--config `<file>`] [--namespace `<ns>`] [--format `<fmt>`]... [--out-dir `<dir>`]
//!   tokens resolve `<source>`      - Print the source with alias markers substituted
//!   tokens formats                 - List the supported output formats
//!
//! Configuration is read from the embedded defaults, then `tokens.toml` in the working
//! directory (or the file given with --config), then the command-line flags.

use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;
use std::process::ExitCode;
use tokens_babel::{convert_all, OutputFormat};
use tokens_config::{ConfigError, Loader, TokensConfig, DEFAULT_FILE_NAME};

fn main() -> ExitCode {
    let matches = Command::new("tokens")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Compile YAML design tokens into JSON and SCSS")
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log every written file (overridden by RUST_LOG)")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("build")
                .about("Convert token sources into the configured output formats")
                .arg(
                    Arg::new("sources")
                        .help("YAML token sources (default: tokens.source_file from config, may be a glob)")
                        .num_args(0..)
                        .index(1),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .short('c')
                        .help("Configuration file layered over the defaults"),
                )
                .arg(
                    Arg::new("namespace")
                        .long("namespace")
                        .short('n')
                        .help("Prefix for variable names and the JSON root key"),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format (json, scss); repeat for several")
                        .action(ArgAction::Append),
                )
                .arg(
                    Arg::new("out-dir")
                        .long("out-dir")
                        .short('o')
                        .help("Directory the output files are written to"),
                ),
        )
        .subcommand(
            Command::new("resolve")
                .about("Print a token source with its alias markers substituted")
                .arg(
                    Arg::new("source")
                        .help("YAML token source")
                        .required(true)
                        .index(1),
                ),
        )
        .subcommand(Command::new("formats").about("List the supported output formats"))
        .get_matches();

    init_tracing(matches.get_flag("verbose"));

    match matches.subcommand() {
        Some(("build", sub)) => handle_build_command(sub),
        Some(("resolve", sub)) => handle_resolve_command(sub),
        Some(("formats", _)) => handle_formats_command(),
        _ => {
            eprintln!("Unknown command. Run `tokens --help` for usage.");
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr; `RUST_LOG` takes precedence over --verbose.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(filter)
        .init();
}

/// Handle the build command
fn handle_build_command(matches: &ArgMatches) -> ExitCode {
    let config = match load_config(matches) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let sources: Vec<PathBuf> = match matches.get_many::<String>("sources") {
        Some(sources) => sources.map(PathBuf::from).collect(),
        None => match config.source_files() {
            Ok(sources) => sources,
            Err(e) => {
                eprintln!("Configuration error: {}", e);
                return ExitCode::FAILURE;
            }
        },
    };

    let reports = convert_all(&sources, &config.convert_options());
    for report in &reports {
        for path in &report.written {
            println!("{}", path.display());
        }
    }

    // Skipped and degraded sources are logged, not fatal
    ExitCode::SUCCESS
}

fn load_config(matches: &ArgMatches) -> Result<TokensConfig, ConfigError> {
    let mut loader = match matches.get_one::<String>("config") {
        Some(path) => Loader::new().with_file(path),
        None => Loader::new().with_optional_file(DEFAULT_FILE_NAME),
    };

    if let Some(namespace) = matches.get_one::<String>("namespace") {
        loader = loader.set_override("tokens.namespace", namespace.as_str())?;
    }
    if let Some(formats) = matches.get_many::<String>("format") {
        loader = loader.set_override("tokens.formats", formats.cloned().collect::<Vec<_>>())?;
    }
    if let Some(out_dir) = matches.get_one::<String>("out-dir") {
        loader = loader.set_override("tokens.output_path", out_dir.as_str())?;
    }

    loader.build()
}

/// Handle the resolve command
fn handle_resolve_command(matches: &ArgMatches) -> ExitCode {
    let path = matches
        .get_one::<String>("source")
        .expect("source is required");

    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) => {
            eprintln!("Error reading {}: {}", path, e);
            return ExitCode::FAILURE;
        }
    };

    print!("{}", tokens_parser::resolve(&raw));
    ExitCode::SUCCESS
}

/// Handle the formats command
fn handle_formats_command() -> ExitCode {
    println!("Available output formats:\n");
    for format in OutputFormat::ALL {
        let formatter = format.formatter();
        println!("  {} (.{})", format, formatter.extension());
        println!("    {}", formatter.description());
        println!();
    }
    ExitCode::SUCCESS
}
