//! Command-line interface for luaparse
//!
//! Checks a Lua source file and prints either its diagnostics or its function list.
//!
//! Usage:
//!   luaparse `<path>`                        - Print diagnostics, or the declared functions
//!   luaparse `<path>` --format token-json    - Dump the token stream
//!   luaparse --list-formats                - List all available formats
//!
//! Exit status is 0 when the file parses cleanly and 1 on diagnostics or any failure.

use clap::{Arg, ArgAction, Command};
use luaparse::lua::processor::{
    available_formats, process_file, AnalyzerConfig, ProcessingError, ProcessingSpec,
};
use std::process;
use tracing::{debug, Level};

fn main() {
    let matches = Command::new("luaparse")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Checks Lua source against the grammar and lists its functions")
        .arg(
            Arg::new("path")
                .help("Path to the Lua file to check")
                .required_unless_present("list-formats")
                .index(1),
        )
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .help("Output format (e.g., report-simple, report-json, token-simple)")
                .default_value("report-simple"),
        )
        .arg(
            Arg::new("anonymous")
                .long("anonymous")
                .help("Also list function literals that are not bound to a name")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Log more on stderr (repeat for more detail)")
                .action(ArgAction::Count),
        )
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List all available output formats")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    init_logging(matches.get_count("verbose"));

    if matches.get_flag("list-formats") {
        handle_formats_command();
        return;
    }

    let Some(path) = matches.get_one::<String>("path") else {
        process::exit(1);
    };
    let format = matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("report-simple");
    let config = AnalyzerConfig {
        include_anonymous: matches.get_flag("anonymous"),
    };

    match run(path, format, &config) {
        Ok(clean) => process::exit(if clean { 0 } else { 1 }),
        Err(e) => {
            eprintln!("Error: {}", e);
            if matches!(
                e,
                ProcessingError::InvalidFormat(_)
                    | ProcessingError::InvalidStage(_)
                    | ProcessingError::InvalidFormatType(_)
            ) {
                eprintln!("\nAvailable formats:");
                for format in available_formats() {
                    eprintln!("  {}", format);
                }
            }
            process::exit(1);
        }
    }
}

/// Process one file, print the output and return whether it parsed cleanly.
fn run(path: &str, format: &str, config: &AnalyzerConfig) -> Result<bool, ProcessingError> {
    let spec = ProcessingSpec::from_string(format)?;
    debug!(path, format = %spec.name(), "processing");
    let processed = process_file(path, &spec, config)?;
    print!("{}", processed.output);
    Ok(processed.clean)
}

fn handle_formats_command() {
    println!("Available formats:");
    for format in available_formats() {
        println!("  {}", format);
    }
}

/// Log to stderr at a level picked by the number of `-v` flags.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
