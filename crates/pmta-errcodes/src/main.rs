//! pmta-errcodes: inspect the PowerMTA error taxonomy
//!
//! # Usage
//!
//! ```bash
//! pmta-errcodes list
//! pmta-errcodes describe 7
//! pmta-errcodes describe EMAIL_ADDRESS --json
//! pmta-errcodes classes
//! ```

mod config;
mod report;

use anyhow::{Context, Result};
use pmta_error::taxonomy;
use std::path::PathBuf;

enum Command {
    List,
    Describe(String),
    Classes,
}

fn main() -> Result<()> {
    // Parse CLI args by hand; the surface is three commands
    let args: Vec<String> = std::env::args().collect();

    let mut config_path: Option<PathBuf> = None;
    let mut force_json = false;
    let mut validate_only = false;
    let mut command: Option<Command> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                i += 1;
                if i < args.len() {
                    config_path = Some(PathBuf::from(&args[i]));
                } else {
                    anyhow::bail!("--config requires a path argument");
                }
            }
            "--json" => {
                force_json = true;
            }
            "--validate" => {
                validate_only = true;
            }
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            "--version" | "-V" => {
                println!("pmta-errcodes {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            "list" if command.is_none() => command = Some(Command::List),
            "classes" if command.is_none() => command = Some(Command::Classes),
            "describe" if command.is_none() => {
                i += 1;
                if i < args.len() {
                    command = Some(Command::Describe(args[i].clone()));
                } else {
                    anyhow::bail!("describe requires a code or constant name");
                }
            }
            other => {
                anyhow::bail!("Unknown argument: {}", other);
            }
        }
        i += 1;
    }

    let mut cli_config = match config_path {
        Some(ref path) => config::CliConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => config::CliConfig::default(),
    };
    cli_config.apply_env_overrides();
    if force_json {
        cli_config.output.format = "json".to_string();
    }
    cli_config
        .validate()
        .context("Configuration validation failed")?;

    std::env::set_var("RUST_LOG", &cli_config.logging.log_level);
    env_logger::init();

    if validate_only {
        println!("Configuration is valid.");
        println!("  Format:    {}", cli_config.output.format);
        println!("  Log level: {}", cli_config.logging.log_level);
        return Ok(());
    }

    let table = taxonomy::global();
    let json = cli_config.json();
    let output = match command.unwrap_or(Command::List) {
        Command::List => report::render_constants(table, json)?,
        Command::Classes => report::render_classes(table, json)?,
        Command::Describe(query) => {
            let desc = report::describe(table, &query)
                .with_context(|| format!("Cannot describe {:?}", query))?;
            log::debug!("Resolved {:?} to {:?}", query, desc);
            report::render_description(&desc, json)?
        }
    };
    print!("{}", output);
    if json {
        println!();
    }

    Ok(())
}

fn print_help() {
    println!(
        r#"pmta-errcodes: PowerMTA error taxonomy

USAGE:
    pmta-errcodes [OPTIONS] [COMMAND]

COMMANDS:
    list                  List error constants (default)
    describe <CODE|NAME>  Show the constant for a code, or the code for a name
    classes               Show the error class hierarchy

OPTIONS:
    -c, --config <PATH>   Config file path (TOML)
    --json                Print JSON instead of text
    --validate            Validate configuration and exit
    -h, --help            Show this help message
    -V, --version         Show version

ENVIRONMENT VARIABLES (override config file):
    PMTA_ERRCODES_FORMAT      Output format (text/json)
    PMTA_ERRCODES_LOG_LEVEL   Log level (error/warn/info/debug/trace)
"#
    );
}
