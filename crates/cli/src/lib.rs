pub mod commands;
pub mod util;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use crate::commands::{layouts, lookup, replay};
use crate::util::CliResult;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "keyrelay", version, about = "Replay key event traces through the keyrelay coordinator")]
pub struct Cli {
    #[arg(long = "format", value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,
    #[arg(
        long = "log-level",
        value_enum,
        global = true,
        help = "Log level on stderr. Falls back to RUST_LOG, then `warn`."
    )]
    pub log_level: Option<LogLevel>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Feed a JSON trace through a coordinator backed by the mock host.
    Replay(replay::ReplayArgs),
    /// Resolve physical key, logical key and character for one key.
    Lookup(lookup::LookupArgs),
    /// List registered key layouts.
    Layouts,
}

pub fn run() -> CliResult<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level);
    let output = execute(&cli)?;
    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

pub fn execute(cli: &Cli) -> CliResult<String> {
    tracing::debug!(command = ?cli.command, format = ?cli.format, "executing command");
    match &cli.command {
        Command::Replay(args) => replay::run(args, cli.format),
        Command::Lookup(args) => lookup::run(args, cli.format),
        Command::Layouts => layouts::run(cli.format),
    }
}

fn init_tracing(level: Option<LogLevel>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level.as_directive()),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init();
}
