//! CLI entry point.
//!
//! # Responsibility
//! - Run one agent message from stdin against a fresh scene.
//! - Print per-command outcomes, then the final scene as JSON.
//!
//! Logging is configured by `--log-dir`/`--log-level` or the
//! `CANVAS_LOG_DIR`/`CANVAS_LOG_LEVEL` environment variables.

use canvas_core::{
    default_log_level, init_logging, protocol_instructions, ElementStore, MessageProcessor,
};
use clap::Parser;
use std::io::Read;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "canvas", version)]
#[command(about = "Apply canvas commands from one agent message on stdin", long_about = None)]
struct Cli {
    /// Print the agent-facing command protocol and exit
    #[arg(long)]
    protocol: bool,

    /// Log level for the file logger
    #[arg(long, env = "CANVAS_LOG_LEVEL")]
    log_level: Option<String>,

    /// Absolute directory for log files; file logging is off when unset
    #[arg(long, env = "CANVAS_LOG_DIR")]
    log_dir: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if cli.protocol {
        print!("{}", protocol_instructions());
        return ExitCode::SUCCESS;
    }

    if let Err(err) = start_logging(&cli) {
        eprintln!("logging disabled: {err}");
    }

    let mut input = String::new();
    if let Err(err) = std::io::stdin().read_to_string(&mut input) {
        eprintln!("failed to read stdin: {err}");
        return ExitCode::FAILURE;
    }

    let mut processor = MessageProcessor::in_memory();
    let report = processor.process(&input);
    for issue in &report.issues {
        println!("warn {issue}");
    }
    for processed in &report.commands {
        match &processed.result {
            Ok(effect) => println!("ok {} {effect}", processed.command.verb),
            Err(err) => println!("error {} {err}", processed.command.verb),
        }
    }

    match serde_json::to_string_pretty(&processor.store().snapshot()) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("failed to serialize scene: {err}");
            ExitCode::FAILURE
        }
    }
}

fn start_logging(cli: &Cli) -> Result<(), String> {
    let Some(log_dir) = cli.log_dir.as_deref() else {
        return Ok(());
    };
    let level = cli.log_level.as_deref().unwrap_or(default_log_level());
    init_logging(level, log_dir)?;
    log::info!("event=cli_start module=cli status=ok");
    Ok(())
}
