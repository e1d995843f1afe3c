//! bank-run - apply a script of account actions and print the result

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use libbank::{
    logging::{level_from_env, LogFormat, LoggingConfig},
    AccountState, AccountStore, BankError, CoercionPolicy, Config, Outcome, TaggedAction,
    Transition,
};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(name = "bank-run")]
#[command(version, about = "Apply account actions in order and print the resulting state")]
#[command(long_about = r#"Apply account actions in order and print the resulting state.

Every run starts from a fresh, closed account. Actions come from the
command line or, when none are given, from stdin (one per line).

ACTIONS:
    open | openAccount
    deposit <amount>
    withdraw <amount>
    requestLoan <amount>     (also request-loan, request_loan)
    payLoan
    close | closeAccount

    Amounts follow the kind after a space or a colon (deposit:200).
    Lines may also be JSON: {"type":"deposit","payload":"200"}
    Blank lines and lines starting with # are skipped.

EXAMPLES:
    bank-run open deposit:200 withdraw:100
    printf 'open\nrequestLoan 1000\npayLoan\n' | bank-run --trace
    bank-run --format json open deposit:50 | jq .balance

EXIT CODES:
    0 - Success (including actions ignored by the account rules)
    1 - Error (config, IO)
    3 - Invalid input (unknown action, or malformed amount with --strict)
"#)]
struct Cli {
    /// Actions to apply, in order (reads stdin if none are given)
    #[arg(value_name = "ACTION")]
    actions: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Print every transition, not just the final state
    #[arg(short, long)]
    trace: bool,

    /// Reject malformed amounts instead of treating them as zero
    #[arg(long)]
    strict: bool,

    /// Config file (defaults to $BANK_CONFIG or the user config directory)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log output format
    #[arg(long, env = "BANK_LOG_FORMAT", default_value = "text")]
    log_format: LogFormat,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// One human-readable line per snapshot
    Text,
    /// Final state as a JSON object; with --trace, all transitions too
    Json,
    /// One JSON transition per line
    Jsonl,
}

#[derive(Serialize)]
struct TraceReport<'a> {
    transitions: &'a [Transition],
    state: &'a AccountState,
}

fn main() {
    let cli = Cli::parse();

    LoggingConfig::new(cli.log_format, level_from_env(), cli.verbose).init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(exit_code(&e));
    }
}

fn exit_code(error: &anyhow::Error) -> i32 {
    error
        .downcast_ref::<BankError>()
        .map(BankError::exit_code)
        .unwrap_or(1)
}

fn run(cli: Cli) -> Result<()> {
    let config = match cli.config {
        Some(ref path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };

    let policy = if cli.strict {
        CoercionPolicy::Strict
    } else {
        config.input.coercion
    };
    let mut store = AccountStore::with_rules(config.rules(), policy);

    let lines = if cli.actions.is_empty() {
        io::stdin()
            .lock()
            .lines()
            .collect::<io::Result<Vec<String>>>()
            .context("Failed to read actions from stdin")?
    } else {
        cli.actions.clone()
    };

    tracing::debug!(actions = lines.len(), %policy, "Running script");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut transitions = Vec::new();

    for (index, line) in lines.iter().enumerate() {
        let tagged = match TaggedAction::parse_line(line)? {
            Some(tagged) => tagged,
            None => continue,
        };

        let transition = store
            .dispatch_tagged(&tagged)
            .with_context(|| format!("action {} ({})", index + 1, line.trim()))?;

        // Streamed so that a later failure still leaves the earlier steps visible
        match cli.format {
            OutputFormat::Text if cli.trace => writeln!(out, "{}", describe(&transition))?,
            OutputFormat::Jsonl => writeln!(out, "{}", serde_json::to_string(&transition)?)?,
            _ => {}
        }

        transitions.push(transition);
    }

    match cli.format {
        OutputFormat::Text => writeln!(out, "{}", store.state())?,
        OutputFormat::Json if cli.trace => {
            let report = TraceReport {
                transitions: &transitions,
                state: store.state(),
            };
            writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
        }
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(store.state())?)?,
        OutputFormat::Jsonl => {}
    }

    Ok(())
}

fn describe(transition: &Transition) -> String {
    match transition.outcome {
        Outcome::Applied => format!("{} -> {}", transition.action, transition.after),
        Outcome::Rejected(reason) => format!("{} -> ignored ({})", transition.action, reason),
    }
}
