//! bank-tui - terminal form for a reducer-driven bank account
//!
//! Balance and loan on top, one row per account action below. Every key
//! press becomes an action, the reducer produces the next state, and the
//! frame is redrawn from it.

use std::fs::OpenOptions;

use bank_tui::{
    app::{event::EventHandler, reduce, AppState},
    error::Result,
    terminal::{install_panic_hook, TerminalGuard},
    ui,
};
use libbank::{
    logging::{level_from_env, LogFormat, LoggingConfig},
    Config,
};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

fn run() -> Result<()> {
    init_logging()?;

    let config = Config::load()?;
    let state = AppState::from_config(&config);

    install_panic_hook();
    let mut guard = TerminalGuard::enter()?;
    run_app(&mut guard, state)
}

/// stderr belongs to the alternate screen, so logs only go to `$BANK_TUI_LOG`
fn init_logging() -> Result<()> {
    if let Ok(path) = std::env::var("BANK_TUI_LOG") {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        LoggingConfig::new(LogFormat::Text, level_from_env(), false).init_file(file);
    }
    Ok(())
}

fn run_app(guard: &mut TerminalGuard, mut state: AppState) -> Result<()> {
    let event_handler = EventHandler::new(state.config.tick_rate_ms);
    tracing::info!(
        opening_balance = %state.rules.opening_balance,
        policy = %state.policy,
        "Form started"
    );

    loop {
        guard.terminal().draw(|frame| ui::render(frame, &state))?;

        let action = event_handler.next()?.into();
        let before = state.account;
        state = reduce(state, action);

        if state.account != before {
            tracing::debug!(account = %state.account, "Account updated");
        }

        if state.should_quit {
            break;
        }
    }

    tracing::info!(account = %state.account, "Form closed");
    Ok(())
}
