//! NLPAssist CLI - ask questions from the terminal.
//!
//! Built with Rust, Ratatui, and a single JSON endpoint.

use std::io;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info};

use nlpassist_cli::app::App;
use nlpassist_cli::cli::Args;
use nlpassist_cli::client::{AskClient, HttpBackend};
use nlpassist_cli::config::Config;
use nlpassist_cli::{input, logging};

fn main() -> Result<()> {
    let args = Args::parse();
    let config = args.resolve_config()?;

    if args.write_config {
        let path = args
            .config_path()
            .context("Could not determine config directory")?;
        config.save_to_path(&path)?;
        println!("Wrote {}", path.display());
        return Ok(());
    }

    let runtime = tokio::runtime::Runtime::new()?;
    let client = build_client(&config)?;

    if let Some(question) = &args.ask {
        logging::init_stderr_logger(&config.log, args.verbose);
        let response = runtime.block_on(client.ask(question))?;
        println!("{}", response.answer);
        return Ok(());
    }

    let log_path = logging::init_file_logger(&config.log, args.verbose);
    info!(
        endpoint = %client.endpoint(),
        user_id = %client.user_id(),
        log = ?log_path,
        "starting chat"
    );

    // Spawned requests need the runtime while the UI loop runs on this thread
    let _guard = runtime.enter();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(client);
    let res = input::run_app(&mut terminal, &mut app, &config);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!(error = %err, "ui loop failed");
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

fn build_client(config: &Config) -> Result<AskClient> {
    let backend = HttpBackend::with_timeout(&config.endpoint.url, config.endpoint.timeout())?;
    Ok(AskClient::new(
        Arc::new(backend),
        config.endpoint.user_id.clone(),
    ))
}
