use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use connect_four::config::AppConfig;
use connect_four::ui::App;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

/// Play Connect Four against the computer.
#[derive(Parser)]
#[command(name = "connect-four", about = "Play Connect Four against the computer")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "connect_four.toml")]
    config: PathBuf,

    /// Search depth of the computer (skips the difficulty prompt)
    #[arg(long)]
    difficulty: Option<usize>,

    /// Override number of board rows
    #[arg(long)]
    rows: Option<usize>,

    /// Override number of board columns
    #[arg(long)]
    cols: Option<usize>,

    /// Seed for the computer's tie-breaking
    #[arg(long)]
    seed: Option<u64>,

    /// File receiving log output (RUST_LOG controls the level)
    #[arg(long, default_value = "connect_four.log")]
    log_file: PathBuf,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_default_config {
        print!("{}", AppConfig::default_toml());
        return Ok(());
    }

    init_logging(&cli.log_file)?;

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(difficulty) = cli.difficulty {
        config.ai.difficulty = Some(difficulty);
    }
    if let Some(rows) = cli.rows {
        config.board.rows = rows;
    }
    if let Some(cols) = cli.cols {
        config.board.cols = cols;
    }
    if let Some(seed) = cli.seed {
        config.ai.seed = Some(seed);
    }
    config.validate().context("validating configuration")?;

    tracing::info!(
        rows = config.board.rows,
        cols = config.board.cols,
        difficulty = ?config.ai.difficulty,
        "starting connect four"
    );

    let app = App::new(config).context("creating game")?;
    run(app)
}

/// Log to a file so output does not interfere with the TUI.
fn init_logging(path: &Path) -> Result<()> {
    let log_file = std::fs::File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

fn run(mut app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode().context("enabling raw mode")?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("creating terminal")?;

    let res = app.run(&mut terminal);

    // Restore terminal even if the game loop failed
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res.context("running game")?;

    if let Some(message) = app.outcome_message() {
        println!("{message}");
    }
    print!("{}", app.game_state().board());
    Ok(())
}
