use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use four_wins::config::{AppConfig, Strategy};
use four_wins::headless;
use four_wins::play::PlayerKind;
use four_wins::ui::App;

/// Play 4Wins in the terminal, or pit AI players against each other.
#[derive(Parser)]
#[command(name = "four_wins", about = "4Wins meeple placement game")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "four_wins.toml")]
    config: PathBuf,

    /// Play AI-only matches without a terminal UI and print a summary
    #[arg(long)]
    headless: bool,

    /// Number of matches in headless mode
    #[arg(long, default_value_t = 100)]
    matches: usize,

    /// Override player one's controller
    #[arg(long, value_enum)]
    player_one: Option<PlayerKind>,

    /// Override player two's controller
    #[arg(long, value_enum)]
    player_two: Option<PlayerKind>,

    /// Override the strategy of both AI players
    #[arg(long, value_enum)]
    strategy: Option<Strategy>,

    /// Seed for reproducible matches
    #[arg(long)]
    seed: Option<u64>,

    /// Log file used while the terminal UI is active
    #[arg(long, default_value = "four_wins.log")]
    log_file: PathBuf,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_default_config {
        print!("{}", AppConfig::default_toml()?);
        return Ok(());
    }

    init_logging(&cli)?;

    // Load configuration
    let mut app_config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(kind) = cli.player_one {
        app_config.player_one.kind = kind;
    }
    if let Some(kind) = cli.player_two {
        app_config.player_two.kind = kind;
    }
    if let Some(strategy) = cli.strategy {
        app_config.player_one.strategy = strategy;
        app_config.player_two.strategy = strategy;
    }
    if cli.seed.is_some() {
        app_config.seed = cli.seed;
    }

    let result = if cli.headless {
        run_headless(&app_config, cli.matches)
    } else {
        run_tui(app_config)
    };
    if let Err(err) = &result {
        error!(error = %format!("{err:#}"), "four_wins aborted");
    }
    result
}

/// Headless runs log to stderr; the terminal UI logs to a file so the
/// screen stays clean.
fn init_logging(cli: &Cli) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if cli.headless {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
    } else {
        let log_file = std::fs::File::create(&cli.log_file)
            .with_context(|| format!("creating log file {}", cli.log_file.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(Arc::new(log_file))
            .with_ansi(false)
            .init();
    }
    Ok(())
}

fn run_headless(config: &AppConfig, matches: usize) -> Result<()> {
    info!(matches, "starting headless matches");
    let summary = headless::run_matches(config, matches).context("running headless matches")?;
    println!(
        "{} matches: {} {} wins, {} {} wins, {} ties, {:.1} placements per match",
        summary.matches,
        config.player_one.name,
        summary.wins[0],
        config.player_two.name,
        summary.wins[1],
        summary.ties,
        summary.average_placements()
    );
    Ok(())
}

fn run_tui(config: AppConfig) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config);
    let res = app.run(&mut terminal);

    // Restore terminal even on error
    let _ = disable_raw_mode();
    let _ = execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    );
    let _ = terminal.show_cursor();

    res.context("running the terminal UI")
}
