use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use push_grid::app::App;
use push_grid::config::Config;
use push_grid::ui;

#[derive(Parser, Debug)]
#[command(name = "push-grid")]
#[command(about = "Grid element renderer for control surface displays")]
#[command(version)]
struct Cli {
    /// Config file path
    #[arg(long, default_value = "~/.config/push-grid/config.toml")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one frame of the display to a PNG file
    Render {
        /// Output file
        #[arg(short, long, default_value = "grid.png")]
        output: PathBuf,
    },
    /// Print the backend call sequence as JSON
    Calls {
        /// Only draw this column, at x = 0
        #[arg(long)]
        column: Option<usize>,
    },
    /// Live preview in the terminal
    Preview,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "push_grid=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    // Load config
    let config = Config::load(&cli.config)?;
    tracing::info!("Loaded {} tracks", config.tracks.len());

    let mut app = App::new(config)?;

    match cli.command {
        Command::Render { output } => {
            let backend = app.render()?;
            backend
                .save_png(&output)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            tracing::info!("Wrote {}", output.display());
            Ok(())
        }
        Command::Calls { column } => {
            let calls = app.record(column)?;
            println!("{}", serde_json::to_string_pretty(&calls)?);
            Ok(())
        }
        Command::Preview => preview(&mut app).await,
    }
}

async fn preview(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_preview(&mut terminal, app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_preview<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    let tick = Duration::from_millis(app.config().refresh.tick_ms.max(1));
    let mut ticker = tokio::time::interval(tick);

    loop {
        ticker.tick().await;

        // Drain pending input without blocking the tick
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && !handle_key(app, key) {
                    return Ok(());
                }
            }
        }

        // Settings may have changed since the last tick; redraw from scratch
        let frame = app.render()?;
        let theme = app.theme();
        let status = app.status();
        terminal.draw(|f| ui::draw_preview(f, frame.pixmap(), &status, &theme))?;
    }
}

/// Apply one key press; returns false when the preview should exit
fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => return false,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return false,
        KeyCode::Left | KeyCode::Char('h') => app.previous(),
        KeyCode::Right | KeyCode::Char('l') => app.next(),
        KeyCode::PageUp => app.page_previous(),
        KeyCode::PageDown => app.page_next(),
        KeyCode::Char('+') | KeyCode::Char('=') => app.change_unit(1),
        KeyCode::Char('-') => app.change_unit(-1),
        KeyCode::Char('t') => app.cycle_theme(),
        _ => {}
    }
    true
}
