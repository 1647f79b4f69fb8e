mod app;
mod ui;

use anyhow::{Context, Result};
use app::App;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
    MouseEvent, MouseEventKind,
};
use crossterm::execute;
use ratatui::DefaultTerminal;
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use tui_globe::config::GlobeConfig;
use tui_globe::data;

const LOG_FILE: &str = "tui-globe.log";

fn main() -> Result<()> {
    init_tracing()?;

    let config = GlobeConfig::from_env().context("invalid globe configuration")?;
    let datasets = data::load_datasets(Path::new("data"), &config);

    // Initialize terminal
    let mut terminal = ratatui::init();
    terminal.clear()?;

    // Enable mouse capture
    execute!(std::io::stdout(), EnableMouseCapture)?;

    // Run the app
    let result = run(&mut terminal, config, datasets);

    // Disable mouse capture and restore terminal
    let _ = execute!(std::io::stdout(), DisableMouseCapture);
    ratatui::restore();

    result
}

/// The terminal belongs to the UI, so logs go to a file
fn init_tracing() -> Result<()> {
    let file = File::create(LOG_FILE).with_context(|| format!("creating {LOG_FILE}"))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Handle mouse events for rotating, zooming and hovering
fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::ScrollUp => app.wheel(1),
        MouseEventKind::ScrollDown => app.wheel(-1),
        // Click and drag to rotate
        MouseEventKind::Down(MouseButton::Left) => app.drag_start(mouse.column, mouse.row),
        MouseEventKind::Drag(MouseButton::Left) => app.drag_move(mouse.column, mouse.row),
        MouseEventKind::Up(MouseButton::Left) => app.drag_end(),
        MouseEventKind::Moved => app.hover(mouse.column, mouse.row),
        _ => {}
    }
}

fn run(terminal: &mut DefaultTerminal, config: GlobeConfig, datasets: data::Datasets) -> Result<()> {
    let size = terminal.size()?;
    let mut app = App::new(size.width as usize, size.height as usize, config, datasets);
    tracing::info!(width = size.width, height = size.height, "globe started");

    // Main loop
    loop {
        app.paint();
        terminal.draw(|frame| ui::render(frame, &app))?;

        // Handle events with ~60fps target
        if event::poll(Duration::from_millis(16))? {
            match event::read()? {
                Event::Key(key) => {
                    // Only handle key press events (not release)
                    if key.kind == KeyEventKind::Press {
                        match key.code {
                            KeyCode::Char('q') | KeyCode::Esc => app.quit(),
                            KeyCode::Char('+') | KeyCode::Char('=') => app.zoom_in(),
                            KeyCode::Char('-') | KeyCode::Char('_') => app.zoom_out(),
                            KeyCode::Char('r') | KeyCode::Char('0') => app.reset(),
                            _ => {}
                        }
                    }
                }
                Event::Mouse(mouse) => {
                    handle_mouse(&mut app, mouse);
                }
                Event::Resize(width, height) => {
                    app.resize(width as usize, height as usize);
                }
                _ => {}
            }
        }

        // Advance the spin
        app.tick();

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
