use std::io;
use std::path::{Path, PathBuf};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::sync::mpsc;

use va_core::models::AllocatorConfig;
use va_core::services::config_loader;
use va_tui::app::App;
use va_tui::event::{process_event, spawn_input_task, AppEvent};
use va_tui::{keys, ui};

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    // Parse CLI args
    let args: Vec<String> = std::env::args().collect();
    let debug = args.iter().any(|a| a == "--debug");
    let headless_script = flag_value(&args, "--headless").map(PathBuf::from);
    let config_path = flag_value(&args, "--config").map(PathBuf::from);

    // Set up debug logging if requested
    let _guard = if debug || headless_script.is_some() {
        Some(setup_debug_logging())
    } else {
        None
    };

    let config = load_config(config_path.as_deref())?;

    if let Some(script_path) = headless_script {
        run_headless(script_path, config).await
    } else {
        run_interactive(config).await
    }
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
}

/// Explicit `--config` must exist; otherwise look in the working directory.
fn load_config(path: Option<&Path>) -> color_eyre::Result<AllocatorConfig> {
    let config = match path {
        Some(path) => config_loader::load_file(path)?,
        None => config_loader::load(&std::env::current_dir()?)?,
    };
    tracing::debug!(
        capacity = config.default_capacity,
        output = %config.output_file,
        "config_loaded"
    );
    Ok(config)
}

/// Configure file-based tracing to `.volunteer-admit-debug.log` in CWD.
/// Returns the guard that must be held alive for the duration of the program.
fn setup_debug_logging() -> tracing_appender::non_blocking::WorkerGuard {
    let file_appender = tracing_appender::rolling::never(".", ".volunteer-admit-debug.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .with_ansi(false)
        .init();

    guard
}

/// Run the normal interactive TUI with crossterm backend.
async fn run_interactive(config: AllocatorConfig) -> color_eyre::Result<()> {
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<AppEvent>();
    let _input_task = spawn_input_task(event_tx.clone());

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config);

    // Main event loop
    loop {
        terminal.draw(|f| ui::render(f, &app))?;

        if let Some(event) = event_rx.recv().await {
            process_event(&mut app, event, &event_tx);
        }

        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}

/// Run headless mode: read scripted input, render to TestBackend, dump frames to stdout.
async fn run_headless(script_path: PathBuf, config: AllocatorConfig) -> color_eyre::Result<()> {
    use ratatui::backend::TestBackend;

    let script = std::fs::read_to_string(&script_path)?;

    // No spawn_input_task, input comes from the script
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<AppEvent>();

    let backend = TestBackend::new(120, 40);
    let mut terminal = Terminal::new(backend)?;
    let mut app = App::new(config);

    for raw_line in script.lines() {
        let line = raw_line.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }

        if line == "quit" {
            break;
        }

        if line == "screenshot" {
            headless_screenshot(&mut terminal, &app, None)?;
            continue;
        }

        if let Some(label) = line.strip_prefix("screenshot:") {
            headless_screenshot(&mut terminal, &app, Some(label.trim()))?;
            continue;
        }

        if let Some(ms_str) = line.strip_prefix("wait:") {
            let ms: u64 = ms_str.trim().parse().unwrap_or(100);
            headless_wait(&mut app, &mut event_rx, &event_tx, ms).await;
            continue;
        }

        if let Some(text) = line.strip_prefix("type:") {
            for ch in text.chars() {
                keys::handle_key(&mut app, script_key(KeyCode::Char(ch)), &event_tx);
            }
            continue;
        }

        if let Some(name) = line.strip_prefix("key:") {
            match key_code(name.trim()) {
                Some(code) => keys::handle_key(&mut app, script_key(code), &event_tx),
                None => eprintln!("headless: unknown key '{}'", name.trim()),
            }
            continue;
        }

        eprintln!("headless: unknown command '{line}'");
    }

    Ok(())
}

/// Map a script key name to a key code. Single characters map to themselves.
fn key_code(name: &str) -> Option<KeyCode> {
    let code = match name {
        "enter" => KeyCode::Enter,
        "esc" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "backtab" => KeyCode::BackTab,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "backspace" => KeyCode::Backspace,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        "space" => KeyCode::Char(' '),
        "f1" => KeyCode::F(1),
        "f5" => KeyCode::F(5),
        _ => {
            let mut chars = name.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => KeyCode::Char(ch),
                _ => return None,
            }
        }
    };
    Some(code)
}

fn script_key(code: KeyCode) -> KeyEvent {
    let modifiers = if code == KeyCode::BackTab {
        KeyModifiers::SHIFT
    } else {
        KeyModifiers::NONE
    };
    KeyEvent::new(code, modifiers)
}

/// Render the current app state to the TestBackend and dump frame text to stdout.
fn headless_screenshot(
    terminal: &mut Terminal<ratatui::backend::TestBackend>,
    app: &App,
    label: Option<&str>,
) -> color_eyre::Result<()> {
    if let Some(label) = label {
        println!("=== {label} ===");
    }
    terminal.draw(|f| ui::render(f, app))?;
    let buf = terminal.backend().buffer();
    for y in 0..buf.area.height {
        let mut line = String::new();
        for x in 0..buf.area.width {
            line.push_str(buf[(x, y)].symbol());
        }
        println!("{}", line.trim_end());
    }
    Ok(())
}

/// Drain background events for `ms` milliseconds so loads and runs can finish.
async fn headless_wait(
    app: &mut App,
    event_rx: &mut mpsc::UnboundedReceiver<AppEvent>,
    event_tx: &mpsc::UnboundedSender<AppEvent>,
    ms: u64,
) {
    let deadline = tokio::time::Instant::now() + std::time::Duration::from_millis(ms);
    while tokio::time::Instant::now() < deadline {
        while let Ok(event) = event_rx.try_recv() {
            process_event(app, event, event_tx);
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }
}
