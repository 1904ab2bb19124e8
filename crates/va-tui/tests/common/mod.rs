// Each test binary compiles this module independently and uses a different
// subset of helpers, so unused-function warnings are expected.
#![allow(dead_code)]

use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use ratatui::{backend::TestBackend, Terminal};
use tokio::sync::mpsc;

use va_core::models::{AllocatorConfig, ColumnNames, IdentityKey, Registrant};
use va_core::services::registrations::RegistrationSheet;
use va_tui::app::App;
use va_tui::event::AppEvent;
use va_tui::{keys, ui};

pub const W1: &str = "2024-03-01 09:00 2024-03-01 11:00";
pub const W2: &str = "2024-03-02 14:00 2024-03-02 16:00";

/// Render the app to a string using a TestBackend of the given dimensions.
pub fn render_to_string(app: &App, width: u16, height: u16) -> String {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(|f| ui::render(f, app)).unwrap();
    terminal.backend().to_string()
}

/// Config with ASCII headers so rendered tables stay one cell per char.
pub fn ascii_config() -> AllocatorConfig {
    AllocatorConfig {
        columns: ColumnNames {
            name: "Name".into(),
            student_id: "ID".into(),
            sex: "Sex".into(),
            contact: "Phone".into(),
            selections: "Times".into(),
            window: "Window".into(),
            sequence: "Seq".into(),
        },
        default_capacity: 5,
        output_file: "roster.xlsx".into(),
    }
}

pub fn make_registrant(sequence: u32, name: &str, selections: &str) -> Registrant {
    Registrant {
        identity: IdentityKey::new(name, format!("S{sequence:03}"), format!("1380000{sequence:04}")),
        sex: "F".into(),
        selections: selections.into(),
        sequence,
    }
}

/// Alice picked both windows, Bob and Carol only the first.
pub fn make_sheet() -> RegistrationSheet {
    RegistrationSheet {
        registrants: vec![
            make_registrant(1, "Alice", &format!("{W1}, {W2}")),
            make_registrant(2, "Bob", W1),
            make_registrant(3, "Carol", W1),
        ],
        skipped: Vec::new(),
    }
}

/// App with the sample sheet already loaded.
pub fn loaded_app() -> App {
    let mut app = App::new(ascii_config());
    app.form.registrations_path = "signup.xlsx".into();
    app.apply_registrations(PathBuf::from("signup.xlsx"), make_sheet());
    app
}

pub fn key_event(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        state: KeyEventState::NONE,
    }
}

/// Send a key with a throwaway channel. Only for keys that start no task.
pub fn press(app: &mut App, code: KeyCode) {
    let (tx, _rx) = mpsc::unbounded_channel::<AppEvent>();
    keys::handle_key(app, key_event(code, KeyModifiers::NONE), &tx);
}

pub fn type_text(app: &mut App, text: &str) {
    for ch in text.chars() {
        press(app, KeyCode::Char(ch));
    }
}
