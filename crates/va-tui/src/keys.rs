use std::hash::Hash;
use std::path::PathBuf;

use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc;

use va_core::models::ColumnNames;
use va_core::services::{engine, history, registrations, sheet_writer};

use crate::app::{App, ConfirmAction, FormField, Mode, Picker, RunReport, PICKER_PAGE};
use crate::event::AppEvent;

/// Handle a key event, dispatching based on current mode.
pub fn handle_key(app: &mut App, key: KeyEvent, event_tx: &mpsc::UnboundedSender<AppEvent>) {
    tracing::debug!(mode = ?app.mode, key = ?key.code, "handle_key");

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match &app.mode {
        Mode::Form => handle_form(app, key, event_tx),
        Mode::BlacklistPicker | Mode::ExitPicker => handle_picker(app, key),
        Mode::ConfirmDialog { .. } => handle_confirm_dialog(app, key, event_tx),
        Mode::HelpDialog => handle_help_dialog(app, key),
        Mode::Roster => handle_roster(app, key),
        Mode::Loading(_) => {}
    }
}

// ─── Form Mode ──────────────────────────────────────────────────────────

fn handle_form(app: &mut App, key: KeyEvent, event_tx: &mpsc::UnboundedSender<AppEvent>) {
    match key.code {
        KeyCode::Esc => {
            app.mode = Mode::ConfirmDialog {
                message: "Quit without running another allocation?".into(),
                action: ConfirmAction::Quit,
            };
            return;
        }
        KeyCode::F(1) => {
            app.mode = Mode::HelpDialog;
            return;
        }
        KeyCode::F(5) => {
            submit(app, event_tx);
            return;
        }
        KeyCode::Tab | KeyCode::Down => {
            app.form.focus_next();
            return;
        }
        KeyCode::BackTab | KeyCode::Up => {
            app.form.focus_prev();
            return;
        }
        _ => {}
    }

    let focus = app.form.focus;
    if focus.is_text() {
        handle_text_field(app, key, event_tx);
        return;
    }

    match (focus, key.code) {
        (_, KeyCode::Char('?')) => app.mode = Mode::HelpDialog,
        (
            FormField::Round,
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right,
        ) => {
            app.form.round = app.form.round.toggle();
        }
        (FormField::Incremental, KeyCode::Enter | KeyCode::Char(' ')) => {
            app.form.incremental = !app.form.incremental;
        }
        (FormField::Blacklist, KeyCode::Enter | KeyCode::Char(' ')) => {
            open_picker(app, Mode::BlacklistPicker);
        }
        (FormField::Exits, KeyCode::Enter | KeyCode::Char(' ')) => {
            open_picker(app, Mode::ExitPicker);
        }
        (FormField::Run, KeyCode::Enter | KeyCode::Char(' ')) => {
            submit(app, event_tx);
        }
        (FormField::Run, KeyCode::Char('v')) => {
            if app.last_run.is_some() {
                app.mode = Mode::Roster;
            }
        }
        _ => {}
    }
}

fn handle_text_field(app: &mut App, key: KeyEvent, event_tx: &mpsc::UnboundedSender<AppEvent>) {
    let focus = app.form.focus;
    match key.code {
        KeyCode::Enter => match focus {
            FormField::Registrations => load_registrations(app, event_tx),
            FormField::History => load_history(app, event_tx),
            _ => app.form.focus_next(),
        },
        KeyCode::Backspace => {
            if let Some(text) = app.form.focused_text_mut() {
                text.pop();
            }
        }
        KeyCode::Char(c) => {
            if focus == FormField::Capacity && !c.is_ascii_digit() {
                return;
            }
            if let Some(text) = app.form.focused_text_mut() {
                text.push(c);
            }
        }
        _ => {}
    }
}

fn open_picker(app: &mut App, mode: Mode) {
    if app.registrations.is_none() {
        app.set_status("Load the registration sheet first");
        return;
    }
    match mode {
        Mode::BlacklistPicker => {
            app.blacklist.query.clear();
            app.blacklist.apply_filter();
        }
        Mode::ExitPicker => {
            app.exits.query.clear();
            app.exits.apply_filter();
        }
        _ => {}
    }
    app.mode = mode;
}

// ─── Background Work ────────────────────────────────────────────────────

fn load_registrations(app: &mut App, event_tx: &mpsc::UnboundedSender<AppEvent>) {
    let raw = app.form.registrations_path.trim();
    if raw.is_empty() {
        app.set_status("Registration sheet path is required");
        return;
    }
    let path = PathBuf::from(raw);
    let columns = app.config.columns.clone();
    let tx = event_tx.clone();
    app.mode = Mode::Loading(format!("Reading {}...", path.display()));

    tokio::task::spawn_blocking(move || match registrations::load_file(&path, &columns) {
        Ok(sheet) => {
            let _ = tx.send(AppEvent::RegistrationsLoaded { path, sheet });
        }
        Err(e) => {
            let _ = tx.send(AppEvent::Error(format!("Sign-up sheet: {e}")));
        }
    });
}

fn load_history(app: &mut App, event_tx: &mpsc::UnboundedSender<AppEvent>) {
    let raw = app.form.history_path.trim();
    if raw.is_empty() {
        app.set_status("History roster path is required");
        return;
    }
    let path = PathBuf::from(raw);
    let columns = app.config.columns.clone();
    let tx = event_tx.clone();
    app.mode = Mode::Loading(format!("Reading {}...", path.display()));

    tokio::task::spawn_blocking(move || match history::load_file(&path, &columns) {
        Ok(rows) => {
            let _ = tx.send(AppEvent::HistoryLoaded { path, rows });
        }
        Err(e) => {
            let _ = tx.send(AppEvent::Error(format!("History roster: {e}")));
        }
    });
}

/// Validate the form and either start the run or ask before overwriting.
fn submit(app: &mut App, event_tx: &mpsc::UnboundedSender<AppEvent>) {
    if let Err(msg) = app.build_request() {
        app.set_status(msg);
        return;
    }
    let output = app.output_path();
    if output.exists() {
        app.mode = Mode::ConfirmDialog {
            message: format!("{} already exists. Overwrite it?", output.display()),
            action: ConfirmAction::OverwriteOutput,
        };
        return;
    }
    launch_run(app, event_tx);
}

fn launch_run(app: &mut App, event_tx: &mpsc::UnboundedSender<AppEvent>) {
    let request = match app.build_request() {
        Ok(request) => request,
        Err(msg) => {
            app.set_status(msg);
            app.mode = Mode::Form;
            return;
        }
    };
    let output_path = app.output_path();
    let columns: ColumnNames = app.config.columns.clone();
    let tx = event_tx.clone();
    app.mode = Mode::Loading("Allocating...".into());

    tokio::task::spawn_blocking(move || {
        let outcome = engine::allocate(&request);
        match sheet_writer::write_roster(&output_path, &outcome.roster, &columns) {
            Ok(()) => {
                let _ = tx.send(AppEvent::AllocationFinished(RunReport {
                    outcome,
                    output_path,
                    finished_at: Local::now(),
                }));
            }
            Err(e) => {
                let _ = tx.send(AppEvent::Error(format!("Allocation failed: {e}")));
            }
        }
    });
}

// ─── Dialog Handlers ────────────────────────────────────────────────────

fn handle_picker(app: &mut App, key: KeyEvent) {
    let close = if app.mode == Mode::BlacklistPicker {
        picker_key(&mut app.blacklist, key.code)
    } else {
        picker_key(&mut app.exits, key.code)
    };
    if close {
        app.mode = Mode::Form;
    }
}

/// Apply one key to a picker. Returns true when the picker should close.
fn picker_key<K: Clone + Eq + Hash>(picker: &mut Picker<K>, code: KeyCode) -> bool {
    match code {
        KeyCode::Esc | KeyCode::Enter => return true,
        KeyCode::Up => picker.select_prev(),
        KeyCode::Down => picker.select_next(),
        KeyCode::PageUp => {
            for _ in 0..PICKER_PAGE {
                picker.select_prev();
            }
        }
        KeyCode::PageDown => {
            for _ in 0..PICKER_PAGE {
                picker.select_next();
            }
        }
        KeyCode::Char(' ') => {
            picker.toggle_current();
        }
        KeyCode::Backspace => picker.pop_query(),
        KeyCode::Char(c) => picker.push_query(c),
        _ => {}
    }
    false
}

fn handle_confirm_dialog(app: &mut App, key: KeyEvent, event_tx: &mpsc::UnboundedSender<AppEvent>) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('n') => {
            app.mode = Mode::Form;
        }
        KeyCode::Char('y') | KeyCode::Enter => {
            let action = match &app.mode {
                Mode::ConfirmDialog { action, .. } => action.clone(),
                _ => return,
            };
            match action {
                ConfirmAction::Quit => {
                    app.should_quit = true;
                }
                ConfirmAction::OverwriteOutput => {
                    launch_run(app, event_tx);
                }
            }
        }
        _ => {}
    }
}

fn handle_help_dialog(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('q') | KeyCode::Char('?') => {
            app.mode = Mode::Form;
        }
        _ => {}
    }
}

fn handle_roster(app: &mut App, key: KeyEvent) {
    let rows = app
        .last_run
        .as_ref()
        .map(|r| r.outcome.roster.len())
        .unwrap_or(0);
    match key.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('v') => {
            app.mode = Mode::Form;
        }
        KeyCode::Up => {
            app.roster_scroll = app.roster_scroll.saturating_sub(1);
        }
        KeyCode::Down => {
            if app.roster_scroll + 1 < rows {
                app.roster_scroll += 1;
            }
        }
        KeyCode::PageUp => {
            app.roster_scroll = app.roster_scroll.saturating_sub(PICKER_PAGE);
        }
        KeyCode::PageDown => {
            app.roster_scroll = (app.roster_scroll + PICKER_PAGE).min(rows.saturating_sub(1));
        }
        _ => {}
    }
}
