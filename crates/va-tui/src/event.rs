use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use tokio::sync::mpsc;

use va_core::models::RosterRow;
use va_core::services::registrations::RegistrationSheet;

use crate::app::{App, Mode, RunReport};
use crate::keys;

/// Events flowing into the main loop.
#[derive(Debug)]
pub enum AppEvent {
    /// A key press from the user.
    Key(KeyEvent),
    /// A background task failed; the message goes to the status bar.
    Error(String),
    /// The sign-up sheet was read and parsed.
    RegistrationsLoaded {
        path: PathBuf,
        sheet: RegistrationSheet,
    },
    /// The previous round's roster was read and parsed.
    HistoryLoaded { path: PathBuf, rows: Vec<RosterRow> },
    /// An allocation run finished and its roster was written.
    AllocationFinished(RunReport),
}

/// Spawn the crossterm input polling task.
pub fn spawn_input_task(tx: mpsc::UnboundedSender<AppEvent>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            // Poll crossterm events with 50ms timeout (non-blocking feel)
            let has_event = tokio::task::spawn_blocking(|| {
                event::poll(Duration::from_millis(50)).unwrap_or(false)
            })
            .await
            .unwrap_or(false);

            if has_event {
                if let Ok(Event::Key(key)) = tokio::task::spawn_blocking(event::read)
                    .await
                    .unwrap_or(Err(std::io::Error::other("spawn_blocking failed")))
                {
                    if tx.send(AppEvent::Key(key)).is_err() {
                        break;
                    }
                }
            }
        }
    })
}

/// Apply one event to the app state.
pub fn process_event(app: &mut App, event: AppEvent, event_tx: &mpsc::UnboundedSender<AppEvent>) {
    match event {
        AppEvent::Key(key) => {
            if key.kind == KeyEventKind::Press {
                keys::handle_key(app, key, event_tx);
            }
        }
        AppEvent::Error(msg) => {
            tracing::debug!(error = %msg, "event_error");
            app.set_status(format!("Error: {msg}"));
            if matches!(app.mode, Mode::Loading(_)) {
                app.mode = Mode::Form;
            }
        }
        AppEvent::RegistrationsLoaded { path, sheet } => {
            tracing::debug!(
                path = %path.display(),
                registrants = sheet.registrants.len(),
                "registrations_loaded"
            );
            app.apply_registrations(path, sheet);
        }
        AppEvent::HistoryLoaded { path, rows } => {
            tracing::debug!(path = %path.display(), rows = rows.len(), "history_loaded");
            app.apply_history(path, rows);
        }
        AppEvent::AllocationFinished(report) => {
            tracing::debug!(rows = report.outcome.roster.len(), "allocation_finished");
            app.apply_run(report);
        }
    }
}
