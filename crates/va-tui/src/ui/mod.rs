pub mod dialog_confirm;
pub mod dialog_help;
pub mod dialog_picker;
pub mod form;
pub mod layout;
pub mod roster_view;
pub mod status_bar;
pub mod summary;

use ratatui::Frame;

use crate::app::{App, Mode};

/// Top-level render dispatch.
pub fn render(f: &mut Frame, app: &App) {
    let chunks = layout::main_layout(f.area());

    layout::render_title(f, chunks[0]);

    if app.mode == Mode::Roster {
        roster_view::render(f, chunks[1], app);
    } else {
        let content = layout::content_layout(chunks[1]);
        form::render(f, content[0], app);
        summary::render(f, content[1], app);
    }

    status_bar::render(f, chunks[2], app);

    // Overlay dialogs
    match &app.mode {
        Mode::BlacklistPicker => dialog_picker::render(f, " Blacklist ", &app.blacklist),
        Mode::ExitPicker => dialog_picker::render(f, " Exits ", &app.exits),
        Mode::ConfirmDialog { message, .. } => dialog_confirm::render(f, message),
        Mode::HelpDialog => dialog_help::render(f),
        Mode::Loading(msg) => dialog_confirm::render_loading(f, msg),
        Mode::Form | Mode::Roster => {}
    }
}
