mod common;

use crossterm::event::KeyCode;

use va_core::models::{AssignmentKey, IdentityKey};
use va_tui::app::{App, FormField, Mode, Picker};

use common::{ascii_config, loaded_app, press, render_to_string, type_text, W1, W2};

fn alice() -> IdentityKey {
    IdentityKey::new("Alice", "S001", "13800000001")
}

#[test]
fn options_follow_signup_order() {
    let app = loaded_app();
    let people: Vec<&str> = app
        .blacklist
        .options
        .iter()
        .map(|(_, label)| label.as_str())
        .collect();
    assert_eq!(people, ["Alice (S001)", "Bob (S002)", "Carol (S003)"]);

    let pairs: Vec<&str> = app.exits.options.iter().map(|(_, l)| l.as_str()).collect();
    assert_eq!(pairs.len(), 4);
    assert_eq!(pairs[0], format!("Alice - {W1}"));
    assert_eq!(pairs[1], format!("Alice - {W2}"));
}

#[test]
fn fuzzy_filter_narrows_options() {
    let mut picker: Picker<u32> = Picker::default();
    picker.set_options(vec![
        (1, "Alice (S001)".into()),
        (2, "Bob (S002)".into()),
        (3, "Carol (S003)".into()),
    ]);
    picker.push_query('b');
    picker.push_query('o');
    assert_eq!(picker.filtered, vec![1]);

    picker.pop_query();
    picker.pop_query();
    assert_eq!(picker.filtered, vec![0, 1, 2]);

    for c in "zzz".chars() {
        picker.push_query(c);
    }
    assert!(picker.filtered.is_empty());
    assert!(!picker.toggle_current());
}

#[test]
fn reloading_options_drops_stale_choices() {
    let mut picker: Picker<u32> = Picker::default();
    picker.set_options(vec![(1, "one".into()), (2, "two".into())]);
    picker.select_next();
    assert!(picker.toggle_current());
    assert!(picker.chosen.contains(&2));

    picker.set_options(vec![(1, "one".into()), (3, "three".into())]);
    assert!(picker.chosen.is_empty());
    assert_eq!(picker.cursor, 0);
}

#[test]
fn picker_requires_loaded_sheet() {
    let mut app = App::new(ascii_config());
    app.form.focus = FormField::Blacklist;
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.mode, Mode::Form);
    assert_eq!(
        app.status_message.as_deref(),
        Some("Load the registration sheet first")
    );
}

#[test]
fn blacklist_selection_reaches_request() {
    let mut app = loaded_app();
    app.form.focus = FormField::Blacklist;
    press(&mut app, KeyCode::Char(' '));
    assert_eq!(app.mode, Mode::BlacklistPicker);

    // Space toggles instead of filtering.
    press(&mut app, KeyCode::Char(' '));
    assert!(app.blacklist.query.is_empty());
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.mode, Mode::Form);

    let request = app.build_request().unwrap();
    assert_eq!(request.blacklist.len(), 1);
    assert!(request.blacklist.contains(&alice()));

    let output = render_to_string(&app, 120, 30);
    assert!(output.contains("1 selected"));
}

#[test]
fn exit_picker_filters_then_toggles() {
    let mut app = loaded_app();
    app.form.focus = FormField::Exits;
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.mode, Mode::ExitPicker);

    type_text(&mut app, "carol");
    assert_eq!(app.exits.filtered.len(), 1);
    press(&mut app, KeyCode::Char(' '));
    press(&mut app, KeyCode::Esc);

    let expected = AssignmentKey::new(
        IdentityKey::new("Carol", "S003", "13800000003"),
        W1.parse().unwrap(),
    );
    assert_eq!(app.exits.chosen.len(), 1);
    assert!(app.exits.chosen.contains(&expected));

    // Reopening clears the filter but keeps the choice.
    press(&mut app, KeyCode::Enter);
    assert!(app.exits.query.is_empty());
    assert_eq!(app.exits.filtered.len(), 4);
    assert!(app.exits.chosen.contains(&expected));
}

#[test]
fn picker_renders_marks_and_filter() {
    let mut app = loaded_app();
    app.mode = Mode::BlacklistPicker;
    app.blacklist.select_next();
    app.blacklist.toggle_current();

    let output = render_to_string(&app, 120, 40);
    assert!(output.contains("Blacklist"));
    assert!(output.contains("[x] Bob (S002)"));
    assert!(output.contains("[ ] Alice (S001)"));
    assert!(output.contains("1 selected"));

    app.blacklist.query = "qqq".into();
    app.blacklist.apply_filter();
    let output = render_to_string(&app, 120, 40);
    assert!(output.contains("No matches"));
}
