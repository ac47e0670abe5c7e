use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::state::{App, HashFocus, Tab};

pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    // An open edit buffer swallows everything but Enter and Esc.
    if app.editing.is_some() {
        handle_edit_key(app, key);
        return;
    }

    match app.tab {
        Tab::Options => handle_options_key(app, key),
        Tab::Log => handle_log_key(app, key),
        Tab::Hash => handle_hash_key(app, key),
    }
}

/// Keys shared by the Options and Log tabs.
fn handle_global_key(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Tab => app.tab = app.tab.next(),
        KeyCode::Char('r') | KeyCode::F(5) => app.start_run(),
        KeyCode::Char('s') => app.save(),
        _ => return false,
    }
    true
}

fn handle_edit_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.commit_edit(),
        KeyCode::Esc => app.editing = None,
        KeyCode::Backspace => {
            if let Some(buffer) = app.editing.as_mut() {
                buffer.pop();
            }
        }
        KeyCode::Char(ch) => {
            if let Some(buffer) = app.editing.as_mut() {
                buffer.push(ch);
            }
        }
        _ => {}
    }
}

fn handle_options_key(app: &mut App, key: KeyEvent) {
    if handle_global_key(app, key) {
        return;
    }
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => {
            app.selected = (app.selected + 1).min(app.fields.len().saturating_sub(1));
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.selected = app.selected.saturating_sub(1);
        }
        KeyCode::Enter | KeyCode::Char(' ') => app.begin_edit(),
        _ => {}
    }
}

fn handle_log_key(app: &mut App, key: KeyEvent) {
    if handle_global_key(app, key) {
        return;
    }
    let max = u16::try_from(app.log.len()).unwrap_or(u16::MAX);
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            app.scroll_offset = app.scroll_offset.saturating_add(1).min(max);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.scroll_offset = app.scroll_offset.saturating_sub(1);
        }
        KeyCode::PageUp => {
            app.scroll_offset = app.scroll_offset.saturating_add(10).min(max);
        }
        KeyCode::PageDown => {
            app.scroll_offset = app.scroll_offset.saturating_sub(10);
        }
        KeyCode::End => app.scroll_offset = 0,
        _ => {}
    }
}

/// Text goes into the focused input, so only control keys act here.
fn handle_hash_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.should_quit = true,
        KeyCode::Tab => app.tab = app.tab.next(),
        KeyCode::Up | KeyCode::Down => {
            app.hash.focus = match app.hash.focus {
                HashFocus::Password => HashFocus::Rounds,
                HashFocus::Rounds => HashFocus::Password,
            };
        }
        KeyCode::Enter => app.generate_hash(),
        KeyCode::Delete => app.clear_hash(),
        KeyCode::Backspace => {
            focused_input(app).pop();
        }
        KeyCode::Char(ch) => {
            if app.hash.focus == HashFocus::Rounds && !ch.is_ascii_digit() {
                return;
            }
            focused_input(app).push(ch);
        }
        _ => {}
    }
}

fn focused_input(app: &mut App) -> &mut String {
    match app.hash.focus {
        HashFocus::Password => &mut app.hash.password,
        HashFocus::Rounds => &mut app.hash.rounds,
    }
}
