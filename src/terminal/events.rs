use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::nav::Route;
use crate::terminal::state::AppState;

/// Returns Ok(true) when the app should quit.
pub fn handle_key(key: KeyEvent, state: &mut AppState) -> Result<bool> {
    if key.kind != KeyEventKind::Press {
        return Ok(false);
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Ok(true);
    }

    if state.searching {
        handle_search_keys(key, state);
        return Ok(false);
    }

    state.status = None;

    match key.code {
        KeyCode::Char('q') => return Ok(true),

        KeyCode::Esc => {
            if state.back() {
                return Ok(false);
            }
            if state.store.is_filtered() {
                state.cancel_search();
                return Ok(false);
            }
            return Ok(true);
        }

        KeyCode::Tab => {
            state.switch_tab();
            return Ok(false);
        }

        KeyCode::Char('s') => {
            state.toggle_star();
            return Ok(false);
        }

        KeyCode::Char('t') => {
            state.toggle_theme();
            return Ok(false);
        }

        _ => {}
    }

    match state.route() {
        Route::Main | Route::Favorites => handle_list_keys(key, state),
        Route::Detail(_) => handle_detail_keys(key, state),
    }
    Ok(false)
}

fn handle_search_keys(key: KeyEvent, state: &mut AppState) {
    match key.code {
        KeyCode::Enter => state.commit_search(),
        KeyCode::Esc => state.cancel_search(),
        KeyCode::Backspace => state.search_pop(),
        KeyCode::Char(c) => state.search_push(c),
        _ => {}
    }
}

fn handle_list_keys(key: KeyEvent, state: &mut AppState) {
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => state.move_selection(1),
        KeyCode::Up | KeyCode::Char('k') => state.move_selection(-1),
        KeyCode::Home => state.select_first(),
        KeyCode::End => state.select_last(),
        KeyCode::Enter => state.open_selected(),
        KeyCode::Char('/') => state.begin_search(),
        _ => {}
    }
}

fn handle_detail_keys(key: KeyEvent, state: &mut AppState) {
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => state.scroll_body(1),
        KeyCode::Up | KeyCode::Char('k') => state.scroll_body(-1),
        KeyCode::PageDown => state.scroll_body(10),
        KeyCode::PageUp => state.scroll_body(-10),
        KeyCode::Home => state.body_scroll = 0,
        KeyCode::Backspace => {
            state.back();
        }
        KeyCode::Char('o') => state.open_event_link(|link| Ok(open::that(link)?)),
        _ => {}
    }
}
