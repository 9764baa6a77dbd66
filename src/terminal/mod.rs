pub mod events;
pub mod state;
pub mod theme;
pub mod ui;

use anyhow::{Result, anyhow};
use crossterm::event::{self, Event};
use ratatui::DefaultTerminal;

use crate::config::Config;
use crate::domain::email::EmailId;
use crate::store::EmailStore;
use crate::terminal::state::AppState;

/// Runs the interactive viewer until the user quits. `open` jumps straight to
/// that email's detail view.
pub fn run_tui(store: EmailStore, cfg: &Config, open: Option<EmailId>) -> Result<()> {
    color_eyre::install().map_err(|e| anyhow!("installing panic hook: {e}"))?;

    let mut state = AppState::new(store, cfg);
    if let Some(id) = open {
        state.open_id(id);
    }

    let terminal = ratatui::init();
    let result = run(terminal, &mut state);
    ratatui::restore();

    result
}

fn run(mut terminal: DefaultTerminal, state: &mut AppState) -> Result<()> {
    loop {
        terminal.draw(|f| ui::render(f, state))?;
        if let Event::Key(key) = event::read()? {
            if events::handle_key(key, state)? {
                break;
            }
        }
    }
    Ok(())
}
