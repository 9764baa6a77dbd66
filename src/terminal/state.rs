use anyhow::Result;
use log::{debug, warn};
use ratatui::widgets::ListState;

use crate::config::Config;
use crate::domain::email::{Email, EmailId, Event};
use crate::nav::{Navigator, Route};
use crate::store::EmailStore;

pub struct AppState {
    pub store: EmailStore,
    pub nav: Navigator,

    pub main_list: ListState,
    pub fav_list: ListState,

    /// True while `/` input is capturing keystrokes.
    pub searching: bool,

    pub body_scroll: u16,
    pub dark_theme: bool,
    pub open_links: bool,
    pub status: Option<String>,
}

impl AppState {
    pub fn new(store: EmailStore, cfg: &Config) -> Self {
        let mut s = Self {
            store,
            nav: Navigator::new(),
            main_list: ListState::default(),
            fav_list: ListState::default(),
            searching: false,
            body_scroll: 0,
            dark_theme: cfg.dark_theme,
            open_links: cfg.open_links,
            status: None,
        };
        s.clamp_selection();
        s
    }

    pub fn route(&self) -> Route {
        self.nav.current()
    }

    /// Ids of the list on screen, in display order. Empty on the detail view.
    pub fn shown_ids(&self) -> Vec<EmailId> {
        match self.route() {
            Route::Main => self.store.visible().iter().map(|e| e.id).collect(),
            Route::Favorites => self.store.favorites().iter().map(|e| e.id).collect(),
            Route::Detail(_) => Vec::new(),
        }
    }

    fn list_state_mut(&mut self) -> Option<&mut ListState> {
        match self.route() {
            Route::Main => Some(&mut self.main_list),
            Route::Favorites => Some(&mut self.fav_list),
            Route::Detail(_) => None,
        }
    }

    pub fn selected_id(&self) -> Option<EmailId> {
        let idx = match self.route() {
            Route::Main => self.main_list.selected()?,
            Route::Favorites => self.fav_list.selected()?,
            Route::Detail(_) => return None,
        };
        self.shown_ids().get(idx).copied()
    }

    /// Email of the open detail view, if the route's id exists.
    pub fn opened_email(&self) -> Option<&Email> {
        match self.route() {
            Route::Detail(id) => self.store.find_by_id(id),
            _ => None,
        }
    }

    pub fn opened_event(&self) -> Option<&Event> {
        let email = self.opened_email()?;
        if !email.has_event {
            return None;
        }
        self.store.event_for(email.id)
    }

    pub fn move_selection(&mut self, delta: i32) {
        let len = self.shown_ids().len() as i32;
        let Some(ls) = self.list_state_mut() else {
            return;
        };
        if len == 0 {
            ls.select(None);
            return;
        }
        let cur = ls.selected().unwrap_or(0) as i32;
        let next = (cur + delta).clamp(0, len - 1) as usize;
        ls.select(Some(next));
    }

    pub fn select_first(&mut self) {
        let empty = self.shown_ids().is_empty();
        if let Some(ls) = self.list_state_mut() {
            ls.select(if empty { None } else { Some(0) });
        }
    }

    pub fn select_last(&mut self) {
        let len = self.shown_ids().len();
        if let Some(ls) = self.list_state_mut() {
            ls.select(len.checked_sub(1));
        }
    }

    /// Keeps both list selections inside their lists after a mutation.
    pub fn clamp_selection(&mut self) {
        let main_len = self.store.visible_len();
        let fav_len = self.store.favorites().len();
        clamp(&mut self.main_list, main_len);
        clamp(&mut self.fav_list, fav_len);
    }

    pub fn open_selected(&mut self) {
        if let Some(id) = self.selected_id() {
            self.open_id(id);
        }
    }

    /// Opens the detail view for `id`. Unknown ids still navigate and render
    /// a placeholder.
    pub fn open_id(&mut self, id: EmailId) {
        if self.store.find_by_id(id).is_none() {
            warn!("opening unknown email {id}");
        } else if let Some(pos) = self.store.visible().iter().position(|e| e.id == id) {
            self.main_list.select(Some(pos));
        }
        self.body_scroll = 0;
        self.nav.push(Route::Detail(id));
    }

    pub fn back(&mut self) -> bool {
        let moved = self.nav.back();
        if moved {
            self.body_scroll = 0;
            self.clamp_selection();
        }
        moved
    }

    /// Flips between the inbox and favorites tabs.
    pub fn switch_tab(&mut self) {
        let next = match self.route() {
            Route::Favorites => Route::Main,
            _ => Route::Favorites,
        };
        self.nav.switch_tab(next);
        self.body_scroll = 0;
        self.clamp_selection();
    }

    /// Toggles the star of the opened email, or of the selected list row.
    pub fn toggle_star(&mut self) {
        let target = match self.route() {
            Route::Detail(id) => Some(id),
            _ => self.selected_id(),
        };
        let Some(id) = target else {
            return;
        };
        self.status = match self.store.toggle_favorite(id) {
            Some(true) => Some("Added to favorites".to_string()),
            Some(false) => Some("Removed from favorites".to_string()),
            None => Some(format!("Email {id} not found")),
        };
        self.clamp_selection();
    }

    pub fn begin_search(&mut self) {
        if matches!(self.route(), Route::Detail(_)) {
            return;
        }
        self.searching = true;
    }

    pub fn search_push(&mut self, c: char) {
        let mut q = self.store.query().to_string();
        q.push(c);
        self.apply_query(&q);
    }

    pub fn search_pop(&mut self) {
        let mut q = self.store.query().to_string();
        q.pop();
        self.apply_query(&q);
    }

    /// Leaves input mode, keeping the filter.
    pub fn commit_search(&mut self) {
        self.searching = false;
    }

    /// Leaves input mode and clears the filter.
    pub fn cancel_search(&mut self) {
        self.searching = false;
        self.apply_query("");
    }

    fn apply_query(&mut self, q: &str) {
        self.store.search(q);
        self.main_list.select(if self.store.visible_len() == 0 {
            None
        } else {
            Some(0)
        });
    }

    pub fn toggle_theme(&mut self) {
        self.dark_theme = !self.dark_theme;
        debug!("dark_theme={}", self.dark_theme);
    }

    pub fn scroll_body(&mut self, delta: i32) {
        if !matches!(self.route(), Route::Detail(_)) {
            return;
        }
        if delta < 0 {
            self.body_scroll = self.body_scroll.saturating_sub(delta.unsigned_abs() as u16);
        } else {
            self.body_scroll = self.body_scroll.saturating_add(delta as u16);
        }
    }

    /// Hands the opened event's link to `opener`, recording the outcome in
    /// the status line.
    pub fn open_event_link(&mut self, opener: impl FnOnce(&str) -> Result<()>) {
        if !self.open_links {
            self.status = Some("Opening links is disabled in the config".to_string());
            return;
        }
        let Some(link) = self
            .opened_event()
            .filter(|ev| ev.has_link())
            .map(|ev| ev.link.clone())
        else {
            self.status = Some("No event link to open".to_string());
            return;
        };
        self.status = Some(match opener(&link) {
            Ok(()) => format!("Opened {link}"),
            Err(e) => {
                warn!("failed to open {link}: {e:#}");
                format!("Could not open {link}: {e}")
            }
        });
    }
}

fn clamp(ls: &mut ListState, len: usize) {
    match ls.selected() {
        _ if len == 0 => ls.select(None),
        None => ls.select(Some(0)),
        Some(i) if i >= len => ls.select(Some(len - 1)),
        Some(_) => {}
    }
}
