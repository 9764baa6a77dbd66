use log::debug;

use crate::domain::email::EmailId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Main,
    Favorites,
    Detail(EmailId),
}

/// Back stack of routes. Never empty; the bottom entry is a top-level tab.
#[derive(Debug, Clone)]
pub struct Navigator {
    stack: Vec<Route>,
}

impl Navigator {
    pub fn new() -> Self {
        Self {
            stack: vec![Route::Main],
        }
    }

    pub fn current(&self) -> Route {
        self.stack.last().copied().unwrap_or_default()
    }

    pub fn push(&mut self, route: Route) {
        debug!("navigate {:?} -> {:?}", self.current(), route);
        self.stack.push(route);
    }

    /// Jump to a top-level view, dropping the back stack.
    pub fn switch_tab(&mut self, route: Route) {
        debug!("switch tab -> {route:?}");
        self.stack.clear();
        self.stack.push(route);
    }

    /// Returns false when already at the root.
    pub fn back(&mut self) -> bool {
        if self.stack.len() <= 1 {
            return false;
        }
        self.stack.pop();
        debug!("back -> {:?}", self.current());
        true
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}
