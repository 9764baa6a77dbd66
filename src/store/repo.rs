use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::email::{Email, Event};
use crate::store::email_store::EmailStore;

/// Everything the app starts with: emails in display order plus their events.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Seed {
    #[serde(default)]
    pub emails: Vec<Email>,
    #[serde(default)]
    pub events: Vec<Event>,
}

impl Seed {
    pub fn into_store(self) -> EmailStore {
        EmailStore::new(self.emails).with_events(self.events)
    }
}

pub trait SeedProvider {
    fn load(&self) -> Result<Seed>;

    /// Short label for logs and the status bar.
    fn describe(&self) -> String;
}
