use anyhow::{Context, Result};
use log::{info, warn};
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use crate::store::repo::{Seed, SeedProvider};

/// Seed read from disk. `.json` files are parsed as JSON, anything else as TOML.
pub struct FileSeed {
    pub path: PathBuf,
}

impl FileSeed {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn is_json(&self) -> bool {
        self.path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"))
    }
}

impl SeedProvider for FileSeed {
    fn load(&self) -> Result<Seed> {
        let s = fs::read_to_string(&self.path)
            .with_context(|| format!("reading seed file {}", self.path.display()))?;

        let seed: Seed = if self.is_json() {
            serde_json::from_str(&s)
                .with_context(|| format!("parsing JSON seed {}", self.path.display()))?
        } else {
            toml::from_str(&s)
                .with_context(|| format!("parsing TOML seed {}", self.path.display()))?
        };

        let mut seen = HashSet::new();
        for e in &seed.emails {
            if !seen.insert(e.id) {
                warn!("{}: duplicate email id {}", self.path.display(), e.id);
            }
        }

        info!(
            "loaded {} emails and {} events from {}",
            seed.emails.len(),
            seed.events.len(),
            self.path.display()
        );
        Ok(seed)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
