use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::store::builtin::BuiltinSeed;
use crate::store::file::FileSeed;
use crate::store::repo::SeedProvider;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// JSON or TOML file with `emails` and `events`. Unset means the sample inbox.
    pub seed_path: Option<String>,
    pub dark_theme: bool,
    /// Allow `o` to launch the browser on event links.
    pub open_links: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed_path: None,
            dark_theme: false,
            open_links: true,
        }
    }
}

const TEMPLATE_HEADER: &str = "\
# rs_inbox configuration
#
# seed_path = \"/path/to/inbox.json\"   # emails/events to show instead of the sample inbox
";

fn config_dir() -> Result<PathBuf> {
    Ok(dirs::config_dir()
        .ok_or_else(|| anyhow::anyhow!("no config dir available"))?
        .join("rs_inbox"))
}

pub fn config_path() -> Result<PathBuf> {
    let mut p = config_dir()?;
    fs::create_dir_all(&p)?;
    p.push("config.toml");
    Ok(p)
}

/// Log file used while the TUI owns the terminal.
pub fn log_path() -> Result<PathBuf> {
    let mut p = config_dir()?;
    fs::create_dir_all(&p)?;
    p.push("rs_inbox.log");
    Ok(p)
}

pub fn open_log_file(path: &Path) -> Result<fs::File> {
    fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

/// Reads `path`, writing a template with the defaults first if it is missing.
pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        let sample = Config::default();
        let tom = toml::to_string_pretty(&sample)?;
        fs::write(path, format!("{TEMPLATE_HEADER}\n{tom}"))
            .with_context(|| format!("writing config template {}", path.display()))?;
        info!("created template config at {}", path.display());
        return Ok(sample);
    }
    let s = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let cfg: Config =
        toml::from_str(&s).with_context(|| format!("parsing config {}", path.display()))?;
    Ok(cfg)
}

/// CLI `--seed` wins over the config file; neither means the bundled sample.
pub fn resolve_seed(cfg: &Config, cli_override: Option<&Path>) -> Box<dyn SeedProvider> {
    if let Some(p) = cli_override {
        Box::new(FileSeed::new(p))
    } else if let Some(p) = &cfg.seed_path {
        Box::new(FileSeed::new(p))
    } else {
        Box::new(BuiltinSeed)
    }
}
