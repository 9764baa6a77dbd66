use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use log::info;
use std::path::PathBuf;

use rs_inbox::config::{
    Config, load_config, load_config_from, log_path, open_log_file, resolve_seed,
};
use rs_inbox::domain::email::{Email, EmailId};
use rs_inbox::store::EmailStore;
use rs_inbox::terminal::run_tui;

#[derive(Parser)]
#[command(name = "rs_inbox")]
#[command(about = "Terminal inbox over a static set of emails", long_about = None)]
struct Cli {
    /// Config file (defaults to <config dir>/rs_inbox/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Seed file with emails/events, overrides the config
    #[arg(long, global = true)]
    seed: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the TUI (default). Logs go to <config dir>/rs_inbox/rs_inbox.log
    Tui {
        /// Open a specific email on start
        #[arg(long)]
        open: Option<EmailId>,
    },

    /// Print the inbox without the TUI
    List {
        /// Filter by sender or subject (case-insensitive)
        #[arg(long, short, conflicts_with = "favorites")]
        query: Option<String>,

        /// Only starred emails
        #[arg(long)]
        favorites: bool,

        #[arg(long)]
        json: bool,
    },

    /// Print one email and its event
    Show { id: EmailId },
}

fn load_store(cli: &Cli) -> Result<(Config, EmailStore)> {
    let cfg = match &cli.config {
        Some(p) => load_config_from(p),
        None => load_config(),
    }
    .map_err(|e| anyhow!("Configuration error: {e:#}"))?;

    let provider = resolve_seed(&cfg, cli.seed.as_deref());
    let seed = provider
        .load()
        .with_context(|| format!("loading {}", provider.describe()))?;
    info!("using {}", provider.describe());
    Ok((cfg, seed.into_store()))
}

fn print_row(e: &Email) {
    let star = if e.is_starred { '★' } else { ' ' };
    println!("{star} {:>4}  {}  |  {}", e.id, e.sender, e.subject);
}

impl Cli {
    fn is_tui(&self) -> bool {
        matches!(self.cmd, None | Some(Command::Tui { .. }))
    }
}

/// The TUI owns the terminal, so its logs go to a file instead of stderr.
fn init_logging(tui: bool) {
    let mut builder = env_logger::Builder::from_default_env();
    if tui {
        match log_path().and_then(|p| open_log_file(&p)) {
            Ok(file) => {
                builder.target(env_logger::Target::Pipe(Box::new(file)));
            }
            Err(e) => {
                eprintln!("Warning: logging disabled for the TUI: {e:#}");
                builder.filter_level(log::LevelFilter::Off);
            }
        }
    }
    builder.init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.is_tui());
    let (cfg, mut store) = load_store(&cli)?;

    match cli.cmd.unwrap_or(Command::Tui { open: None }) {
        Command::Tui { open } => run_tui(store, &cfg, open),

        Command::List {
            query,
            favorites,
            json,
        } => {
            if let Some(q) = &query {
                store.search(q);
            }
            let rows = if favorites {
                store.favorites()
            } else {
                store.visible()
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                rows.into_iter().for_each(print_row);
            }
            Ok(())
        }

        Command::Show { id } => {
            let email = store
                .find_by_id(id)
                .ok_or_else(|| anyhow!("no email with id {id}"))?;
            println!("From:    {}", email.sender);
            println!("Subject: {}", email.subject);
            if email.is_starred {
                println!("Starred");
            }
            if email.has_event {
                match store.event_for(id) {
                    Some(ev) => {
                        println!(
                            "Event:   {} on {} {}-{}",
                            ev.title, ev.date, ev.start_time, ev.end_time
                        );
                        if ev.has_link() {
                            println!("Link:    {}", ev.link);
                        }
                    }
                    None => println!("Event:   (no details)"),
                }
            }
            println!();
            println!("{}", email.content);
            Ok(())
        }
    }
}
