use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use hourly_quote_core::{render, Category, Config, FetchOutcome};
use tracing::warn;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

mod app;
mod handler;
mod tui;
mod ui;

use app::{build_scheduler, App};
use tui::EventHandler;

#[derive(Parser)]
#[command(name = "hourly-quote")]
#[command(about = "A terminal widget that shows a quote and refreshes it every hour")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the widget once and exit
    Show {
        /// Text width
        #[arg(short, long, default_value = "40")]
        width: usize,
    },
    /// Fetch the next quote, print it and exit
    Next {
        /// Category to fetch from (overrides the config)
        #[arg(short, long)]
        category: Option<String>,
        /// Text width
        #[arg(short, long, default_value = "40")]
        width: usize,
    },
    /// List available categories
    Categories,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = init_tracing() {
        eprintln!("Logging disabled: {}", e);
    }

    let config = Config::load().unwrap_or_else(|e| {
        warn!("Could not load config, using defaults: {}", e);
        Config::new()
    });

    match cli.command {
        None => run_tui(&config).await,
        Some(Commands::Show { width }) => show(&config, width),
        Some(Commands::Next { category, width }) => next(&config, category.as_deref(), width).await,
        Some(Commands::Categories) => list_categories(&config),
    }
}

/// Log to a file under the cache directory so output never lands on the TUI.
fn init_tracing() -> Result<()> {
    let log_dir = dirs::cache_dir()
        .ok_or_else(|| anyhow!("Could not determine cache directory"))?
        .join("hourly-quote");
    std::fs::create_dir_all(&log_dir)?;

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("hourly-quote.log"))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(true),
        )
        .try_init()?;

    Ok(())
}

async fn run_tui(config: &Config) -> Result<()> {
    let mut app = App::new(config);

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let mut events = EventHandler::new();

    let result = async {
        while !app.should_quit {
            terminal.draw(|frame| ui::render(&mut app, frame))?;

            match events.next().await {
                Some(event) => handler::handle_event(&mut app, event).await?,
                None => break,
            }
        }
        Ok::<(), anyhow::Error>(())
    }
    .await;

    tui::restore()?;
    result
}

fn show(config: &Config, width: usize) -> Result<()> {
    let mut scheduler = build_scheduler(config);
    let timeline = scheduler.on_tick(Local::now());

    for entry in &timeline.entries {
        println!("{}", render(entry, width));
    }
    Ok(())
}

async fn next(config: &Config, category: Option<&str>, width: usize) -> Result<()> {
    let mut scheduler = build_scheduler(config);

    if let Some(id) = category {
        let category = Category::from_str(id).ok_or_else(|| {
            anyhow!(
                "Unknown category '{}'. Run `hourly-quote categories` to see the options",
                id
            )
        })?;
        scheduler.on_config_change(Some(category));
    }

    // Failures leave the previous quote in place, same as the interactive widget
    if let FetchOutcome::Failed(e) = scheduler.on_user_action().await {
        warn!("Showing previous quote: {}", e);
    }

    println!("{}", render(&scheduler.snapshot(Local::now()), width));
    Ok(())
}

fn list_categories(config: &Config) -> Result<()> {
    let selected = config.selected_category();

    for category in Category::all() {
        let marker = if Some(category) == selected { "*" } else { " " };
        println!("{} {}", marker, category.display_name());
    }
    Ok(())
}
