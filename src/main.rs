use clap::Parser;
use colored::*;
use eyre::{Context, Result, eyre};
use kili::quiz::Learnings;
use kili::registry::Category;
use kili::scheduler::RecallScheduler;
use kili::store::{Entry, EntryContent, EntryStore, RETIREMENT_THRESHOLD};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

mod cli;
mod config;

use cli::Cli;
use cli::commands::Commands;
use config::Config;

fn setup_logging() -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("kili")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("kili.log");

    // Setup env_logger with file output
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    info!("Starting application");

    if cli.is_verbose() {
        println!("{}", "Verbose mode enabled".yellow());
    }

    let mut store = EntryStore::open(&config.storage.db_path)
        .context(format!("Failed to open store at {}", config.storage.db_path.display()))?;

    match &cli.command {
        Commands::Add { category, values, note } => {
            handle_add_command(&mut store, category, values, note.as_deref())?
        }
        Commands::Review { category, limit } => {
            handle_review_command(&mut store, category, *limit, config)?
        }
        Commands::Quiz { categories, limit, output } => {
            handle_quiz_command(&mut store, categories, *limit, output.as_deref(), config)?
        }
        Commands::Reset { category } => handle_reset_command(&mut store, category.as_deref())?,
        Commands::Stats => handle_stats_command(&store)?,
    }

    store.close()?;
    Ok(())
}

fn handle_add_command(
    store: &mut EntryStore,
    category_name: &str,
    values: &[String],
    note: Option<&str>,
) -> Result<()> {
    let category: Category = category_name.parse()?;
    let content = EntryContent::from_values(category, values).ok_or_else(|| {
        eyre!(
            "{} takes {} value(s): {}",
            category,
            category.content_fields().len(),
            category.content_fields().join(", ")
        )
    })?;

    info!("Adding entry to {}: {}", category, content.key());

    if store.add(&content, note)? {
        println!("{} {}", "Remembered:".green(), content.key());
    } else {
        println!("{} {}", "Already known:".yellow(), content.key());
    }
    Ok(())
}

fn handle_review_command(
    store: &mut EntryStore,
    category_name: &str,
    limit: Option<usize>,
    config: &Config,
) -> Result<()> {
    let category: Category = category_name.parse()?;
    let limit = limit.unwrap_or(config.review.review_limit);

    let mut scheduler = RecallScheduler::new();
    let served = scheduler.sample(store, category, limit)?;
    info!("Serving {} entries from {}", served.len(), category);

    if served.is_empty() {
        println!("{}", "Nothing left to review here. Try `kili reset`.".yellow());
        return Ok(());
    }

    for entry in &served {
        print_entry(entry);
    }
    Ok(())
}

fn handle_quiz_command(
    store: &mut EntryStore,
    category_names: &[String],
    limit: Option<usize>,
    output: Option<&Path>,
    config: &Config,
) -> Result<()> {
    let categories: Vec<Category> = if category_names.is_empty() {
        Category::ALL.to_vec()
    } else {
        category_names
            .iter()
            .map(|name| name.parse())
            .collect::<kili::Result<_>>()?
    };
    let total_limit = limit.unwrap_or(config.review.quiz_limit);

    let mut scheduler = RecallScheduler::new();
    let batch = scheduler.sample_many(store, &categories, total_limit)?;
    info!("Quiz material: {} entries from {} categories", batch.len(), categories.len());

    let learnings = Learnings::from_sampled(&batch);
    if learnings.is_empty() {
        println!("{}", "No quiz material available. Try `kili reset`.".yellow());
        return Ok(());
    }

    let json = learnings.to_json()?;
    match output {
        Some(path) => {
            fs::write(path, json).context(format!("Failed to write {}", path.display()))?;
            println!("{} {}", "Wrote quiz material to".green(), path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn handle_reset_command(store: &mut EntryStore, category_name: Option<&str>) -> Result<()> {
    match category_name {
        Some(name) => {
            let category: Category = name.parse()?;
            store.reset(Some(category))?;
            info!("Reset recall counts for {}", category);
            println!("{} {}", "Reset recall counts for".green(), category);
        }
        None => {
            store.reset(None)?;
            info!("Reset recall counts for all categories");
            println!("{}", "Reset recall counts for all categories".green());
        }
    }
    Ok(())
}

fn handle_stats_command(store: &EntryStore) -> Result<()> {
    println!(
        "{:<20} {:>7} {:>10} {:>9}",
        "category".bold(),
        "total".bold(),
        "eligible".bold(),
        "retired".bold()
    );
    for category in Category::ALL {
        let counts = store.counts(category)?;
        println!(
            "{:<20} {:>7} {:>10} {:>9}",
            category.as_str(),
            counts.total,
            counts.eligible,
            counts.retired
        );
    }
    Ok(())
}

fn print_entry(entry: &Entry) {
    let progress = format!("[{}/{}]", entry.recalled_count, RETIREMENT_THRESHOLD);
    match entry.content.paired() {
        Some(improved) => println!(
            "{}  {}  {}",
            entry.content.key().strikethrough(),
            improved.green().bold(),
            progress.as_str().dimmed()
        ),
        None => println!(
            "{}  {}",
            entry.content.key().cyan(),
            progress.as_str().dimmed()
        ),
    }
    if let Some(note) = &entry.note {
        println!("    {}", note.as_str().dimmed());
    }
}

fn main() -> Result<()> {
    setup_logging()?;

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_ref())?;

    run_application(&cli, &config)
}
