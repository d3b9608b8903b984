//! CLI entry point for the arxiv-digest tool.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::{Days, Utc};
use clap::Parser;
use tracing::{debug, info};

use arxiv_digest::app_config::{FileConfig, load_default_file_config, load_file_config};
use arxiv_digest::{Connector, FeedDownloader, MailSender, Update};

mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Determine log level based on verbose/quiet flags
    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    debug!(?args, "CLI arguments parsed");

    let config = match &args.config {
        Some(path) => load_file_config(path)?,
        None => {
            let loaded = load_default_file_config()?;
            if loaded.loaded_from_file {
                debug!(path = ?loaded.path, "config file loaded");
            }
            loaded.config.unwrap_or_default()
        }
    };

    let Some(email) = args.email.clone().or_else(|| config.email.clone()) else {
        bail!("no recipient given\n  Suggestion: pass --email or set `email` in the config file");
    };

    let last_n_days = args.last_n_days.or(config.last_n_days).unwrap_or(1);
    let since = Utc::now()
        .date_naive()
        .checked_sub_days(Days::new(u64::from(last_n_days)))
        .context("cutoff date out of range")?;
    let suppress = args.suppress || config.suppress.unwrap_or(false);

    let mut update = Update::new(since);
    update.set_connector(if args.and_not_or {
        Connector::And
    } else {
        Connector::Or
    });
    add_search_terms(&mut update, &args, &config)?;

    info!(since = %since, "searching arXiv");
    let mut downloader = FeedDownloader::default();
    update.search(&mut downloader).await?;

    if update.should_send(suppress) {
        let sender = MailSender::new()?;
        sender
            .send(update.digest(), std::slice::from_ref(&email))
            .await?;
        info!(email = %email, "update sent");
    } else {
        info!("no new entries matching the search; mail suppressed");
    }

    Ok(())
}

/// Collects search terms from the config file, term files, and literal flags,
/// in that order.
fn add_search_terms(update: &mut Update, args: &Args, config: &FileConfig) -> Result<()> {
    if let Some(values) = &config.category {
        update.add_categories(values.iter().map(String::as_str))?;
    }
    if let Some(path) = &args.categories {
        let terms = read_terms(path)?;
        update.add_categories(terms.iter().map(String::as_str))?;
    }
    update.add_categories(args.category.iter().map(String::as_str))?;

    if let Some(values) = &config.author {
        update.add_authors(values.iter().cloned());
    }
    if let Some(path) = &args.author {
        update.add_authors(read_terms(path)?);
    }
    update.add_authors(args.author_list.iter().cloned());

    if let Some(values) = &config.title {
        update.add_title_words(values.iter().cloned());
    }
    if let Some(path) = &args.title {
        update.add_title_words(read_terms(path)?);
    }
    update.add_title_words(args.title_list.iter().cloned());

    if let Some(values) = &config.abstract_terms {
        update.add_abstract_words(values.iter().cloned());
    }
    if let Some(path) = &args.abstract_file {
        update.add_abstract_words(read_terms(path)?);
    }
    update.add_abstract_words(args.abstract_list.iter().cloned());

    Ok(())
}

/// Reads a whitespace-separated term file.
fn read_terms(path: &Path) -> Result<Vec<String>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read term file '{}'", path.display()))?;
    Ok(raw.split_whitespace().map(str::to_string).collect())
}
