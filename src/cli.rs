//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

/// Email digests of new arXiv submissions matching saved searches.
///
/// Builds a search from the given authors, title/abstract keywords, and
/// categories, collects everything updated since the cutoff date, and mails
/// the resulting digest. A config file can provide defaults for every option.
#[derive(Parser, Debug)]
#[command(name = "arxiv-digest")]
#[command(author, version, about)]
pub struct Args {
    /// Send the update to this email address (falls back to the config file)
    #[arg(short, long)]
    pub email: Option<String>,

    /// Category to search in (repeatable)
    #[arg(short = 'C', long, value_name = "CATEGORY")]
    pub category: Vec<String>,

    /// File containing the categories to search in
    #[arg(short = 'c', long, value_name = "FILE")]
    pub categories: Option<PathBuf>,

    /// Author ids to search for
    #[arg(short = 'A', long = "author-list", alias = "authorList", num_args = 1.., value_name = "AUTHOR")]
    pub author_list: Vec<String>,

    /// File containing the author ids to search for
    #[arg(short = 'a', long, value_name = "FILE")]
    pub author: Option<PathBuf>,

    /// Keywords to search for in titles
    #[arg(short = 'T', long = "title-list", alias = "titleList", num_args = 1.., value_name = "WORD")]
    pub title_list: Vec<String>,

    /// File containing the keywords to search for in titles
    #[arg(short = 't', long, value_name = "FILE")]
    pub title: Option<PathBuf>,

    /// Keywords to search for in abstracts
    #[arg(short = 'B', long = "abstract-list", alias = "abstractList", num_args = 1.., value_name = "WORD")]
    pub abstract_list: Vec<String>,

    /// File containing the keywords to search for in abstracts
    #[arg(short = 'b', long = "abstract", value_name = "FILE")]
    pub abstract_file: Option<PathBuf>,

    /// Don't send empty emails
    #[arg(short, long)]
    pub suppress: bool,

    /// Go back this many days (default 1)
    #[arg(short = 'l', long = "last-n-days", alias = "lastNDays", value_name = "N")]
    pub last_n_days: Option<u32>,

    /// Search for one of the titles from one of the authors (AND instead of OR)
    #[arg(long = "and-not-or", alias = "andNotOr")]
    pub and_not_or: bool,

    /// Path to the config file (default: $XDG_CONFIG_HOME/arxiv-digest/config)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}
