use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

/// Directory name under the platform config/data directories.
pub const APP_DIR_NAME: &str = "kdb-curator";

/// Command-line arguments for curator
#[derive(Parser, Debug)]
#[command(name = "curator")]
#[command(about = "Curate keywords for a paper using the importer keyword service")]
#[command(version)]
pub struct Args {
    /// Paper metadata as JSON (title, authors, abstract/summary, ...)
    #[arg(short, long, value_name = "FILE")]
    pub paper: PathBuf,

    /// Directory holding config.json
    #[arg(long, value_name = "DIR", env = "CURATOR_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    /// Directory for curator.log
    #[arg(long, value_name = "DIR", env = "CURATOR_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Keyword to add after suggestions are applied (repeatable)
    #[arg(short = 'k', long = "keyword", value_name = "KEYWORD")]
    pub keywords: Vec<String>,

    /// Index of a suggested keyword to drop (repeatable)
    #[arg(short = 'r', long = "remove", value_name = "INDEX")]
    pub remove: Vec<usize>,

    /// Validate the curated keywords before finalizing
    #[arg(long)]
    pub validate: bool,

    /// Start from an empty keyword list instead of the primary suggestions
    #[arg(long)]
    pub no_suggestions: bool,

    /// Log at debug level regardless of build profile
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn config_dir(&self) -> PathBuf {
        self.config_dir
            .clone()
            .or_else(|| dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME)))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn log_dir(&self) -> PathBuf {
        self.log_dir
            .clone()
            .or_else(|| dirs::data_local_dir().map(|dir| dir.join(APP_DIR_NAME).join("logs")))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// `None` keeps the build-profile default.
    pub fn log_level(&self) -> Option<LevelFilter> {
        self.verbose.then_some(LevelFilter::Debug)
    }

    /// Removal indices, highest first, so each refers to the list as displayed.
    pub fn removal_order(&self) -> Vec<usize> {
        let mut indices = self.remove.clone();
        indices.sort_unstable_by(|a, b| b.cmp(a));
        indices.dedup();
        indices
    }
}
