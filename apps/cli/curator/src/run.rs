//! One non-interactive curation pass driven by command-line arguments.

use crate::args::Args;
use crate::error::CuratorError;

use curation_core::config::AppConfig;
use curation_core::error::CurationError;
use curation_core::{
    CurationSession, FinalizedKeywords, ImporterClient, KeywordService, KeywordSink,
};

use common::ErrorLocation;
use models::PaperData;

use std::fmt::Write as _;
use std::io::{Stdout, Write, stdout};
use std::panic::Location;
use std::path::Path;
use std::sync::{Arc, Mutex};

use log::{debug, info};

/// User edits applied after the suggestions arrive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CurationPlan {
    pub keep_suggestions: bool,
    /// Applied highest index first.
    pub removals: Vec<usize>,
    pub additions: Vec<String>,
    pub validate: bool,
}

impl From<&Args> for CurationPlan {
    fn from(args: &Args) -> Self {
        Self {
            keep_suggestions: !args.no_suggestions,
            removals: args.removal_order(),
            additions: args.keywords.clone(),
            validate: args.validate,
        }
    }
}

/// Writes each finalized record as one JSON line.
pub struct JsonSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> JsonSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl JsonSink<Stdout> {
    pub fn stdout() -> Self {
        Self::new(stdout())
    }
}

impl<W: Write + Send> KeywordSink for JsonSink<W> {
    #[track_caller]
    fn deliver(&self, finalized: FinalizedKeywords) -> Result<(), CurationError> {
        let location = ErrorLocation::from(Location::caller());

        let json =
            serde_json::to_string(&finalized).map_err(|e| CurationError::SinkUnavailable {
                message: format!("Failed to serialize keywords: {e}"),
                location,
            })?;

        let mut writer = self
            .writer
            .lock()
            .map_err(|_| CurationError::SinkUnavailable {
                message: String::from("Output writer poisoned"),
                location,
            })?;

        writeln!(writer, "{json}")
            .and_then(|_| writer.flush())
            .map_err(|e| CurationError::SinkUnavailable {
                message: format!("Failed to write keywords: {e}"),
                location,
            })
    }
}

/// Load config, build the HTTP client and run one curation pass.
///
/// Returns the finalized keywords, which have also been written to stdout.
pub async fn run(args: &Args) -> Result<Vec<String>, CuratorError> {
    let config_dir = args.config_dir();
    let config = AppConfig::load(&config_dir)?.apply_env_overrides()?;
    let paper = read_paper(&args.paper)?;

    let client = Arc::new(ImporterClient::from_config(&config.service)?);
    info!("Keyword service: {}", client.base_url());

    let session = CurationSession::from_config(client, JsonSink::stdout(), &config.curation)?;

    curate(session, paper, &CurationPlan::from(args)).await
}

/// Drive `session` through present, edit, optional validate and finalize.
///
/// Progress is reported on stderr.
pub async fn curate<S: KeywordService>(
    mut session: CurationSession<S>,
    paper: PaperData,
    plan: &CurationPlan,
) -> Result<Vec<String>, CuratorError> {
    session.present(paper)?;
    session.settle().await;
    eprint!("{}", describe_suggestions(&session));

    if !plan.keep_suggestions {
        debug!("Dropping {} suggested keywords", session.keywords().len());
        session.clear_keywords()?;
    }

    for index in &plan.removals {
        let removed = session.remove_keyword(*index)?;
        info!("Removed keyword '{removed}'");
    }

    for keyword in &plan.additions {
        if !session.add_keyword(keyword)? {
            info!("Keyword '{}' already selected", keyword.trim());
        }
    }

    if plan.validate {
        if session.validate()?.is_some() {
            session.settle().await;
        }
        eprint!("{}", describe_validation(&session));
    }

    Ok(session.finalize()?)
}

/// Read a paper record from a JSON file.
#[track_caller]
pub fn read_paper(path: &Path) -> Result<PaperData, CuratorError> {
    let location = ErrorLocation::from(Location::caller());

    let contents = std::fs::read_to_string(path).map_err(|e| CuratorError::Curator {
        message: format!("Failed to read paper {}: {e}", path.display()),
        location,
    })?;

    serde_json::from_str(&contents).map_err(|e| CuratorError::Curator {
        message: format!("Failed to parse paper {}: {e}", path.display()),
        location,
    })
}

/// Suggestions, confidence and selected keywords after extraction settled.
pub fn describe_suggestions<S: KeywordService>(session: &CurationSession<S>) -> String {
    let mut out = String::new();

    match (session.extraction(), session.confidence()) {
        (Some(result), Some(confidence)) => {
            let _ = writeln!(out, "{confidence}");
            write_list(&mut out, "Primary", result.primary_keywords.iter());
            write_list(&mut out, "Secondary", result.secondary_keywords.iter());
            write_list(&mut out, "Technical", result.technical_terms.iter());
        }
        _ => {
            let reason = session.extraction_error().unwrap_or("no result");
            let _ = writeln!(out, "No suggestions available ({reason})");
        }
    }

    let tags = session.domain_tags();
    if !tags.is_empty() {
        let rendered: Vec<String> = tags
            .iter()
            .map(|tag| {
                if tag.recognized {
                    tag.name.to_string()
                } else {
                    format!("{} (unrecognized)", tag.name)
                }
            })
            .collect();
        let _ = writeln!(out, "Domains: {}", rendered.join(", "));
    }

    let _ = writeln!(out, "Selected:");
    for (index, keyword) in session.keywords().iter().enumerate() {
        let _ = writeln!(out, "  [{index}] {keyword}");
    }

    out
}

/// Categorized validation of the current keyword set.
pub fn describe_validation<S: KeywordService>(session: &CurationSession<S>) -> String {
    let mut out = String::new();

    let Some(result) = session.validation() else {
        let reason = session.validation_error().unwrap_or("nothing to validate");
        let _ = writeln!(out, "Validation unavailable ({reason})");
        return out;
    };

    if session.validation_is_stale() {
        let _ = writeln!(out, "Validation is out of date with the current keywords");
    }

    write_list(&mut out, "Valid", result.valid_keywords.iter());
    for keyword in &result.invalid_keywords {
        let alternatives = result.alternatives_for(keyword);
        if alternatives.is_empty() {
            let _ = writeln!(out, "Invalid: {keyword}");
        } else {
            let rendered: Vec<&str> = alternatives.iter().map(|k| k.as_str()).collect();
            let _ = writeln!(out, "Invalid: {keyword} (try: {})", rendered.join(", "));
        }
    }

    out
}

fn write_list<'a, I, T>(out: &mut String, heading: &str, items: I)
where
    I: Iterator<Item = &'a T>,
    T: std::fmt::Display + 'a,
{
    let rendered: Vec<String> = items.map(ToString::to_string).collect();
    if !rendered.is_empty() {
        let _ = writeln!(out, "{heading}: {}", rendered.join(", "));
    }
}
