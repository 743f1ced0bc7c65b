// Unit tests for command-line parsing

use crate::args::Args;
use crate::run::CurationPlan;

use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

/// **VALUE**: Verifies repeatable flags collect every occurrence.
///
/// **BUG THIS CATCHES**: Would catch `--keyword` keeping only the last value.
#[test]
fn given_repeated_flags_when_parsed_then_all_values_collected() {
    let args = Args::try_parse_from([
        "curator",
        "--paper",
        "paper.json",
        "--keyword",
        "transformers",
        "-k",
        "attention",
        "--remove",
        "0",
        "-r",
        "2",
        "--validate",
    ])
    .expect("valid args");

    assert_eq!(args.paper, PathBuf::from("paper.json"));
    assert_eq!(args.keywords, vec!["transformers", "attention"]);
    assert_eq!(args.remove, vec![0, 2]);
    assert!(args.validate);
    assert!(!args.no_suggestions);
    assert_eq!(args.log_level(), None);
}

/// **VALUE**: Verifies removals run from the highest index down.
///
/// **WHY THIS MATTERS**: Indices refer to the list as printed. Removing index
/// 0 first would shift every later index by one.
///
/// **BUG THIS CATCHES**: Would catch removals applied in argument order.
#[test]
fn given_unordered_removals_when_planned_then_highest_first_without_repeats() {
    let args = Args::try_parse_from([
        "curator", "--paper", "p.json", "-r", "1", "-r", "3", "-r", "1", "--verbose",
    ])
    .expect("valid args");

    let plan = CurationPlan::from(&args);

    assert_eq!(plan.removals, vec![3, 1]);
    assert!(plan.keep_suggestions);
    assert_eq!(args.log_level(), Some(LevelFilter::Debug));
}

#[test]
fn given_missing_paper_when_parsed_then_error() {
    assert!(Args::try_parse_from(["curator"]).is_err());
}

#[test]
fn given_explicit_dirs_when_resolved_then_used_verbatim() {
    let args = Args::try_parse_from([
        "curator",
        "--paper",
        "p.json",
        "--config-dir",
        "/tmp/cfg",
        "--log-dir",
        "/tmp/logs",
        "--no-suggestions",
    ])
    .expect("valid args");

    assert_eq!(args.config_dir(), PathBuf::from("/tmp/cfg"));
    assert_eq!(args.log_dir(), PathBuf::from("/tmp/logs"));
    assert!(!CurationPlan::from(&args).keep_suggestions);
}
