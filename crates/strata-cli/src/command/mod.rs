use clap::{Parser, Subcommand};

use self::{compare::CompareArg, fetch::FetchArg};

mod compare;
mod fetch;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in (defaults to `compare`)
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
enum Mode {
    /// Compare income category proportions of stratified and random test sets
    Compare(#[clap(flatten)] CompareArg),
    /// Download and extract the dataset, then print the CSV path
    Fetch(#[clap(flatten)] FetchArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args
        .mode
        .unwrap_or_else(|| Mode::Compare(CompareArg::default()))
    {
        Mode::Compare(arg) => compare::run(&arg)?,
        Mode::Fetch(arg) => fetch::run(&arg)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn parse(args: &[&str]) -> Result<CommandArgs, clap::Error> {
        CommandArgs::try_parse_from(std::iter::once("strata").chain(args.iter().copied()))
    }

    #[test]
    fn test_no_subcommand() {
        assert_eq!(parse(&[]).unwrap().mode, None);
    }

    #[test]
    fn test_compare_defaults_match_default_mode() {
        let args = parse(&["compare"]).unwrap();
        assert_eq!(args.mode, Some(Mode::Compare(CompareArg::default())));
    }

    #[test]
    fn test_fetch_defaults_match_default_arg() {
        let args = parse(&["fetch"]).unwrap();
        assert_eq!(args.mode, Some(Mode::Fetch(FetchArg::default())));
    }

    #[test]
    fn test_compare_options() {
        let args = parse(&[
            "compare",
            "--datasets-dir",
            "/tmp/data",
            "--test-ratio",
            "0.3",
            "--seed",
            "7",
            "--n-splits",
            "3",
            "--output",
            "report.json",
        ])
        .unwrap();
        let Some(Mode::Compare(arg)) = args.mode else {
            panic!("expected compare mode");
        };
        assert_eq!(arg.dataset.datasets_dir, PathBuf::from("/tmp/data"));
        assert!((arg.test_ratio - 0.3).abs() < f64::EPSILON);
        assert_eq!(arg.seed, 7);
        assert_eq!(arg.n_splits, 3);
        assert_eq!(arg.output, Some(PathBuf::from("report.json")));
    }

    #[test]
    fn test_test_ratio_out_of_range() {
        for ratio in ["0", "1", "1.5", "-0.2", "abc"] {
            assert!(
                parse(&["compare", "--test-ratio", ratio]).is_err(),
                "{ratio} accepted"
            );
        }
    }

    #[test]
    fn test_zero_splits_rejected() {
        assert!(parse(&["compare", "--n-splits", "0"]).is_err());
    }
}
