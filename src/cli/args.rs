use clap::Parser;
use std::path::PathBuf;

/// Retail banking ledger over CSV rosters and transaction files
#[derive(Parser, Debug)]
#[command(name = "bank-ledger")]
#[command(about = "Retail banking ledger: roster, batch replay, statements", long_about = None)]
pub struct CliArgs {
    /// Customer roster CSV to load
    #[arg(value_name = "ROSTER", help = "Path to the customer roster CSV")]
    pub roster_file: PathBuf,

    /// Batch transaction CSV to replay against the roster
    #[arg(
        long = "transactions",
        value_name = "FILE",
        help = "Path to a batch transaction CSV to replay"
    )]
    pub transactions_file: Option<PathBuf>,

    /// Where to write the updated roster (defaults to stdout)
    #[arg(
        long = "output",
        value_name = "FILE",
        help = "Write the updated roster here instead of stdout"
    )]
    pub output_file: Option<PathBuf>,

    /// Durable audit-log file; entries are appended as they are recorded
    #[arg(
        long = "log-file",
        value_name = "FILE",
        help = "Append every audit-log entry to this file"
    )]
    pub log_file: Option<PathBuf>,

    /// Directory to write per-customer statement files into
    #[arg(
        long = "statements-dir",
        value_name = "DIR",
        help = "Write a statement file per customer into this directory"
    )]
    pub statements_dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::roster_only(&["program", "roster.csv"], None, None)]
    #[case::with_transactions(
        &["program", "roster.csv", "--transactions", "batch.csv"],
        Some("batch.csv"),
        None
    )]
    #[case::with_output(
        &["program", "roster.csv", "--output", "out.csv"],
        None,
        Some("out.csv")
    )]
    #[case::all_options(
        &["program", "roster.csv", "--transactions", "batch.csv", "--output", "out.csv"],
        Some("batch.csv"),
        Some("out.csv")
    )]
    fn test_option_parsing(
        #[case] args: &[&str],
        #[case] transactions: Option<&str>,
        #[case] output: Option<&str>,
    ) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.roster_file, PathBuf::from("roster.csv"));
        assert_eq!(parsed.transactions_file, transactions.map(PathBuf::from));
        assert_eq!(parsed.output_file, output.map(PathBuf::from));
    }

    #[rstest]
    #[case::log_file(&["program", "roster.csv", "--log-file", "bank.log"])]
    #[case::statements_dir(&["program", "roster.csv", "--statements-dir", "statements"])]
    fn test_optional_sinks_parse(#[case] args: &[&str]) {
        assert!(CliArgs::try_parse_from(args).is_ok());
    }

    #[rstest]
    #[case::missing_roster(&["program"])]
    #[case::unknown_flag(&["program", "roster.csv", "--strategy", "sync"])]
    fn test_parsing_errors(#[case] args: &[&str]) {
        let result = CliArgs::try_parse_from(args);
        assert!(result.is_err());
    }
}
