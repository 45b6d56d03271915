use crate::commands::{run_grade, run_lookup, GradeArgs, LookupArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use gradebook::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "gradebook",
    about = "Compute weighted percentages, moderate grade cutoffs, and assign letter grades",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Grade a marks file and print the batch report
    Grade(GradeArgs),
    /// Show the percentage and grade of one student
    Lookup(LookupArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Grade(args) => run_grade(args),
        Command::Lookup(args) => run_lookup(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::OutputFormat;
    use std::path::PathBuf;

    #[test]
    fn parses_grade_command() {
        let cli = Cli::try_parse_from([
            "gradebook",
            "grade",
            "--marks",
            "IPmarks.txt",
            "--format",
            "json",
            "--no-moderation",
        ])
        .expect("valid arguments");

        match cli.command {
            Some(Command::Grade(args)) => {
                assert_eq!(args.source.marks, PathBuf::from("IPmarks.txt"));
                assert_eq!(args.format, OutputFormat::Json);
                assert!(args.no_moderation);
                assert!(args.output.is_none());
            }
            other => panic!("expected grade command, got {other:?}"),
        }
    }

    #[test]
    fn lookup_requires_student() {
        let error = Cli::try_parse_from(["gradebook", "lookup", "--marks", "IPmarks.txt"])
            .expect_err("missing student");
        assert!(error.to_string().contains("--student"));
    }

    #[test]
    fn defaults_to_serve() {
        let cli = Cli::try_parse_from(["gradebook"]).expect("no arguments");
        assert!(cli.command.is_none());
    }
}
