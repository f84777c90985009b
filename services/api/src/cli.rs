use crate::demo::{run_demo, run_report, DemoArgs, ReportArgs};
use crate::server;
use agency_pulse::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "Agency Pulse",
    about = "Serve and explore KPI performance reports from the command line",
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
    /// Build a performance report from a KPI CSV export
    Report(ReportArgs),
    /// Print reports for seeded sample histories across every role
    Demo(DemoArgs),
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
        Command::Report(args) => run_report(args),
        Command::Demo(args) => run_demo(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["agency-pulse-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn report_command_takes_csv_and_user() {
        let cli = Cli::try_parse_from([
            "agency-pulse-api",
            "report",
            "--csv",
            "kpis.csv",
            "--user-id",
            "fl-7",
            "--role",
            "freelancer",
            "--json",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Report(args)) => {
                assert_eq!(args.csv, PathBuf::from("kpis.csv"));
                assert_eq!(args.user_id, "fl-7");
                assert_eq!(args.role.as_deref(), Some("freelancer"));
                assert!(args.json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn report_command_requires_user_id() {
        assert!(Cli::try_parse_from(["agency-pulse-api", "report", "--csv", "kpis.csv"]).is_err());
    }
}
