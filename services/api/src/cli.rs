use crate::commands::{
    run_assess, run_dashboard, run_submit, AssessArgs, DashboardArgs, SubmitArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use landlord_aid::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Landlord Aid Intake",
    about = "Serve the landlord repair-funding intake, submit applications, and inspect saved ones",
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
    /// Print the dashboard for the locally saved application
    Dashboard(DashboardArgs),
    /// Score an application JSON file with the eligibility heuristic
    Assess(AssessArgs),
    /// Validate an application JSON file and send it to a running intake service
    Submit(SubmitArgs),
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
        Command::Dashboard(args) => run_dashboard(args),
        Command::Assess(args) => run_assess(args),
        Command::Submit(args) => run_submit(args).await,
    }
}
