use crate::report::{run_score, run_simulate, ScoreArgs, SimulateArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use managerial_assessment::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Managerial Assessment",
    about = "Serve, score and simulate the managerial competency self-assessment",
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
    /// Score a saved answers file and print the narrative report
    Score(ScoreArgs),
    /// Fill in every question synthetically and print the resulting report
    Simulate(SimulateArgs),
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
        Command::Score(args) => run_score(args),
        Command::Simulate(args) => run_simulate(args),
    }
}
