use crate::commands::{
    run_appraise, run_coefficient, run_table, AppraiseArgs, CoefficientArgs, TableArgs,
};
use crate::server;
use appraisal_desk::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "Appraisal Desk",
    about = "Run the appraisal and rental service or price a property from the command line",
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
    /// Appraise a property with the Ross-Heidecke method
    Appraise(AppraiseArgs),
    /// Print the depreciation coefficient for one age and condition
    Coefficient(CoefficientArgs),
    /// Print the Ross-Heidecke coefficient table
    Table(TableArgs),
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
        Command::Appraise(args) => run_appraise(args).await,
        Command::Coefficient(args) => run_coefficient(args),
        Command::Table(args) => run_table(args),
    }
}
