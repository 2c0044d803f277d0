use crate::commands::{run_precheck, run_quote, run_submit, PrecheckArgs, QuoteArgs, SubmitArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use glass_case::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Glass Case",
    about = "Create glass repair cases and run the approval precheck",
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
    /// Work with a case record saved as JSON
    Case {
        #[command(subcommand)]
        command: CaseCommand,
    },
}

#[derive(Subcommand, Debug)]
enum CaseCommand {
    /// Run the approval precheck and print each check
    Precheck(PrecheckArgs),
    /// Suggest repair items and totals for a glass type
    Quote(QuoteArgs),
    /// Submit a case, marking unfinished steps as pending
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
        Command::Case { command } => match command {
            CaseCommand::Precheck(args) => run_precheck(args),
            CaseCommand::Quote(args) => run_quote(args),
            CaseCommand::Submit(args) => run_submit(args),
        },
    }
}
