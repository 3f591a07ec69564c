use crate::commands::{
    add_position, delete_application, list_applications, list_positions, submit_application,
    update_application, AddPositionArgs, DeleteApplicationArgs, ListApplicationsArgs,
    PositionsFileArgs, SubmitApplicationArgs, UpdateApplicationArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use wolf_hire::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "WolfHire",
    about = "Track hiring applications through review, interviews, and employment",
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
    /// Inspect or create positions in a positions file
    Positions {
        #[command(subcommand)]
        command: PositionsCommand,
    },
    /// Submit, move, or remove applications in a positions file
    Applications {
        #[command(subcommand)]
        command: ApplicationsCommand,
    },
}

#[derive(Subcommand, Debug)]
enum PositionsCommand {
    /// List every position with its application count
    List(PositionsFileArgs),
    /// Create a position, optionally with its first application
    Add(AddPositionArgs),
}

#[derive(Subcommand, Debug)]
enum ApplicationsCommand {
    /// List applications of a position, optionally filtered by state
    List(ListApplicationsArgs),
    /// Submit a new application
    Submit(SubmitApplicationArgs),
    /// Apply a workflow command to an application
    Update(UpdateApplicationArgs),
    /// Remove an application
    Delete(DeleteApplicationArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Override the positions file loaded at startup and saved after changes
    #[arg(long)]
    pub(crate) positions_file: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    let output = match command {
        Command::Serve(args) => return server::run(args).await,
        Command::Positions { command } => match command {
            PositionsCommand::List(args) => list_positions(args)?,
            PositionsCommand::Add(args) => add_position(args)?,
        },
        Command::Applications { command } => match command {
            ApplicationsCommand::List(args) => list_applications(args)?,
            ApplicationsCommand::Submit(args) => submit_application(args)?,
            ApplicationsCommand::Update(args) => update_application(args)?,
            ApplicationsCommand::Delete(args) => delete_application(args)?,
        },
    };

    print!("{output}");
    Ok(())
}
