mod cli;
mod commands;
mod infra;
mod routes;
mod server;

use wolf_hire::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
