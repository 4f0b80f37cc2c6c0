mod cli;
mod commands;
mod infra;
mod routes;
mod server;

use landlord_aid::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
