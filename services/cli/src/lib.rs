mod cli;
mod commands;

use pgi_index::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
