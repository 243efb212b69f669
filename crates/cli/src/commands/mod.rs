//! CLI command implementations.

pub mod migrate;
pub mod seed;

use thiserror::Error;

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Resolve the database URL from `HAVEN_DATABASE_URL` or `DATABASE_URL`.
pub(crate) fn database_url() -> Result<String, CliError> {
    dotenvy::dotenv().ok();

    std::env::var("HAVEN_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map_err(|_| CliError::MissingEnvVar("HAVEN_DATABASE_URL"))
}
