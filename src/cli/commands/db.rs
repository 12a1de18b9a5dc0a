use clap::Subcommand;

use crate::cli::{utils, OutputFormat};
use crate::config::AppConfig;
use crate::database::{ComplaintStore, PgStore};

#[derive(Subcommand)]
pub enum DbCommands {
    #[command(about = "Apply pending migrations")]
    Migrate,

    #[command(about = "Check database connectivity")]
    Health,
}

pub async fn handle(cmd: DbCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    let store = PgStore::connect(&config.database).await?;

    let result = match cmd {
        DbCommands::Migrate => store
            .migrate()
            .await
            .map(|_| "Migrations applied"),
        DbCommands::Health => store
            .health_check()
            .await
            .map(|_| "Database reachable"),
    };

    store.close().await;
    utils::output_success(&output_format, result?, None)
}
