use clap::Subcommand;
use serde_json::json;

use crate::cli::{utils, OutputFormat};
use crate::config::AppConfig;
use crate::database::models::NewUser;
use crate::database::{ComplaintStore, PgStore};
use crate::types::Role;

#[derive(Subcommand)]
pub enum UserCommands {
    #[command(about = "Insert a user profile (name and email shown to admins)")]
    Add {
        #[arg(long, help = "Display name")]
        name: String,
        #[arg(long, help = "Contact email (unique)")]
        email: String,
        #[arg(long, default_value = "citizen", help = "citizen or admin")]
        role: Role,
    },
}

pub async fn handle(cmd: UserCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        UserCommands::Add { name, email, role } => {
            let config = AppConfig::from_env()?;
            let store = PgStore::connect(&config.database).await?;

            let result = store.insert_user(NewUser { name, email, role }).await;
            store.close().await;
            let user = result?;

            utils::output_success(
                &output_format,
                &format!("Added {} '{}' ({})", user.role, user.name, user.id),
                Some(json!({ "user": user })),
            )
        }
    }
}
