use clap::Subcommand;
use uuid::Uuid;

use crate::auth::{generate_jwt, Claims};
use crate::cli::{utils, OutputFormat};
use crate::config::AppConfig;
use crate::types::Role;

#[derive(Subcommand)]
pub enum TokenCommands {
    #[command(about = "Sign a token for a user id with the configured JWT_SECRET")]
    Issue {
        #[arg(long, help = "User id (UUID) to embed in the claim")]
        user: Uuid,
        #[arg(long, help = "Role to embed: citizen or admin")]
        role: Role,
        #[arg(long, help = "Lifetime in hours (defaults to SECURITY_JWT_EXPIRY_HOURS)")]
        hours: Option<u64>,
    },
}

pub async fn handle(cmd: TokenCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        TokenCommands::Issue { user, role, hours } => {
            let config = AppConfig::from_env()?;
            let hours = hours.unwrap_or(config.security.jwt_expiry_hours);

            let token = generate_jwt(&Claims::new(user, role, hours), &config.security.jwt_secret)?;
            tracing::debug!("Issued {} token for {} ({}h)", role, user, hours);

            utils::output_value(&output_format, "token", &token)
        }
    }
}
