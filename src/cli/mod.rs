pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "vcrs")]
#[command(about = "VCRS admin CLI - tokens, user profiles and database upkeep")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Development token management")]
    Token {
        #[command(subcommand)]
        cmd: commands::token::TokenCommands,
    },

    #[command(about = "User profile management")]
    User {
        #[command(subcommand)]
        cmd: commands::user::UserCommands,
    },

    #[command(about = "Database migrations and health")]
    Db {
        #[command(subcommand)]
        cmd: commands::db::DbCommands,
    },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Token { cmd } => commands::token::handle(cmd, output_format).await,
        Commands::User { cmd } => commands::user::handle(cmd, output_format).await,
        Commands::Db { cmd } => commands::db::handle(cmd, output_format).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Role;

    #[test]
    fn parses_token_issue() {
        let cli = Cli::try_parse_from([
            "vcrs",
            "--json",
            "token",
            "issue",
            "--user",
            "8d0f3c5e-8a4e-4b8e-9a61-2f4b1b0f9e11",
            "--role",
            "admin",
        ])
        .unwrap();

        assert!(matches!(OutputFormat::from_cli(&cli), OutputFormat::Json));
        match cli.command {
            Commands::Token {
                cmd: commands::token::TokenCommands::Issue { role, hours, .. },
            } => {
                assert_eq!(role, Role::Admin);
                assert!(hours.is_none());
            }
            _ => panic!("expected token issue"),
        }
    }

    #[test]
    fn rejects_unknown_role() {
        let parsed = Cli::try_parse_from([
            "vcrs",
            "user",
            "add",
            "--name",
            "Asha",
            "--email",
            "asha@example.com",
            "--role",
            "mayor",
        ]);
        assert!(parsed.is_err());
    }
}
