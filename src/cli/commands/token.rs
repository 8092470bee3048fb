use clap::Subcommand;
use serde_json::json;

use crate::auth::{generate_jwt, Claims};
use crate::cli::{utils, OutputFormat};
use crate::config::AppConfig;

#[derive(Subcommand)]
pub enum TokenCommands {
    #[command(about = "Issue an admin bearer token signed with JWT_SECRET")]
    Issue {
        #[arg(long, default_value = "admin", help = "Token subject")]
        subject: String,
        #[arg(long, help = "Lifetime in hours (defaults to JWT_EXPIRY_HOURS)")]
        hours: Option<u64>,
    },
}

pub async fn handle(cmd: TokenCommands, config: &AppConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        TokenCommands::Issue { subject, hours } => {
            let hours = hours.unwrap_or(config.security.jwt_expiry_hours);
            let claims = Claims::admin(subject, hours);
            let token = generate_jwt(&claims, &config.security.jwt_secret)?;

            match output_format {
                OutputFormat::Text => {
                    println!("{}", token);
                    Ok(())
                }
                OutputFormat::Json => utils::output_success(
                    output_format,
                    "Issued admin token",
                    Some(json!({ "token": token, "expires_at": claims.exp })),
                ),
            }
        }
    }
}
