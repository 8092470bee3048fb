use clap::Subcommand;

use crate::cli::{utils, OutputFormat};
use crate::config::AppConfig;
use crate::database::{schema, DatabaseManager, IndexEnsurer};

#[derive(Subcommand)]
pub enum DbCommands {
    #[command(about = "Create the category and sites tables and their indexes")]
    Migrate,
}

pub async fn handle(cmd: DbCommands, config: &AppConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        DbCommands::Migrate => {
            let pool = DatabaseManager::connect(&config.database).await?;
            schema::migrate(&pool).await?;
            IndexEnsurer::create_indexes(&pool).await?;
            pool.close().await;

            utils::output_success(
                output_format,
                &format!("Schema ready at {}", config.database.url),
                None,
            )
        }
    }
}
