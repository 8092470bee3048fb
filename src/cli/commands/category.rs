use clap::Subcommand;
use serde_json::json;

use crate::cli::{utils, OutputFormat};
use crate::config::AppConfig;
use crate::database::{CategoryRepository, DatabaseManager};

#[derive(Subcommand)]
pub enum CategoryCommands {
    #[command(about = "Create a category")]
    Add {
        #[arg(help = "Category display name")]
        name: String,
    },

    #[command(about = "List categories")]
    List,
}

pub async fn handle(cmd: CategoryCommands, config: &AppConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    let pool = DatabaseManager::connect(&config.database).await?;
    let repository = CategoryRepository::new(pool.clone());

    let result = match cmd {
        CategoryCommands::Add { name } => {
            let name = name.trim();
            if name.is_empty() {
                anyhow::bail!("category name must not be empty");
            }
            let category = repository.create(name).await?;
            utils::output_success(
                output_format,
                &format!("Created category {} ({})", category.catelog, category.id),
                Some(json!(category)),
            )
        }
        CategoryCommands::List => {
            let categories = repository.list().await?;
            let rows: Vec<(String, String)> = categories
                .iter()
                .map(|c| (c.id.to_string(), c.catelog.clone()))
                .collect();
            utils::output_rows(output_format, &rows, json!(categories))
        }
    };

    pool.close().await;
    result
}
