use clap::Subcommand;

use crate::cli::{utils, AppContext, OutputFormat};

#[derive(Subcommand)]
pub enum HealthCommands {
    #[command(about = "General backend health")]
    Check,

    #[command(about = "Database health")]
    Database,

    #[command(about = "Cache health")]
    Cache,
}

pub async fn handle(cmd: HealthCommands, ctx: &AppContext, output_format: OutputFormat) -> anyhow::Result<()> {
    let result = match cmd {
        HealthCommands::Check => ctx.client.health().await,
        HealthCommands::Database => ctx.client.health_database().await,
        HealthCommands::Cache => ctx.client.health_cache().await,
    };
    match result {
        Ok(value) => utils::output_data(&output_format, &value),
        Err(e) => Err(utils::report_client_error(&output_format, e)),
    }
}
