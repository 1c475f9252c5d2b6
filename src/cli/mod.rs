pub mod commands;
pub mod paths;
pub mod utils;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::cache::QueryCache;
use crate::client::ApiClient;
use crate::store::{OrganizationStore, SessionStore};

#[derive(Parser)]
#[command(name = "plan")]
#[command(about = "Planline CLI - review and schedule generated content from the terminal")]
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
    #[command(about = "Authentication and session management")]
    Auth {
        #[command(subcommand)]
        cmd: commands::auth::AuthCommands,
    },

    #[command(about = "Organization management and selection")]
    Org {
        #[command(subcommand)]
        cmd: commands::org::OrgCommands,
    },

    #[command(about = "Content plan lifecycle, topics, scheduling, and correlation rules")]
    Plan {
        #[command(subcommand)]
        cmd: commands::plan::PlanCommands,
    },

    #[command(about = "Content drafts and their platform variants")]
    Draft {
        #[command(subcommand)]
        cmd: commands::draft::DraftCommands,
    },

    #[command(about = "Edit, review, and regenerate content variants")]
    Variant {
        #[command(subcommand)]
        cmd: commands::variant::VariantCommands,
    },

    #[command(about = "Backend health checks")]
    Health {
        #[command(subcommand)]
        cmd: commands::health::HealthCommands,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
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

/// Everything a command needs: the two persisted stores, the API client bound
/// to the session, and the per-invocation query cache. Built explicitly here
/// and passed down so commands stay testable without ambient globals.
pub struct AppContext {
    pub session: Arc<SessionStore>,
    pub organizations: OrganizationStore,
    pub client: ApiClient,
    pub cache: QueryCache,
}

impl AppContext {
    /// Wire up from the environment. When no config directory is available
    /// (no HOME, sandboxed context) the stores run in memory and persistence
    /// is silently skipped.
    pub fn from_env() -> Self {
        let config_dir = paths::config_dir();
        let session = Arc::new(SessionStore::new(
            config_dir.as_ref().map(|d| d.join("session.json")),
        ));
        let organizations =
            OrganizationStore::new(config_dir.as_ref().map(|d| d.join("organizations.json")));
        let client = ApiClient::new(paths::api_base_url(), Arc::clone(&session));

        Self {
            session,
            organizations,
            client,
            cache: QueryCache::new(),
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let ctx = AppContext::from_env();

    match cli.command {
        Commands::Auth { cmd } => commands::auth::handle(cmd, &ctx, output_format).await,
        Commands::Org { cmd } => commands::org::handle(cmd, &ctx, output_format).await,
        Commands::Plan { cmd } => commands::plan::handle(cmd, &ctx, output_format).await,
        Commands::Draft { cmd } => commands::draft::handle(cmd, &ctx, output_format).await,
        Commands::Variant { cmd } => commands::variant::handle(cmd, &ctx, output_format).await,
        Commands::Health { cmd } => commands::health::handle(cmd, &ctx, output_format).await,
    }
}
