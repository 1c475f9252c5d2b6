use clap::Subcommand;
use serde_json::json;
use uuid::Uuid;

use crate::cache::{keys, Mutation};
use crate::cli::{utils, AppContext, OutputFormat};
use crate::models::ContentStatus;

#[derive(Subcommand)]
pub enum VariantCommands {
    #[command(about = "Replace a variant's body (the backend bumps the version)")]
    Update {
        #[arg(help = "Draft id (scopes the cached variant list)")]
        draft_id: Uuid,
        #[arg(help = "Variant id")]
        variant_id: Uuid,
        #[arg(long, help = "New body text")]
        body: String,
    },

    #[command(about = "Set a variant's review status")]
    SetStatus {
        #[arg(help = "Draft id")]
        draft_id: Uuid,
        #[arg(help = "Variant id")]
        variant_id: Uuid,
        #[arg(help = "One of: draft, review, approved, rejected, pending_approval, needs_revision")]
        status: String,
    },

    #[command(about = "Send a variant back for revision with feedback")]
    RequestRevision {
        #[arg(help = "Draft id")]
        draft_id: Uuid,
        #[arg(help = "Variant id")]
        variant_id: Uuid,
        #[arg(long, help = "Reviewer feedback")]
        feedback: String,
    },

    #[command(about = "Ask the backend to regenerate a variant from its draft")]
    Regenerate {
        #[arg(help = "Draft id")]
        draft_id: Uuid,
        #[arg(help = "Variant id")]
        variant_id: Uuid,
    },
}

fn parse_status(value: &str) -> anyhow::Result<ContentStatus> {
    serde_json::from_value(json!(value))
        .map_err(|_| anyhow::anyhow!("unknown content status '{}'", value))
}

pub async fn handle(cmd: VariantCommands, ctx: &AppContext, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        VariantCommands::Update { draft_id, variant_id, body } => {
            let variant = Mutation::new("update variant body")
                .invalidates(keys::variants(draft_id))
                .run(&ctx.cache, ctx.client.update_variant(variant_id, &body))
                .await
                .map_err(|e| utils::report_client_error(&output_format, e))?;

            utils::output_success(
                &output_format,
                &format!("Variant updated to version {}", variant.version),
                Some(json!({ "variant": variant })),
            )
        }
        VariantCommands::SetStatus { draft_id, variant_id, status } => {
            let status = parse_status(&status)?;
            let variant = Mutation::new("set variant status")
                .invalidates(keys::variants(draft_id))
                .run(&ctx.cache, ctx.client.update_variant_status(variant_id, status))
                .await
                .map_err(|e| utils::report_client_error(&output_format, e))?;

            utils::output_success(
                &output_format,
                &format!("Variant is now {:?}", variant.status),
                Some(json!({ "variant": variant })),
            )
        }
        VariantCommands::RequestRevision { draft_id, variant_id, feedback } => {
            let variant = Mutation::new("request variant revision")
                .invalidates(keys::variants(draft_id))
                .run(&ctx.cache, ctx.client.request_revision(variant_id, &feedback))
                .await
                .map_err(|e| utils::report_client_error(&output_format, e))?;

            utils::output_success(
                &output_format,
                "Revision requested",
                Some(json!({ "variant": variant })),
            )
        }
        VariantCommands::Regenerate { draft_id, variant_id } => {
            let variant = Mutation::new("regenerate variant")
                .invalidates(keys::variants(draft_id))
                .run(&ctx.cache, ctx.client.regenerate_variant(variant_id))
                .await
                .map_err(|e| utils::report_client_error(&output_format, e))?;

            utils::output_success(
                &output_format,
                &format!("Regeneration queued (version {})", variant.version),
                Some(json!({ "variant": variant })),
            )
        }
    }
}
