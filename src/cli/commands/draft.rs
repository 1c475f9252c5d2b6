use clap::Subcommand;
use serde_json::json;
use uuid::Uuid;

use crate::cache::{self, keys};
use crate::cli::{utils, AppContext, OutputFormat};
use crate::models::{ContentDraft, ContentVariant};

#[derive(Subcommand)]
pub enum DraftCommands {
    #[command(about = "List drafts in a plan")]
    List {
        #[arg(help = "Plan id")]
        plan_id: Uuid,
    },

    #[command(about = "List platform variants of a draft")]
    Variants {
        #[arg(help = "Draft id")]
        draft_id: Uuid,
    },
}

pub async fn handle(cmd: DraftCommands, ctx: &AppContext, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        DraftCommands::List { plan_id } => {
            let value = ctx
                .cache
                .fetch(keys::drafts(plan_id), || async {
                    let drafts = ctx.client.list_drafts(plan_id).await?;
                    cache::encode(&drafts)
                })
                .await
                .map_err(|e| utils::report_client_error(&output_format, e))?;

            let drafts: Vec<ContentDraft> =
                cache::decode(value).map_err(|e| utils::report_client_error(&output_format, e))?;
            if drafts.is_empty() {
                return utils::output_empty_collection(&output_format, "drafts", "No drafts yet");
            }
            match output_format {
                OutputFormat::Json => utils::output_data(&output_format, &json!({ "drafts": drafts })),
                OutputFormat::Text => {
                    for draft in &drafts {
                        println!("{}  [{:?}]  {}", draft.id, draft.status, draft.title);
                    }
                    Ok(())
                }
            }
        }
        DraftCommands::Variants { draft_id } => {
            let value = ctx
                .cache
                .fetch(keys::variants(draft_id), || async {
                    let variants = ctx.client.draft_variants(draft_id).await?;
                    cache::encode(&variants)
                })
                .await
                .map_err(|e| utils::report_client_error(&output_format, e))?;

            let variants: Vec<ContentVariant> =
                cache::decode(value).map_err(|e| utils::report_client_error(&output_format, e))?;
            if variants.is_empty() {
                return utils::output_empty_collection(&output_format, "variants", "No variants yet");
            }
            match output_format {
                OutputFormat::Json => utils::output_data(&output_format, &json!({ "variants": variants })),
                OutputFormat::Text => {
                    for variant in &variants {
                        println!(
                            "{}  {:10}  [{:?}]  v{}",
                            variant.id, variant.platform, variant.status, variant.version
                        );
                    }
                    Ok(())
                }
            }
        }
    }
}
