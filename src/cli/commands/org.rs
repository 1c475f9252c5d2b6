use clap::Subcommand;
use serde_json::json;
use uuid::Uuid;

use crate::cache::{self, keys, Mutation};
use crate::cli::{utils, AppContext, OutputFormat};
use crate::models::{Organization, OrganizationInput, OrganizationPatch};

#[derive(Subcommand)]
pub enum OrgCommands {
    #[command(about = "List organizations for the authenticated user")]
    List,

    #[command(about = "Select the organization that scopes all plan commands")]
    Use {
        #[arg(help = "Organization id")]
        id: Uuid,
    },

    #[command(about = "Show the currently selected organization")]
    Current,

    #[command(about = "Create an organization")]
    Create {
        #[arg(help = "Organization name")]
        name: String,
        #[arg(long, help = "Website URL")]
        website: Option<String>,
        #[arg(long, help = "Industry label")]
        industry: Option<String>,
        #[arg(long, help = "Company size bracket")]
        size: Option<String>,
    },

    #[command(about = "Update an organization")]
    Update {
        #[arg(help = "Organization id")]
        id: Uuid,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        website: Option<String>,
        #[arg(long)]
        industry: Option<String>,
        #[arg(long)]
        size: Option<String>,
    },

    #[command(about = "Delete an organization")]
    Delete {
        #[arg(help = "Organization id")]
        id: Uuid,
    },

    #[command(about = "Dashboard stats for the selected organization")]
    Stats,
}

/// The selected organization, or a terminal error telling the user to select one.
pub fn require_current(ctx: &AppContext, output_format: &OutputFormat) -> anyhow::Result<Organization> {
    match ctx.organizations.current() {
        Some(org) => Ok(org),
        None => {
            utils::output_error(
                output_format,
                "No organization selected - run `plan org use <id>` first",
                None,
            )?;
            anyhow::bail!("no organization selected")
        }
    }
}

pub async fn handle(cmd: OrgCommands, ctx: &AppContext, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        OrgCommands::List => {
            let value = ctx
                .cache
                .fetch(keys::organizations(), || async {
                    let orgs = ctx.client.my_organizations().await?;
                    cache::encode(&orgs)
                })
                .await
                .map_err(|e| utils::report_client_error(&output_format, e))?;

            let orgs: Vec<Organization> = cache::decode(value)
                .map_err(|e| utils::report_client_error(&output_format, e))?;
            ctx.organizations.set_organizations(orgs.clone());

            if orgs.is_empty() {
                return utils::output_empty_collection(&output_format, "organizations", "No organizations yet");
            }
            match output_format {
                OutputFormat::Json => utils::output_data(&output_format, &json!({ "organizations": orgs })),
                OutputFormat::Text => {
                    let current = ctx.organizations.current().map(|o| o.id);
                    for org in &orgs {
                        let marker = if current == Some(org.id) { "*" } else { " " };
                        println!("{} {}  {}", marker, org.id, org.name);
                    }
                    Ok(())
                }
            }
        }
        OrgCommands::Use { id } => {
            if ctx.organizations.set_current(id) {
                let org = ctx.organizations.current().expect("selection was just set");
                utils::output_success(&output_format, &format!("Using organization {}", org.name), None)
            } else {
                utils::output_error(
                    &output_format,
                    &format!("Unknown organization {} - run `plan org list` to refresh", id),
                    None,
                )?;
                anyhow::bail!("unknown organization")
            }
        }
        OrgCommands::Current => match ctx.organizations.current() {
            Some(org) => utils::output_success(
                &output_format,
                &format!("{} ({})", org.name, org.id),
                Some(json!({ "organization": org })),
            ),
            None => utils::output_error(&output_format, "No organization selected", None),
        },
        OrgCommands::Create { name, website, industry, size } => {
            let input = OrganizationInput { name, website, industry, size };
            if let Err(errors) = input.validate() {
                utils::output_field_errors(&output_format, &errors)?;
                anyhow::bail!("validation failed");
            }

            let created = Mutation::new("create organization")
                .invalidates(keys::organizations())
                .run(&ctx.cache, ctx.client.create_organization(&input))
                .await
                .map_err(|e| utils::report_client_error(&output_format, e))?;

            // Mirror the confirmed mutation into the local store.
            ctx.organizations.add_organization(created.clone());
            utils::output_success(
                &output_format,
                &format!("Created organization {}", created.name),
                Some(json!({ "organization": created })),
            )
        }
        OrgCommands::Update { id, name, website, industry, size } => {
            let patch = OrganizationPatch { name, website, industry, size };

            let updated = Mutation::new("update organization")
                .invalidates(keys::organizations())
                .invalidates(keys::organization(id))
                .invalidates(keys::dashboard_stats(id))
                .run(&ctx.cache, ctx.client.update_organization(id, &patch))
                .await
                .map_err(|e| utils::report_client_error(&output_format, e))?;

            ctx.organizations.update_organization(id, &patch);
            utils::output_success(
                &output_format,
                &format!("Updated organization {}", updated.name),
                Some(json!({ "organization": updated })),
            )
        }
        OrgCommands::Delete { id } => {
            Mutation::new("delete organization")
                .invalidates(keys::organizations())
                .invalidates(keys::organization(id))
                .invalidates(keys::dashboard_stats(id))
                .run(&ctx.cache, ctx.client.delete_organization(id))
                .await
                .map_err(|e| utils::report_client_error(&output_format, e))?;

            // Deleting the selected organization also clears the selection.
            ctx.organizations.delete_organization(id);
            utils::output_success(&output_format, &format!("Deleted organization {}", id), None)
        }
        OrgCommands::Stats => {
            let org = require_current(ctx, &output_format)?;
            let value = ctx
                .cache
                .fetch(keys::dashboard_stats(org.id), || async {
                    let stats = ctx.client.dashboard_stats(org.id).await?;
                    cache::encode(&stats)
                })
                .await
                .map_err(|e| utils::report_client_error(&output_format, e))?;
            utils::output_data(&output_format, &value)
        }
    }
}
