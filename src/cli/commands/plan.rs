use clap::Subcommand;
use serde_json::json;
use uuid::Uuid;

use crate::cache::{self, keys, Mutation};
use crate::cli::{utils, AppContext, OutputFormat};
use crate::models::{
    ContentDraft, ContentPlan, ContentPlanInput, CorrelationRule, CorrelationStrength, ScheduledPost,
    SuggestedTopic, TimingStrategy, TopicStatus,
};
use crate::views::PlanView;

#[derive(Subcommand)]
pub enum PlanCommands {
    #[command(about = "List content plans for the selected organization")]
    List,

    #[command(about = "Show a plan, rendered according to its lifecycle status")]
    Show {
        #[arg(help = "Plan id")]
        id: Uuid,
    },

    #[command(about = "Create a content plan in the selected organization")]
    Create {
        #[arg(help = "Plan name")]
        name: String,
        #[arg(long, help = "Number of blog posts to generate")]
        blog_quota: u32,
        #[arg(long, help = "Number of social media posts to generate")]
        sm_quota: u32,
    },

    #[command(about = "Update a plan's name or quotas")]
    Update {
        #[arg(help = "Plan id")]
        id: Uuid,
        #[arg(help = "Plan name")]
        name: String,
        #[arg(long)]
        blog_quota: u32,
        #[arg(long)]
        sm_quota: u32,
    },

    #[command(about = "Delete a plan")]
    Delete {
        #[arg(help = "Plan id")]
        id: Uuid,
    },

    #[command(about = "List suggested topics for a plan")]
    Topics {
        #[arg(help = "Plan id")]
        id: Uuid,
    },

    #[command(about = "Approve a suggested topic")]
    ApproveTopic {
        #[arg(help = "Plan id")]
        id: Uuid,
        #[arg(help = "Topic id")]
        topic_id: Uuid,
    },

    #[command(about = "Reject a suggested topic")]
    RejectTopic {
        #[arg(help = "Plan id")]
        id: Uuid,
        #[arg(help = "Topic id")]
        topic_id: Uuid,
    },

    #[command(about = "Show the plan's publishing schedule")]
    Schedule {
        #[arg(help = "Plan id")]
        id: Uuid,
    },

    #[command(about = "Show the plan's correlation rules")]
    Correlation {
        #[arg(help = "Plan id")]
        id: Uuid,
    },

    #[command(about = "Update correlation rules (warns when the projection exceeds the SM quota)")]
    SetCorrelation {
        #[arg(help = "Plan id")]
        id: Uuid,
        #[arg(long, help = "Social posts derived from each blog post")]
        per_blog: u32,
        #[arg(long, help = "Social posts derived from content briefs")]
        brief_based: u32,
        #[arg(long, help = "Standalone social posts")]
        standalone: u32,
        #[arg(long, default_value = "moderate", help = "Correlation strength: loose, moderate, strong")]
        strength: String,
        #[arg(long, default_value = "spread", help = "Timing strategy: same-day, next-day, spread")]
        timing: String,
        #[arg(long, help = "Submit even when the projection exceeds the quota")]
        force: bool,
    },

    #[command(about = "Per-platform social post distribution")]
    Distribution {
        #[arg(help = "Plan id")]
        id: Uuid,
    },

    #[command(about = "Generation pipeline insights")]
    Insights {
        #[arg(help = "Plan id")]
        id: Uuid,
    },
}

async fn fetch_plan(ctx: &AppContext, id: Uuid) -> Result<ContentPlan, crate::client::ClientError> {
    let value = ctx
        .cache
        .fetch(keys::plan(id), || async {
            let plan = ctx.client.get_plan(id).await?;
            cache::encode(&plan)
        })
        .await?;
    cache::decode(value)
}

async fn fetch_schedule(ctx: &AppContext, id: Uuid) -> Result<Vec<ScheduledPost>, crate::client::ClientError> {
    let value = ctx
        .cache
        .fetch(keys::schedule(id), || async {
            let posts = ctx.client.plan_schedule(id).await?;
            cache::encode(&posts)
        })
        .await?;
    cache::decode(value)
}

async fn fetch_topics(ctx: &AppContext, id: Uuid) -> Result<Vec<SuggestedTopic>, crate::client::ClientError> {
    let value = ctx
        .cache
        .fetch(keys::suggested_topics(id), || async {
            let topics = ctx.client.suggested_topics(id).await?;
            cache::encode(&topics)
        })
        .await?;
    cache::decode(value)
}

async fn fetch_drafts(ctx: &AppContext, id: Uuid) -> Result<Vec<ContentDraft>, crate::client::ClientError> {
    let value = ctx
        .cache
        .fetch(keys::drafts(id), || async {
            let drafts = ctx.client.list_drafts(id).await?;
            cache::encode(&drafts)
        })
        .await?;
    cache::decode(value)
}

fn parse_strength(value: &str) -> anyhow::Result<CorrelationStrength> {
    match value {
        "loose" => Ok(CorrelationStrength::Loose),
        "moderate" => Ok(CorrelationStrength::Moderate),
        "strong" => Ok(CorrelationStrength::Strong),
        other => anyhow::bail!("unknown correlation strength '{}' (expected loose, moderate, strong)", other),
    }
}

fn parse_timing(value: &str) -> anyhow::Result<TimingStrategy> {
    match value {
        "same-day" => Ok(TimingStrategy::SameDay),
        "next-day" => Ok(TimingStrategy::NextDay),
        "spread" => Ok(TimingStrategy::Spread),
        other => anyhow::bail!("unknown timing strategy '{}' (expected same-day, next-day, spread)", other),
    }
}

pub async fn handle(cmd: PlanCommands, ctx: &AppContext, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        PlanCommands::List => {
            let org = super::org::require_current(ctx, &output_format)?;
            let value = ctx
                .cache
                .fetch(keys::plans(org.id), || async {
                    let plans = ctx.client.list_plans(org.id).await?;
                    cache::encode(&plans)
                })
                .await
                .map_err(|e| utils::report_client_error(&output_format, e))?;

            let plans: Vec<ContentPlan> =
                cache::decode(value).map_err(|e| utils::report_client_error(&output_format, e))?;
            if plans.is_empty() {
                return utils::output_empty_collection(&output_format, "plans", "No content plans yet");
            }
            match output_format {
                OutputFormat::Json => utils::output_data(&output_format, &json!({ "plans": plans })),
                OutputFormat::Text => {
                    for plan in &plans {
                        println!(
                            "{}  {}  [{}]  blog:{} sm:{}",
                            plan.id,
                            plan.name,
                            serde_json::to_value(plan.status)?.as_str().unwrap_or("unknown"),
                            plan.blog_posts_quota,
                            plan.sm_posts_quota
                        );
                    }
                    Ok(())
                }
            }
        }
        PlanCommands::Show { id } => show_plan(ctx, id, &output_format).await,
        PlanCommands::Create { name, blog_quota, sm_quota } => {
            let org = super::org::require_current(ctx, &output_format)?;
            let input = ContentPlanInput {
                name,
                blog_posts_quota: blog_quota,
                sm_posts_quota: sm_quota,
            };
            if let Err(errors) = input.validate() {
                utils::output_field_errors(&output_format, &errors)?;
                anyhow::bail!("validation failed");
            }

            let created = Mutation::new("create plan")
                .invalidates(keys::plans(org.id))
                .invalidates(keys::dashboard_stats(org.id))
                .run(&ctx.cache, ctx.client.create_plan(org.id, &input))
                .await
                .map_err(|e| utils::report_client_error(&output_format, e))?;

            utils::output_success(
                &output_format,
                &format!("Created plan {}", created.name),
                Some(json!({ "plan": created })),
            )
        }
        PlanCommands::Update { id, name, blog_quota, sm_quota } => {
            let input = ContentPlanInput {
                name,
                blog_posts_quota: blog_quota,
                sm_posts_quota: sm_quota,
            };
            if let Err(errors) = input.validate() {
                utils::output_field_errors(&output_format, &errors)?;
                anyhow::bail!("validation failed");
            }

            let updated = Mutation::new("update plan")
                .invalidates(keys::plan(id))
                .run(&ctx.cache, ctx.client.update_plan(id, &input))
                .await
                .map_err(|e| utils::report_client_error(&output_format, e))?;

            utils::output_success(
                &output_format,
                &format!("Updated plan {}", updated.name),
                Some(json!({ "plan": updated })),
            )
        }
        PlanCommands::Delete { id } => {
            let org = super::org::require_current(ctx, &output_format)?;
            Mutation::new("delete plan")
                .invalidates(keys::plan(id))
                .invalidates(keys::plans(org.id))
                .invalidates(keys::dashboard_stats(org.id))
                .run(&ctx.cache, ctx.client.delete_plan(id))
                .await
                .map_err(|e| utils::report_client_error(&output_format, e))?;

            utils::output_success(&output_format, &format!("Deleted plan {}", id), None)
        }
        PlanCommands::Topics { id } => {
            let topics = fetch_topics(ctx, id)
                .await
                .map_err(|e| utils::report_client_error(&output_format, e))?;
            if topics.is_empty() {
                return utils::output_empty_collection(&output_format, "topics", "No suggested topics yet");
            }
            match output_format {
                OutputFormat::Json => utils::output_data(&output_format, &json!({ "topics": topics })),
                OutputFormat::Text => {
                    for topic in &topics {
                        println!("{}  [{:?}]  {}", topic.id, topic.status, topic.title);
                    }
                    Ok(())
                }
            }
        }
        PlanCommands::ApproveTopic { id, topic_id } => set_topic_status(ctx, id, topic_id, TopicStatus::Approved, &output_format).await,
        PlanCommands::RejectTopic { id, topic_id } => set_topic_status(ctx, id, topic_id, TopicStatus::Rejected, &output_format).await,
        PlanCommands::Schedule { id } => {
            let schedule = fetch_schedule(ctx, id)
                .await
                .map_err(|e| utils::report_client_error(&output_format, e))?;
            render_schedule(&schedule, &output_format)
        }
        PlanCommands::Correlation { id } => {
            let value = ctx
                .cache
                .fetch(keys::correlation_rules(id), || async {
                    let rules = ctx.client.correlation_rules(id).await?;
                    cache::encode(&rules)
                })
                .await
                .map_err(|e| utils::report_client_error(&output_format, e))?;
            utils::output_data(&output_format, &value)
        }
        PlanCommands::SetCorrelation { id, per_blog, brief_based, standalone, strength, timing, force } => {
            let rules = CorrelationRule {
                sm_posts_per_blog: per_blog,
                brief_based_sm_posts: brief_based,
                standalone_sm_posts: standalone,
                correlation_strength: parse_strength(&strength)?,
                timing_strategy: parse_timing(&timing)?,
            };

            // The over-quota check needs the plan's quotas, so the plan query
            // runs first; the warning renders before anything is submitted.
            let plan = fetch_plan(ctx, id)
                .await
                .map_err(|e| utils::report_client_error(&output_format, e))?;
            let projected = rules.projected_sm_posts(plan.blog_posts_quota);
            if rules.over_quota(plan.blog_posts_quota, plan.sm_posts_quota) {
                utils::output_warning(
                    &output_format,
                    &format!(
                        "These rules project {} social posts against a quota of {}",
                        projected, plan.sm_posts_quota
                    ),
                )?;
                if !force {
                    utils::output_error(&output_format, "Refusing to submit over-quota rules without --force", None)?;
                    anyhow::bail!("over quota");
                }
            }

            let saved = Mutation::new("update correlation rules")
                .invalidates(keys::correlation_rules(id))
                .invalidates(keys::sm_distribution(id))
                .run(&ctx.cache, ctx.client.update_correlation_rules(id, &rules))
                .await
                .map_err(|e| utils::report_client_error(&output_format, e))?;

            utils::output_success(
                &output_format,
                &format!("Correlation rules updated ({} projected social posts)", projected),
                Some(json!({ "correlation_rules": saved })),
            )
        }
        PlanCommands::Distribution { id } => {
            let value = ctx
                .cache
                .fetch(keys::sm_distribution(id), || async { ctx.client.sm_distribution(id).await })
                .await
                .map_err(|e| utils::report_client_error(&output_format, e))?;
            utils::output_data(&output_format, &value)
        }
        PlanCommands::Insights { id } => {
            let value = ctx
                .cache
                .fetch(keys::generation_insights(id), || async {
                    ctx.client.generation_insights(id).await
                })
                .await
                .map_err(|e| utils::report_client_error(&output_format, e))?;
            utils::output_data(&output_format, &value)
        }
    }
}

async fn set_topic_status(
    ctx: &AppContext,
    plan_id: Uuid,
    topic_id: Uuid,
    status: TopicStatus,
    output_format: &OutputFormat,
) -> anyhow::Result<()> {
    let topic = Mutation::new("set topic status")
        .invalidates(keys::suggested_topics(plan_id))
        .invalidates(keys::plan(plan_id))
        .run(&ctx.cache, ctx.client.set_topic_status(plan_id, topic_id, status))
        .await
        .map_err(|e| utils::report_client_error(output_format, e))?;

    utils::output_success(
        output_format,
        &format!("Topic '{}' is now {:?}", topic.title, topic.status),
        Some(json!({ "topic": topic })),
    )
}

/// Render a plan the way the dashboard would: the backend-assigned status
/// picks the view, and the view decides which scoped queries to pull in.
async fn show_plan(ctx: &AppContext, id: Uuid, output_format: &OutputFormat) -> anyhow::Result<()> {
    let plan = fetch_plan(ctx, id)
        .await
        .map_err(|e| utils::report_client_error(output_format, e))?;
    let schedule = fetch_schedule(ctx, id)
        .await
        .map_err(|e| utils::report_client_error(output_format, e))?;

    let view = PlanView::for_plan(plan.status, &schedule);

    if matches!(output_format, OutputFormat::Json) {
        return utils::output_data(
            output_format,
            &json!({
                "plan": plan,
                "view": format!("{:?}", view),
                "scheduled_posts": schedule,
            }),
        );
    }

    println!("{} ({})", plan.name, plan.id);
    println!("quotas: {} blog / {} social", plan.blog_posts_quota, plan.sm_posts_quota);

    match view {
        PlanView::Overview => {
            println!("status: {:?}", plan.status);
        }
        PlanView::GenerationProgress(stage) => {
            println!("working: {} - check back shortly", stage.label());
        }
        PlanView::BlogTopicApproval => {
            let topics = fetch_topics(ctx, id)
                .await
                .map_err(|e| utils::report_client_error(output_format, e))?;
            println!("blog topics awaiting approval:");
            for topic in topics.iter().filter(|t| t.status == TopicStatus::Suggested) {
                println!("  {}  {}", topic.id, topic.title);
            }
        }
        PlanView::DraftApproval | PlanView::DraftReviewBoard => {
            let drafts = fetch_drafts(ctx, id)
                .await
                .map_err(|e| utils::report_client_error(output_format, e))?;
            println!("drafts:");
            for draft in &drafts {
                println!("  {}  [{:?}]  {}", draft.id, draft.status, draft.title);
            }
        }
        PlanView::Scheduling => {
            println!("awaiting final scheduling");
        }
        PlanView::Calendar => {
            render_schedule(&schedule, output_format)?;
        }
        PlanView::EmptySchedule => {
            println!("No scheduled posts");
        }
        PlanView::GenerationError => {
            println!("generation failed - review the plan in the dashboard or retry");
        }
    }
    Ok(())
}

fn render_schedule(schedule: &[ScheduledPost], output_format: &OutputFormat) -> anyhow::Result<()> {
    if schedule.is_empty() {
        return utils::output_empty_collection(output_format, "scheduled_posts", "No scheduled posts");
    }
    match output_format {
        OutputFormat::Json => utils::output_data(output_format, &json!({ "scheduled_posts": schedule })),
        OutputFormat::Text => {
            let mut sorted: Vec<&ScheduledPost> = schedule.iter().collect();
            sorted.sort_by_key(|p| p.scheduled_for);
            for post in sorted {
                println!(
                    "{}  {:10}  [{:?}]  variant {}",
                    post.scheduled_for.format("%Y-%m-%d %H:%M"),
                    post.platform,
                    post.status,
                    post.variant_id
                );
            }
            Ok(())
        }
    }
}
