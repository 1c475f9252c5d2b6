use clap::Subcommand;
use serde_json::json;

use crate::cli::{utils, AppContext, OutputFormat};

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Login and persist the session token")]
    Login {
        #[arg(help = "Email address")]
        email: String,
        #[arg(long, help = "Password (read from PLAN_PASSWORD if not provided)")]
        password: Option<String>,
    },

    #[command(about = "Clear the persisted session")]
    Logout,

    #[command(about = "Show current authentication status")]
    Status,

    #[command(about = "Fetch and show the authenticated user")]
    Whoami,
}

pub async fn handle(cmd: AuthCommands, ctx: &AppContext, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        AuthCommands::Login { email, password } => {
            let password = match password.or_else(|| std::env::var("PLAN_PASSWORD").ok()) {
                Some(p) => p,
                None => {
                    utils::output_error(&output_format, "No password given; pass --password or set PLAN_PASSWORD", None)?;
                    anyhow::bail!("missing password");
                }
            };

            match ctx.client.login(&email, &password).await {
                Ok(response) => {
                    let name = response.user.name.clone();
                    ctx.session.login(response.token, response.user);
                    utils::output_success(
                        &output_format,
                        &format!("Logged in as {}", name),
                        Some(json!({ "email": email })),
                    )
                }
                Err(e) => Err(utils::report_client_error(&output_format, e)),
            }
        }
        AuthCommands::Logout => {
            ctx.session.logout();
            utils::output_success(&output_format, "Logged out", None)
        }
        AuthCommands::Status => {
            if ctx.session.is_authenticated() {
                let user = ctx.session.user().expect("authenticated session has a user");
                utils::output_success(
                    &output_format,
                    &format!("Authenticated as {} ({})", user.name, user.email),
                    Some(json!({ "user": user })),
                )
            } else {
                utils::output_error(&output_format, "Not authenticated", None)
            }
        }
        AuthCommands::Whoami => match ctx.client.me().await {
            Ok(user) => {
                // Refresh the cached user; the token stays as-is.
                ctx.session.set_user(user.clone());
                utils::output_success(
                    &output_format,
                    &format!("{} ({})", user.name, user.email),
                    Some(json!({ "user": user })),
                )
            }
            Err(e) => Err(utils::report_client_error(&output_format, e)),
        },
    }
}
