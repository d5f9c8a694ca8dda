//! rewards - Rewards Hub CLI
//!
//! Signs in against the hosted backend and drives the rewards dashboard
//! from the terminal. Every command prints one JSON document on stdout;
//! toasts and logs go to stderr.
//!
//! # Examples
//!
//! ```bash
//! # Sign in (password read from stdin when --password is omitted)
//! rewards login ada@example.com
//!
//! # Dashboard summary
//! rewards dashboard --pretty
//!
//! # Claim today's streak bonus, then redeem reward 2
//! rewards claim
//! rewards redeem 2
//! ```

mod cli;
mod commands;
mod error;
mod logger;

#[cfg(test)]
mod tests;

use crate::{
    cli::Cli,
    commands::Commands,
    error::{CliError, Result as CliResult},
    logger::LogTarget,
};

use rh_app::{
    AppContext, DashboardController, Navigator, Notifier, RouteDecision, Toast, ToastLevel,
};
use rh_config::Config;
use rh_session::SignUpOutcome;

use std::io::BufRead;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use log::{debug, warn};
use serde_json::{Value, json};
use tokio::sync::mpsc;

/// JSON document for stdout, plus whether the command achieved what it
/// asked for (a rejected claim still prints its outcome).
struct Output {
    value: Value,
    success: bool,
}

impl Output {
    fn ok(value: Value) -> Self {
        Self {
            value,
            success: true,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let (notifier, mut toasts) = Notifier::channel();

    let result = run(&cli, notifier).await;

    print_toasts(&mut toasts);

    match result {
        Ok(output) => {
            let rendered = if cli.pretty {
                serde_json::to_string_pretty(&output.value)
            } else {
                serde_json::to_string(&output.value)
            };

            match rendered {
                Ok(json) => {
                    println!("{}", json);
                    if output.success {
                        ExitCode::SUCCESS
                    } else {
                        ExitCode::FAILURE
                    }
                }
                Err(e) => {
                    eprintln!("Error serializing response: {}", e);
                    ExitCode::FAILURE
                }
            }
        }
        Err(e) => {
            debug!("{e}");
            eprintln!("Error: {}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli, notifier: Notifier) -> CliResult<Output> {
    // Explicit flag > RH_CONFIG_DIR > platform dir > ./.rewards/
    let config_dir = match &cli.config_dir {
        Some(dir) => dir.clone(),
        None => Config::config_dir()?,
    };

    let config = Config::load_from(&config_dir)?;
    config.validate()?;

    init_logger(&config, &config_dir)?;
    config.log_summary();

    let ctx = Arc::new(AppContext::from_config(&config, &config_dir, notifier)?);

    if let Err(e) = ctx.restore_session().await {
        warn!("Continuing without a stored session: {e}");
    }

    check_route(&ctx, cli.command.route())?;

    execute(&ctx, &cli.command).await
}

fn init_logger(config: &Config, config_dir: &Path) -> CliResult<()> {
    let logging = &config.logging;

    let Some(file) = &logging.file else {
        return logger::initialize(
            logging.level,
            LogTarget::Stderr {
                colored: logging.colored,
            },
        );
    };

    let log_dir = config_dir.join(&logging.dir);
    std::fs::create_dir_all(&log_dir).map_err(|e| {
        CliError::logger(format!(
            "Failed to create log directory {}: {}",
            log_dir.display(),
            e
        ))
    })?;

    logger::initialize(logging.level, LogTarget::File(&log_dir.join(file)))
}

/// Run the route guard for the view a command belongs to.
fn check_route(ctx: &AppContext, path: &'static str) -> CliResult<()> {
    let mut navigator = Navigator::new(ctx.session().subscribe(), path);

    match navigator.navigate(path) {
        RouteDecision::Render { .. } => Ok(()),
        RouteDecision::Redirect { to } => Err(CliError::redirected(path, to)),
        // Only reachable if restore was skipped; nothing to wait for here.
        RouteDecision::ShowLoading => Err(CliError::redirected(path, rh_app::guard::LOGIN_PATH)),
    }
}

async fn execute(ctx: &Arc<AppContext>, command: &Commands) -> CliResult<Output> {
    let output = match command {
        Commands::Login { email, password } => {
            let password = resolve_password(password.as_deref())?;
            let user = ctx.sign_in(email, &password).await?;
            Output::ok(json!({ "user": user }))
        }

        Commands::Signup { email, password } => {
            let password = resolve_password(password.as_deref())?;
            match ctx.sign_up(email, &password).await? {
                SignUpOutcome::SignedIn(user) => {
                    Output::ok(json!({ "status": "signed_in", "user": user }))
                }
                SignUpOutcome::ConfirmationRequired => {
                    Output::ok(json!({ "status": "confirmation_required" }))
                }
            }
        }

        Commands::Logout => {
            ctx.sign_out().await;
            Output::ok(json!({ "status": "signed_out" }))
        }

        Commands::Whoami => Output::ok(json!({ "user": ctx.session().state().user })),

        Commands::Dashboard => {
            let dashboard = DashboardController::new(Arc::clone(ctx));
            let view = dashboard.view(Default::default()).await?;
            Output::ok(serde_json::to_value(view)?)
        }

        Commands::Rewards { filter } => {
            let dashboard = DashboardController::new(Arc::clone(ctx));
            let view = dashboard.view(*filter).await?;
            Output::ok(json!({
                "filter": view.filter,
                "points_balance": view.profile.points_balance,
                "counts": view.counts,
                "rewards": view.rewards,
            }))
        }

        Commands::Claim => {
            let dashboard = DashboardController::new(Arc::clone(ctx));
            let outcome = dashboard.claim_daily_streak().await?;
            Output {
                success: outcome.is_success(),
                value: serde_json::to_value(outcome)?,
            }
        }

        Commands::Redeem { id } => {
            let dashboard = DashboardController::new(Arc::clone(ctx));
            let outcome = dashboard.redeem_reward(*id).await?;
            Output {
                success: outcome.is_success(),
                value: serde_json::to_value(outcome)?,
            }
        }

        Commands::Referral => {
            let dashboard = DashboardController::new(Arc::clone(ctx));
            let view = dashboard.view(Default::default()).await?;
            Output::ok(json!({
                "referral_link": view.referral_link,
                "referral_count": view.profile.referral_count,
                "referral_points": view.profile.referral_points,
            }))
        }

        Commands::ForgotPassword { email, redirect_to } => {
            ctx.request_password_reset(email, redirect_to.as_deref())
                .await?;
            Output::ok(json!({ "status": "reset_link_sent" }))
        }

        Commands::ResetPassword { password, confirm } => {
            ctx.update_password(password, confirm).await?;
            Output::ok(json!({ "status": "password_updated" }))
        }
    };

    Ok(output)
}

/// Use the `--password` value, or read one line from stdin.
fn resolve_password(flag: Option<&str>) -> CliResult<String> {
    if let Some(password) = flag {
        return Ok(password.to_string());
    }

    read_password(std::io::stdin().lock())
}

fn read_password(mut reader: impl BufRead) -> CliResult<String> {
    let mut line = String::new();
    reader
        .read_line(&mut line)
        .map_err(|e| CliError::input("password", e))?;

    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn print_toasts(toasts: &mut mpsc::UnboundedReceiver<Toast>) {
    while let Ok(toast) = toasts.try_recv() {
        eprintln!("{}", format_toast(&toast));
    }
}

fn format_toast(toast: &Toast) -> String {
    match toast.level {
        ToastLevel::Success => format!("✓ {}", toast.message),
        ToastLevel::Error => format!("✗ {}", toast.message),
    }
}
