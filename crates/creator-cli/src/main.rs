mod commands;
mod error;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

use crate::commands::{completions, dashboard, sign_in, tui, validate, Context};
use crate::error::{exit_code_for, report_error};
use creator_config as config;

#[derive(Debug, Parser)]
#[command(name = "creator", version, about = "CreatorAnalytics CLI")]
struct Cli {
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true)]
    json: bool,
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check a credential pair without submitting it
    Validate(validate::ValidateArgs),
    /// Validate and submit credentials, then report the redirect
    #[command(name = "sign-in")]
    SignIn(sign_in::SignInArgs),
    #[command(subcommand)]
    Dashboard(dashboard::DashboardCommand),
    Tui(tui::TuiArgs),
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    init_logging(verbose);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err, verbose);
            exit_code_for(&err)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        config: config_path,
        json,
        verbose,
        command,
    } = cli;

    match command {
        Command::Tui(args) => tui::launch(config_path, args, verbose),
        Command::Completions(args) => completions::emit(args),
        command => {
            let app_config = config::load(config_path.clone()).with_context(|| "load config")?;
            if verbose {
                match config::resolve_config_path(config_path) {
                    Ok(path) => {
                        if path.exists() {
                            debug!(path = %path.display(), "config resolved");
                        } else {
                            debug!(path = %path.display(), "config missing, using defaults");
                        }
                    }
                    Err(err) => {
                        debug!(error = %err, "config unavailable");
                    }
                }
            }

            let ctx = Context {
                json,
                config: &app_config,
            };

            match command {
                Command::Validate(args) => validate::validate_credentials(&ctx, args),
                Command::SignIn(args) => sign_in::sign_in(&ctx, args),
                Command::Dashboard(cmd) => match cmd {
                    dashboard::DashboardCommand::Overview(args) => dashboard::overview(&ctx, args),
                    dashboard::DashboardCommand::Revenue(args) => dashboard::revenue(&ctx, args),
                    dashboard::DashboardCommand::Views(args) => dashboard::views(&ctx, args),
                },
                Command::Tui(_) => unreachable!("tui command handled before config loading"),
                Command::Completions(_) => {
                    unreachable!("completions command handled before config loading")
                }
            }
        }
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .try_init();
}
