use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;

use crate::commands::{print_json, Context};
use crate::error::{invalid_input, rejected};
use anyhow::{Context as _, Result};
use clap::Args;
use creator_core::{Field, SubmissionState};
use creator_signin::{FormController, SimulatedSubmission};
use tracing::debug;

#[derive(Debug, Args)]
pub struct SignInArgs {
    #[arg(long, default_value = "")]
    pub email: String,
    #[arg(long, default_value = "")]
    pub password: String,
    /// Override the simulated authentication delay
    #[arg(long)]
    pub delay_ms: Option<u64>,
}

pub fn sign_in(ctx: &Context<'_>, args: SignInArgs) -> Result<()> {
    let settings = &ctx.config.sign_in;
    let delay = args
        .delay_ms
        .map(Duration::from_millis)
        .unwrap_or_else(|| settings.submit_delay());
    let port = SimulatedSubmission::new(delay).rejecting(settings.reject_emails.iter().cloned());

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .with_context(|| "start async runtime")?;

    let (redirect_tx, redirect_rx) = mpsc::channel::<String>();
    let destination = settings.destination.clone();
    let (snapshot, signed_in) = runtime.block_on(async move {
        let navigate = move |path: &str| {
            let _ = redirect_tx.send(path.to_string());
        };
        let mut form = FormController::new(Arc::new(port), navigate, destination);
        form.set_field(Field::Email, args.email);
        form.set_field(Field::Password, args.password);
        form.submit();
        form.settle().await;
        (form.snapshot(), form.signed_in().map(str::to_string))
    });
    let redirect = redirect_rx.try_recv().ok();
    debug!(state = snapshot.submission_state.label(), "sign-in finished");

    match &snapshot.submission_state {
        SubmissionState::Succeeded => {
            let destination = redirect.unwrap_or_else(|| settings.destination.clone());
            let email = signed_in.unwrap_or_default();
            if ctx.json {
                print_json(&serde_json::json!({
                    "state": snapshot.submission_state.label(),
                    "email": email,
                    "redirect": destination,
                }))?;
            } else {
                println!("signed in as {}", email);
                println!("redirect: {}", destination);
            }
            Ok(())
        }
        SubmissionState::Failed(errors) => {
            if ctx.json {
                print_json(&snapshot.submission_state)?;
            } else {
                for (field, message) in &errors.fields {
                    println!("{}: {}", field, message);
                }
            }
            match &errors.form {
                Some(message) => Err(rejected(message.clone())),
                None => Err(invalid_input("credentials failed validation")),
            }
        }
        other => Err(anyhow::anyhow!(
            "sign-in ended in unexpected state: {}",
            other.label()
        )),
    }
}
