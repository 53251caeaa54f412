use crate::commands::{print_json, Context};
use crate::error::invalid_input;
use anyhow::Result;
use clap::Args;
use creator_core::{validate, Credentials, Field, ValidationResult};

#[derive(Debug, Args)]
pub struct ValidateArgs {
    #[arg(long, default_value = "")]
    pub email: String,
    #[arg(long, default_value = "")]
    pub password: String,
}

pub fn validate_credentials(ctx: &Context<'_>, args: ValidateArgs) -> Result<()> {
    let credentials = Credentials::new(args.email, args.password);
    match validate(&credentials) {
        ValidationResult::Valid(normalized) => {
            if ctx.json {
                print_json(&serde_json::json!({
                    "valid": true,
                    "email": normalized.email(),
                }))?;
            } else {
                println!("valid: {}", normalized.email());
            }
            Ok(())
        }
        ValidationResult::Invalid(violations) => {
            if ctx.json {
                print_json(&serde_json::json!({
                    "valid": false,
                    "violations": violations,
                }))?;
            } else {
                for field in Field::ALL {
                    for message in violations.messages(field) {
                        println!("{}: {}", field, message);
                    }
                }
            }
            Err(invalid_input("credentials failed validation"))
        }
    }
}
