use anyhow::{anyhow, Result};
use clap::Args;
use std::env;
use std::path::PathBuf;
use std::process::Command;

#[derive(Debug, Args)]
pub struct TuiArgs {
    /// Override the simulated authentication delay
    #[arg(long)]
    pub delay_ms: Option<u64>,
}

pub fn launch(config_path: Option<PathBuf>, args: TuiArgs, verbose: bool) -> Result<()> {
    let mut command = build_command(config_path, args.delay_ms);
    if verbose {
        eprintln!("launching {:?}", command.get_program());
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        let err = command.exec();
        Err(exec_error(err))
    }

    #[cfg(not(unix))]
    {
        use anyhow::Context as _;
        let status = command.status().with_context(|| "launch creator-tui")?;
        std::process::exit(status.code().unwrap_or(1));
    }
}

fn build_command(config_path: Option<PathBuf>, delay_ms: Option<u64>) -> Command {
    let mut command = Command::new(find_tui_binary());
    if let Some(path) = config_path {
        command.arg("--config").arg(path);
    }
    if let Some(value) = delay_ms {
        command.arg("--delay-ms").arg(value.to_string());
    }
    command
}

fn find_tui_binary() -> PathBuf {
    let name = format!("creator-tui{}", env::consts::EXE_SUFFIX);
    if let Ok(current) = env::current_exe() {
        if let Some(dir) = current.parent() {
            let candidate = dir.join(&name);
            if candidate.is_file() {
                return candidate;
            }
        }
    }
    PathBuf::from(name)
}

#[cfg_attr(not(unix), allow(dead_code))]
fn exec_error(err: std::io::Error) -> anyhow::Error {
    if err.kind() == std::io::ErrorKind::NotFound {
        return anyhow!(
            "creator-tui binary not found; build it with `cargo build -p creator-tui` or install the package"
        );
    }
    anyhow!("launch creator-tui failed: {}", err)
}
