//! meshedit-cli - replay a command script against an in-memory modeling host
//!
//! Usage: `meshedit-cli [--config <file>] [--scene <file>] [script]`
//!
//! The script is read from the given path, or from stdin when no path is
//! given. Each request produces one JSON reply line on stdout; logs go to
//! stderr and are filtered with `RUST_LOG` (default `meshedit=info`).
//!
//! Move requests without `space` or `backend` use the configured defaults.
//! A scene file is a JSON array of objects; mesh objects without a `mesh`
//! entry get a 2-unit cube.

mod scene;

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use meshedit::MeshEditor;
use meshedit_config::{ConfigError, EditConfig};
use meshedit_ipc::{IpcError, Reply, parse_script};
use tracing::{error, info};

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid script: {0}")]
    Script(#[from] IpcError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Usage: {0}")]
    Usage(String),
}

#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    scene: Option<PathBuf>,
    script: Option<PathBuf>,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Args, CliError> {
    let mut parsed = Args::default();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" | "--scene" => {
                let value = args
                    .next()
                    .ok_or_else(|| CliError::Usage(format!("{} needs a path", arg)))?;
                if arg == "--config" {
                    parsed.config = Some(value.into());
                } else {
                    parsed.scene = Some(value.into());
                }
            }
            flag if flag.starts_with("--") => {
                return Err(CliError::Usage(format!("unknown flag {}", flag)));
            }
            _ if parsed.script.is_some() => {
                return Err(CliError::Usage("only one script path is allowed".to_string()));
            }
            _ => parsed.script = Some(arg.into()),
        }
    }
    Ok(parsed)
}

fn run(args: Args) -> Result<bool, CliError> {
    let config = match &args.config {
        Some(path) => EditConfig::from_json_file(path)?
            .with_overrides(|key| std::env::var(key).ok()),
        None => EditConfig::from_env(),
    };
    info!(
        "Defaults: space={}, backend={}, selected_only={}",
        config.space, config.backend, config.selected_only
    );

    let host = match &args.scene {
        Some(path) => scene::load_scene(path)?,
        None => scene::demo_scene(),
    };

    let script = match &args.script {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            text
        }
    };
    let requests = parse_script(&script)?;
    info!("Running {} requests", requests.len());

    let mut editor = MeshEditor::with_config(host, config);
    let mut ok = true;
    for request in requests {
        let reply = editor.handle(request);
        ok &= !matches!(reply, Reply::Error { .. });
        println!("{}", serde_json::to_string(&reply)?);
    }

    for suppressed in editor.host_mut().take_suppressed() {
        info!("Suppressed during run: {}", suppressed);
    }
    Ok(ok)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "meshedit=info".into()),
        )
        .init();

    let result = parse_args(std::env::args().skip(1)).and_then(run);
    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            error!("{}", e);
            ExitCode::from(2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<Args, CliError> {
        parse_args(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_parse_args() {
        let parsed = args(&["--scene", "scene.json", "moves.jsonl"]).unwrap();
        assert_eq!(parsed.scene, Some(PathBuf::from("scene.json")));
        assert_eq!(parsed.script, Some(PathBuf::from("moves.jsonl")));
        assert!(parsed.config.is_none());
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(matches!(args(&["--config"]), Err(CliError::Usage(_))));
        assert!(matches!(args(&["--verbose"]), Err(CliError::Usage(_))));
        assert!(matches!(args(&["a", "b"]), Err(CliError::Usage(_))));
    }
}
