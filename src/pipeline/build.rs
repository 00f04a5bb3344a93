use std::process::Stdio;

use async_trait::async_trait;
use tracing::info;

use super::config::ENTRY_POINT_NAME;
use super::{PipelineContext, PipelineError, Step};

/// Compiles the entry point from the dependency manifest.
pub struct BuildStep;

/// Cargo arguments for the release build of the entry point.
#[must_use]
pub fn cargo_build_args(ctx: &PipelineContext) -> Vec<String> {
    let config = &ctx.config;
    let mut args = vec![
        "build".to_string(),
        "--manifest-path".to_string(),
        config.manifest.display().to_string(),
        "--bin".to_string(),
        ENTRY_POINT_NAME.to_string(),
    ];
    if let Some(flag) = config.profile.as_cargo_flag() {
        args.push(flag.to_string());
    }
    if let Some(target) = &config.target {
        args.push("--target".to_string());
        args.push(target.clone());
    }
    args
}

#[async_trait]
impl Step for BuildStep {
    fn name(&self) -> &'static str {
        "build"
    }

    async fn run(&self, ctx: &mut PipelineContext) -> Result<(), PipelineError> {
        let manifest = &ctx.config.manifest;
        if !manifest.is_file() {
            return Err(PipelineError::ManifestMissing {
                path: manifest.clone(),
            });
        }
        if ctx.config.skip_build {
            info!("Skipping build, using prebuilt entry point");
            return Ok(());
        }

        let args = cargo_build_args(ctx);
        let command = format!("cargo {}", args.join(" "));
        info!("+ {}", command);

        let status = tokio::process::Command::new("cargo")
            .args(&args)
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| PipelineError::Spawn {
                program: "cargo".to_string(),
                source: e,
            })?;

        if !status.success() {
            return Err(PipelineError::CommandFailed {
                command,
                status: status.to_string(),
            });
        }
        Ok(())
    }
}
