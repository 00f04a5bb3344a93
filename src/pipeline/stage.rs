use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::info;

use super::config::ENTRY_POINT_NAME;
use super::{PipelineContext, PipelineError, Step};

/// Assembles the entry point and extra files into a clean staging directory.
pub struct StageStep;

fn stage_err(path: &Path) -> impl FnOnce(std::io::Error) -> PipelineError + '_ {
    move |source| PipelineError::Stage {
        path: path.to_path_buf(),
        source,
    }
}

fn copy_tree(src: &Path, dst: &Path, staged: &mut Vec<PathBuf>) -> Result<(), PipelineError> {
    if src.is_dir() {
        std::fs::create_dir_all(dst).map_err(stage_err(dst))?;
        let mut entries = std::fs::read_dir(src)
            .map_err(stage_err(src))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(stage_err(src))?;
        entries.sort_by_key(std::fs::DirEntry::file_name);
        for entry in entries {
            copy_tree(&entry.path(), &dst.join(entry.file_name()), staged)?;
        }
    } else {
        if let Some(parent) = dst.parent() {
            std::fs::create_dir_all(parent).map_err(stage_err(parent))?;
        }
        std::fs::copy(src, dst).map_err(stage_err(src))?;
        staged.push(dst.to_path_buf());
    }
    Ok(())
}

#[async_trait]
impl Step for StageStep {
    fn name(&self) -> &'static str {
        "stage"
    }

    async fn run(&self, ctx: &mut PipelineContext) -> Result<(), PipelineError> {
        // The staging dir is wiped below; refuse layouts where that hits inputs.
        ctx.config.validate_layout()?;

        let entry_point = ctx.config.entry_point_path();
        if !entry_point.is_file() {
            return Err(PipelineError::EntryPointMissing { path: entry_point });
        }

        let staging = ctx.config.staging_dir.clone();
        if staging.exists() {
            std::fs::remove_dir_all(&staging).map_err(stage_err(&staging))?;
        }
        std::fs::create_dir_all(&staging).map_err(stage_err(&staging))?;

        let mut staged = Vec::new();
        copy_tree(&entry_point, &staging.join(ENTRY_POINT_NAME), &mut staged)?;

        for include in &ctx.config.include {
            let Some(file_name) = include.file_name() else {
                return Err(PipelineError::Config(format!(
                    "include path {} has no file name",
                    include.display()
                )));
            };
            if !include.exists() {
                return Err(PipelineError::Stage {
                    path: include.clone(),
                    source: std::io::Error::new(std::io::ErrorKind::NotFound, "include not found"),
                });
            }
            copy_tree(include, &staging.join(file_name), &mut staged)?;
        }

        info!(
            "Staged {} files into {}",
            staged.len(),
            staging.display()
        );
        ctx.staged_files = staged;
        Ok(())
    }
}
