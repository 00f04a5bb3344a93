use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::info;
use zip::write::FileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use super::config::ENTRY_POINT_NAME;
use super::{PipelineContext, PipelineError, Step};

/// Compresses the staging directory into the deployment archive.
pub struct ArchiveStep;

/// Relative, `/`-separated paths of every file under `root`, sorted.
///
/// # Errors
///
/// Returns an error if a directory cannot be read.
pub fn collect_entries(root: &Path) -> std::io::Result<Vec<String>> {
    fn walk(root: &Path, dir: &Path, out: &mut Vec<String>) -> std::io::Result<()> {
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_dir() {
                walk(root, &path, out)?;
            } else if let Ok(rel) = path.strip_prefix(root) {
                let name = rel
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/");
                out.push(name);
            }
        }
        Ok(())
    }

    let mut out = Vec::new();
    walk(root, root, &mut out)?;
    out.sort();
    Ok(out)
}

/// Writes every file under `staging` into a new zip at `archive`.
///
/// Entries are added in sorted order with a fixed timestamp, so an unchanged
/// staging directory always yields the same archive bytes.
///
/// # Errors
///
/// Returns an error if the staging directory cannot be read or the archive
/// cannot be written.
pub fn write_archive(staging: &Path, archive: &Path) -> Result<usize, PipelineError> {
    let archive_err = |detail: String| PipelineError::Archive {
        path: archive.to_path_buf(),
        detail,
    };

    let entries = collect_entries(staging).map_err(|e| archive_err(e.to_string()))?;
    if entries.is_empty() {
        return Err(archive_err(format!(
            "staging dir {} is empty",
            staging.display()
        )));
    }

    if let Some(parent) = archive.parent() {
        fs::create_dir_all(parent).map_err(|e| archive_err(e.to_string()))?;
    }
    let file = fs::File::create(archive).map_err(|e| archive_err(e.to_string()))?;
    let mut zip = ZipWriter::new(file);

    for name in &entries {
        let mode = if name == ENTRY_POINT_NAME { 0o755 } else { 0o644 };
        let options = FileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(DateTime::default())
            .unix_permissions(mode);
        let contents = fs::read(staging.join(name)).map_err(|e| archive_err(e.to_string()))?;
        zip.start_file(name.as_str(), options)
            .map_err(|e| archive_err(e.to_string()))?;
        zip.write_all(&contents)
            .map_err(|e| archive_err(e.to_string()))?;
    }

    zip.finish().map_err(|e| archive_err(e.to_string()))?;
    Ok(entries.len())
}

#[async_trait]
impl Step for ArchiveStep {
    fn name(&self) -> &'static str {
        "archive"
    }

    async fn run(&self, ctx: &mut PipelineContext) -> Result<(), PipelineError> {
        let staging = ctx.config.staging_dir.clone();
        let archive: PathBuf = ctx.config.archive.clone();
        let count = write_archive(&staging, &archive)?;
        info!("Packaged {} entries into {}", count, archive.display());
        ctx.archive = Some(archive);
        Ok(())
    }
}
