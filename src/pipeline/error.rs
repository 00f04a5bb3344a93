use std::path::PathBuf;

use thiserror::Error;

/// Every variant is fatal: the run stops at the step that produced it.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("dependency manifest not found at {path}")]
    ManifestMissing { path: PathBuf },

    #[error("failed to spawn `{program}`: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("`{command}` exited with {status}")]
    CommandFailed { command: String, status: String },

    #[error("entry point not found at {path}")]
    EntryPointMissing { path: PathBuf },

    #[error("failed to stage {path}: {source}")]
    Stage {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write archive {path}: {detail}")]
    Archive { path: PathBuf, detail: String },

    #[error("no archive has been produced for deployment")]
    ArchiveNotProduced,

    #[error("invalid pipeline configuration: {0}")]
    Config(String),

    #[error("failed to update function {function}: {detail}")]
    Deploy { function: String, detail: String },
}
