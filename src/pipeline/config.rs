use std::path::{Path, PathBuf};

use super::error::PipelineError;

pub const DEFAULT_FUNCTION_NAME: &str = "FraudNewsAgent";
pub const DEFAULT_DEPLOY_REGION: &str = "eu-north-1";
pub const DEFAULT_STAGING_DIR: &str = "target/lambda/package";
pub const DEFAULT_ARCHIVE: &str = "target/lambda/function.zip";
pub const ENTRY_POINT_NAME: &str = "bootstrap";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildProfile {
    Debug,
    Release,
}

impl BuildProfile {
    #[must_use]
    pub fn dir_name(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Release => "release",
        }
    }

    #[must_use]
    pub fn as_cargo_flag(self) -> Option<&'static str> {
        match self {
            Self::Debug => None,
            Self::Release => Some("--release"),
        }
    }
}

/// Everything one pipeline run needs to know up front.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub function_name: String,
    pub region: String,
    pub manifest: PathBuf,
    /// Prebuilt entry point; when unset it is derived from the build target.
    pub entry_point: Option<PathBuf>,
    pub staging_dir: PathBuf,
    pub archive: PathBuf,
    pub target: Option<String>,
    pub profile: BuildProfile,
    pub include: Vec<PathBuf>,
    pub skip_build: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            function_name: DEFAULT_FUNCTION_NAME.to_string(),
            region: DEFAULT_DEPLOY_REGION.to_string(),
            manifest: PathBuf::from("Cargo.toml"),
            entry_point: None,
            staging_dir: PathBuf::from(DEFAULT_STAGING_DIR),
            archive: PathBuf::from(DEFAULT_ARCHIVE),
            target: None,
            profile: BuildProfile::Release,
            include: Vec::new(),
            skip_build: false,
        }
    }
}

impl PipelineConfig {
    /// Directory holding the manifest; cargo writes `target/` beneath it.
    #[must_use]
    pub fn project_dir(&self) -> &Path {
        match self.manifest.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        }
    }

    /// Path of the binary the build step produces.
    #[must_use]
    pub fn entry_point_path(&self) -> PathBuf {
        if let Some(path) = &self.entry_point {
            return path.clone();
        }
        let mut dir = self.project_dir().join("target");
        if let Some(target) = &self.target {
            dir = dir.join(target);
        }
        dir.join(self.profile.dir_name()).join(ENTRY_POINT_NAME)
    }

    /// # Errors
    ///
    /// Returns an error if the function name or region is blank, or if the
    /// file layout fails [`PipelineConfig::validate_layout`].
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.function_name.trim().is_empty() {
            return Err(PipelineError::Config("function name is empty".to_string()));
        }
        if self.region.trim().is_empty() {
            return Err(PipelineError::Config("region is empty".to_string()));
        }
        self.validate_layout()
    }

    /// Checks that wiping and refilling the staging directory cannot touch
    /// the project or the build inputs.
    ///
    /// # Errors
    ///
    /// Returns an error if the staging directory is, or contains, the project
    /// dir, the manifest, the entry point or the archive, or if an include
    /// would collide with the entry point name.
    pub fn validate_layout(&self) -> Result<(), PipelineError> {
        let staging = absolute(&self.staging_dir)?;
        let guarded = [
            ("project dir", self.project_dir().to_path_buf()),
            ("manifest", self.manifest.clone()),
            ("entry point", self.entry_point_path()),
            ("archive", self.archive.clone()),
        ];
        for (label, path) in guarded {
            if absolute(&path)?.starts_with(&staging) {
                return Err(PipelineError::Config(format!(
                    "{label} {} must not live inside staging dir {}",
                    path.display(),
                    self.staging_dir.display()
                )));
            }
        }

        if let Some(include) = self
            .include
            .iter()
            .find(|p| p.file_name().is_some_and(|name| name == ENTRY_POINT_NAME))
        {
            return Err(PipelineError::Config(format!(
                "include {} would overwrite the staged {ENTRY_POINT_NAME}",
                include.display()
            )));
        }
        Ok(())
    }
}

fn absolute(path: &Path) -> Result<PathBuf, PipelineError> {
    std::path::absolute(path)
        .map_err(|e| PipelineError::Config(format!("cannot resolve {}: {e}", path.display())))
}
