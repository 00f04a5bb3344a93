//! Build-and-deploy pipeline for the digest Lambda.
//!
//! ```text
//! fraud-digest-deploy deploy
//!   1. Build    ── cargo build --release --bin bootstrap
//!   2. Stage    ── copy bootstrap (+ includes) into the staging dir
//!   3. Archive  ── zip the staging dir into function.zip
//!   4. Deploy   ── lambda:UpdateFunctionCode with the archive bytes
//! ```
//!
//! Steps run strictly in order. The first failure ends the run and no later
//! step executes, so the remote function is only touched once an archive
//! exists. Deploys are last-writer-wins.

pub mod archive;
pub mod build;
pub mod config;
pub mod deploy;
pub mod error;
pub mod stage;

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::{error, info};

pub use archive::ArchiveStep;
pub use build::BuildStep;
pub use config::{BuildProfile, PipelineConfig};
pub use deploy::{DeployReceipt, DeployStep, FunctionDeployer, LambdaDeployer};
pub use error::PipelineError;
pub use stage::StageStep;

/// State handed from one step to the next.
#[derive(Debug, Clone)]
pub struct PipelineContext {
    pub config: PipelineConfig,
    pub staged_files: Vec<PathBuf>,
    pub archive: Option<PathBuf>,
    pub receipt: Option<DeployReceipt>,
}

impl PipelineContext {
    #[must_use]
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            staged_files: Vec::new(),
            archive: None,
            receipt: None,
        }
    }
}

#[async_trait]
pub trait Step: Send + Sync {
    fn name(&self) -> &'static str;

    async fn run(&self, ctx: &mut PipelineContext) -> Result<(), PipelineError>;
}

/// Names of the steps that completed, in execution order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineReport {
    pub completed: Vec<&'static str>,
}

/// A failed run: which step failed, what had completed before it, and why.
#[derive(Debug)]
pub struct PipelineFailure {
    pub step: &'static str,
    pub report: PipelineReport,
    pub error: PipelineError,
}

impl std::fmt::Display for PipelineFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "step `{}` failed: {}", self.step, self.error)
    }
}

impl std::error::Error for PipelineFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

pub struct Pipeline {
    steps: Vec<Box<dyn Step>>,
}

impl Pipeline {
    #[must_use]
    pub fn new(steps: Vec<Box<dyn Step>>) -> Self {
        Self { steps }
    }

    /// Build, stage and archive.
    #[must_use]
    pub fn package() -> Self {
        Self::new(vec![
            Box::new(BuildStep),
            Box::new(StageStep),
            Box::new(ArchiveStep),
        ])
    }

    /// Package, then replace the remote function's code.
    #[must_use]
    pub fn deploy<D>(deployer: D) -> Self
    where
        D: FunctionDeployer + 'static,
    {
        let mut pipeline = Self::package();
        pipeline.steps.push(Box::new(DeployStep::new(deployer)));
        pipeline
    }

    #[must_use]
    pub fn step_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|s| s.name()).collect()
    }

    /// # Errors
    ///
    /// Returns the first step failure; steps after it are not run.
    pub async fn run(&self, ctx: &mut PipelineContext) -> Result<PipelineReport, PipelineFailure> {
        let mut report = PipelineReport::default();
        for step in &self.steps {
            info!(step = step.name(), "Starting step");
            if let Err(e) = step.run(ctx).await {
                error!(step = step.name(), "Step failed: {}", e);
                return Err(PipelineFailure {
                    step: step.name(),
                    report,
                    error: e,
                });
            }
            report.completed.push(step.name());
        }
        info!(steps = ?report.completed, "Pipeline finished");
        Ok(report)
    }
}
