use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use fraud_digest::pipeline::config::{
    DEFAULT_ARCHIVE, DEFAULT_DEPLOY_REGION, DEFAULT_FUNCTION_NAME, DEFAULT_STAGING_DIR,
};
use fraud_digest::pipeline::{
    BuildProfile, LambdaDeployer, Pipeline, PipelineConfig, PipelineContext,
};
use tracing::{error, info};

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "fraud-digest-deploy",
    about = "Build, package and deploy the fraud digest Lambda",
    long_about = "Runs the build-and-deploy pipeline for the digest agent.\n\
                  Steps run in order and the first failure aborts the run."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the entry point and write the deployment archive
    Package(PackageArgs),
    /// Package, then replace the remote function's code with the archive
    Deploy {
        #[command(flatten)]
        package: PackageArgs,
        /// Name of the function to update
        #[arg(long, env = "FUNCTION_NAME", default_value = DEFAULT_FUNCTION_NAME)]
        function_name: String,
        /// Region the function lives in
        #[arg(long, env = "AWS_REGION", default_value = DEFAULT_DEPLOY_REGION)]
        region: String,
    },
}

#[derive(Args)]
struct PackageArgs {
    /// Dependency manifest of the function crate
    #[arg(long, default_value = "Cargo.toml")]
    manifest: PathBuf,
    /// Prebuilt entry point (defaults to the build output)
    #[arg(long)]
    entry_point: Option<PathBuf>,
    /// Directory assembled before compression
    #[arg(long, default_value = DEFAULT_STAGING_DIR)]
    staging_dir: PathBuf,
    /// Output archive path
    #[arg(long, default_value = DEFAULT_ARCHIVE)]
    archive: PathBuf,
    /// Compilation target triple
    #[arg(long)]
    target: Option<String>,
    /// Build profile used for the entry point
    #[arg(value_enum, long, default_value_t = ProfileArg::Release)]
    profile: ProfileArg,
    /// Extra files or directories copied into the archive root
    #[arg(long)]
    include: Vec<PathBuf>,
    /// Use an existing entry point instead of compiling
    #[arg(long)]
    skip_build: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum ProfileArg {
    Debug,
    Release,
}

impl From<ProfileArg> for BuildProfile {
    fn from(value: ProfileArg) -> Self {
        match value {
            ProfileArg::Debug => Self::Debug,
            ProfileArg::Release => Self::Release,
        }
    }
}

impl PackageArgs {
    fn into_config(self) -> PipelineConfig {
        PipelineConfig {
            manifest: self.manifest,
            entry_point: self.entry_point,
            staging_dir: self.staging_dir,
            archive: self.archive,
            target: self.target,
            profile: self.profile.into(),
            include: self.include,
            skip_build: self.skip_build,
            ..PipelineConfig::default()
        }
    }
}

// ── main ───────────────────────────────────────────────────────────

async fn run(cli: Cli) -> anyhow::Result<()> {
    let (pipeline, config) = match cli.command {
        Commands::Package(args) => (Pipeline::package(), args.into_config()),
        Commands::Deploy {
            package,
            function_name,
            region,
        } => {
            let config = PipelineConfig {
                function_name,
                region,
                ..package.into_config()
            };
            let deployer = LambdaDeployer::from_region(&config.region).await;
            (Pipeline::deploy(deployer), config)
        }
    };
    config.validate()?;

    info!(steps = ?pipeline.step_names(), "Running pipeline");
    let mut ctx = PipelineContext::new(config);
    let report = pipeline.run(&mut ctx).await?;

    if let Some(archive) = &ctx.archive {
        info!("Archive: {}", archive.display());
    }
    if let Some(receipt) = &ctx.receipt {
        info!(
            "Deployed {} (sha256 {})",
            receipt.function_name,
            receipt.code_sha256.as_deref().unwrap_or("unknown")
        );
    }
    info!(completed = ?report.completed, "Done");
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
