use async_trait::async_trait;
use aws_sdk_lambda::Client as LambdaClient;
use aws_sdk_lambda::primitives::Blob;
use tracing::info;

use super::{PipelineContext, PipelineError, Step};

/// What the remote side reported after accepting new code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployReceipt {
    pub function_name: String,
    pub code_sha256: Option<String>,
    pub last_modified: Option<String>,
}

/// Replaces the code of a named remote function.
#[async_trait]
pub trait FunctionDeployer: Send + Sync {
    async fn update_function_code(
        &self,
        function_name: &str,
        archive: Vec<u8>,
    ) -> Result<DeployReceipt, PipelineError>;
}

pub struct LambdaDeployer {
    client: LambdaClient,
}

impl LambdaDeployer {
    #[must_use]
    pub fn new(client: LambdaClient) -> Self {
        Self { client }
    }

    /// Loads AWS credentials from the environment for `region`.
    pub async fn from_region(region: &str) -> Self {
        let shared = aws_config::from_env()
            .region(aws_config::Region::new(region.to_string()))
            .load()
            .await;
        Self::new(LambdaClient::new(&shared))
    }
}

#[async_trait]
impl FunctionDeployer for LambdaDeployer {
    async fn update_function_code(
        &self,
        function_name: &str,
        archive: Vec<u8>,
    ) -> Result<DeployReceipt, PipelineError> {
        let resp = self
            .client
            .update_function_code()
            .function_name(function_name)
            .zip_file(Blob::new(archive))
            .send()
            .await
            .map_err(|e| PipelineError::Deploy {
                function: function_name.to_string(),
                detail: e.to_string(),
            })?;

        Ok(DeployReceipt {
            function_name: resp
                .function_name()
                .unwrap_or(function_name)
                .to_string(),
            code_sha256: resp.code_sha256().map(ToString::to_string),
            last_modified: resp.last_modified().map(ToString::to_string),
        })
    }
}

/// Publishes the archive produced earlier in the run.
pub struct DeployStep<D> {
    deployer: D,
}

impl<D: FunctionDeployer> DeployStep<D> {
    pub fn new(deployer: D) -> Self {
        Self { deployer }
    }
}

#[async_trait]
impl<D: FunctionDeployer> Step for DeployStep<D> {
    fn name(&self) -> &'static str {
        "deploy"
    }

    async fn run(&self, ctx: &mut PipelineContext) -> Result<(), PipelineError> {
        let archive = ctx
            .archive
            .clone()
            .ok_or(PipelineError::ArchiveNotProduced)?;
        let bytes = tokio::fs::read(&archive)
            .await
            .map_err(|e| PipelineError::Archive {
                path: archive.clone(),
                detail: e.to_string(),
            })?;

        let function_name = ctx.config.function_name.clone();
        info!(
            function = %function_name,
            bytes = bytes.len(),
            "Updating function code from {}",
            archive.display()
        );
        let receipt = self
            .deployer
            .update_function_code(&function_name, bytes)
            .await?;
        info!(
            function = %receipt.function_name,
            sha256 = receipt.code_sha256.as_deref().unwrap_or("-"),
            "Function code updated"
        );
        ctx.receipt = Some(receipt);
        Ok(())
    }
}
