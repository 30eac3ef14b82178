use std::path::Path;

use secrecy::{ExposeSecret, SecretString};

use crate::executor::{CommandExecutor, ExecError, RealExecutor, args};

/// Container image build and publish client, parameterized over the executor
/// for testability.
pub struct DockerClient<E: CommandExecutor = RealExecutor> {
    executor: E,
}

impl DockerClient<RealExecutor> {
    pub fn new() -> Self {
        Self {
            executor: RealExecutor,
        }
    }
}

impl Default for DockerClient<RealExecutor> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: CommandExecutor> DockerClient<E> {
    pub fn with_executor(executor: E) -> Self {
        Self { executor }
    }

    pub async fn version(&self) -> Result<String, ExecError> {
        let out = self
            .executor
            .exec("docker", &args(["version", "--format", "{{.Client.Version}}"]))
            .await?;
        Ok(out.trim().to_owned())
    }

    /// Log in to the registry, piping the credential over stdin so it never
    /// appears in an argument list.
    pub async fn login(
        &self,
        host: &str,
        username: &str,
        token: &SecretString,
    ) -> Result<(), PublishError> {
        self.executor
            .exec_with_stdin(
                "docker",
                &args(["login", host, "--username", username, "--password-stdin"]),
                token.expose_secret().as_bytes(),
            )
            .await
            .map_err(|e| PublishError::Login { source: e })?;

        Ok(())
    }

    /// Build the image from the given build context.
    pub async fn build(&self, context_dir: &Path, image_ref: &str) -> Result<(), PublishError> {
        let context = context_dir
            .to_str()
            .ok_or_else(|| PublishError::InvalidContext(context_dir.to_path_buf()))?;

        self.executor
            .exec_streaming("docker", &args(["build", "--tag", image_ref, context]))
            .await
            .map_err(|e| PublishError::Build { source: e })
    }

    /// Point a second local tag at an already-built image.
    pub async fn retag(&self, src_ref: &str, dst_ref: &str) -> Result<(), PublishError> {
        self.executor
            .exec("docker", &args(["tag", src_ref, dst_ref]))
            .await
            .map_err(|e| PublishError::Retag { source: e })?;

        Ok(())
    }

    /// Push one image reference to the registry.
    pub async fn push(&self, image_ref: &str) -> Result<(), PublishError> {
        self.executor
            .exec_streaming("docker", &args(["push", image_ref]))
            .await
            .map_err(|e| PublishError::Push {
                image: image_ref.to_owned(),
                source: e,
            })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("build context path is not valid UTF-8: {0}")]
    InvalidContext(std::path::PathBuf),

    #[error("registry login failed")]
    Login { source: ExecError },

    #[error("image build failed")]
    Build { source: ExecError },

    #[error("local re-tag failed")]
    Retag { source: ExecError },

    #[error("push of {image} failed")]
    Push { image: String, source: ExecError },
}
