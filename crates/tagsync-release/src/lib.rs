pub mod check;
pub mod docker;
pub mod executor;
pub mod git;
pub mod pipeline;

pub use check::CheckResult;
pub use docker::{DockerClient, PublishError};
pub use executor::{CommandExecutor, ExecError, RealExecutor};
pub use git::{GitClient, GitError};
pub use pipeline::{ReleaseError, ReleaseOptions, ReleaseOutcome};
