use std::path::Path;

use chrono::{DateTime, Utc};
use secrecy::SecretString;
use tagsync_core::{ImageTag, Patched, TagsyncConfig, manifest};

use crate::docker::{DockerClient, PublishError};
use crate::executor::CommandExecutor;
use crate::git::{GitClient, GitError};

/// Result of a release pipeline run.
#[derive(Debug)]
pub struct ReleaseOutcome {
    pub steps: Vec<String>,
    /// Tag published by this run (`None` when the guard skipped it).
    pub tag: Option<ImageTag>,
    /// The HEAD commit was automation-authored and the run was skipped.
    pub skipped: bool,
}

#[derive(Debug, Default, Clone)]
pub struct ReleaseOptions {
    /// Skip the image build and registry pushes.
    pub skip_publish: bool,
    /// Skip the descriptor rewrite and sync commit.
    pub skip_sync: bool,
}

/// Run the release pipeline: guard → tag → build → push unique → push alias
/// → patch descriptor → commit → push.
///
/// Strictly sequential; the first failure aborts the run. A guard hit is an
/// early success exit. The unique tag is pushed before the alias, so a
/// surviving alias always points at a tag that exists.
pub async fn run<D: CommandExecutor, G: CommandExecutor>(
    docker: &DockerClient<D>,
    git: &GitClient<G>,
    config: &TagsyncConfig,
    context_dir: &Path,
    token: Option<&SecretString>,
    now: DateTime<Utc>,
    options: &ReleaseOptions,
) -> Result<ReleaseOutcome, ReleaseError> {
    let mut steps = Vec::new();

    // Loop guard: a HEAD commit carrying the skip marker was produced by a
    // previous run's manifest sync. Secondary to the workflow's path filter.
    if git.head_carries_marker(&config.git.skip_marker).await? {
        tracing::info!(marker = %config.git.skip_marker, "HEAD carries skip marker");
        steps.push(format!(
            "HEAD commit carries {} — automation-authored, nothing to do",
            config.git.skip_marker
        ));
        return Ok(ReleaseOutcome {
            steps,
            tag: None,
            skipped: true,
        });
    }

    let image = config.image_ref()?;

    let sha = git.head_short_sha().await?;
    let tag = ImageTag::new(&sha, now);
    let unique_ref = image.with_tag(tag.as_str());
    let alias_ref = image.with_tag(&config.registry.alias);
    steps.push(format!("Generated tag {tag}"));

    if options.skip_publish {
        steps.push("Publish skipped".to_owned());
    } else {
        match token {
            Some(token) => {
                let username = config.login_username().unwrap_or(image.owner.as_str());
                docker.login(&config.registry.host, username, token).await?;
                steps.push(format!("Logged in to {}", config.registry.host));
            }
            None => steps.push("No registry credential — using existing docker login".to_owned()),
        }

        docker.build(context_dir, &unique_ref).await?;
        steps.push(format!("Built {unique_ref}"));

        docker.retag(&unique_ref, &alias_ref).await?;

        // Unique tag first, floating alias second.
        docker.push(&unique_ref).await?;
        steps.push(format!("Pushed {unique_ref}"));
        docker.push(&alias_ref).await?;
        steps.push(format!("Pushed {alias_ref}"));
    }

    if options.skip_sync {
        steps.push("Descriptor sync skipped".to_owned());
    } else {
        let descriptor = context_dir.join(&config.manifest.path);
        match manifest::patch_file(&descriptor, &image, tag.as_str())? {
            Patched::Changed(_) => {
                let message = format!(
                    "Update {} image to {}\n\n{}",
                    image.repo, tag, config.git.skip_marker
                );
                git.commit_file(
                    &config.manifest.path,
                    &message,
                    &config.git.bot_name,
                    &config.git.bot_email,
                )
                .await?;
                git.push(&config.git.remote, &config.git.branch).await?;
                steps.push(format!(
                    "Committed and pushed {} to {} {}",
                    config.manifest.path, config.git.remote, config.git.branch
                ));
            }
            Patched::Unchanged => {
                steps.push(format!(
                    "No matching image line in {} — nothing to commit",
                    config.manifest.path
                ));
            }
        }
    }

    Ok(ReleaseOutcome {
        steps,
        tag: Some(tag),
        skipped: false,
    })
}

#[derive(Debug, thiserror::Error)]
pub enum ReleaseError {
    #[error("configuration error")]
    Config {
        #[from]
        source: tagsync_core::Error,
    },

    #[error("git operation failed")]
    Git {
        #[from]
        source: GitError,
    },

    #[error("publish failed")]
    Publish {
        #[from]
        source: PublishError,
    },
}
