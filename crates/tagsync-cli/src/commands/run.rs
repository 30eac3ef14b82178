use std::path::Path;

use chrono::Utc;
use secrecy::SecretString;
use tagsync_core::TagsyncConfig;
use tagsync_release::pipeline::{self, ReleaseOptions};
use tagsync_release::{DockerClient, GitClient};

/// Execute the full release job.
pub async fn run(context: &Path, skip_publish: bool, skip_sync: bool) -> anyhow::Result<()> {
    let config = TagsyncConfig::load(context)?;
    let token = std::env::var(super::REGISTRY_TOKEN_ENV)
        // arch-lint: allow(no-silent-result-drop) reason="a missing credential falls back to the ambient docker login"
        .ok()
        .map(SecretString::from);

    let docker = DockerClient::new();
    let git = GitClient::new(context);
    let options = ReleaseOptions {
        skip_publish,
        skip_sync,
    };

    let outcome = pipeline::run(
        &docker,
        &git,
        &config,
        context,
        token.as_ref(),
        Utc::now(),
        &options,
    )
    .await?;

    for step in &outcome.steps {
        println!("{step}");
    }

    if let Some(tag) = &outcome.tag {
        println!();
        println!("Released: {tag}");
    }

    Ok(())
}
