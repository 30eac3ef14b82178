use std::path::Path;

use chrono::Utc;
use tagsync_core::ImageTag;
use tagsync_release::GitClient;

/// Print the tag a run started now would publish for HEAD.
pub async fn tag(context: &Path) -> anyhow::Result<()> {
    let git = GitClient::new(context);
    let sha = git.head_short_sha().await?;
    let tag = ImageTag::new(&sha, Utc::now());

    println!("{tag}");

    Ok(())
}
