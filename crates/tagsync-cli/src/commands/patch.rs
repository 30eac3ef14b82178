use std::path::Path;

use tagsync_core::{Patched, TagsyncConfig, manifest};

/// Rewrite the descriptor image line to the given tag. No commit, no push;
/// a substitution miss is reported but is not a failure.
pub fn patch(tag: &str, context: &Path) -> anyhow::Result<()> {
    let config = TagsyncConfig::load(context)?;
    let image = config.image_ref()?;
    let descriptor = context.join(&config.manifest.path);

    match manifest::patch_file(&descriptor, &image, tag)? {
        Patched::Changed(_) => {
            println!("Updated {} to :{tag}", config.manifest.path);
        }
        Patched::Unchanged => {
            println!(
                "No matching image line in {} — left unchanged",
                config.manifest.path
            );
        }
    }

    Ok(())
}
