use std::path::Path;

use crate::tag::ImageRef;

/// Outcome of a descriptor patch attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patched {
    /// The image line was rewritten to carry the new tag.
    Changed(String),
    /// No line matched the expected image prefix; content untouched.
    Unchanged,
}

/// Rewrite the tag suffix of the first line matching
/// `image: <host>/<owner>/<repo>:`.
///
/// Leading whitespace on the matched line is preserved and every other line
/// is carried over byte for byte. A descriptor with no matching line is left
/// alone; callers treat that as a successful no-op, not a failure.
pub fn patch_image_line(content: &str, image: &ImageRef, new_tag: &str) -> Patched {
    let prefix = image.line_prefix();
    let mut changed = false;
    let mut lines: Vec<String> = Vec::new();

    for line in content.split('\n') {
        if !changed {
            let trimmed = line.trim_start();
            if trimmed.starts_with(prefix.as_str()) {
                let indent = &line[..line.len() - trimmed.len()];
                lines.push(format!("{indent}{prefix}{new_tag}"));
                changed = true;
                continue;
            }
        }
        lines.push(line.to_owned());
    }

    if changed {
        Patched::Changed(lines.join("\n"))
    } else {
        tracing::info!(prefix = %prefix, "no matching image line in descriptor");
        Patched::Unchanged
    }
}

/// Patch the descriptor file in place. The file is only rewritten when the
/// image line actually matched; on [`Patched::Unchanged`] it is not touched.
pub fn patch_file(path: &Path, image: &ImageRef, new_tag: &str) -> crate::Result<Patched> {
    let content = std::fs::read_to_string(path).map_err(|e| crate::Error::DescriptorRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    match patch_image_line(&content, image, new_tag) {
        Patched::Changed(updated) => {
            std::fs::write(path, &updated).map_err(|e| crate::Error::DescriptorWrite {
                path: path.to_path_buf(),
                source: e,
            })?;
            Ok(Patched::Changed(updated))
        }
        Patched::Unchanged => Ok(Patched::Unchanged),
    }
}
