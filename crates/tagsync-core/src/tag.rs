use std::fmt;

use chrono::{DateTime, Utc};

/// Unique per-run image tag: `<short-sha>-<14-digit-UTC-timestamp>`.
///
/// The commit component is truncated to 7 characters (a no-op when the id is
/// already shorter). The timestamp has second granularity; same-second runs
/// of different commits still produce distinct tags via the sha component.
/// Concurrent same-second runs of the same commit would collide (accepted).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageTag(String);

impl ImageTag {
    /// Pure formatting; no validation, no error conditions.
    pub fn new(commit_id: &str, at: DateTime<Utc>) -> Self {
        let short: String = commit_id.chars().take(7).collect();
        Self(format!("{short}-{}", at.format("%Y%m%d%H%M%S")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fully-qualified image location: `<host>/<owner>/<repo>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    pub host: String,
    pub owner: String,
    pub repo: String,
}

impl ImageRef {
    /// Render `host/owner/repo:tag`.
    pub fn with_tag(&self, tag: &str) -> String {
        format!(
            "{host}/{owner}/{repo}:{tag}",
            host = self.host,
            owner = self.owner,
            repo = self.repo,
        )
    }

    /// Descriptor line prefix a matching image line must carry,
    /// up to and including the tag separator.
    pub fn line_prefix(&self) -> String {
        format!(
            "image: {host}/{owner}/{repo}:",
            host = self.host,
            owner = self.owner,
            repo = self.repo,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, secs).unwrap()
    }

    #[test]
    fn tag_joins_short_sha_and_timestamp() {
        let tag = ImageTag::new("abc1234", at(0));
        assert_eq!(tag.as_str(), "abc1234-20250101000000");
    }

    #[test]
    fn long_commit_id_truncated_to_seven() {
        let tag = ImageTag::new("abc1234def5678", at(0));
        assert_eq!(tag.as_str(), "abc1234-20250101000000");
    }

    #[test]
    fn short_commit_id_taken_as_is() {
        let tag = ImageTag::new("ab12", at(0));
        assert_eq!(tag.as_str(), "ab12-20250101000000");
    }

    #[test]
    fn different_commits_same_second_stay_distinct() {
        let a = ImageTag::new("aaaaaaa", at(30));
        let b = ImageTag::new("bbbbbbb", at(30));
        assert_ne!(a, b);
    }

    #[test]
    fn same_commit_different_seconds_stay_distinct() {
        let a = ImageTag::new("abc1234", at(30));
        let b = ImageTag::new("abc1234", at(31));
        assert_ne!(a, b);
    }

    #[test]
    fn image_ref_renders_reference_and_prefix() {
        let image = ImageRef {
            host: "ghcr.io".to_owned(),
            owner: "alice".to_owned(),
            repo: "myapp".to_owned(),
        };
        assert_eq!(image.with_tag("v1"), "ghcr.io/alice/myapp:v1");
        assert_eq!(image.line_prefix(), "image: ghcr.io/alice/myapp:");
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn tag_never_panics(commit in "\\PC*", secs in 0u32..60) {
                let _ = ImageTag::new(&commit, at(secs));
            }

            #[test]
            fn tag_format_holds(commit in "[0-9a-f]{1,40}", secs in 0u32..60) {
                let tag = ImageTag::new(&commit, at(secs));
                let expected_sha: String = commit.chars().take(7).collect();
                let (sha, stamp) = tag.as_str().split_once('-').unwrap();
                prop_assert_eq!(sha, expected_sha);
                prop_assert_eq!(stamp.len(), 14);
                prop_assert!(stamp.chars().all(|c| c.is_ascii_digit()));
            }

            #[test]
            fn distinct_commits_never_collide(
                a in "[0-9a-f]{7,40}",
                b in "[0-9a-f]{7,40}",
                secs in 0u32..60,
            ) {
                prop_assume!(a.chars().take(7).ne(b.chars().take(7)));
                prop_assert_ne!(ImageTag::new(&a, at(secs)), ImageTag::new(&b, at(secs)));
            }
        }
    }
}
