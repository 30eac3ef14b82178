use serde::{Deserialize, Serialize};

use crate::tag::ImageRef;

/// tagsync.toml configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TagsyncConfig {
    #[serde(default)]
    pub registry: RegistryConfig,
    #[serde(default)]
    pub manifest: ManifestConfig,
    #[serde(default)]
    pub git: GitConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Registry host images are pushed to
    #[serde(default = "default_host")]
    pub host: String,
    /// Image namespace (registry owner / organization)
    pub owner: Option<String>,
    /// Image repository name
    pub repo: Option<String>,
    /// Floating alias re-pointed at every published image
    #[serde(default = "default_alias")]
    pub alias: String,
    /// Registry login username (defaults to owner)
    pub username: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestConfig {
    /// Deployment descriptor path, relative to the repository root
    #[serde(default = "default_manifest_path")]
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitConfig {
    /// Remote the sync commit is pushed to
    #[serde(default = "default_remote")]
    pub remote: String,
    /// Branch the sync commit is pushed to
    #[serde(default = "default_branch")]
    pub branch: String,
    /// Commit author name for sync commits
    #[serde(default = "default_bot_name")]
    pub bot_name: String,
    /// Commit author email for sync commits
    #[serde(default = "default_bot_email")]
    pub bot_email: String,
    /// Token embedded in sync commit messages. A HEAD commit whose message
    /// contains it is treated as automation-authored and the run is skipped.
    #[serde(default = "default_skip_marker")]
    pub skip_marker: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            owner: None,
            repo: None,
            alias: default_alias(),
            username: None,
        }
    }
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            path: default_manifest_path(),
        }
    }
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            remote: default_remote(),
            branch: default_branch(),
            bot_name: default_bot_name(),
            bot_email: default_bot_email(),
            skip_marker: default_skip_marker(),
        }
    }
}

impl TagsyncConfig {
    /// Load from tagsync.toml at the given path, or return defaults if not found.
    pub fn load(project_dir: &std::path::Path) -> crate::Result<Self> {
        let config_path = project_dir.join("tagsync.toml");
        if config_path.exists() {
            let content =
                std::fs::read_to_string(&config_path).map_err(|e| crate::Error::ConfigLoad {
                    path: config_path.clone(),
                    source: e,
                })?;
            toml::from_str(&content).map_err(|e| crate::Error::ConfigParse {
                path: config_path,
                source: e,
            })
        } else {
            Ok(Self::default())
        }
    }

    /// Resolve the image reference, requiring owner and repo to be set.
    /// Empty strings count as missing, so an unfilled config template is
    /// rejected here instead of producing a `host//:` reference downstream.
    pub fn image_ref(&self) -> crate::Result<ImageRef> {
        let owner = self
            .registry
            .owner
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or(crate::Error::MissingRegistryField { field: "owner" })?;
        let repo = self
            .registry
            .repo
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or(crate::Error::MissingRegistryField { field: "repo" })?;

        Ok(ImageRef {
            host: self.registry.host.clone(),
            owner: owner.to_owned(),
            repo: repo.to_owned(),
        })
    }

    /// Registry login username: explicit `registry.username`, else the owner.
    pub fn login_username(&self) -> Option<&str> {
        self.registry
            .username
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(self
                .registry
                .owner
                .as_deref()
                .filter(|s| !s.is_empty()))
    }
}

fn default_host() -> String {
    "ghcr.io".to_owned()
}

fn default_alias() -> String {
    "latest".to_owned()
}

fn default_manifest_path() -> String {
    "manifests/deployment.yaml".to_owned()
}

fn default_remote() -> String {
    "origin".to_owned()
}

fn default_branch() -> String {
    "main".to_owned()
}

fn default_bot_name() -> String {
    "tagsync-bot".to_owned()
}

fn default_bot_email() -> String {
    "tagsync-bot@users.noreply.github.com".to_owned()
}

fn default_skip_marker() -> String {
    "[tagsync skip]".to_owned()
}
