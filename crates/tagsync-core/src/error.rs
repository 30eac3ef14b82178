use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to load config from {path}")]
    ConfigLoad {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config at {path}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("registry.{field} not set in tagsync.toml — set [registry].{field}")]
    MissingRegistryField { field: &'static str },

    // ── Descriptor file ──
    #[error("failed to read descriptor at {path}")]
    DescriptorRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write descriptor at {path}")]
    DescriptorWrite {
        path: PathBuf,
        source: std::io::Error,
    },
}
