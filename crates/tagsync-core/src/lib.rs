//! Core types and configuration for tagsync.
//!
//! This crate defines the `tagsync.toml` schema ([`TagsyncConfig`]), the
//! image tag format ([`ImageTag`]), and the deployment descriptor patch
//! logic ([`manifest`]).

pub mod config;
pub mod error;
pub mod manifest;
pub mod tag;

pub use config::{GitConfig, ManifestConfig, RegistryConfig, TagsyncConfig};
pub use error::{Error, Result};
pub use manifest::{Patched, patch_file, patch_image_line};
pub use tag::{ImageRef, ImageTag};
