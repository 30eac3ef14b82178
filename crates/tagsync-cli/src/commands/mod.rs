mod check;
mod init;
mod patch;
mod run;
mod tag;

/// Environment variable holding the registry credential.
pub(crate) const REGISTRY_TOKEN_ENV: &str = "TAGSYNC_REGISTRY_TOKEN";

pub use check::check;
pub use init::init;
pub use patch::patch;
pub use run::run;
pub use tag::tag;
