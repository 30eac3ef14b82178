use std::fmt;
use std::path::Path;

use tagsync_core::TagsyncConfig;
use tagsync_release::{CheckResult, DockerClient, GitClient};

/// Environment readiness report for the release job.
#[derive(Debug, Default)]
struct CheckReport {
    docker: CheckResult,
    git: CheckResult,
    config_file: CheckResult,
    descriptor: CheckResult,
    image_line: CheckResult,
}

impl CheckReport {
    fn all_passed(&self) -> bool {
        self.docker.passed
            && self.git.passed
            && self.config_file.passed
            && self.descriptor.passed
            && self.image_line.passed
    }
}

impl fmt::Display for CheckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[{}] docker CLI: {}", self.docker.icon(), self.docker.detail)?;
        writeln!(f, "[{}] git CLI: {}", self.git.icon(), self.git.detail)?;
        writeln!(
            f,
            "[{}] tagsync.toml: {}",
            self.config_file.icon(),
            self.config_file.detail
        )?;
        writeln!(
            f,
            "[{}] descriptor: {}",
            self.descriptor.icon(),
            self.descriptor.detail
        )?;
        write!(
            f,
            "[{}] image line: {}",
            self.image_line.icon(),
            self.image_line.detail
        )
    }
}

/// Run all readiness checks without early return, then fail if any failed.
pub async fn check(context: &Path) -> anyhow::Result<()> {
    let mut report = CheckReport::default();

    let docker = DockerClient::new();
    match docker.version().await {
        Ok(v) => report.docker = CheckResult::ok(&v),
        Err(e) => report.docker = CheckResult::fail(&e.to_string()),
    }

    let git = GitClient::new(context);
    match git.version().await {
        Ok(v) => report.git = CheckResult::ok(&v),
        Err(e) => report.git = CheckResult::fail(&e.to_string()),
    }

    let config_path = context.join("tagsync.toml");
    let config = TagsyncConfig::load(context);
    report.config_file = match (&config, config_path.exists()) {
        (Ok(_), true) => CheckResult::ok("Found"),
        (Ok(_), false) => CheckResult::fail("Not found — run: tagsync init"),
        (Err(e), _) => CheckResult::fail(&e.to_string()),
    };

    // Descriptor checks need a loadable config with owner/repo.
    if let Ok(config) = &config {
        let descriptor = context.join(&config.manifest.path);
        match std::fs::read_to_string(&descriptor) {
            Ok(content) => {
                report.descriptor = CheckResult::ok(&config.manifest.path);
                report.image_line = match config.image_ref() {
                    Ok(image) => {
                        let prefix = image.line_prefix();
                        if content
                            .lines()
                            .any(|l| l.trim_start().starts_with(prefix.as_str()))
                        {
                            CheckResult::ok(&format!("Matches {prefix}<tag>"))
                        } else {
                            CheckResult::fail(&format!("No line matches {prefix}<tag>"))
                        }
                    }
                    Err(e) => CheckResult::fail(&e.to_string()),
                };
            }
            Err(_) => {
                report.descriptor =
                    CheckResult::fail(&format!("{} not found", config.manifest.path));
                report.image_line = CheckResult::fail("Descriptor missing");
            }
        }
    } else {
        report.descriptor = CheckResult::fail("Config not loadable");
        report.image_line = CheckResult::fail("Config not loadable");
    }

    println!();
    println!("{report}");

    if !report.all_passed() {
        anyhow::bail!("some checks failed — see above for details");
    }

    Ok(())
}
