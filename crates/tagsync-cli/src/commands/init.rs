use std::path::Path;

use tagsync_core::TagsyncConfig;

const WORKFLOW_PATH: &str = ".github/workflows/tagsync-release.yml";
const CONFIG_PATH: &str = "tagsync.toml";

/// Write tagsync.toml (when absent) and the GitHub Actions release workflow.
///
/// The workflow's `paths-ignore` on the descriptor directory is the primary
/// loop guard: a sync commit confined to that directory never re-triggers
/// the job. The skip marker handled by `run` covers the rest.
pub fn init() -> anyhow::Result<()> {
    let workflow_path = Path::new(WORKFLOW_PATH);
    if workflow_path.exists() {
        anyhow::bail!(
            "Workflow already exists at {WORKFLOW_PATH} — edit it directly, or delete it to re-run init"
        );
    }

    if !Path::new(CONFIG_PATH).exists() {
        std::fs::write(CONFIG_PATH, config_template())?;
        println!("Created {CONFIG_PATH} — fill in [registry].owner and [registry].repo");
    }

    let config = TagsyncConfig::load(Path::new("."))?;

    if let Some(parent) = workflow_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(
        workflow_path,
        generate_workflow_yaml(&config.git.branch, &config.manifest.path),
    )?;
    println!("Created {WORKFLOW_PATH}");
    println!();
    println!("Pushes to {} now build and publish an image,", config.git.branch);
    println!(
        "then update {} with the new tag.",
        config.manifest.path
    );

    Ok(())
}

/// The `paths-ignore` pattern covering the descriptor's directory, or the
/// descriptor file itself when it sits at the repository root.
fn paths_ignore_pattern(manifest_path: &str) -> String {
    match manifest_path.rsplit_once('/') {
        Some((dir, _)) if !dir.is_empty() => format!("{dir}/**"),
        _ => manifest_path.to_owned(),
    }
}

fn config_template() -> String {
    r#"[registry]
# host = "ghcr.io"
owner = ""
repo = ""
# alias = "latest"

[manifest]
# path = "manifests/deployment.yaml"

[git]
# remote = "origin"
# branch = "main"
# bot_name = "tagsync-bot"
# bot_email = "tagsync-bot@users.noreply.github.com"
# skip_marker = "[tagsync skip]"
"#
    .to_owned()
}

fn generate_workflow_yaml(branch: &str, manifest_path: &str) -> String {
    let pattern = paths_ignore_pattern(manifest_path);
    format!(
        r#"name: Release

on:
  push:
    branches: ["{branch}"]
    # Sync commits confined to the descriptor never re-trigger the job.
    paths-ignore:
      - "{pattern}"

permissions:
  contents: write
  packages: write

jobs:
  release:
    runs-on: ubuntu-latest
    steps:
      - uses: actions/checkout@v4

      - name: Install Rust
        uses: dtolnay/rust-toolchain@stable

      - name: Cache tagsync binary
        uses: actions/cache@v4
        with:
          path: ~/.cargo/bin/tagsync
          key: tagsync-cli-${{{{ hashFiles('Cargo.lock') }}}}

      - name: Install tagsync
        run: |
          if ! command -v tagsync &> /dev/null; then
            cargo install tagsync-cli
          fi

      - name: Release
        run: tagsync run
        env:
          TAGSYNC_REGISTRY_TOKEN: ${{{{ secrets.GITHUB_TOKEN }}}}
"#
    )
}
