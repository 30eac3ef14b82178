use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

fn tagsync() -> assert_cmd::Command {
    cargo_bin_cmd!("tagsync")
}

/// git init + identity + one commit, so HEAD resolves.
fn init_git_repo(dir: &Path) {
    for args in [
        vec!["init"],
        vec!["config", "user.email", "t@t.com"],
        vec!["config", "user.name", "T"],
        vec!["add", "."],
        vec!["commit", "--allow-empty", "-m", "init"],
    ] {
        std::process::Command::new("git")
            .args(&args)
            .current_dir(dir)
            .output()
            .unwrap();
    }
}

fn write_config(dir: &Path) {
    std::fs::write(
        dir.join("tagsync.toml"),
        "[registry]\nowner = \"alice\"\nrepo = \"myapp\"\n",
    )
    .unwrap();
}

fn write_descriptor(dir: &Path, image_line: &str) {
    std::fs::create_dir_all(dir.join("manifests")).unwrap();
    std::fs::write(
        dir.join("manifests/deployment.yaml"),
        format!("kind: Deployment\n          {image_line}\n"),
    )
    .unwrap();
}

// ── Help / Version ──

#[test]
fn shows_help() {
    tagsync()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("GitOps descriptor"));
}

#[test]
fn shows_version() {
    tagsync()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("tagsync"));
}

// ── Tag Command ──

#[test]
fn tag_prints_sha_and_timestamp() {
    let tmp = TempDir::new().unwrap();
    init_git_repo(tmp.path());

    tagsync()
        .args(["tag", "--context"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"(?m)^[0-9a-f]{4,7}-[0-9]{14}$").unwrap());
}

#[test]
fn tag_fails_outside_git_repo() {
    let tmp = TempDir::new().unwrap();

    tagsync()
        .args(["tag", "--context"])
        .arg(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("HEAD"));
}

// ── Patch Command ──

#[test]
fn patch_rewrites_matching_image_line() {
    let tmp = TempDir::new().unwrap();
    write_config(tmp.path());
    write_descriptor(tmp.path(), "image: ghcr.io/alice/myapp:oldtag");

    tagsync()
        .args(["patch", "--tag", "abc1234-20250101000000", "--context"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated"));

    let content = std::fs::read_to_string(tmp.path().join("manifests/deployment.yaml")).unwrap();
    assert!(content.contains("image: ghcr.io/alice/myapp:abc1234-20250101000000"));
    assert!(content.starts_with("kind: Deployment\n"));
}

#[test]
fn patch_miss_succeeds_and_leaves_file_alone() {
    let tmp = TempDir::new().unwrap();
    write_config(tmp.path());
    write_descriptor(tmp.path(), "image: ghcr.io/bob/otherapp:oldtag");
    let before = std::fs::read(tmp.path().join("manifests/deployment.yaml")).unwrap();

    tagsync()
        .args(["patch", "--tag", "newtag", "--context"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("left unchanged"));

    let after = std::fs::read(tmp.path().join("manifests/deployment.yaml")).unwrap();
    assert_eq!(before, after);
}

#[test]
fn patch_fails_without_owner() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("tagsync.toml"), "").unwrap();

    tagsync()
        .args(["patch", "--tag", "t", "--context"])
        .arg(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("registry.owner"));
}

// ── Run Command ──

#[test]
fn run_fails_without_owner_before_touching_docker() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("tagsync.toml"), "").unwrap();
    init_git_repo(tmp.path());

    tagsync()
        .args(["run", "--context"])
        .arg(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("registry.owner"));
}

#[test]
fn run_skips_when_head_carries_marker() {
    let tmp = TempDir::new().unwrap();
    write_config(tmp.path());
    init_git_repo(tmp.path());
    std::process::Command::new("git")
        .args(["commit", "--allow-empty", "-m", "sync\n\n[tagsync skip]"])
        .current_dir(tmp.path())
        .output()
        .unwrap();

    tagsync()
        .args(["run", "--context"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing to do"));
}

#[test]
fn run_fails_outside_git_repo() {
    let tmp = TempDir::new().unwrap();
    write_config(tmp.path());

    tagsync()
        .args(["run", "--context"])
        .arg(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("git"));
}

// ── Init Command ──

#[test]
fn init_writes_config_and_workflow() {
    let tmp = TempDir::new().unwrap();

    tagsync()
        .current_dir(tmp.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created"));

    assert!(tmp.path().join("tagsync.toml").exists());
    let workflow = std::fs::read_to_string(
        tmp.path().join(".github/workflows/tagsync-release.yml"),
    )
    .unwrap();
    assert!(workflow.contains("paths-ignore:"));
    assert!(workflow.contains("manifests/**"));
    assert!(workflow.contains("tagsync run"));
}

#[test]
fn init_keeps_existing_config() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(
        tmp.path().join("tagsync.toml"),
        "[manifest]\npath = \"deploy/app.yaml\"\n",
    )
    .unwrap();

    tagsync()
        .current_dir(tmp.path())
        .arg("init")
        .assert()
        .success();

    // Existing config untouched; workflow reflects its manifest path.
    let config = std::fs::read_to_string(tmp.path().join("tagsync.toml")).unwrap();
    assert_eq!(config, "[manifest]\npath = \"deploy/app.yaml\"\n");
    let workflow = std::fs::read_to_string(
        tmp.path().join(".github/workflows/tagsync-release.yml"),
    )
    .unwrap();
    assert!(workflow.contains("deploy/**"));
}

#[test]
fn init_fails_if_workflow_exists() {
    let tmp = TempDir::new().unwrap();
    std::fs::create_dir_all(tmp.path().join(".github/workflows")).unwrap();
    std::fs::write(
        tmp.path().join(".github/workflows/tagsync-release.yml"),
        "name: Release\n",
    )
    .unwrap();

    tagsync()
        .current_dir(tmp.path())
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

// ── Check Command ──

#[test]
fn check_reports_missing_pieces_and_fails() {
    let tmp = TempDir::new().unwrap();

    tagsync()
        .args(["check", "--context"])
        .arg(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("some checks failed"));
}
