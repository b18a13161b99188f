use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;
use tempfile::TempDir;

mod common;
use common::{assertions, fixtures::*, repository::*};

#[cfg(test)]
mod cli_tests {
    use super::*;

    #[test]
    fn test_outside_repository_exits_with_error() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;

        let mut cmd = Command::cargo_bin("gitdash")?;
        cmd.arg("--path")
            .arg(temp_dir.path())
            .assert()
            .failure()
            .code(1)
            .stderr(assertions::not_in_git_repo())
            .stderr(predicate::str::contains("✕ Error:"));

        Ok(())
    }

    #[test]
    fn test_version_flag() -> anyhow::Result<()> {
        let mut cmd = Command::cargo_bin("gitdash")?;
        cmd.arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));

        Ok(())
    }

    #[test]
    fn test_json_snapshot_of_repository() -> anyhow::Result<()> {
        let repo = create_main_dev_repo()?;

        let mut cmd = Command::cargo_bin("gitdash")?;
        cmd.arg("--json")
            .current_dir(repo.path())
            .assert()
            .success()
            .stdout(assertions::has_current_branch("main"))
            .stdout(predicate::str::contains("\"name\": \"dev\""))
            .stdout(predicate::str::contains("main: readme"));

        Ok(())
    }

    #[test]
    fn test_json_snapshot_of_empty_repository() -> anyhow::Result<()> {
        let repo = setup_test_repo()?;

        let mut cmd = Command::cargo_bin("gitdash")?;
        cmd.args(["--json", "--path"])
            .arg(repo.path())
            .assert()
            .success()
            .stdout(assertions::has_current_branch(""))
            .stdout(predicate::str::contains("\"commits\": []"));

        Ok(())
    }

    #[test]
    fn test_config_controls_commit_count() -> anyhow::Result<()> {
        let repo = create_main_dev_repo()?;
        let config = repo.path().join("dash.json");
        std::fs::write(&config, r#"{ "commits": { "show_count": 1 } }"#)?;

        let output = Command::cargo_bin("gitdash")?
            .args(["--json", "--config"])
            .arg(&config)
            .current_dir(repo.path())
            .output()?;
        assert!(output.status.success());

        let snapshot: serde_json::Value = serde_json::from_slice(&output.stdout)?;
        assert_eq!(snapshot["commits"].as_array().map(Vec::len), Some(1));
        Ok(())
    }

    #[test]
    fn test_bad_config_warns_and_uses_defaults() -> anyhow::Result<()> {
        let repo = create_main_dev_repo()?;

        let mut cmd = Command::cargo_bin("gitdash")?;
        cmd.args(["--json", "--config", "does-not-exist.json"])
            .current_dir(repo.path())
            .assert()
            .success()
            .stderr(assertions::config_warning())
            .stdout(assertions::has_current_branch("main"));

        Ok(())
    }

    #[test]
    fn test_yaml_config_is_reported() -> anyhow::Result<()> {
        let repo = create_main_dev_repo()?;
        create_file(repo.path(), ".gitdash.yaml", "commits:\n  show_count: 1\n")?;

        let mut cmd = Command::cargo_bin("gitdash")?;
        cmd.arg("--json")
            .current_dir(repo.path())
            .assert()
            .success()
            .stderr(assertions::config_warning())
            .stderr(predicate::str::contains(".gitdash.yaml"))
            .stdout(predicate::str::contains("main: bootstrap"));

        Ok(())
    }
}
