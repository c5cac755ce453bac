//! Integration tests for repin

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use tempfile::TempDir;

    fn repin() -> Command {
        cargo_bin_cmd!("repin")
    }

    #[test]
    fn help_displays() {
        repin()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Incremental Dependency Resolution Cache"));
    }

    #[test]
    fn version_displays() {
        repin()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("repin"));
    }

    #[test]
    fn cache_info_empty() {
        let temp = TempDir::new().unwrap();
        repin()
            .args(["--cache-dir"])
            .arg(temp.path().join("cache"))
            .args(["cache", "info"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Module caches:     0"))
            .stdout(predicate::str::contains("(none)"));
    }

    #[test]
    fn cache_clear_empty_succeeds() {
        let temp = TempDir::new().unwrap();
        repin()
            .args(["--cache-dir"])
            .arg(temp.path().join("cache"))
            .args(["cache", "clear"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Cleared entire dependency cache"));
    }

    #[test]
    fn cache_clear_absent_module_is_noop() {
        let temp = TempDir::new().unwrap();
        repin()
            .args(["--cache-dir"])
            .arg(temp.path().join("cache"))
            .args(["cache", "clear", "--module", "ghost"])
            .assert()
            .success()
            .stdout(predicate::str::contains("was not cached"));
    }

    #[test]
    fn resolve_missing_requirements_file_fails() {
        let temp = TempDir::new().unwrap();
        repin()
            .args(["--cache-dir"])
            .arg(temp.path().join("cache"))
            .args(["resolve", "-r", "/nonexistent/requirements.txt"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Requirements file not found"));
    }

    #[test]
    fn resolve_empty_directory_fails_with_hint() {
        let temp = TempDir::new().unwrap();
        repin()
            .current_dir(temp.path())
            .args(["--cache-dir"])
            .arg(temp.path().join("cache"))
            .args(["resolve"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("No requirements files"))
            .stderr(predicate::str::contains("Hint:"));
    }

    #[test]
    fn check_without_cache_reports_nothing_cached() {
        let temp = TempDir::new().unwrap();
        repin()
            .args(["--cache-dir"])
            .arg(temp.path().join("cache"))
            .arg("check")
            .assert()
            .success()
            .stdout(predicate::str::contains("No cached packages found"));
    }

    #[test]
    fn outdated_without_cache_reports_nothing_cached() {
        let temp = TempDir::new().unwrap();
        repin()
            .args(["--cache-dir"])
            .arg(temp.path().join("cache"))
            .arg("outdated")
            .assert()
            .success()
            .stdout(predicate::str::contains("No cached packages found"));
    }

    #[test]
    fn json_log_format_emits_structured_warnings() {
        let temp = TempDir::new().unwrap();
        let cache_dir = temp.path().join("cache");
        std::fs::create_dir_all(&cache_dir).unwrap();
        std::fs::write(cache_dir.join("dependency-cache.json"), b"garbage").unwrap();
        let config_path = temp.path().join("config.toml");
        std::fs::write(&config_path, "[general]\nlog_format = \"json\"\n").unwrap();

        // The corrupt cache file triggers a recovery warning, which
        // comes out as a JSON record instead of a plain line.
        repin()
            .args(["--config"])
            .arg(&config_path)
            .args(["--cache-dir"])
            .arg(&cache_dir)
            .args(["cache", "info"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"level\":\"WARN\""))
            .stdout(predicate::str::contains("Module caches:     0"));
    }

    #[test]
    fn corrupt_cache_file_is_recovered() {
        let temp = TempDir::new().unwrap();
        let cache_dir = temp.path().join("cache");
        std::fs::create_dir_all(&cache_dir).unwrap();
        std::fs::write(cache_dir.join("dependency-cache.json"), b"garbage").unwrap();

        repin()
            .args(["--cache-dir"])
            .arg(&cache_dir)
            .args(["cache", "info"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Module caches:     0"));
    }
}
