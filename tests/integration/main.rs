//! Integration tests for Wagecast

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    const DATASET: &str = "\
Job Title,Industry,Education Level,Location,Employment Type,Company Size,Remote,YearsExperience,Salary (in INR)
Software Engineer,IT,Bachelor's,Bangalore,Full-time,Large,Yes,3.0,900000
Software Engineer,IT,Bachelor's,Bangalore,Full-time,Large,Yes,3.6,1000000
Data Analyst,Finance,Master's,Pune,Contract,Small,No,1.2,450000
";

    const REQUEST: [&str; 16] = [
        "--job-title",
        "Software Engineer",
        "--employment-type",
        "Full-time",
        "--industry",
        "IT",
        "--company-size",
        "Large",
        "--years-experience",
        "3",
        "--remote",
        "Yes",
        "--location",
        "Bangalore",
        "--education-level",
        "Bachelor's",
    ];

    /// Temp workspace with a dataset, a cache path and a config pointing at both
    struct Workspace {
        dir: TempDir,
    }

    impl Workspace {
        fn new(estimator: &str) -> Self {
            let dir = TempDir::new().unwrap();
            std::fs::write(dir.path().join("salaries.csv"), DATASET).unwrap();
            let config = format!(
                "[dataset]\npath = '{}'\n\n[cache]\ndb_path = '{}'\n\n\
                 [progress]\ndelays_ms = [1, 1, 1, 1]\npoll_interval_ms = 1\n\n{}",
                dir.path().join("salaries.csv").display(),
                dir.path().join("cache.db").display(),
                estimator,
            );
            std::fs::write(dir.path().join("config.toml"), config).unwrap();
            Self { dir }
        }

        fn path(&self) -> &Path {
            self.dir.path()
        }

        fn db_path(&self) -> PathBuf {
            self.path().join("cache.db")
        }

        fn cmd(&self) -> Command {
            let mut cmd = cargo_bin_cmd!("wagecast");
            cmd.current_dir(self.path())
                .env("WAGECAST_CONFIG", self.path().join("config.toml"))
                .env_remove("GEMINI_KEY")
                .env("CI", "1");
            cmd
        }
    }

    fn gemini_without_key() -> &'static str {
        "[estimator]\nprovider = 'gemini'\napi_key_env = 'WAGECAST_TEST_NO_SUCH_KEY'\n"
    }

    fn sample_request() -> wagecast::predict::PredictionRequest {
        wagecast::predict::PredictionRequest::builder()
            .job_title("Software Engineer")
            .employment_type("Full-time")
            .industry("IT")
            .company_size("Large")
            .years_experience(3.0)
            .remote("Yes")
            .location("Bangalore")
            .education_level("Bachelor's")
            .build()
            .unwrap()
    }

    #[test]
    fn help_displays() {
        cargo_bin_cmd!("wagecast")
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("predict"));
    }

    #[test]
    fn version_displays() {
        cargo_bin_cmd!("wagecast")
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("wagecast"));
    }

    #[test]
    fn config_path_uses_flag() {
        let ws = Workspace::new("");
        ws.cmd()
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_show() {
        let ws = Workspace::new("");
        ws.cmd()
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[estimator]"))
            .stdout(predicate::str::contains("salaries.csv"));
    }

    #[test]
    fn config_set_persists() {
        let ws = Workspace::new("");
        ws.cmd()
            .args(["config", "set", "estimator.timeout_secs", "5"])
            .assert()
            .success();
        ws.cmd()
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("timeout_secs = 5"));
    }

    #[test]
    fn config_set_unknown_key_fails() {
        let ws = Workspace::new("");
        ws.cmd()
            .args(["config", "set", "estimator.color", "blue"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Unknown config key"));
    }

    #[test]
    fn options_lists_values() {
        let ws = Workspace::new("");
        ws.cmd()
            .args(["options", "--field", "job-title", "--format", "plain"])
            .assert()
            .success()
            .stdout("job-title\tData Analyst\njob-title\tSoftware Engineer\n");
    }

    #[test]
    fn options_missing_dataset() {
        let ws = Workspace::new("");
        std::fs::remove_file(ws.path().join("salaries.csv")).unwrap();
        ws.cmd()
            .args(["options"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Hint:"));
    }

    #[test]
    fn data_filters_rows() {
        let ws = Workspace::new("");
        ws.cmd()
            .args(["data", "--filter", "industry=Finance", "--format", "plain"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Data Analyst"))
            .stdout(predicate::str::contains("Software Engineer").not());
    }

    #[test]
    fn ranges_average_salary() {
        let ws = Workspace::new("");
        ws.cmd()
            .args(["ranges", "--format", "json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"3-4 Years\""))
            .stdout(predicate::str::contains("950000"));
    }

    #[test]
    fn ranges_with_wider_bucket() {
        let ws = Workspace::new("");
        ws.cmd()
            .args(["ranges", "--bucket", "2", "--format", "plain"])
            .assert()
            .success()
            .stdout(predicate::str::contains("0-2 Years\tData Analyst"))
            .stdout(predicate::str::contains("2-4 Years\tSoftware Engineer"));
    }

    #[test]
    fn ranges_bucket_wider_than_data_fails() {
        let ws = Workspace::new("");
        ws.cmd()
            .args(["ranges", "--bucket", "9"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("expected 1 to 4 years"));
    }

    #[test]
    fn contribute_appends_row() {
        let ws = Workspace::new("");
        ws.cmd()
            .arg("contribute")
            .args(REQUEST)
            .args(["--salary", "1100000", "--yes"])
            .assert()
            .success();

        ws.cmd()
            .args(["data", "--filter", "location=Bangalore", "--format", "plain"])
            .assert()
            .success()
            .stdout(predicate::str::contains("1100000"));
    }

    #[test]
    fn contribute_rejects_bad_salary() {
        let ws = Workspace::new("");
        ws.cmd()
            .arg("contribute")
            .args(REQUEST)
            .args(["--salary", "-5", "--yes"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("salary"));
    }

    #[test]
    fn cache_key_is_stable() {
        let ws = Workspace::new("");
        let expected = format!("{}\n", wagecast::cache::fingerprint(&sample_request()));
        ws.cmd()
            .args(["cache", "key"])
            .args(REQUEST)
            .assert()
            .success()
            .stdout(expected);
    }

    #[test]
    fn cache_path_from_config() {
        let ws = Workspace::new("");
        ws.cmd()
            .args(["cache", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("cache.db"));
    }

    #[test]
    fn predict_incomplete_request_fails() {
        let ws = Workspace::new(gemini_without_key());
        ws.cmd()
            .args(["predict", "--job-title", "Software Engineer"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("missing"));
    }

    #[test]
    fn predict_rejects_zero_timeout() {
        let ws = Workspace::new(gemini_without_key());
        ws.cmd()
            .arg("predict")
            .args(REQUEST)
            .args(["--timeout", "0"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("--timeout"));
    }

    #[test]
    fn predict_rejects_years_beyond_limit() {
        let ws = Workspace::new(gemini_without_key());
        let mut request = REQUEST;
        request[9] = "1e308";
        ws.cmd()
            .arg("predict")
            .args(request)
            .assert()
            .failure()
            .stderr(predicate::str::contains("between 0 and 50"));
    }

    #[test]
    fn predict_without_key_and_cache_fails() {
        let ws = Workspace::new(gemini_without_key());
        ws.cmd()
            .arg("predict")
            .args(REQUEST)
            .assert()
            .failure()
            .stderr(predicate::str::contains("WAGECAST_TEST_NO_SUCH_KEY"));
    }

    #[tokio::test]
    async fn predict_serves_cached_estimate() {
        let ws = Workspace::new(gemini_without_key());
        {
            use wagecast::cache::{fingerprint, ResultStore, SqliteStore};
            let store = SqliteStore::open(&ws.db_path()).await.unwrap();
            store
                .put(&fingerprint(&sample_request()), "₹9,00,000 - ₹11,00,000 per annum")
                .await
                .unwrap();
        }

        ws.cmd()
            .arg("predict")
            .args(REQUEST)
            .args(["--format", "json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"source\": \"cache\""))
            .stdout(predicate::str::contains("₹9,00,000 - ₹11,00,000 per annum"));
    }

    #[cfg(unix)]
    #[test]
    fn predict_miss_then_hit_with_command_estimator() {
        let ws = Workspace::new(
            "[estimator]\nprovider = 'command'\n\
             command = ['sh', '-c', 'cat > /dev/null; echo \"  ₹7,00,000 - ₹9,00,000 per annum\"']\n",
        );

        ws.cmd()
            .arg("predict")
            .args(REQUEST)
            .args(["--format", "json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"source\": \"fresh\""))
            .stdout(predicate::str::contains("\"estimate\": \"₹7,00,000 - ₹9,00,000 per annum\""));

        ws.cmd()
            .arg("predict")
            .args(REQUEST)
            .args(["--format", "json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"source\": \"cache\""));

        ws.cmd()
            .args(["cache", "list", "--format", "plain"])
            .assert()
            .success()
            .stdout(predicate::str::contains("₹7,00,000 - ₹9,00,000 per annum"));
    }

    #[cfg(unix)]
    #[test]
    fn predict_empty_estimate_is_not_cached() {
        let ws = Workspace::new(
            "[estimator]\nprovider = 'command'\ncommand = ['sh', '-c', 'cat > /dev/null; echo']\n",
        );

        ws.cmd()
            .arg("predict")
            .args(REQUEST)
            .assert()
            .failure()
            .stderr(predicate::str::contains("empty"));

        ws.cmd()
            .args(["cache", "list", "--format", "plain"])
            .assert()
            .success()
            .stdout("");
    }

    #[test]
    fn init_creates_config_and_cache() {
        let ws = Workspace::new("");
        let config = ws.path().join("fresh").join("config.toml");
        cargo_bin_cmd!("wagecast")
            .current_dir(ws.path())
            .env("CI", "1")
            .env("HOME", ws.path())
            .env("XDG_STATE_HOME", ws.path().join("state"))
            .env("XDG_DATA_HOME", ws.path().join("data"))
            .env_remove("WAGECAST_CONFIG")
            .args(["--config", config.to_str().unwrap(), "init"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Prediction cache ready"));
        assert!(config.exists());
        assert!(ws.path().join("state").join("wagecast").join("salary_cache.db").exists());
    }
}
