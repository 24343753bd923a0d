mod cli {
    #![allow(non_snake_case)]

    use assert_cmd::prelude::*;
    use predicates::str::{contains, starts_with};

    use std::io::Write;
    use std::process::Command;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    const NAME: &str = "netgrade";

    #[test]
    fn test_output__when_help_requested() -> TestResult {
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.arg("--help");

        cmd.assert().success();
        cmd.assert().success().stdout(contains("--office"));
        cmd.assert().success().stdout(contains("--multi-zone"));
        cmd.assert().success().stdout(contains("setup"));
        cmd.assert().success().stdout(contains("completion-generate"));
        Ok(())
    }

    #[test]
    fn test_output__when_version_requested() -> TestResult {
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.arg("--version");

        cmd.assert().success().stdout(starts_with("netgrade"));
        Ok(())
    }

    #[test]
    fn test_output__when_user_count_is_zero() -> TestResult {
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.arg("--users").arg("0");

        cmd.assert().failure().code(2);
        cmd.assert().failure().stderr(contains(
            "Error: User count 0 is invalid. Expected a value between 1-500.",
        ));
        Ok(())
    }

    #[test]
    fn test_output__when_user_count_too_big() -> TestResult {
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.arg("--users").arg("501");

        cmd.assert().failure().code(2);
        cmd.assert()
            .failure()
            .stderr(contains("User count 501 is invalid"));
        Ok(())
    }

    #[test]
    fn test_output__when_user_count_is_not_a_number() -> TestResult {
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.arg("--users").arg("many");

        cmd.assert().failure();
        cmd.assert().failure().stderr(contains("invalid value 'many'"));
        Ok(())
    }

    #[test]
    fn test_output__when_multi_zone_without_zone_users() -> TestResult {
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.arg("--multi-zone");

        cmd.assert().failure().code(2);
        cmd.assert().failure().stderr(contains(
            "Error: --zone-users is required when --multi-zone is set.",
        ));
        Ok(())
    }

    #[test]
    fn test_output__when_zone_user_count_out_of_range() -> TestResult {
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.arg("--multi-zone").arg("--zone-users").arg("0");

        cmd.assert().failure().code(2);
        cmd.assert()
            .failure()
            .stderr(contains("Zone user count 0 is invalid"));
        Ok(())
    }

    #[test]
    fn test_output__when_invalid_format_provided() -> TestResult {
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.arg("--format").arg("yaml");

        cmd.assert().failure();
        cmd.assert().failure().stderr(contains("invalid value 'yaml'"));
        Ok(())
    }

    #[test]
    fn test_output__when_unknown_flag_provided() -> TestResult {
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.arg("--frobnicate");

        cmd.assert().failure();
        cmd.assert()
            .failure()
            .stderr(contains("unexpected argument"));
        Ok(())
    }

    #[test]
    fn test_output__when_config_file_does_not_exist() -> TestResult {
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.arg("--config").arg("/nonexistent/netgrade.toml");

        cmd.assert().failure().code(1);
        cmd.assert()
            .failure()
            .stderr(contains("Could not read config file"));
        Ok(())
    }

    #[test]
    fn test_output__when_config_file_is_invalid_toml() -> TestResult {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(b"office_label = [not valid")?;
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.arg("--config").arg(file.path());

        cmd.assert().failure().code(1);
        cmd.assert()
            .failure()
            .stderr(contains("TOML parsing error"));
        Ok(())
    }

    #[test]
    fn test_output__when_config_file_has_out_of_range_user_count() -> TestResult {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(b"user_count = 700")?;
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.arg("--config").arg(file.path());

        cmd.assert().failure().code(1);
        cmd.assert()
            .failure()
            .stderr(contains("User count 700 is invalid"));
        Ok(())
    }

    #[test]
    fn test_output__when_config_file_has_invalid_format() -> TestResult {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(b"output_format = \"yaml\"")?;
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.arg("--config").arg(file.path());

        cmd.assert().failure().code(1);
        cmd.assert()
            .failure()
            .stderr(contains("Output format 'yaml' is invalid"));
        Ok(())
    }

    #[test]
    fn test_output__when_completion_generated_for_bash() -> TestResult {
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.arg("completion-generate").arg("bash");

        cmd.assert().success();
        cmd.assert().success().stdout(contains("netgrade"));
        Ok(())
    }

    #[test]
    fn test_output__when_completion_shell_missing() -> TestResult {
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.arg("completion-generate");

        cmd.assert().failure();
        Ok(())
    }
}
