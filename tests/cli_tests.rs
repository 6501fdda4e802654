use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn lcdigest_cmd() -> Command {
    Command::cargo_bin("lcdigest").unwrap()
}

#[test]
fn test_help_shows_dry_run_flag() {
    lcdigest_cmd()
        .arg("run")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--dry-run"));
}

#[test]
fn test_help_shows_skip_email_flag() {
    lcdigest_cmd()
        .arg("run")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--skip-email"));
}

#[test]
fn test_skip_email_flag_description() {
    lcdigest_cmd()
        .arg("run")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "still write the report and advance the checkpoint",
        ));
}

#[test]
fn test_status_without_checkpoint_shows_fallback_notice() {
    let temp_dir = TempDir::new().unwrap();
    let checkpoint = temp_dir.path().join("checkpoint.txt");

    lcdigest_cmd()
        .arg("status")
        .env("LCDIGEST_CHECKPOINT_PATH", checkpoint.to_str().unwrap())
        .assert()
        .success()
        .stdout(predicate::str::contains("No checkpoint recorded."))
        .stdout(predicate::str::contains("falls back to the last 24 hours"));
}

#[test]
fn test_reset_to_then_status_round_trips() {
    let temp_dir = TempDir::new().unwrap();
    let checkpoint = temp_dir.path().join("checkpoint.txt");
    let checkpoint_path = checkpoint.to_str().unwrap().to_string();

    lcdigest_cmd()
        .arg("reset")
        .arg("--to")
        .arg("2026-01-25T16:00:00Z")
        .env("LCDIGEST_CHECKPOINT_PATH", &checkpoint_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Checkpoint set to"));

    lcdigest_cmd()
        .arg("status")
        .env("LCDIGEST_CHECKPOINT_PATH", &checkpoint_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("2026-01-25T16:00:00+00:00"));
}

#[test]
fn test_reset_without_to_clears_checkpoint() {
    let temp_dir = TempDir::new().unwrap();
    let checkpoint = temp_dir.path().join("checkpoint.txt");
    let checkpoint_path = checkpoint.to_str().unwrap().to_string();

    lcdigest_cmd()
        .arg("reset")
        .arg("--to")
        .arg("2026-01-25T16:00:00Z")
        .env("LCDIGEST_CHECKPOINT_PATH", &checkpoint_path)
        .assert()
        .success();

    lcdigest_cmd()
        .arg("reset")
        .env("LCDIGEST_CHECKPOINT_PATH", &checkpoint_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Checkpoint cleared."));

    lcdigest_cmd()
        .arg("status")
        .env("LCDIGEST_CHECKPOINT_PATH", &checkpoint_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("No checkpoint recorded."));
}

#[test]
fn test_reset_rejects_invalid_timestamp() {
    let temp_dir = TempDir::new().unwrap();
    let checkpoint = temp_dir.path().join("checkpoint.txt");

    lcdigest_cmd()
        .arg("reset")
        .arg("--to")
        .arg("next tuesday")
        .env("LCDIGEST_CHECKPOINT_PATH", checkpoint.to_str().unwrap())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid input"));
}

#[test]
fn test_run_fails_loudly_when_feed_is_unreachable() {
    let temp_dir = TempDir::new().unwrap();
    let checkpoint = temp_dir.path().join("checkpoint.txt");

    // Nothing listens on this port; the transport error must carry the
    // attempted offset and the process must exit non-zero.
    lcdigest_cmd()
        .arg("run")
        .arg("--dry-run")
        .env("LCDIGEST_CHECKPOINT_PATH", checkpoint.to_str().unwrap())
        .env("LCDIGEST_GRAPHQL_URL", "http://127.0.0.1:9/graphql")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Feed request failed at offset 0"));
}

#[test]
fn test_run_with_corrupt_checkpoint_fails_without_fallback() {
    let temp_dir = TempDir::new().unwrap();
    let checkpoint = temp_dir.path().join("checkpoint.txt");
    std::fs::write(&checkpoint, "definitely not a timestamp").unwrap();

    lcdigest_cmd()
        .arg("run")
        .arg("--dry-run")
        .env("LCDIGEST_CHECKPOINT_PATH", checkpoint.to_str().unwrap())
        .env("LCDIGEST_GRAPHQL_URL", "http://127.0.0.1:9/graphql")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Checkpoint is unreadable"));
}

#[test]
fn test_run_rejects_zero_page_size() {
    let temp_dir = TempDir::new().unwrap();
    let checkpoint = temp_dir.path().join("checkpoint.txt");

    lcdigest_cmd()
        .arg("run")
        .arg("--dry-run")
        .env("LCDIGEST_CHECKPOINT_PATH", checkpoint.to_str().unwrap())
        .env("LCDIGEST_PAGE_SIZE", "0")
        .assert()
        .failure()
        .stderr(predicate::str::contains("LCDIGEST_PAGE_SIZE"));
}
