use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

const DEAL: &str = "0 1 2 3 10 11 12 13\n\
                    20 21 22 23 30 31 32 33\n\
                    40 41 42 43 50 51 52 53\n\
                    60 61 62 63 70 71 72 73\n\
                    80 81 82 83 90 91 92 93\n";

fn briscola() -> Command {
    let mut cmd = Command::cargo_bin("briscola").expect("binary built");
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn help_lists_the_flags() {
    briscola()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--simulations"))
        .stdout(predicate::str::contains("--position"))
        .stdout(predicate::str::contains("--manual"));
}

#[test]
fn simulates_seeded_games() {
    let average = predicate::str::contains("Average evaluation over 2 simulations");
    briscola()
        .args(["-s", "2", "--depth", "1", "--seed", "9"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Game 2: "))
        .stdout(average);
}

#[test]
fn rejects_unknown_flag() {
    briscola()
        .arg("-x")
        .assert()
        .failure()
        .stderr(predicate::str::contains("-x"));
}

#[test]
fn rejects_positional_arguments() {
    briscola()
        .arg("extra")
        .assert()
        .failure()
        .stderr(predicate::str::contains("extra"));
}

#[test]
fn rejects_out_of_range_position() {
    briscola().args(["-p", "7"]).assert().failure();
}

#[test]
fn rejects_position_with_simulations() {
    briscola().args(["-p", "1", "-s", "3"]).assert().failure();
}

#[test]
fn missing_config_file_fails() {
    let dir = tempdir().expect("temp dir");
    briscola()
        .arg("--config")
        .arg(dir.path().join("absent.yaml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read config"));
}

#[test]
fn config_file_drives_the_search() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("briscola.yaml");
    let log = dir.path().join("logs").join("run.jsonl");
    fs::write(
        &path,
        format!(
            "search:\n  depth: 1\n  parallel: false\ncalling:\n  partner_scan: skip_caller\n\
             deal:\n  seed: 4\nlogging:\n  tracing_level: info\n  json_file: \"{}\"\n",
            log.display()
        ),
    )
    .expect("write config");

    briscola()
        .arg("-c")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Game 1: "));
    assert!(log.exists());
}

#[test]
fn manual_deal_is_played() {
    briscola()
        .args(["-m", "--depth", "1", "-v"])
        .write_stdin(DEAL)
        .assert()
        .success()
        .stdout(predicate::str::contains("Assign cards to Player 4:"))
        .stdout(predicate::str::contains("Final caller: "));
}

#[test]
fn truncated_manual_deal_fails() {
    briscola()
        .args(["-m", "--depth", "1"])
        .write_stdin("0 1 2 3 10 11 12 13\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("reading manual deal"));
}

#[test]
fn human_game_stops_when_input_ends() {
    briscola()
        .args(["-p", "0", "--depth", "1", "--seed", "2"])
        .write_stdin("")
        .assert()
        .failure();
}
