//! CLI end-to-end tests.

use assert_cmd::Command;
use predicates::prelude::*;

use super::helpers::{sample_block, temp_log, SAMPLE_LOG, VARIATIONS};

fn tbgrep() -> Command {
    Command::cargo_bin("tbgrep").unwrap()
}

#[test]
fn scans_stdin_when_no_files_given() {
    tbgrep()
        .write_stdin(VARIATIONS[0])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Traceback (most recent call last):\n  File \"<stdin>\", line 1, in <module>\nException: baz\n",
        ));
}

#[test]
fn scans_a_file_argument() {
    let file = temp_log(SAMPLE_LOG);
    tbgrep()
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(sample_block(3, 6)))
        .stdout(predicate::str::contains(sample_block(9, 12)))
        .stdout(predicate::str::contains(sample_block(15, 18)));
}

#[test]
fn quiet_on_logs_without_tracebacks() {
    tbgrep()
        .write_stdin("calm\nand\nquiet\n")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn stats_mode_reports_uniques_instead_of_blocks() {
    for variation in VARIATIONS {
        tbgrep()
            .arg("--stats")
            .write_stdin(variation)
            .assert()
            .success()
            .stdout(predicate::str::contains("1 unique traceback extracted"));
    }
}

#[test]
fn stats_mode_counts_across_files() {
    let first = temp_log(VARIATIONS[0]);
    let second = temp_log(VARIATIONS[1]);
    tbgrep()
        .arg("--stats")
        .arg(first.path())
        .arg(second.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("2 unique tracebacks extracted"));
}

#[test]
fn normalization_flags_fold_variants_together() {
    let log: String = VARIATIONS.concat();
    let file = temp_log(&log);
    tbgrep()
        .args(["--stats", "--ignore-line-numbers", "--ignore-exception-values"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("3 occurences"))
        .stdout(predicate::str::contains("line ###, in <module>"))
        .stdout(predicate::str::contains("Exception: ***"))
        .stdout(predicate::str::contains("1 unique traceback extracted"));
}

#[test]
fn last_prints_only_the_most_recent_traceback() {
    let file = temp_log(SAMPLE_LOG);
    tbgrep()
        .arg("--last")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("KeyError: 'foo'"))
        .stdout(predicate::str::contains("IndexError").not());
}

#[test]
fn last_requires_a_file() {
    tbgrep()
        .arg("--last")
        .write_stdin(SAMPLE_LOG)
        .assert()
        .failure()
        .stderr(predicate::str::contains("stdin"));
}

#[test]
fn missing_file_fails_with_context() {
    tbgrep()
        .arg("/no/such/file.log")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to open file"));
}

#[test]
fn completions_emit_a_script() {
    tbgrep()
        .args(["--completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tbgrep"));
}
