use assert_cmd::Command;
use predicates::prelude::*;

/// Helper to get a Command for the iamguard binary.
#[allow(deprecated)]
fn iamguard_cmd() -> Command {
    Command::cargo_bin("iamguard").unwrap()
}

#[test]
fn help_works() {
    iamguard_cmd().arg("--help").assert().success();
}

#[test]
fn help_lists_subcommands() {
    iamguard_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("explain"))
        .stdout(predicate::str::contains("extract"))
        .stdout(predicate::str::contains("rules"));
}

#[test]
fn check_requires_a_policy_argument() {
    iamguard_cmd().arg("check").assert().failure();
}
