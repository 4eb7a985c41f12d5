use assert_cmd::Command;

#[test]
fn help_exits_zero() {
    Command::cargo_bin("sysmaint")
        .unwrap()
        .arg("--help")
        .assert()
        .success();
}

#[test]
fn help_lists_subcommands() {
    Command::cargo_bin("sysmaint")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicates::str::contains("check"))
        .stdout(predicates::str::contains("info"));
}

#[test]
fn info_json_reports_both_metrics() {
    Command::cargo_bin("sysmaint")
        .unwrap()
        .args(["info", "--json"])
        .assert()
        .success()
        .stdout(predicates::str::contains("cpu_percent"))
        .stdout(predicates::str::contains("memory_percent"));
}

#[test]
fn info_plain_prints_the_usage_table() {
    Command::cargo_bin("sysmaint")
        .unwrap()
        .args(["info", "--plain"])
        .assert()
        .success()
        .stdout(predicates::str::contains("CPU Usage"))
        .stdout(predicates::str::contains("Memory Usage"));
}

#[test]
fn unknown_subcommand_rejected() {
    Command::cargo_bin("sysmaint")
        .unwrap()
        .arg("frobnicate")
        .assert()
        .failure();
}
