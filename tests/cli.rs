use assert_cmd::Command;
use predicates::prelude::*;

fn cotrans() -> Command {
    Command::cargo_bin("cotrans").expect("binary is built")
}

#[test]
fn all_pairs_default() {
    cotrans()
        .args(["all", "tests/data/matrix.tsv"])
        .assert()
        .success()
        .stdout("Orthogroup1\tOrthogroup2\torgs\tt1\tt2\tc\td\tk\nOG1\tOG3\t8\t4\t4\t0\t4\t-4\n")
        .stderr(predicate::str::contains("Gene pairs: 15; >cutoff: 1"));
}

#[test]
fn all_pairs_min_transitions() {
    cotrans()
        .args(["all", "tests/data/matrix.tsv", "-m", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("OG1\tOG2\t8\t4\t3\t3\t0\t3\n"))
        .stderr(predicate::str::contains(">cutoff: 3"));
}

#[test]
fn all_pairs_parallel() {
    let sequential = cotrans()
        .args(["all", "tests/data/matrix.tsv", "-m", "0"])
        .output()
        .unwrap();
    let parallel = cotrans()
        .args(["all", "tests/data/matrix.tsv", "-m", "0", "--threads", "4"])
        .output()
        .unwrap();
    assert!(parallel.status.success());
    assert_eq!(sequential.stdout, parallel.stdout);
}

#[test]
fn output_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pairs.tsv");
    cotrans()
        .args(["all", "tests/data/matrix.tsv", "-o"])
        .arg(&path)
        .assert()
        .success()
        .stdout("");
    let content = std::fs::read_to_string(path).unwrap();
    assert!(content.starts_with("Orthogroup1\t"));
    assert_eq!(content.lines().count(), 2);
}

#[test]
fn validate_reports_missing_genes() {
    cotrans()
        .args([
            "validate",
            "tests/data/matrix.tsv",
            "tests/data/candidates.tsv",
            "--min-score",
            "0",
        ])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("G1\tG2\t"))
        .stdout(predicate::str::contains("OGX").not())
        .stdout(predicate::str::contains("OG4\tOG5\t8\t0\t1\t0\t0\t0"))
        .stderr(predicate::str::contains("OGX missing"))
        .stderr(predicate::str::contains(
            "Candidate pairs: 4; scored: 3; missing: 1",
        ));
}

#[test]
fn validate_default_min_score() {
    cotrans()
        .args(["validate", "tests/data/matrix.tsv", "tests/data/candidates.tsv"])
        .assert()
        .success()
        .stdout("G1\tG2\torgs\tt1\tt2\tc\td\tk\nOG3\tOG1\t8\t4\t4\t0\t4\t-4\n")
        .stderr(predicate::str::contains(
            "Candidate pairs: 4; scored: 1; missing: 1",
        ));
}

#[test]
fn validate_custom_columns() {
    cotrans()
        .args([
            "validate",
            "tests/data/matrix.tsv",
            "tests/data/candidates.tsv",
            "--col1",
            "og2",
            "--col2",
            "og1",
            "--min-score",
            "3",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("OG2\tOG1\t8\t3\t4\t3\t0\t3\n"));
}

#[test]
fn validate_unknown_column() {
    cotrans()
        .args([
            "validate",
            "tests/data/matrix.tsv",
            "tests/data/candidates.tsv",
            "--col1",
            "gene_a",
        ])
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("column gene_a is missing"));
}

#[test]
fn missing_input_file() {
    cotrans()
        .args(["all", "tests/data/does_not_exist.tsv"])
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("unable to open file"));
}

#[test]
fn malformed_input() {
    cotrans()
        .args(["all", "tests/data/malformed.tsv"])
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("`abc` is not a number"));
}

#[test]
fn negative_threshold() {
    cotrans()
        .args(["all", "tests/data/matrix.tsv", "-m", "-1"])
        .assert()
        .failure()
        .stdout("");
}
