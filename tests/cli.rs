//! End-to-end CLI tests
//!
//! Each test runs the binary against its own temporary data directory via
//! the `OUTLAY_DATA_DIR` override.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn outlay(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("outlay").unwrap();
    cmd.env("OUTLAY_DATA_DIR", data_dir.path());
    cmd.env("OUTLAY_USER", "alice");
    cmd
}

#[test]
fn category_set_then_list() {
    let data_dir = TempDir::new().unwrap();

    outlay(&data_dir)
        .args(["category", "set", "Food", "--amount", "100", "--threshold", "50"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created category: Food"));

    outlay(&data_dir)
        .args(["category", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Food"))
        .stdout(predicate::str::contains("100.00"))
        .stdout(predicate::str::contains("50%"));
}

#[test]
fn category_set_merges_budget() {
    let data_dir = TempDir::new().unwrap();

    outlay(&data_dir)
        .args(["category", "set", "Food", "--amount", "100", "--threshold", "50"])
        .assert()
        .success();

    outlay(&data_dir)
        .args(["category", "set", "Food", "--amount", "50", "--threshold", "80"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated category: Food"))
        .stdout(predicate::str::contains("150.00"))
        .stdout(predicate::str::contains("80%"));
}

#[test]
fn expense_enforcement_sequence() {
    let data_dir = TempDir::new().unwrap();

    outlay(&data_dir)
        .args(["category", "set", "Food", "--amount", "100", "--threshold", "50"])
        .assert()
        .success();

    // 60 of 100 is accepted but crosses the 50% threshold (and is excessive:
    // the excessive warning takes precedence)
    outlay(&data_dir)
        .args([
            "expense", "add", "Food", "60", "--description", "Groceries",
            "--date", "2025-06-01",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("excessive for Food"));

    // A further 50 would exceed the cap
    outlay(&data_dir)
        .args([
            "expense", "add", "Food", "50", "--description", "Restaurant",
            "--date", "2025-06-02",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("exceeds budget for Food"));

    // The rejected expense never reached the ledger
    outlay(&data_dir)
        .args([
            "report", "list", "--from", "2025-06-01", "--to", "2025-06-30",
            "--category", "Food",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Groceries"))
        .stdout(predicate::str::contains("Restaurant").not())
        .stdout(predicate::str::contains("Total: $60.00"));
}

#[test]
fn expense_small_enough_is_silent() {
    let data_dir = TempDir::new().unwrap();

    outlay(&data_dir)
        .args(["category", "set", "Food", "--amount", "100", "--threshold", "50"])
        .assert()
        .success();

    outlay(&data_dir)
        .args([
            "expense", "add", "Food", "10", "--description", "Coffee",
            "--date", "2025-06-01",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Expense added successfully"));
}

#[test]
fn expense_unknown_category_fails() {
    let data_dir = TempDir::new().unwrap();

    outlay(&data_dir)
        .args([
            "expense", "add", "Nowhere", "10", "--description", "Lunch",
            "--date", "2025-06-01",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn report_invalid_range_fails() {
    let data_dir = TempDir::new().unwrap();

    outlay(&data_dir)
        .args(["category", "set", "Food", "--amount", "100"])
        .assert()
        .success();

    outlay(&data_dir)
        .args([
            "report", "list", "--from", "2025-06-30", "--to", "2025-06-01",
            "--category", "Food",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date range"));
}

#[test]
fn report_chart_empty_and_populated() {
    let data_dir = TempDir::new().unwrap();

    outlay(&data_dir)
        .args(["report", "chart"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No categories yet"));

    outlay(&data_dir)
        .args(["category", "set", "Food", "--amount", "100", "--threshold", "50"])
        .assert()
        .success();

    outlay(&data_dir)
        .args(["report", "chart"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Food"))
        .stdout(predicate::str::contains("100.00"));
}

#[test]
fn category_delete_blocked_then_allowed() {
    let data_dir = TempDir::new().unwrap();

    outlay(&data_dir)
        .args(["category", "set", "Food", "--amount", "100", "--threshold", "50"])
        .assert()
        .success();
    outlay(&data_dir)
        .args([
            "expense", "add", "Food", "10", "--description", "Coffee",
            "--date", "2025-06-01",
        ])
        .assert()
        .success();

    outlay(&data_dir)
        .args(["category", "delete", "Food"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cannot delete 'Food'"));

    // A category with only its creation sentinel can be deleted
    outlay(&data_dir)
        .args(["category", "set", "Transport", "--amount", "50"])
        .assert()
        .success();
    outlay(&data_dir)
        .args(["category", "delete", "Transport"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted category: Transport"));

    // Deleting again reports absence without failing
    outlay(&data_dir)
        .args(["category", "delete", "Transport"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No category named 'Transport'"));
}

#[test]
fn export_then_import_round_trip() {
    let export_dir = TempDir::new().unwrap();
    let source = TempDir::new().unwrap();

    outlay(&source)
        .args(["category", "set", "Food", "--amount", "1000", "--threshold", "80"])
        .assert()
        .success();
    outlay(&source)
        .args([
            "expense", "add", "Food", "60.50", "--description", "Groceries",
            "--date", "2025-06-01",
        ])
        .assert()
        .success();
    outlay(&source)
        .args([
            "expense", "add", "Food", "12.25", "--description", "Coffee beans",
            "--date", "2025-06-03",
        ])
        .assert()
        .success();

    let csv_path = export_dir.path().join("report.csv");
    outlay(&source)
        .args([
            "report", "export", "--from", "2025-06-01", "--to", "2025-06-30",
            "--category", "Food",
        ])
        .arg("--output")
        .arg(&csv_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 2 expenses"));

    let exported = std::fs::read_to_string(&csv_path).unwrap();
    assert!(exported.starts_with("User,Amount,Date,Description,Category"));
    assert!(exported.contains("alice,60.50,2025-06-01,Groceries,Food"));

    // Replay into a fresh data directory; the header row fails amount
    // parsing and surfaces as one failed row
    let target = TempDir::new().unwrap();
    outlay(&target)
        .args(["category", "set", "Food", "--amount", "1000", "--threshold", "80"])
        .assert()
        .success();

    outlay(&target)
        .arg("import")
        .arg(&csv_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 2 expenses"))
        .stdout(predicate::str::contains("1 failed"));

    outlay(&target)
        .args([
            "report", "list", "--from", "2025-06-01", "--to", "2025-06-30",
            "--category", "Food",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total: $72.75"));
}

#[test]
fn import_enforces_budgets_per_row() {
    let data_dir = TempDir::new().unwrap();

    outlay(&data_dir)
        .args(["category", "set", "Food", "--amount", "100", "--threshold", "50"])
        .assert()
        .success();

    let csv_path = data_dir.path().join("incoming.csv");
    std::fs::write(
        &csv_path,
        "alice,40.00,2025-06-01,First,Food\n\
         alice,90.00,2025-06-02,Too much,Food\n\
         alice,ten,2025-06-03,Bad amount,Food\n",
    )
    .unwrap();

    outlay(&data_dir)
        .arg("import")
        .arg(&csv_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 rejected"))
        .stdout(predicate::str::contains("1 failed"))
        .stdout(predicate::str::contains("row 2"))
        .stdout(predicate::str::contains("row 3"));
}

#[test]
fn users_are_isolated() {
    let data_dir = TempDir::new().unwrap();

    outlay(&data_dir)
        .args(["category", "set", "Food", "--amount", "100"])
        .assert()
        .success();

    let mut bob = Command::cargo_bin("outlay").unwrap();
    bob.env("OUTLAY_DATA_DIR", data_dir.path());
    bob.env("OUTLAY_USER", "bob");
    bob.args(["category", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No categories yet"));
}
