use assert_cmd::Command;
use assert_cmd::cargo_bin;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn skyseat() -> Command {
    Command::new(cargo_bin!("skyseat"))
}

#[test]
fn test_console_book_and_search() {
    skyseat()
        // Book 4A for Alice, then look her up.
        .write_stdin("2\nCUST0001\n1\n4A\ny\n4\nCUST0001\n0\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Seat 4A (Economy) costs $50.00"))
        .stdout(predicate::str::contains("Booking successful! Booking ID: BK"))
        .stdout(predicate::str::contains("  Seat ID: 4A"))
        .stdout(predicate::str::contains("  Money: $1450.00"))
        .stdout(predicate::str::contains("Exiting system. Goodbye!"));
}

#[test]
fn test_console_closed_input_exits_cleanly() {
    skyseat()
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("Input closed. Goodbye!"));
}

#[test]
fn test_console_explicit_subcommand() {
    skyseat()
        .arg("console")
        .write_stdin("3\n2\n0\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("--- Seating Map for Flight FL202 ---"))
        .stdout(predicate::str::contains("Booked: 0/120"));
}

#[test]
fn test_no_seed_starts_empty() {
    skyseat()
        .arg("--no-seed")
        .write_stdin("2\n7\n2\n0\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("No flights available to book."))
        .stdout(predicate::str::contains("No customers in system."));
}

#[test]
fn test_economy_price_flag() {
    skyseat()
        .args(["--economy-price", "80"])
        .write_stdin("2\nCUST0002\n1\n1A\nn\n0\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Seat 1A (Business) costs $160.00"))
        .stdout(predicate::str::contains("Booking cancelled by user."));
}

#[test]
fn test_rejects_non_positive_economy_price() {
    skyseat()
        .args(["--economy-price", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("price must be greater than zero"));
}

#[test]
fn test_customer_import() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "name, age, money").unwrap();
    writeln!(file, "Carol Danvers, 41, 950.25").unwrap();
    writeln!(file, "Broken Row, old, 10").unwrap();
    writeln!(file, "Dan Dare, 29, 120").unwrap();

    skyseat()
        .arg("--customers")
        .arg(file.path())
        .write_stdin("7\n2\n0\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("  ID: CUST0003"))
        .stdout(predicate::str::contains("  Name: Carol Danvers"))
        .stdout(predicate::str::contains("  Money: $950.25"))
        .stdout(predicate::str::contains("  ID: CUST0004"))
        .stdout(predicate::str::contains("  Name: Dan Dare"))
        .stdout(predicate::str::contains("Broken Row").not())
        .stderr(predicate::str::contains("Error reading customer"));
}

#[test]
fn test_missing_customer_file() {
    skyseat()
        .args(["--customers", "does/not/exist.csv"])
        .write_stdin("0\n")
        .assert()
        .failure();
}
