mod common;

use assert_cmd::Command;
use common::temp_home;
use predicates::prelude::*;

fn cli(home: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("finplan_cli").unwrap();
    cmd.env("FINPLAN_CLI_SCRIPT", "1")
        .env("FINPLAN_HOME", home)
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn script_mode_records_and_summarizes() {
    let home = temp_home();
    cli(&home)
        .write_stdin(
            "add income 1000 salario Salary\n\
             add expense 150.50 Alimentación Groceries\n\
             summary\n\
             exit\n",
        )
        .assert()
        .success()
        .stdout(predicate::str::contains("Added income `Salary`"))
        .stdout(predicate::str::contains("Balance:  $849.50"))
        .stdout(predicate::str::contains("Expenses: -$150.50"));

    let blob = std::fs::read_to_string(home.join("store").join("financialTransactions.json"))
        .unwrap();
    assert!(blob.contains("\"Salario\""));
}

#[test]
fn ledger_persists_between_runs() {
    let home = temp_home();
    cli(&home)
        .write_stdin("add expense 12 Salud Pharmacy\n")
        .assert()
        .success();
    cli(&home)
        .write_stdin("list\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Pharmacy"))
        .stdout(predicate::str::contains("-$12.00"));
}

#[test]
fn validation_errors_do_not_abort_the_script() {
    let home = temp_home();
    cli(&home)
        .write_stdin("add expense abc Salud Pills\nadd income 5 Otros Tip\nsummary\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("not a valid amount"))
        .stdout(predicate::str::contains("Entries:  1"));
}

#[test]
fn unknown_command_suggests_closest() {
    let home = temp_home();
    cli(&home)
        .write_stdin("sumary\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Unknown command `sumary`"))
        .stdout(predicate::str::contains("Did you mean `summary`?"));
}

#[test]
fn corrupt_store_fails_startup() {
    let home = temp_home();
    let store = home.join("store");
    std::fs::create_dir_all(&store).unwrap();
    std::fs::write(store.join("financialTransactions.json"), "{oops").unwrap();
    cli(&home)
        .write_stdin("summary\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Stored ledger is unreadable"));
}
