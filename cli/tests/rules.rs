//! # SimpleBot CLI Rules Integration Tests
//!
//! File: cli/tests/rules.rs
//! Author: Christi Mahu
//!

mod common;
use common::*;
use predicates::prelude::*;

#[test]
fn test_rules_lists_builtins_in_order() {
    let sandbox = Sandbox::offline();
    let output = sandbox
        .cmd("rules")
        .assert()
        .success()
        .stdout(predicate::str::contains("Termination phrases: exit, quit, bye, goodbye"))
        .stdout(predicate::str::contains("weather_in"))
        .stdout(predicate::str::contains("create_graph"))
        .stdout(predicate::str::contains(" 1. greeting"))
        .stdout(predicate::str::contains("Fallback replies: 4"))
        .get_output()
        .stdout
        .clone();

    let text = String::from_utf8_lossy(&output);
    let greeting = text.find("greeting").unwrap();
    let creator = text.find("creator").unwrap();
    assert!(greeting < creator);
}

#[test]
fn test_rules_reports_unavailable_capability() {
    let sandbox = Sandbox::offline();
    let output = sandbox
        .cmd("rules")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let text = String::from_utf8_lossy(&output);
    let weather_line = text.lines().find(|l| l.contains("weather_in")).unwrap();
    assert!(weather_line.contains("unavailable"));
    let graph_line = text.lines().find(|l| l.contains("create_graph")).unwrap();
    assert!(!graph_line.contains("unavailable"));
}

#[test]
fn test_rules_lists_custom_rules_first() {
    let sandbox = Sandbox::with_config(
        "[weather]\nenabled = false\n\n\
         [[rules]]\nname = \"pizza\"\npattern = \"pizza\"\nresponses = [\"Yum!\", \"Pizza!\"]\n",
    );
    sandbox
        .cmd("rules")
        .assert()
        .success()
        .stdout(predicate::str::contains(" 1. pizza"))
        .stdout(predicate::str::contains("(2 replies)"))
        .stdout(predicate::str::contains(" 2. greeting"));
}
