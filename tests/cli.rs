// tests/cli.rs

//! Command-line tests running the built binary.

mod common;

use common::SourceTree;
use std::process::{Command, Output};

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_bazel-progress"))
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .unwrap()
}

fn report_args(tree: &SourceTree) -> Vec<String> {
    let config = tree.config();
    vec![
        "--source-dir".to_string(),
        config.source_dir.display().to_string(),
        "--csv-output".to_string(),
        config.csv_output.display().to_string(),
        "--graph-output".to_string(),
        config.graph_output.display().to_string(),
    ]
}

#[test]
fn test_report_prints_summary() {
    let tree = SourceTree::new();
    tree.package("a", "ic-a", &["ic-b"], &[]);
    tree.package("b", "ic-b", &[], &[]);
    tree.library_rule("b", "ic_b");

    let args = report_args(&tree);
    let output = run(&args.iter().map(String::as_str).collect::<Vec<_>>());
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Packages converted to Bazel: 1 / 2 ( 50.0%)"));
    assert!(tree.config().csv_output.is_file());
}

#[test]
fn test_boolish_flags() {
    let tree = SourceTree::new();
    tree.package("a", "ic-a", &[], &[]);

    let mut args = report_args(&tree);
    args.extend(["--include-dev", "yes", "--first-party-only", "off"].map(String::from));
    let output = run(&args.iter().map(String::as_str).collect::<Vec<_>>());
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(String::from_utf8_lossy(&output.stdout).contains("(tests)"));
}

#[test]
fn test_invalid_boolean_rejected_before_scan() {
    let tree = SourceTree::new();
    tree.package("a", "ic-a", &[], &[]);

    let mut args = report_args(&tree);
    args.extend(["--include-dev", "maybe"].map(String::from));
    let output = run(&args.iter().map(String::as_str).collect::<Vec<_>>());
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid value"));
    assert!(!tree.config().csv_output.exists());
}

#[test]
fn test_cycle_fails_without_reports() {
    let tree = SourceTree::new();
    tree.package("a", "ic-a", &["ic-b"], &[]);
    tree.package("b", "ic-b", &["ic-a"], &[]);

    let args = report_args(&tree);
    let output = run(&args.iter().map(String::as_str).collect::<Vec<_>>());
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unexpected graph cycle"));
    assert!(!tree.config().csv_output.exists());
    assert!(!tree.config().graph_output.exists());
}

#[test]
fn test_config_file() {
    let tree = SourceTree::new();
    tree.package("a", "ic-a", &["ic-b"], &[]);
    tree.package("b", "ic-b", &[], &[]);
    tree.package("c", "ic-c", &[], &[]);
    let config = tree.config();
    let config_path = tree.write(
        "tracker.toml",
        &format!(
            "source_dir = {:?}\ncsv_output = {:?}\ngraph_output = {:?}\nroot_package = \"ic-a\"\n",
            config.source_dir.display().to_string(),
            config.csv_output.display().to_string(),
            config.graph_output.display().to_string(),
        ),
    );

    let output = run(&["--config", &config_path.display().to_string()]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(String::from_utf8_lossy(&output.stdout).contains("0 / 2"));
}

#[test]
fn test_rules_subcommand() {
    let tree = SourceTree::new();
    let path = tree.write(
        "rs/types/BUILD.bazel",
        r#"rust_library(
    name = "types",
    crate_name = "ic_types",
)

rust_test(
    name = "types_test",
    crate = ":types",
)
"#,
    );

    let output = run(&["rules", &path.display().to_string(), "--package", "ic-types"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("rust_library types"));
    assert!(stdout.contains("crate_name: ic_types"));
    assert!(stdout.contains("rust_test types_test"));
    assert!(stdout.contains("primary target: yes"));
    assert!(stdout.contains("test target:    yes"));
}
