// src/commands/rules.rs

//! Rule file inspection command

use anyhow::{Context, Result};
use bazel_progress::rules::{is_already_primary, is_already_tested, parse_rules};
use std::path::Path;

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

/// Print the records extracted from one rule file
pub fn cmd_rules(path: &Path, package: Option<&str>) -> Result<()> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read rule file: {}", path.display()))?;
    let records = parse_rules(&content);

    if records.is_empty() {
        println!("No rules found in {}", path.display());
    } else {
        println!("Rules in {} ({}):", path.display(), records.len());
        for record in &records {
            println!("  {} {}", record.kind, record.name);
            if let Some(module) = &record.module_name {
                println!("    crate_name: {}", module);
            }
            if let Some(target) = &record.target_ref {
                println!("    crate: {}", target);
            }
            if let Some(sources) = &record.sources {
                println!("    srcs: {}", sources);
            }
        }
    }

    if let Some(package) = package {
        println!();
        println!("Package {}:", package);
        println!("  primary target: {}", yes_no(is_already_primary(package, &records)));
        println!("  test target:    {}", yes_no(is_already_tested(package, &records)));
    }

    Ok(())
}
