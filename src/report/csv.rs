// src/report/csv.rs

//! CSV table of packages ordered by migration priority
//!
//! Sort order: height ascending (converted packages, which have no
//! height, go last), then parent count descending, then name.

use crate::error::Result;
use crate::graph::DependencyGraph;
use std::cmp::Reverse;
use std::fmt::Write as _;
use std::path::Path;

const HEADER: [&str; 4] = ["name", "bazel", "height", "parents"];

/// Sort key standing in for a missing height
const NO_HEIGHT: u32 = u32::MAX;

/// One CSV row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvRow {
    pub name: String,
    pub bazel: bool,
    pub height: Option<u32>,
    pub parents: usize,
}

impl CsvRow {
    fn cells(&self) -> [String; 4] {
        [
            self.name.clone(),
            if self.bazel { "yes" } else { "no" }.to_string(),
            self.height.map(|h| h.to_string()).unwrap_or_default(),
            self.parents.to_string(),
        ]
    }
}

/// Sort rows in place by migration priority
pub fn sort_rows(rows: &mut [CsvRow]) {
    rows.sort_by(|a, b| {
        let key = |row: &CsvRow| (row.height.unwrap_or(NO_HEIGHT), Reverse(row.parents));
        key(a).cmp(&key(b)).then_with(|| a.name.cmp(&b.name))
    });
}

/// Project every package node of an annotated graph into sorted rows
pub fn csv_rows(graph: &DependencyGraph) -> Vec<CsvRow> {
    let mut rows: Vec<CsvRow> = graph
        .nodes()
        .map(|node| CsvRow {
            name: node.name.clone(),
            bazel: node.is_converted(),
            height: node.height,
            parents: node.parent_count,
        })
        .collect();
    sort_rows(&mut rows);
    rows
}

/// Render rows as CSV text with a header line
pub fn to_csv(rows: &[CsvRow]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", HEADER.join(","));
    for row in rows {
        let cells: Vec<String> = row.cells().iter().map(|c| escape_field(c)).collect();
        let _ = writeln!(out, "{}", cells.join(","));
    }
    out
}

/// Write rows to `path`
pub fn write_csv(path: &Path, rows: &[CsvRow]) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, to_csv(rows))?;
    Ok(())
}

fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, height: Option<u32>, parents: usize) -> CsvRow {
        CsvRow {
            name: name.to_string(),
            bazel: height.is_none(),
            height,
            parents,
        }
    }

    fn names(rows: &[CsvRow]) -> Vec<&str> {
        rows.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_missing_height_sorts_last() {
        let mut rows = vec![row("a", Some(2), 1), row("b", None, 5), row("c", Some(0), 3)];
        sort_rows(&mut rows);
        assert_eq!(names(&rows), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_ties_break_by_parents_then_name() {
        let mut rows = vec![
            row("zeta", Some(1), 2),
            row("alpha", Some(1), 2),
            row("beta", Some(1), 7),
            row("gamma", None, 0),
            row("delta", None, 4),
        ];
        sort_rows(&mut rows);
        assert_eq!(names(&rows), vec!["beta", "alpha", "zeta", "delta", "gamma"]);
    }

    #[test]
    fn test_to_csv() {
        let rows = vec![row("ic-a", Some(1), 0), row("ic-b", None, 1)];
        assert_eq!(to_csv(&rows), "name,bazel,height,parents\nic-a,no,1,0\nic-b,yes,,1\n");
    }

    #[test]
    fn test_to_csv_empty_writes_header() {
        assert_eq!(to_csv(&[]), "name,bazel,height,parents\n");
    }

    #[test]
    fn test_escape_field() {
        assert_eq!(escape_field("plain"), "plain");
        assert_eq!(escape_field("a,b"), "\"a,b\"");
        assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_write_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("progress.csv");
        write_csv(&path, &[row("x", Some(0), 0)]).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.ends_with("x,no,0,0\n"));
    }
}
