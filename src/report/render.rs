// src/report/render.rs

//! Render DOT source with the Graphviz `dot` tool
//!
//! The DOT source is always written next to the requested output (same
//! stem, `.dot` extension); a `.dot` output, in any case, is written as the
//! source itself. The output format is taken from the output file
//! extension and handed to `dot -T<format>`. A missing `dot` binary is not
//! fatal: the source is kept and a warning is logged.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info, warn};

/// Format used when the output path has no extension
const DEFAULT_FORMAT: &str = "svg";

#[cfg(target_os = "macos")]
const VIEWER: &str = "open";
#[cfg(not(target_os = "macos"))]
const VIEWER: &str = "xdg-open";

/// What a render call produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    /// `dot` ran and wrote the output file
    Rendered(PathBuf),
    /// Only the DOT source was written
    SourceOnly(PathBuf),
}

impl RenderOutcome {
    pub fn path(&self) -> &Path {
        match self {
            Self::Rendered(path) | Self::SourceOnly(path) => path.as_path(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GraphvizRenderer {
    /// Open the result in the desktop viewer after rendering
    pub open_viewer: bool,
}

impl GraphvizRenderer {
    pub fn new(open_viewer: bool) -> Self {
        Self { open_viewer }
    }

    /// Path the DOT source is written to for a given output
    pub fn source_path(output: &Path) -> PathBuf {
        output.with_extension("dot")
    }

    /// Output format derived from the extension
    pub fn format_for(output: &Path) -> String {
        output
            .extension()
            .and_then(|ext| ext.to_str())
            .filter(|ext| !ext.is_empty())
            .map_or_else(|| DEFAULT_FORMAT.to_string(), str::to_ascii_lowercase)
    }

    /// Write `dot_source`, render it to `output`, then optionally open it
    pub fn render(&self, dot_source: &str, output: &Path) -> Result<RenderOutcome> {
        if let Some(parent) = output.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let format = Self::format_for(output);
        let outcome = if format == "dot" {
            std::fs::write(output, dot_source)?;
            debug!("Wrote DOT source to {}", output.display());
            RenderOutcome::SourceOnly(output.to_path_buf())
        } else {
            let source = Self::source_path(output);
            std::fs::write(&source, dot_source)?;
            debug!("Wrote DOT source to {}", source.display());

            match which::which("dot") {
                Ok(dot) => {
                    run_dot(&dot, &format, &source, output)?;
                    info!("Rendered graph to {}", output.display());
                    RenderOutcome::Rendered(output.to_path_buf())
                }
                Err(_) => {
                    warn!(
                        "Graphviz 'dot' not found in PATH; kept DOT source at {}",
                        source.display()
                    );
                    RenderOutcome::SourceOnly(source)
                }
            }
        };

        if self.open_viewer {
            open_in_viewer(outcome.path())?;
        }

        Ok(outcome)
    }
}

fn run_dot(dot: &Path, format: &str, source: &Path, output: &Path) -> Result<()> {
    let result = Command::new(dot)
        .arg(format!("-T{format}"))
        .arg("-o")
        .arg(output)
        .arg(source)
        .output()
        .map_err(|e| Error::Render(format!("Failed to run {}: {}", dot.display(), e)))?;

    if !result.status.success() {
        return Err(Error::Render(format!(
            "dot -T{} failed: {}",
            format,
            String::from_utf8_lossy(&result.stderr).trim()
        )));
    }
    Ok(())
}

fn open_in_viewer(path: &Path) -> Result<()> {
    let viewer = which::which(VIEWER)
        .map_err(|e| Error::Render(format!("{} not available: {}", VIEWER, e)))?;
    Command::new(viewer)
        .arg(path)
        .spawn()
        .map_err(|e| Error::Render(format!("Failed to open {}: {}", path.display(), e)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_for() {
        assert_eq!(GraphvizRenderer::format_for(Path::new("out.svg")), "svg");
        assert_eq!(GraphvizRenderer::format_for(Path::new("out.PNG")), "png");
        assert_eq!(GraphvizRenderer::format_for(Path::new("out")), "svg");
    }

    #[test]
    fn test_source_path() {
        assert_eq!(
            GraphvizRenderer::source_path(Path::new("reports/progress.svg")),
            PathBuf::from("reports/progress.dot")
        );
    }

    #[test]
    fn test_dot_output_writes_source_only() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("graph.dot");
        let outcome = GraphvizRenderer::default()
            .render("digraph G {}\n", &output)
            .unwrap();
        assert_eq!(outcome, RenderOutcome::SourceOnly(output.clone()));
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "digraph G {}\n");
    }

    #[test]
    fn test_uppercase_dot_output_keeps_requested_path() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("graph.DOT");
        let outcome = GraphvizRenderer::default()
            .render("digraph G {}\n", &output)
            .unwrap();
        assert_eq!(outcome, RenderOutcome::SourceOnly(output.clone()));
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "digraph G {}\n");
    }

    #[test]
    fn test_render_always_keeps_source() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("nested").join("graph.svg");
        let outcome = GraphvizRenderer::default()
            .render("digraph G { a -> b; }\n", &output)
            .unwrap();
        assert!(dir.path().join("nested").join("graph.dot").is_file());
        match outcome {
            RenderOutcome::Rendered(path) => assert!(path.is_file()),
            RenderOutcome::SourceOnly(path) => {
                assert_eq!(path, dir.path().join("nested").join("graph.dot"))
            }
        }
    }
}
