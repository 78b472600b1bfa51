//! Output formatting for CLI commands.
//!
//! Provides abstraction layer for outputting results in text or JSON format.

use anyhow::Result;
use doctree_core::{NodeId, NodeKind, Registry};
use serde::Serialize;
use std::io::{self, Write};

/// Output format selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Writer for command output with format abstraction.
pub struct OutputWriter {
    format: OutputFormat,
    stdout: io::Stdout,
}

impl OutputWriter {
    /// Create a new OutputWriter.
    pub fn new(json: bool) -> Self {
        Self {
            format: if json {
                OutputFormat::Json
            } else {
                OutputFormat::Text
            },
            stdout: io::stdout(),
        }
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Write output using the configured format.
    ///
    /// The `text_fn` closure is called only in text mode to generate the
    /// human-readable output.
    pub fn write<T: Serialize>(&self, data: &T, text_fn: impl FnOnce() -> String) -> Result<()> {
        match self.format {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(data)?;
                writeln!(&self.stdout, "{}", json)?;
            }
            OutputFormat::Text => {
                let text = text_fn();
                if !text.is_empty() {
                    write!(&self.stdout, "{}", text)?;
                }
            }
        }
        Ok(())
    }

    /// Write an error message to stderr.
    ///
    /// In JSON mode, writes a JSON error object with success=false.
    /// In text mode, writes the error message directly.
    pub fn write_error(&self, error: &anyhow::Error, result_code: u8) {
        match self.format {
            OutputFormat::Json => {
                let error_output = ErrorOutput {
                    success: false,
                    result_code,
                    error: format!("{:#}", error),
                };
                if let Ok(json) = serde_json::to_string_pretty(&error_output) {
                    let _ = writeln!(io::stderr(), "{}", json);
                }
            }
            OutputFormat::Text => {
                let _ = writeln!(io::stderr(), "Error: {:#}", error);
            }
        }
    }
}

/// Render the registry as an indented outline, two spaces per level.
pub fn render_tree(registry: &Registry) -> String {
    let mut out = String::new();
    for (depth, node) in registry.traverse() {
        out.push_str(&"  ".repeat(depth));
        out.push_str(node.name());
        out.push('\n');
    }
    out
}

// ============================================================================
// Data Transfer Objects (DTOs) for JSON output
// ============================================================================

/// Error output structure.
#[derive(Debug, Serialize)]
pub struct ErrorOutput {
    pub success: bool,
    pub result_code: u8,
    pub error: String,
}

/// One line of a rendered tree.
#[derive(Debug, Clone, Serialize)]
pub struct TreeLine {
    pub depth: usize,
    pub id: NodeId,
    pub name: String,
    pub kind: NodeKind,
}

impl TreeLine {
    /// Flatten the registry into pre-order lines.
    pub fn collect(registry: &Registry) -> Vec<Self> {
        registry
            .traverse()
            .map(|(depth, node)| Self {
                depth,
                id: node.id(),
                name: node.name().to_string(),
                kind: node.kind(),
            })
            .collect()
    }
}

/// Names inside one folder.
#[derive(Debug, Clone, Serialize)]
pub struct FolderListing {
    pub folder: NodeId,
    pub names: Vec<String>,
}

/// Per-kind totals.
#[derive(Debug, Clone, Serialize)]
pub struct KindCounts {
    pub folders: usize,
    pub worksheets: usize,
    pub dashboards: usize,
}

impl KindCounts {
    pub fn of(registry: &Registry) -> Self {
        Self {
            folders: registry.count_by_kind(NodeKind::Folder),
            worksheets: registry.count_by_kind(NodeKind::Worksheet),
            dashboards: registry.count_by_kind(NodeKind::Dashboard),
        }
    }
}

/// Output for `demo` command.
#[derive(Debug, Serialize)]
pub struct DemoOutput {
    pub success: bool,
    pub result_code: u8,
    pub listings: Vec<FolderListing>,
    pub counts: KindCounts,
    pub tree: Vec<TreeLine>,
}

/// Output for `tree` command.
#[derive(Debug, Serialize)]
pub struct TreeOutput {
    pub success: bool,
    pub result_code: u8,
    pub counts: KindCounts,
    pub tree: Vec<TreeLine>,
}
