//! Building a registry from a plain-text script.
//!
//! Each non-empty line is one of:
//!
//! ```text
//! add <kind> <parent-path> <name>
//! move <path> <folder-path>
//! ```
//!
//! Paths are `/`-separated names looked up one folder at a time from the
//! root; `/` alone is the root. Names may contain spaces only as the final
//! argument of `add`. Lines starting with `#` are comments.

use anyhow::{Context, Result, bail};
use doctree_core::{NodeId, NodeKind, Registry};

/// Apply every line of `script` to `registry`, stopping at the first failure.
pub fn apply(registry: &mut Registry, script: &str) -> Result<()> {
    for (index, line) in script.lines().enumerate() {
        apply_line(registry, line)
            .with_context(|| format!("line {}: {}", index + 1, line.trim()))?;
    }
    Ok(())
}

fn apply_line(registry: &mut Registry, line: &str) -> Result<()> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(());
    }

    let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    match verb {
        "add" => {
            let mut parts = rest.trim_start().splitn(3, char::is_whitespace);
            let (Some(kind), Some(parent), Some(name)) = (parts.next(), parts.next(), parts.next())
            else {
                bail!("expected: add <kind> <parent-path> <name>");
            };
            let name = name.trim();
            if name.is_empty() {
                bail!("expected: add <kind> <parent-path> <name>");
            }

            let kind: NodeKind = kind.parse()?;
            let parent = resolve(registry, parent)?;
            registry.add_child(name, kind, parent)?;
        }
        "move" => {
            let parts: Vec<&str> = rest.split_whitespace().collect();
            let [node, folder] = parts[..] else {
                bail!("expected: move <path> <folder-path>");
            };

            let node = resolve(registry, node)?;
            let folder = resolve(registry, folder)?;
            registry.move_node(node, folder)?;
        }
        other => bail!("unknown command: {}", other),
    }
    Ok(())
}

/// Resolve a `/`-separated path of names, starting at the root.
pub fn resolve(registry: &Registry, path: &str) -> Result<NodeId> {
    if !path.starts_with('/') {
        bail!("path must start with '/': {}", path);
    }

    let mut current = registry.root();
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        current = registry.find_id(segment, Some(current))?;
    }
    Ok(current)
}
