mod output;
mod script;
mod shell;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use doctree_core::{DEFAULT_ROOT_NAME, NodeId, NodeKind, Registry};
use output::{
    DemoOutput, FolderListing, KindCounts, OutputWriter, TreeLine, TreeOutput, render_tree,
};
use shell::Shell;
use std::io;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Doctree - An in-memory registry of folders, worksheets and dashboards
#[derive(Parser)]
#[command(name = "doctree")]
#[command(about = "In-memory document tree with folders, worksheets and dashboards", long_about = None)]
#[command(version)]
struct Cli {
    /// Name of the root folder (defaults to DOCTREE_ROOT_NAME env var or MyDocuments)
    #[arg(long, global = true)]
    root_name: Option<String>,

    /// Output results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Log filter, e.g. "debug" or "doctree_core=debug" (defaults to RUST_LOG or warn)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive numbered-command loop on stdin
    Shell,

    /// Run the built-in walkthrough and print its results
    Demo,

    /// Build a tree from a script file and print it
    Tree {
        /// Script with `add <kind> <parent-path> <name>` and `move <path> <folder-path>` lines
        script: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref());

    // Determine root name: CLI arg > DOCTREE_ROOT_NAME env var > default
    let root_name = cli
        .root_name
        .or_else(|| std::env::var("DOCTREE_ROOT_NAME").ok())
        .unwrap_or_else(|| DEFAULT_ROOT_NAME.to_string());
    let registry = Registry::with_root_name(root_name);

    let output = OutputWriter::new(cli.json);
    let result = match cli.command {
        Commands::Shell => cmd_shell(registry, &output),
        Commands::Demo => cmd_demo(registry, &output),
        Commands::Tree { script } => cmd_tree(registry, &script, &output),
    };

    if let Err(e) = result {
        output.write_error(&e, 1);
        std::process::exit(1);
    }
}

fn init_tracing(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn cmd_shell(registry: Registry, output: &OutputWriter) -> Result<()> {
    if output.is_json() {
        anyhow::bail!("The shell only supports text output");
    }

    let interactive = atty::is(atty::Stream::Stdin);
    let stdin = io::stdin();
    let stdout = io::stdout();

    Shell::new(registry, stdin.lock(), stdout.lock(), interactive)
        .run()
        .with_context(|| "Shell terminated unexpectedly")
}

fn cmd_demo(mut registry: Registry, output: &OutputWriter) -> Result<()> {
    let mut listings = Vec::new();
    let root = registry.root();

    let draft = registry.add_child("draft", NodeKind::Folder, root)?;
    let complete = registry.add_child("complete", NodeKind::Folder, root)?;
    registry.add_child("foo", NodeKind::Worksheet, draft)?;
    registry.add_child("bar", NodeKind::Dashboard, complete)?;
    let foo = registry.find_id("foo", Some(draft))?;
    registry.move_node(foo, complete)?;

    for folder in [root, draft, complete] {
        listings.push(listing(&registry, folder)?);
    }

    let project = registry.add_child("project", NodeKind::Folder, draft)?;
    for page in ["page1", "page2", "page3"] {
        registry.add_child(page, NodeKind::Worksheet, project)?;
    }
    registry.add_child("cover", NodeKind::Dashboard, project)?;
    registry.move_node(project, complete)?;
    let project = registry.find_id("project", Some(complete))?;
    let cover = registry.find_id("cover", Some(project))?;
    registry.move_node(cover, root)?;

    for folder in [root, draft, complete, project] {
        listings.push(listing(&registry, folder)?);
    }

    let data = DemoOutput {
        success: true,
        result_code: 0,
        listings,
        counts: KindCounts::of(&registry),
        tree: TreeLine::collect(&registry),
    };

    output.write(&data, || {
        let mut text = String::new();
        for listing in &data.listings {
            text.push_str(&listing.names.join(", "));
            text.push('\n');
        }
        text.push_str(&format!("{}\n{}\n", data.counts.dashboards, data.counts.worksheets));
        text.push_str(&render_tree(&registry));
        text
    })
}

fn listing(registry: &Registry, folder: NodeId) -> Result<FolderListing> {
    let names = registry
        .list_children(folder)?
        .into_iter()
        .map(str::to_string)
        .collect();
    Ok(FolderListing { folder, names })
}

fn cmd_tree(mut registry: Registry, path: &Path, output: &OutputWriter) -> Result<()> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read script: {}", path.display()))?;

    script::apply(&mut registry, &content)
        .with_context(|| format!("Failed to apply script: {}", path.display()))?;

    let data = TreeOutput {
        success: true,
        result_code: 0,
        counts: KindCounts::of(&registry),
        tree: TreeLine::collect(&registry),
    };

    output.write(&data, || render_tree(&registry))
}
