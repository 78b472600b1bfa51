//! Interactive numbered-command loop over a registry.

use crate::output::render_tree;
use anyhow::Result;
use doctree_core::{NodeId, NodeKind, Registry};
use std::io::{BufRead, Write};

const MENU: &str = "\nEnter an integer to indicate a command: \n\
[1] count dashboards\n\
[2] count worksheets\n\
[3] add file\n\
[4] find file id\n\
[5] move file\n\
[6] list files\n\
[7] print tree\n\
[8] exit\n";

/// Reads commands from `input` and writes results to `out`.
///
/// Prompts are only written when `interactive` is set, so piped sessions
/// produce nothing but results and messages.
pub struct Shell<R, W> {
    registry: Registry,
    input: R,
    out: W,
    interactive: bool,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(registry: Registry, input: R, out: W, interactive: bool) -> Self {
        Self {
            registry,
            input,
            out,
            interactive,
        }
    }

    /// Run until the exit command or end of input.
    pub fn run(&mut self) -> Result<()> {
        loop {
            let Some(command) = self.ask_int(MENU)? else {
                return Ok(());
            };

            match command {
                1 => {
                    let total = self.registry.count_by_kind(NodeKind::Dashboard);
                    writeln!(self.out, "There are {} dashboards in the file system.", total)?;
                }
                2 => {
                    let total = self.registry.count_by_kind(NodeKind::Worksheet);
                    writeln!(self.out, "There are {} worksheets in the file system.", total)?;
                }
                3 => {
                    if !self.add_file()? {
                        return Ok(());
                    }
                }
                4 => {
                    if !self.find_file()? {
                        return Ok(());
                    }
                }
                5 => {
                    if !self.move_file()? {
                        return Ok(());
                    }
                }
                6 => {
                    if !self.list_files()? {
                        return Ok(());
                    }
                }
                7 => {
                    write!(self.out, "{}", render_tree(&self.registry))?;
                }
                8 => {
                    writeln!(self.out, "Exiting program.")?;
                    return Ok(());
                }
                other => {
                    writeln!(self.out, "Invalid command: {}. Please try again.", other)?;
                }
            }
        }
    }

    /// Consume the shell, handing back the registry it drove.
    #[cfg(test)]
    pub fn into_registry(self) -> Registry {
        self.registry
    }

    // Each command handler returns Ok(false) when input ran out mid-command.

    fn add_file(&mut self) -> Result<bool> {
        let Some(name) = self.ask_line("Enter a new file name: ")? else {
            return Ok(false);
        };
        let Some(kind) = self.ask_line("Enter a file type (worksheet, dashboard, or folder): ")?
        else {
            return Ok(false);
        };
        let Some(folder) = self.ask_id("Enter a folder id where you'd like to put this file: ")?
        else {
            return Ok(false);
        };

        let result = kind
            .parse::<NodeKind>()
            .and_then(|kind| self.registry.add_child(name.clone(), kind, folder));
        match result {
            Ok(id) => writeln!(
                self.out,
                "{} has been added to folder {} as file {}",
                name, folder, id
            )?,
            Err(e) => self.report(&e)?,
        }
        Ok(true)
    }

    fn find_file(&mut self) -> Result<bool> {
        let Some(name) = self.ask_line("Enter the file name: ")? else {
            return Ok(false);
        };
        let Some(folder) = self.ask_int("Enter the folder id (-1 for the root): ")? else {
            return Ok(false);
        };

        let parent = match folder {
            -1 => None,
            raw => match to_id(raw) {
                Some(id) => Some(id),
                None => {
                    self.reject_id(raw)?;
                    return Ok(true);
                }
            },
        };

        match self.registry.find_id(&name, parent) {
            Ok(id) => writeln!(self.out, "{} is file {}", name, id)?,
            Err(e) => self.report(&e)?,
        }
        Ok(true)
    }

    fn move_file(&mut self) -> Result<bool> {
        let Some(file) = self.ask_id("Enter a file id: ")? else {
            return Ok(false);
        };
        let Some(folder) = self.ask_id("Enter the folder id where you'd like to move this file: ")?
        else {
            return Ok(false);
        };

        match self.registry.move_node(file, folder) {
            Ok(()) => writeln!(
                self.out,
                "Successfully moved file {} to folder {}",
                file, folder
            )?,
            Err(e) => self.report(&e)?,
        }
        Ok(true)
    }

    fn list_files(&mut self) -> Result<bool> {
        let Some(folder) = self.ask_id("Enter a folder id: ")? else {
            return Ok(false);
        };

        match self.registry.list_children(folder) {
            Ok(names) if names.is_empty() => {
                writeln!(self.out, "There are no files in folder {}", folder)?;
            }
            Ok(names) => {
                writeln!(self.out, "The following files are in folder {}: ", folder)?;
                for name in names {
                    writeln!(self.out, "\t{}", name)?;
                }
            }
            Err(e) => self.report(&e)?,
        }
        Ok(true)
    }

    fn report(&mut self, error: &doctree_core::Error) -> Result<()> {
        tracing::debug!(%error, "command failed");
        writeln!(self.out, "Error: {}", error)?;
        Ok(())
    }

    fn reject_id(&mut self, raw: i64) -> Result<()> {
        writeln!(self.out, "Error: Invalid id: {}", raw)?;
        Ok(())
    }

    fn prompt(&mut self, question: &str) -> Result<()> {
        if self.interactive {
            write!(self.out, "{}", question)?;
            self.out.flush()?;
        }
        Ok(())
    }

    /// Read one line with the trailing newline removed. `None` at end of input.
    fn ask_line(&mut self, question: &str) -> Result<Option<String>> {
        self.prompt(question)?;
        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        // Undecodable bytes become U+FFFD, which no prompt accepts as a number
        let line = String::from_utf8_lossy(&buf);
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Read an integer, asking again until one is given.
    fn ask_int(&mut self, question: &str) -> Result<Option<i64>> {
        loop {
            let Some(line) = self.ask_line(question)? else {
                return Ok(None);
            };
            match line.trim().parse::<i64>() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => writeln!(self.out, "Please enter a valid integer value\n")?,
            }
        }
    }

    /// Read a node id, asking again until a non-negative integer is given.
    fn ask_id(&mut self, question: &str) -> Result<Option<NodeId>> {
        loop {
            let Some(raw) = self.ask_int(question)? else {
                return Ok(None);
            };
            match to_id(raw) {
                Some(id) => return Ok(Some(id)),
                None => self.reject_id(raw)?,
            }
        }
    }
}

fn to_id(raw: i64) -> Option<NodeId> {
    u64::try_from(raw).ok().map(NodeId::new)
}
