use std::collections::HashSet;

use crate::error::{DocgenError, Result};
use crate::meta::ToolMeta;

/// Names and short-commands seen so far in one generation run.
///
/// The first tool to claim an identifier keeps it; any later claim is an error.
#[derive(Debug, Default)]
pub struct UniquenessRegistry {
    names: HashSet<String>,
    short_commands: HashSet<String>,
}

impl UniquenessRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, meta: &ToolMeta) -> Result<()> {
        let name = meta.name();

        if let Some(short_command) = meta.short_command() {
            if self.short_commands.contains(short_command) {
                return Err(DocgenError::DuplicateShortCommand {
                    tool: name.to_string(),
                    short_command: short_command.to_string(),
                });
            }
        }

        if self.names.contains(name) {
            return Err(DocgenError::DuplicateToolName {
                name: name.to_string(),
            });
        }

        if let Some(short_command) = meta.short_command() {
            self.short_commands.insert(short_command.to_string());
        }
        self.names.insert(name.to_string());
        Ok(())
    }
}
