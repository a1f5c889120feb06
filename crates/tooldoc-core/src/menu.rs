//! Navigation menu data (`_data/tools.yaml`)

use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::meta::ToolMeta;
use crate::page::permalink;
use crate::scanner::ToolKind;

const MENU_HEADER: &str = "\nmenu:\n\n";

/// Menu summary of one tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolBrief {
    pub name: String,
    pub description: String,
    pub author: String,
    pub home: String,
    pub display_name: String,
    pub kind: ToolKind,
}

impl ToolBrief {
    pub fn from_meta(meta: &ToolMeta, kind: ToolKind) -> Self {
        Self {
            name: meta.name().to_string(),
            description: meta.description().to_string(),
            author: meta.author().to_string(),
            home: meta.home().to_string(),
            display_name: meta.display_name().to_string(),
            kind,
        }
    }

    fn lines(&self) -> [String; 6] {
        [
            format!("  - title: {}", self.display_name),
            format!("    author: {}", self.author),
            format!("    home: {}", self.home),
            format!("    brief: {}", self.description),
            format!("    type: {}", self.kind.as_str()),
            format!("    url: {}", permalink(self.kind, &self.name)),
        ]
    }
}

/// Tool briefs in discovery order
#[derive(Debug, Default)]
pub struct Menu {
    briefs: Vec<ToolBrief>,
}

impl Menu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, brief: ToolBrief) {
        self.briefs.push(brief);
    }

    pub fn briefs(&self) -> &[ToolBrief] {
        &self.briefs
    }

    pub fn len(&self) -> usize {
        self.briefs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.briefs.is_empty()
    }

    /// Render the menu document; blocks are separated by a blank line
    pub fn render(&self) -> String {
        let items: Vec<String> = self
            .briefs
            .iter()
            .flat_map(|b| b.lines().into_iter().chain(std::iter::once(String::new())))
            .collect();

        let mut out = String::from(MENU_HEADER);
        out.push_str(&items.join("\n"));
        out
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.render())?;
        tracing::debug!(menu = %path.display(), tools = self.len(), "wrote tool menu");
        Ok(())
    }
}
