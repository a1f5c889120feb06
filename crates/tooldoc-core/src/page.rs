//! Per-tool documentation pages
//!
//! Each page is the tool's README prefixed with a front-matter block.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::meta::ToolMeta;
use crate::scanner::ToolKind;

/// Page title: the first README line with every `#` removed and trimmed.
///
/// Falls back to `fallback` when the README has no usable first line.
pub fn readme_title(readme: &str, fallback: &str) -> String {
    let first = readme.lines().next().unwrap_or_default();
    let title = first.replace('#', "");
    let title = title.trim();
    if title.is_empty() {
        fallback.to_string()
    } else {
        title.to_string()
    }
}

/// `foo_bar` -> `foo-bar.md`
pub fn page_file_name(dir_name: &str) -> String {
    format!("{}.md", dir_name.replace('_', "-"))
}

pub fn permalink(kind: ToolKind, name: &str) -> String {
    format!("/tools/{}/{}", kind.as_str(), name)
}

pub fn render_page(meta: &ToolMeta, kind: ToolKind, readme: &str) -> String {
    let front_matter = [
        "---".to_string(),
        "layout: doc".to_string(),
        format!("title: {}", readme_title(readme, meta.name())),
        format!("type: {}", kind.as_str()),
        format!("permalink: {}", permalink(kind, meta.name())),
        "---".to_string(),
    ];

    let mut page = front_matter.join("\n");
    page.push_str("\n\n");
    page.push_str(readme);
    page
}

/// Write a rendered page, creating `pages_dir` if needed
pub fn write_page(pages_dir: &Path, dir_name: &str, content: &str) -> Result<PathBuf> {
    fs::create_dir_all(pages_dir)?;
    let path = pages_dir.join(page_file_name(dir_name));
    fs::write(&path, content)?;
    tracing::debug!(page = %path.display(), "wrote tool page");
    Ok(path)
}
