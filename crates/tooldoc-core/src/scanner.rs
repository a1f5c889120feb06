//! Tool directory discovery
//!
//! Each collection root holds one subdirectory per tool. A tool directory
//! is expected to contain `README.md` and `META`.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::WalkDir;

use crate::error::Result;

pub const README_FILE: &str = "README.md";
pub const META_FILE: &str = "META";

/// Which collection a tool was discovered in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    Standard,
    Edge,
}

impl ToolKind {
    /// Value of the derived `type` field
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolKind::Standard => "apicheck",
            ToolKind::Edge => "edge",
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A candidate tool directory
#[derive(Debug, Clone)]
pub struct ToolDir {
    /// Directory name, used for the page file name
    pub name: String,
    pub path: PathBuf,
    pub kind: ToolKind,
}

impl ToolDir {
    pub fn readme_path(&self) -> PathBuf {
        self.path.join(README_FILE)
    }

    pub fn meta_path(&self) -> PathBuf {
        self.path.join(META_FILE)
    }
}

/// Why a tool directory was left out of every output
#[derive(Debug, Clone, Error)]
pub enum SkipReason {
    #[error("doesn't have a readable README.md file ({0})")]
    MissingReadme(String),

    #[error("doesn't have a readable META file ({0})")]
    MissingMeta(String),
}

/// Raw file contents of a tool directory
#[derive(Debug, Clone)]
pub struct ToolSource {
    pub dir: ToolDir,
    pub readme: String,
    pub meta: String,
}

impl ToolSource {
    /// Read README and META. Either file being unreadable skips the tool.
    pub fn load(dir: ToolDir) -> std::result::Result<Self, SkipReason> {
        let readme = fs::read_to_string(dir.readme_path())
            .map_err(|e| SkipReason::MissingReadme(e.to_string()))?;
        let meta = fs::read_to_string(dir.meta_path())
            .map_err(|e| SkipReason::MissingMeta(e.to_string()))?;

        Ok(Self { dir, readme, meta })
    }
}

/// List tool directories directly under `root`, in file-name order.
///
/// Hidden entries and plain files are ignored. A missing root yields no tools.
pub fn scan_root(root: &Path, kind: ToolKind) -> Result<Vec<ToolDir>> {
    if !root.is_dir() {
        tracing::debug!(root = %root.display(), "tool root does not exist");
        return Ok(Vec::new());
    }

    let mut dirs = Vec::new();
    for entry in WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(std::io::Error::from)?;
        let name = entry.file_name().to_string_lossy().to_string();

        if name.starts_with('.') {
            continue;
        }
        if !entry.path().is_dir() {
            tracing::debug!(path = %entry.path().display(), "skipping non-directory entry");
            continue;
        }

        tracing::debug!(tool = %name, kind = %kind, "discovered tool directory");
        dirs.push(ToolDir {
            name,
            path: entry.path().to_path_buf(),
            kind,
        });
    }

    Ok(dirs)
}
