//! Project configuration (`tooldoc.toml`)
//!
//! The file is optional. Without it the generator reads `tools/` and
//! `tools-edge/` and writes under `docs/`, all relative to the project root.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DocgenError, Result};
use crate::scanner::ToolKind;

const CONFIG_FILE: &str = "tooldoc.toml";

/// Default config template with rich comments
const DEFAULT_CONFIG_TEMPLATE: &str = r#"# tooldoc configuration file
# Location: <project root>/tooldoc.toml

[paths]
# Directory holding one subdirectory per standard tool
tools = "tools"

# Directory holding one subdirectory per edge tool
edge_tools = "tools-edge"

# Root of the generated documentation site
docs = "docs"

[catalog]
# Catalog file name under <docs>/assets; the checksum is written next to it
file_name = "catalog.json"
"#;

/// Project configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// Input and output directories, relative to the project root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_tools")]
    pub tools: String,

    #[serde(default = "default_edge_tools")]
    pub edge_tools: String,

    #[serde(default = "default_docs")]
    pub docs: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_catalog_file")]
    pub file_name: String,
}

fn default_tools() -> String {
    "tools".to_string()
}

fn default_edge_tools() -> String {
    "tools-edge".to_string()
}

fn default_docs() -> String {
    "docs".to_string()
}

fn default_catalog_file() -> String {
    "catalog.json".to_string()
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            tools: default_tools(),
            edge_tools: default_edge_tools(),
            docs: default_docs(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            file_name: default_catalog_file(),
        }
    }
}

impl Config {
    /// Load `tooldoc.toml` from the project root, or defaults when absent
    pub fn load(root: &Path) -> Result<Self> {
        let path = Self::path(root);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };

        toml::from_str(&content).map_err(|e| parse_error(&path, e))
    }

    /// Write the current values, replacing any comments in an existing file
    pub fn save(&self, root: &Path) -> Result<()> {
        let path = Self::path(root);
        let content = toml::to_string_pretty(self).map_err(|e| parse_error(&path, e))?;

        fs::create_dir_all(root)?;
        fs::write(&path, content)?;
        tracing::debug!(config = %path.display(), "saved config");
        Ok(())
    }

    pub fn path(root: &Path) -> PathBuf {
        root.join(CONFIG_FILE)
    }

    /// Write the commented template unless a config already exists
    pub fn init(root: &Path) -> Result<PathBuf> {
        let path = Self::path(root);
        if path.exists() {
            return Ok(path);
        }

        fs::create_dir_all(root)?;
        fs::write(&path, DEFAULT_CONFIG_TEMPLATE)?;
        tracing::debug!(config = %path.display(), "initialized config");
        Ok(path)
    }

    /// Get a config value by dot-notation key
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "paths.tools" => Some(self.paths.tools.clone()),
            "paths.edge_tools" => Some(self.paths.edge_tools.clone()),
            "paths.docs" => Some(self.paths.docs.clone()),
            "catalog.file_name" => Some(self.catalog.file_name.clone()),
            _ => None,
        }
    }

    /// Set a config value by dot-notation key
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim().trim_matches('"').to_string();
        match key {
            "paths.tools" => self.paths.tools = value,
            "paths.edge_tools" => self.paths.edge_tools = value,
            "paths.docs" => self.paths.docs = value,
            "catalog.file_name" => self.catalog.file_name = value,
            _ => {
                return Err(DocgenError::ConfigKeyNotFound {
                    key: key.to_string(),
                })
            }
        }
        Ok(())
    }

    /// List all config keys with their current values
    pub fn list(&self) -> Vec<(String, String)> {
        [
            "paths.tools",
            "paths.edge_tools",
            "paths.docs",
            "catalog.file_name",
        ]
        .iter()
        .filter_map(|key| self.get(key).map(|v| (key.to_string(), v)))
        .collect()
    }

    /// Resolve every input and output path against the project root
    pub fn layout(&self, root: &Path) -> Layout {
        let docs = root.join(&self.paths.docs);
        let assets = docs.join("assets");
        Layout {
            tool_roots: vec![
                (root.join(&self.paths.tools), ToolKind::Standard),
                (root.join(&self.paths.edge_tools), ToolKind::Edge),
            ],
            pages_dir: docs.join("docs").join("tools"),
            menu_path: docs.join("_data").join("tools.yaml"),
            catalog_path: assets.join(&self.catalog.file_name),
            checksum_path: assets.join(format!("{}.checksum", self.catalog.file_name)),
        }
    }
}

fn parse_error(path: &Path, err: impl fmt::Display) -> DocgenError {
    DocgenError::ConfigParse {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

/// Resolved filesystem layout for one generation run
#[derive(Debug, Clone)]
pub struct Layout {
    /// Tool collections in processing order
    pub tool_roots: Vec<(PathBuf, ToolKind)>,
    pub pages_dir: PathBuf,
    pub menu_path: PathBuf,
    pub catalog_path: PathBuf,
    pub checksum_path: PathBuf,
}

impl Layout {
    pub fn for_root(root: &Path) -> Result<Self> {
        Ok(Config::load(root)?.layout(root))
    }
}
