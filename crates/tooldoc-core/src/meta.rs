//! META file parsing
//!
//! A META file is a flat list of `key = value` (or `key: value`) lines.
//! Keys are case-insensitive and stored lower-cased. Lines starting with
//! `#` or `;` are comments, and an indented line continues the value of
//! the previous key. Blank lines between continuation lines are kept in
//! the value.

use std::path::Path;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::{DocgenError, Result};
use crate::scanner::ToolKind;

pub const REQUIRED_KEYS: &[&str] = &["name", "version", "description", "home", "author"];

/// Key of the field derived from the tool's collection
pub const TYPE_KEY: &str = "type";

/// Parsed META contents, in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolMeta {
    entries: Vec<(String, String)>,
}

impl ToolMeta {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Insert or overwrite a key, keeping its original position
    pub fn insert(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => *v = value,
            None => self.entries.push((key.to_string(), value)),
        }
    }

    pub fn name(&self) -> &str {
        self.get("name").unwrap_or_default()
    }

    pub fn version(&self) -> &str {
        self.get("version").unwrap_or_default()
    }

    pub fn description(&self) -> &str {
        self.get("description").unwrap_or_default()
    }

    pub fn home(&self) -> &str {
        self.get("home").unwrap_or_default()
    }

    pub fn author(&self) -> &str {
        self.get("author").unwrap_or_default()
    }

    /// Declared short-command; an empty value counts as absent
    pub fn short_command(&self) -> Option<&str> {
        self.get("short-command").filter(|s| !s.is_empty())
    }

    /// Display name, falling back to the tool name
    pub fn display_name(&self) -> &str {
        self.get("display-name")
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| self.name())
    }

    /// Attach the derived `type` field
    pub fn with_type(mut self, kind: ToolKind) -> Self {
        self.insert(TYPE_KEY, kind.as_str());
        self
    }

    /// Check required keys and the name format.
    ///
    /// `tool` is the directory name, used in diagnostics.
    pub fn validate(&self, tool: &str) -> Result<()> {
        if REQUIRED_KEYS.iter().any(|k| !self.contains_key(k)) {
            return Err(DocgenError::MissingKeys {
                tool: tool.to_string(),
                required: REQUIRED_KEYS.to_vec(),
            });
        }

        if !is_valid_tool_name(self.name()) {
            return Err(DocgenError::InvalidToolName {
                name: self.name().to_string(),
            });
        }

        Ok(())
    }
}

impl Serialize for ToolMeta {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Tool names are non-empty and made only of `[A-Za-z0-9_-]`
pub fn is_valid_tool_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Parse META text. `path` is only used for diagnostics.
pub fn parse_meta(path: &Path, text: &str) -> Result<ToolMeta> {
    let mut meta = ToolMeta::default();
    let mut current: Option<usize> = None;
    // Blank lines seen since the last value line; kept only if a
    // continuation follows, so trailing blanks never reach the value.
    let mut blanks = 0;

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();

        if line.is_empty() {
            if current.is_some() {
                blanks += 1;
            }
            continue;
        }
        if line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        let indented = raw.starts_with(|c: char| c.is_whitespace());
        if let (true, Some(pos)) = (indented, current) {
            let value = &mut meta.entries[pos].1;
            value.push_str(&"\n".repeat(blanks + 1));
            value.push_str(line);
            blanks = 0;
            continue;
        }
        blanks = 0;

        let Some(sep) = line.find(['=', ':']) else {
            return Err(DocgenError::MetaSyntax {
                path: path.to_path_buf(),
                line: idx + 1,
                message: format!("expected 'key = value', got '{}'", line),
            });
        };

        let key = line[..sep].trim().to_lowercase();
        let value = line[sep + 1..].trim().to_string();

        if key.is_empty() {
            return Err(DocgenError::MetaSyntax {
                path: path.to_path_buf(),
                line: idx + 1,
                message: "empty key".to_string(),
            });
        }
        if meta.contains_key(&key) {
            return Err(DocgenError::DuplicateMetaKey {
                path: path.to_path_buf(),
                key,
            });
        }

        meta.entries.push((key, value));
        current = Some(meta.entries.len() - 1);
    }

    Ok(meta)
}
