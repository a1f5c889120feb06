//! Machine-readable catalog (`assets/catalog.json`) and its checksum

use std::fs;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha512};

use crate::error::{DocgenError, Result};
use crate::meta::ToolMeta;

/// All accepted tools, in discovery order
#[derive(Debug, Default)]
pub struct Catalog {
    entries: Vec<ToolMeta>,
}

/// Where the catalog landed and the digest written next to it
#[derive(Debug, Clone)]
pub struct CatalogDigest {
    pub catalog_path: PathBuf,
    pub checksum_path: PathBuf,
    pub checksum: String,
    pub entries: usize,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, meta: ToolMeta) {
        self.entries.push(meta);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Compact JSON array of every entry
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.entries)?)
    }

    /// Write the catalog and its checksum, overwriting previous versions
    pub fn write(&self, catalog_path: &Path, checksum_path: &Path) -> Result<CatalogDigest> {
        let json = self.to_json()?;
        let checksum = compute_checksum(json.as_bytes());

        for path in [catalog_path, checksum_path] {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(catalog_path, &json)?;
        fs::write(checksum_path, &checksum)?;

        tracing::info!(
            catalog = %catalog_path.display(),
            entries = self.len(),
            "wrote catalog"
        );

        Ok(CatalogDigest {
            catalog_path: catalog_path.to_path_buf(),
            checksum_path: checksum_path.to_path_buf(),
            checksum,
            entries: self.len(),
        })
    }
}

/// Lower-case hex SHA-512 of `content`
pub fn compute_checksum(content: &[u8]) -> String {
    let mut hasher = Sha512::new();
    hasher.update(content);
    hex::encode(hasher.finalize())
}

/// Recompute the catalog digest and compare it with the checksum file.
///
/// Returns the verified checksum.
pub fn verify_catalog(catalog_path: &Path, checksum_path: &Path) -> Result<String> {
    let content = fs::read(catalog_path)?;
    let expected = fs::read_to_string(checksum_path)?.trim().to_lowercase();
    let actual = compute_checksum(&content);

    if expected != actual {
        return Err(DocgenError::ChecksumMismatch {
            path: catalog_path.to_path_buf(),
            expected,
            actual,
        });
    }

    Ok(actual)
}
