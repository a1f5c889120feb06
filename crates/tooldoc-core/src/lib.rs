pub mod catalog;
pub mod config;
pub mod error;
pub mod generator;
pub mod menu;
pub mod meta;
pub mod page;
pub mod registry;
pub mod scanner;

pub use catalog::{compute_checksum, verify_catalog, Catalog, CatalogDigest};
pub use config::{Config, Layout};
pub use error::{DocgenError, Result};
pub use generator::{GenerationReport, Generator, Skipped};
pub use menu::{Menu, ToolBrief};
pub use meta::{is_valid_tool_name, parse_meta, ToolMeta, REQUIRED_KEYS};
pub use page::{page_file_name, permalink, readme_title, render_page, write_page};
pub use registry::UniquenessRegistry;
pub use scanner::{scan_root, SkipReason, ToolDir, ToolKind, ToolSource};
