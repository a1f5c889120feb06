//! Single-pass documentation generation
//!
//! Tools are processed collection by collection (standard first, then edge).
//! A tool page is written as soon as the tool is accepted; the menu and the
//! catalog are written only once every tool has been validated. A fatal
//! error therefore leaves earlier pages in place and no catalog update.

use std::path::PathBuf;

use crate::catalog::{Catalog, CatalogDigest};
use crate::config::Layout;
use crate::error::Result;
use crate::menu::{Menu, ToolBrief};
use crate::meta::parse_meta;
use crate::page::{render_page, write_page};
use crate::registry::UniquenessRegistry;
use crate::scanner::{scan_root, SkipReason, ToolSource};

/// A tool directory left out of every output
#[derive(Debug, Clone)]
pub struct Skipped {
    pub tool: String,
    pub path: PathBuf,
    pub reason: SkipReason,
}

/// Outcome of a successful run
#[derive(Debug)]
pub struct GenerationReport {
    /// Accepted tools, in discovery order
    pub tools: Vec<ToolBrief>,
    pub skipped: Vec<Skipped>,
    /// Collection roots that do not exist
    pub missing_roots: Vec<PathBuf>,
    pub pages: Vec<PathBuf>,
    pub menu_path: PathBuf,
    pub catalog: CatalogDigest,
}

pub struct Generator {
    layout: Layout,
}

impl Generator {
    pub fn new(layout: Layout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn run(&self) -> Result<GenerationReport> {
        let mut registry = UniquenessRegistry::new();
        let mut menu = Menu::new();
        let mut catalog = Catalog::new();
        let mut skipped = Vec::new();
        let mut missing_roots = Vec::new();
        let mut pages = Vec::new();

        for (root, kind) in &self.layout.tool_roots {
            let kind = *kind;
            if !root.is_dir() {
                missing_roots.push(root.clone());
                continue;
            }

            for dir in scan_root(root, kind)? {
                let (tool, path) = (dir.name.clone(), dir.path.clone());
                let source = match ToolSource::load(dir) {
                    Ok(source) => source,
                    Err(reason) => {
                        tracing::debug!(tool = %tool, %reason, "skipping tool");
                        skipped.push(Skipped { tool, path, reason });
                        continue;
                    }
                };

                let meta = parse_meta(&source.dir.meta_path(), &source.meta)?;
                meta.validate(&source.dir.name)?;
                registry.register(&meta)?;
                let meta = meta.with_type(kind);

                menu.push(ToolBrief::from_meta(&meta, kind));

                let page = render_page(&meta, kind, &source.readme);
                pages.push(write_page(&self.layout.pages_dir, &source.dir.name, &page)?);

                catalog.push(meta);
            }
        }

        if catalog.is_empty() {
            tracing::warn!("no tools accepted; writing an empty catalog");
        }
        tracing::info!(
            tools = catalog.len(),
            skipped = skipped.len(),
            "all tools validated"
        );

        menu.write(&self.layout.menu_path)?;
        let digest = catalog.write(&self.layout.catalog_path, &self.layout.checksum_path)?;

        Ok(GenerationReport {
            tools: menu.briefs().to_vec(),
            skipped,
            missing_roots,
            pages,
            menu_path: self.layout.menu_path.clone(),
            catalog: digest,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{compute_checksum, verify_catalog};
    use crate::config::Config;
    use crate::error::DocgenError;
    use crate::scanner::{ToolKind, META_FILE, README_FILE};
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn meta_text(name: &str, extra: &str) -> String {
        format!(
            "name={name}\nversion=1.0\ndescription={name} tool\nhome=http://x\nauthor=A\n{extra}"
        )
    }

    fn write_tool(root: &Path, dir: &str, meta: Option<&str>, readme: Option<&str>) {
        let path = root.join(dir);
        fs::create_dir_all(&path).unwrap();
        if let Some(meta) = meta {
            fs::write(path.join(META_FILE), meta).unwrap();
        }
        if let Some(readme) = readme {
            fs::write(path.join(README_FILE), readme).unwrap();
        }
    }

    fn setup() -> (TempDir, Generator) {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("tools")).unwrap();
        fs::create_dir_all(tmp.path().join("tools-edge")).unwrap();
        let generator = Generator::new(Config::default().layout(tmp.path()));
        (tmp, generator)
    }

    #[test]
    fn test_single_tool_scenario() {
        let (tmp, generator) = setup();
        let tools = tmp.path().join("tools");
        write_tool(
            &tools,
            "foo",
            Some("name=foo\nversion=1.0\ndescription=Foo tool\nhome=http://x\nauthor=A\n"),
            Some("# Foo Title\n\nSome docs\n"),
        );

        let report = generator.run().unwrap();
        assert_eq!(report.tools.len(), 1);
        assert_eq!(report.catalog.entries, 1);

        let page = fs::read_to_string(tmp.path().join("docs/docs/tools/foo.md")).unwrap();
        assert!(page.contains("\ntitle: Foo Title\n"));
        assert!(page.contains("\npermalink: /tools/apicheck/foo\n"));
        assert!(page.ends_with("---\n\n# Foo Title\n\nSome docs\n"));

        let json = fs::read_to_string(&report.catalog.catalog_path).unwrap();
        assert_eq!(
            json,
            r#"[{"name":"foo","version":"1.0","description":"Foo tool","home":"http://x","author":"A","type":"apicheck"}]"#
        );
    }

    #[test]
    fn test_duplicate_name_aborts_before_catalog() {
        let (tmp, generator) = setup();
        let tools = tmp.path().join("tools");
        write_tool(&tools, "foo", Some(&meta_text("foo", "")), Some("# Foo\n"));
        write_tool(&tools, "foo2", Some(&meta_text("foo", "")), Some("# Foo 2\n"));

        let err = generator.run().unwrap_err();
        assert!(matches!(err, DocgenError::DuplicateToolName { ref name } if name == "foo"));
        assert_eq!(err.exit_code(), 1);

        let pages = tmp.path().join("docs/docs/tools");
        assert!(pages.join("foo.md").exists());
        assert!(!pages.join("foo2.md").exists());
        assert!(!generator.layout().catalog_path.exists());
        assert!(!generator.layout().menu_path.exists());
    }

    #[test]
    fn test_duplicate_short_command_across_collections() {
        let (tmp, generator) = setup();
        write_tool(
            &tmp.path().join("tools"),
            "foo",
            Some(&meta_text("foo", "short-command=f\n")),
            Some("# Foo\n"),
        );
        write_tool(
            &tmp.path().join("tools-edge"),
            "bar",
            Some(&meta_text("bar", "short-command=f\n")),
            Some("# Bar\n"),
        );

        let err = generator.run().unwrap_err();
        assert!(matches!(err, DocgenError::DuplicateShortCommand { .. }));
        assert!(!generator.layout().catalog_path.exists());
        assert!(!generator.layout().checksum_path.exists());
    }

    #[test]
    fn test_invalid_name_aborts() {
        let (tmp, generator) = setup();
        write_tool(
            &tmp.path().join("tools"),
            "bad",
            Some(&meta_text("bad!", "")),
            Some("# Bad\n"),
        );

        let err = generator.run().unwrap_err();
        assert!(matches!(err, DocgenError::InvalidToolName { .. }));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_missing_required_key_aborts() {
        let (tmp, generator) = setup();
        write_tool(
            &tmp.path().join("tools"),
            "foo",
            Some("name=foo\nversion=1.0\n"),
            Some("# Foo\n"),
        );

        let err = generator.run().unwrap_err();
        assert!(matches!(err, DocgenError::MissingKeys { ref tool, .. } if tool == "foo"));
    }

    #[test]
    fn test_multi_paragraph_description_stays_one_field() {
        let (tmp, generator) = setup();
        write_tool(
            &tmp.path().join("tools"),
            "foo",
            Some(
                "name=foo\nversion=1.0\ndescription=First para\n\n  Usage: run it\n\nhome=http://x\nauthor=A\n",
            ),
            Some("# Foo\n"),
        );

        let report = generator.run().unwrap();
        let json: serde_json::Value =
            serde_json::from_slice(&fs::read(&report.catalog.catalog_path).unwrap()).unwrap();
        let entry = json[0].as_object().unwrap();

        assert_eq!(entry["description"], "First para\n\nUsage: run it");
        assert!(!entry.contains_key("usage"));
        assert_eq!(entry.len(), 6);
    }

    #[test]
    fn test_incomplete_tools_are_skipped() {
        let (tmp, generator) = setup();
        let tools = tmp.path().join("tools");
        write_tool(&tools, "good", Some(&meta_text("good", "")), Some("# Good\n"));
        write_tool(&tools, "no_readme", Some(&meta_text("no_readme", "")), None);
        write_tool(&tools, "no_meta", None, Some("# No meta\n"));
        write_tool(&tools, ".hidden", Some(&meta_text("hidden", "")), Some("# H\n"));

        let report = generator.run().unwrap();
        assert_eq!(report.catalog.entries, 1);
        assert_eq!(report.pages.len(), 1);

        let skipped: Vec<_> = report
            .skipped
            .iter()
            .map(|s| (s.tool.as_str(), matches!(s.reason, SkipReason::MissingReadme(_))))
            .collect();
        assert_eq!(skipped, vec![("no_meta", false), ("no_readme", true)]);

        let json: serde_json::Value =
            serde_json::from_slice(&fs::read(&report.catalog.catalog_path).unwrap()).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_standard_tools_precede_edge_tools() {
        let (tmp, generator) = setup();
        write_tool(
            &tmp.path().join("tools-edge"),
            "alpha",
            Some(&meta_text("alpha", "display-name=Alpha Edge\n")),
            Some("# Alpha\n"),
        );
        write_tool(
            &tmp.path().join("tools"),
            "zeta_tool",
            Some(&meta_text("zeta", "")),
            Some("# Zeta\n"),
        );

        let report = generator.run().unwrap();
        let order: Vec<_> = report
            .tools
            .iter()
            .map(|t| (t.name.as_str(), t.kind))
            .collect();
        assert_eq!(order, vec![("zeta", ToolKind::Standard), ("alpha", ToolKind::Edge)]);

        assert!(tmp.path().join("docs/docs/tools/zeta-tool.md").exists());

        let menu = fs::read_to_string(&report.menu_path).unwrap();
        let zeta = menu.find("url: /tools/apicheck/zeta").unwrap();
        let alpha = menu.find("url: /tools/edge/alpha").unwrap();
        assert!(zeta < alpha);
        assert!(menu.contains("  - title: Alpha Edge\n"));
    }

    #[test]
    fn test_rerun_is_byte_identical() {
        let (tmp, generator) = setup();
        let tools = tmp.path().join("tools");
        write_tool(&tools, "foo", Some(&meta_text("foo", "")), Some("# Foo\n"));
        write_tool(&tools, "bar", Some(&meta_text("bar", "short-command=b\n")), Some("# Bar\n"));

        let first = generator.run().unwrap();
        let first_json = fs::read(&first.catalog.catalog_path).unwrap();

        let second = generator.run().unwrap();
        let second_json = fs::read(&second.catalog.catalog_path).unwrap();

        assert_eq!(first_json, second_json);
        assert_eq!(first.catalog.checksum, second.catalog.checksum);
        assert_eq!(compute_checksum(&second_json), second.catalog.checksum);
        verify_catalog(&second.catalog.catalog_path, &second.catalog.checksum_path).unwrap();
    }

    #[test]
    fn test_missing_roots_are_reported() {
        let tmp = TempDir::new().unwrap();
        let generator = Generator::new(Config::default().layout(tmp.path()));

        let report = generator.run().unwrap();
        assert_eq!(report.missing_roots.len(), 2);
        assert_eq!(fs::read_to_string(&report.catalog.catalog_path).unwrap(), "[]");
    }
}
