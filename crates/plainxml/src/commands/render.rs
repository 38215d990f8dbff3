//! `plainxml render` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use plainxml_config::{CliSettings, Config};
use plainxml_renderer::{ListTags, ReferenceMode, RenderResult, Renderer};
use plainxml_tree::Node;

use crate::crosscheck::{self, ExpectedRequirements};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Path to the document tree (JSON).
    input: PathBuf,

    /// Output directory (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover plainxml.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Collect all anchors before rendering so forward references resolve.
    #[arg(long)]
    prescan: bool,

    /// Escape reserved characters in attribute values.
    #[arg(long, overrides_with = "no_escape")]
    escape: bool,

    /// Write attribute values verbatim.
    #[arg(long, overrides_with = "escape")]
    no_escape: bool,

    /// Render bullet lists as `xhtml:ul` instead of `xhtml:ol`.
    #[arg(long)]
    distinct_lists: bool,

    /// JSON file with expected requirement numbers to cross-check.
    #[arg(long)]
    expect: Option<PathBuf>,

    /// Enable verbose output (debug logging).
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl RenderArgs {
    /// Execute the render command.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = Config::load(self.config.as_deref(), Some(&self.cli_settings()))?;

        output.info(&format!("Rendering {}...", self.input.display()));
        let rendered = render_file(&self.input, &config)?;

        for warning in &rendered.result.warnings {
            output.warning(&format!("Warning: {warning}"));
        }
        output.success(&format!(
            "Wrote {} ({} requirements)",
            rendered.path.display(),
            rendered.result.requirements.len()
        ));

        verify(&rendered.result, config.cross_check_resolved.expect.as_deref())?;
        if let Some(expect) = &config.cross_check_resolved.expect {
            output.success(&format!("Requirements match {}", expect.display()));
        }

        Ok(())
    }

    fn cli_settings(&self) -> CliSettings {
        let escape_attributes = if self.no_escape {
            Some(false)
        } else if self.escape {
            Some(true)
        } else {
            None
        };

        CliSettings {
            destination_dir: self.output_dir.clone(),
            references: self.prescan.then_some(ReferenceMode::Prescan),
            escape_attributes,
            list_tags: self.distinct_lists.then_some(ListTags::ByStyle),
            expect: self.expect.clone(),
        }
    }
}

/// A rendered document and where it was written.
#[derive(Debug)]
struct Rendered {
    path: PathBuf,
    result: RenderResult,
}

/// Load the tree at `input`, render it and write the XML.
fn render_file(input: &Path, config: &Config) -> Result<Rendered, CliError> {
    let tree = plainxml_tree::load_document(input)?;
    let result = Renderer::with_options(config.render.clone()).render(&tree);

    let output = &config.output_resolved;
    let path = output.output_path(&document_name(&tree, input));
    std::fs::create_dir_all(&output.destination_dir)
        .and_then(|()| std::fs::write(&path, &result.xml))
        .map_err(|source| CliError::Write {
            path: path.clone(),
            source,
        })?;
    tracing::debug!(path = %path.display(), bytes = result.xml.len(), "Wrote XML");

    Ok(Rendered { path, result })
}

/// Fail on invalid requirement attributes, then cross-check against `expect`.
fn verify(result: &RenderResult, expect: Option<&Path>) -> Result<(), CliError> {
    crosscheck::check_attributes(&result.invalid_requirements)?;
    match expect {
        Some(expect) => ExpectedRequirements::load(expect)?.check(&result.requirements)?,
        None => tracing::info!("No expected-requirements file given, cross-check skipped"),
    }
    Ok(())
}

/// Output file stem: the document's `docname`, else the input file stem.
fn document_name(tree: &Node, input: &Path) -> String {
    match tree.attributes.find("docname") {
        Some(name) if !name.is_empty() => name.to_owned(),
        _ => input
            .file_stem()
            .map_or_else(|| "document".to_owned(), |s| s.to_string_lossy().into_owned()),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    const TREE: &str = r#"{
        "kind": "document",
        "attributes": {"docname": "spec", "doctitle": "Spec"},
        "children": [
            {"kind": "paragraph", "children": [{"kind": "inline_anchor", "attributes": {"refid": "later"}}]},
            {"kind": "section", "title": "Later", "index": 0,
             "attributes": {"id": "later", "reftext": "Later"},
             "children": [
                {"kind": "sidebar", "attributes": {"1": "requirement", "id": "r1", "keyword": "shall", "category": "technical"}}
             ]}
        ]
    }"#;

    fn setup(config: &str) -> (TempDir, PathBuf, Config) {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("tree.json");
        std::fs::write(&input, TREE).unwrap();
        let config_path = dir.path().join("plainxml.toml");
        std::fs::write(&config_path, config).unwrap();
        let config = Config::load(Some(&config_path), None).unwrap();
        (dir, input, config)
    }

    #[test]
    fn test_render_file_writes_docname() {
        let (dir, input, config) = setup("[output]\ndestination_dir = \"out\"\n");

        let rendered = render_file(&input, &config).unwrap();

        assert_eq!(rendered.path, dir.path().join("out/spec.xml"));
        let written = std::fs::read_to_string(&rendered.path).unwrap();
        assert_eq!(written, rendered.result.xml);
        assert!(written.starts_with("<document "));
        assert_eq!(rendered.result.requirements, vec!["r1".to_owned()]);
        assert_eq!(rendered.result.warnings.len(), 1);
    }

    #[test]
    fn test_render_file_uses_config_options() {
        let (_dir, input, config) = setup("[render]\nreferences = \"prescan\"\n");

        let rendered = render_file(&input, &config).unwrap();

        assert!(rendered.result.xml.contains("<xhtml:p>Later</xhtml:p>"));
        assert!(rendered.result.warnings.is_empty());
    }

    #[test]
    fn test_render_file_rejects_non_document_root() {
        let (dir, _input, config) = setup("");
        let input = dir.path().join("para.json");
        std::fs::write(&input, r#"{"kind": "paragraph"}"#).unwrap();

        let err = render_file(&input, &config).unwrap_err();
        assert!(err.to_string().contains("root node must be a document"));
    }

    #[test]
    fn test_verify_passes_valid_document() {
        let (dir, input, config) = setup("");
        let rendered = render_file(&input, &config).unwrap();
        let expect = dir.path().join("reqs.json");
        std::fs::write(&expect, r#"{"requirements": {"numbers": [1]}}"#).unwrap();

        verify(&rendered.result, None).unwrap();
        verify(&rendered.result, Some(&expect)).unwrap();
    }

    #[test]
    fn test_verify_rejects_invalid_requirement_attributes() {
        let tree = Node::document().with_child(
            Node::requirement("r1")
                .with_attr("keyword", "must")
                .with_attr("category", "technical"),
        );
        let result = Renderer::new().render(&tree);

        let err = verify(&result, None).unwrap_err();
        assert!(matches!(
            err,
            CliError::CrossCheck(crosscheck::CrossCheckError::InvalidAttributes(_))
        ));
        assert!(err.to_string().contains(r#"keyword "must""#));
    }

    #[test]
    fn test_verify_reports_requirement_mismatch() {
        let (dir, input, config) = setup("");
        let rendered = render_file(&input, &config).unwrap();
        let expect = dir.path().join("reqs.json");
        std::fs::write(&expect, r#"{"requirements": {"numbers": [1, 2]}}"#).unwrap();

        let err = verify(&rendered.result, Some(&expect)).unwrap_err();
        assert!(err.to_string().contains("expected: [r1, r2]"));
    }

    #[test]
    fn test_document_name_falls_back_to_input_stem() {
        let tree = Node::document();
        assert_eq!(document_name(&tree, Path::new("/in/manual.json")), "manual");

        let tree = Node::document().with_attr("docname", "");
        assert_eq!(document_name(&tree, Path::new("manual.json")), "manual");
    }

    #[test]
    fn test_document_name_prefers_docname() {
        let tree = Node::document().with_attr("docname", "spec");
        assert_eq!(document_name(&tree, Path::new("tree.json")), "spec");
    }
}
