//! `plainxml check-config` command implementation.

use std::path::PathBuf;

use clap::Args;
use plainxml_config::Config;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check-config command.
#[derive(Args)]
pub(crate) struct CheckConfigArgs {
    /// Path to configuration file (default: auto-discover plainxml.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl CheckConfigArgs {
    /// Load and validate the configuration, then print the resolved values.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = Config::load(self.config.as_deref(), None)?;

        match &config.config_path {
            Some(path) => output.heading(&format!("Configuration: {}", path.display())),
            None => output.heading("Configuration: defaults (no plainxml.toml found)"),
        }
        for (key, value) in summary(&config) {
            output.field(key, &value, KEY_WIDTH);
        }
        output.success("Configuration is valid");

        Ok(())
    }
}

const KEY_WIDTH: usize = 26;

/// Resolved settings as `(key, value)` pairs in file order.
fn summary(config: &Config) -> Vec<(&'static str, String)> {
    let render = &config.render;
    let output = &config.output_resolved;
    vec![
        ("render.references", format!("{:?}", render.references)),
        ("render.escape_attributes", render.escape_attributes.to_string()),
        ("render.list_tags", format!("{:?}", render.list_tags)),
        ("render.attribute_comments", render.attribute_comments.to_string()),
        ("output.destination_dir", output.destination_dir.display().to_string()),
        ("output.suffix", output.suffix.clone()),
        (
            "cross_check.expect",
            config
                .cross_check_resolved
                .expect
                .as_ref()
                .map_or_else(|| "(none)".to_owned(), |p| p.display().to_string()),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_summary() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plainxml.toml");
        std::fs::write(
            &path,
            "[render]\nlist_tags = \"by_style\"\n\n[output]\nsuffix = \".reqif.xml\"\n",
        )
        .unwrap();
        let config = Config::load(Some(&path), None).unwrap();

        let summary = summary(&config);

        assert_eq!(summary.len(), 7);
        assert_eq!(summary[0], ("render.references", "SinglePass".to_owned()));
        assert_eq!(summary[2], ("render.list_tags", "ByStyle".to_owned()));
        assert_eq!(summary[5], ("output.suffix", ".reqif.xml".to_owned()));
        assert_eq!(summary[6], ("cross_check.expect", "(none)".to_owned()));
    }
}
