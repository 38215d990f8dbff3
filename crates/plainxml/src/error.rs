//! CLI error types.

use plainxml_config::ConfigError;
use plainxml_tree::TreeError;

use crate::crosscheck::CrossCheckError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Tree(#[from] TreeError),

    #[error("{0}")]
    CrossCheck(#[from] CrossCheckError),

    #[error("cannot write {}: {source}", .path.display())]
    Write {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
}
