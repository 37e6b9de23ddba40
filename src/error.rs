//! Error type shared by every stage of the pipeline.
//!
//! Nothing here is recoverable mid-run: each variant aborts the run before
//! (or instead of) producing a chart with wrong or missing bars.

use std::path::PathBuf;

use crate::identity::ToolIdentity;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A command or filename matched none of the configured identities.
    /// The classifier and the benchmark matrix have drifted apart.
    #[error("no tool identity matches {text:?}")]
    Classification { text: String },

    /// The encrypted output of a tool is absent or unreadable.
    #[error("missing artifact for {identity}: {}", path.display())]
    MissingArtifact {
        identity: ToolIdentity,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed results file {}: {reason}", path.display())]
    ResultsFormat { path: PathBuf, reason: String },

    #[error("{context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("benchmark harness `{program}` not found on PATH")]
    HarnessUnavailable { program: String },

    /// The harness exited non-zero; `code` is its own exit status.
    #[error("{phase} benchmark failed with exit status {code}")]
    Harness { phase: &'static str, code: i32 },

    #[error("failed to render {chart}: {reason}")]
    Render { chart: String, reason: String },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Error::Io {
            context: context.into(),
            source,
        }
    }
}
