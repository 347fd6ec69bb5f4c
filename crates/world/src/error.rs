use std::path::PathBuf;

/// Errors raised while loading level or template documents.
///
/// These are load-time data failures. The caller is expected to abort the
/// load path and surface the diagnostic; no partial-world recovery is
/// attempted.
#[derive(Debug, thiserror::Error)]
pub enum LevelError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("document is missing required section `{0}`")]
    MissingSection(&'static str),
    #[error("`Capacity` must be a non-negative integer")]
    InvalidCapacity,
    #[error("game object `{object}` has no `Template` entry")]
    MissingTemplate { object: String },
    #[error("service `{0}` is not recognized")]
    UnknownService(String),
    #[error("component `{0}` is not recognized")]
    UnknownComponent(String),
    #[error("invalid data for `{target}`: {source}")]
    Deserialize {
        target: String,
        #[source]
        source: serde_json::Error,
    },
}

impl LevelError {
    /// Wrap a serde failure with the name of the block that was being
    /// applied, so the diagnostic names the offending config.
    pub fn deserialize(target: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Deserialize {
            target: target.into(),
            source,
        }
    }
}
