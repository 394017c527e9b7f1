//! Error types shared across the crate.

/// Errors surfaced to callers at load or construction time.
///
/// Per-chromosome failures (missing edge, empty speed table, non-positive
/// speed) are not errors: they invalidate the chromosome and the search
/// carries on.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The graph description is malformed or incomplete.
    ///
    /// `line` is 1-based, or 0 when the problem is not tied to one line.
    #[error("invalid graph data at line {line}: {reason}")]
    InvalidGraphData { line: usize, reason: String },

    /// A caller-supplied parameter lies outside its documented domain.
    #[error("configuration out of range: {field}: {reason}")]
    ConfigurationOutOfRange { field: &'static str, reason: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn graph(line: usize, reason: impl Into<String>) -> Self {
        Error::InvalidGraphData {
            line,
            reason: reason.into(),
        }
    }

    pub(crate) fn config(field: &'static str, reason: impl Into<String>) -> Self {
        Error::ConfigurationOutOfRange {
            field,
            reason: reason.into(),
        }
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_error_display() {
        let err = Error::graph(3, "bad time");
        assert_eq!(err.to_string(), "invalid graph data at line 3: bad time");
    }

    #[test]
    fn test_config_error_display() {
        let err = Error::config("tournament_chance", "must be in (0, 1]");
        assert!(err.to_string().contains("tournament_chance"));
    }
}
