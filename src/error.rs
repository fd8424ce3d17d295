use thiserror::Error;

/// Classifies list loading errors for programmatic matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadErrorKind {
    /// Required path or URL not configured
    NotConfigured,
    /// File open/read failure
    FileError,
    /// List content did not yield any usable rule
    InvalidData,
    /// Download or verification failure
    DownloadFailed,
}

/// Public suffix / host errors
#[derive(Error, Debug)]
pub enum TldError {
    #[error("Invalid input type: {0}")]
    InputType(String),

    #[error("Invalid host address: {0}")]
    HostFormat(String),

    #[error("Invalid port number in host: {0}")]
    PortRange(String),

    #[error("No public suffix in host: {0}")]
    NoPublicSuffix(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Load error: {message}")]
    LoadError {
        kind: LoadErrorKind,
        message: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl TldError {
    pub(crate) fn load(kind: LoadErrorKind, message: impl Into<String>) -> Self {
        TldError::LoadError {
            kind,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TldError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_error_kind_is_matchable() {
        let err = TldError::load(LoadErrorKind::DownloadFailed, "connection refused");
        match &err {
            TldError::LoadError { kind, .. } => {
                assert!(matches!(kind, LoadErrorKind::DownloadFailed));
            }
            _ => panic!("expected LoadError"),
        }
    }

    #[test]
    fn test_load_error_display_includes_message() {
        let err = TldError::load(LoadErrorKind::InvalidData, "no rules in list");
        let display = format!("{}", err);
        assert!(display.contains("no rules in list"), "got: {}", display);
    }

    #[test]
    fn test_host_errors_display_input() {
        let err = TldError::HostFormat("a:b:c".into());
        assert_eq!(format!("{}", err), "Invalid host address: a:b:c");

        let err = TldError::PortRange("a.com:99999".into());
        assert!(format!("{}", err).contains("a.com:99999"));
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: TldError = io.into();
        assert!(matches!(err, TldError::IoError(_)));
    }
}
