use derive_more::Display;

#[derive(Debug, Display)]
pub enum SyncError {
    /// Malformed desired-mods document. Fatal before any folder is touched.
    #[display("invalid mod configuration: {_0}")]
    ConfigParse(String),
    #[display("{_0}")]
    ParseError(String),
    #[display("{_0}")]
    IOError(String),
    #[display("failed to write manifest: {_0}")]
    ManifestWrite(String),
}

impl std::error::Error for SyncError {}

impl From<std::io::Error> for SyncError {
    fn from(e: std::io::Error) -> Self {
        SyncError::IOError(e.to_string())
    }
}

impl From<serde_json::Error> for SyncError {
    fn from(e: serde_json::Error) -> Self {
        SyncError::ParseError(e.to_string())
    }
}

impl From<std::path::StripPrefixError> for SyncError {
    fn from(e: std::path::StripPrefixError) -> Self {
        SyncError::ParseError(e.to_string())
    }
}

impl From<walkdir::Error> for SyncError {
    fn from(e: walkdir::Error) -> Self {
        SyncError::IOError(e.to_string())
    }
}
