use crate::models::error::SyncError;
use camino::Utf8Path;

pub struct Json;

impl Json {
    /// Drops a leading U+FEFF. Metadata and config files frequently come
    /// from Windows tools that prepend a UTF-8 byte-order mark.
    pub fn strip_bom(text: &str) -> &str {
        text.strip_prefix('\u{feff}').unwrap_or(text)
    }

    pub fn read<T: serde::de::DeserializeOwned>(path: &Utf8Path) -> Result<T, SyncError> {
        let s = std::fs::read_to_string(path).map_err(|e| SyncError::IOError(e.to_string()))?;
        serde_json::from_str::<T>(Self::strip_bom(&s))
            .map_err(|e| SyncError::ParseError(e.to_string()))
    }

    pub fn write_pretty<T: serde::Serialize>(path: &Utf8Path, data: &T) -> Result<(), SyncError> {
        serde_json::to_string_pretty(data)
            .map_err(|e| SyncError::ParseError(e.to_string()))
            .and_then(|t| std::fs::write(path, t).map_err(|e| SyncError::IOError(e.to_string())))
    }
}
