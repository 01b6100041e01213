use crate::models::error::SyncError;
use crate::models::metadata::ModMetadata;
use crate::utils::json::Json;
use camino::{Utf8Path, Utf8PathBuf};
use indexmap::IndexMap;

/// Manifest entries keyed by mod identifier. Insertion order is processing
/// order and survives serialization.
pub type ManifestMap = IndexMap<String, ModMetadata>;

/// Well-known manifest file name, one per output directory.
pub const MANIFEST_FILE: &str = "mod_info.json";

/// Writes the manifest into `dir` as pretty-printed JSON, replacing any
/// previous manifest there.
pub fn write_manifest(entries: &ManifestMap, dir: &Utf8Path) -> Result<Utf8PathBuf, SyncError> {
    let path = dir.join(MANIFEST_FILE);
    Json::write_pretty(&path, entries).map_err(|e| SyncError::ManifestWrite(e.to_string()))?;
    Ok(path)
}
