use crate::models::metadata::{ModMetadata, ServerData};
use crate::utils::json::Json;
use camino::Utf8Path;
use tracing::debug;

/// Well-known metadata file at the root of every mod folder.
pub const SERVER_DATA_FILE: &str = "ServerData.json";

/// Reads the identity of the mod rooted at `mod_root`.
///
/// A missing or unreadable `ServerData.json` is not an error: the mod is
/// then described by its configured identifier with version "unknown".
/// When the file parses, the name falls back from `name` to `id` to
/// `fallback_id`, and a missing version field reads as the empty string.
pub fn read_mod_metadata(mod_root: &Utf8Path, fallback_id: &str) -> ModMetadata {
    let path = mod_root.join(SERVER_DATA_FILE);
    match Json::read::<ServerData>(&path) {
        Ok(data) => ModMetadata {
            name: data
                .name
                .or(data.id)
                .unwrap_or_else(|| fallback_id.to_string()),
            version: data.revision.and_then(|r| r.version).unwrap_or_default(),
        },
        Err(err) => {
            debug!("no usable metadata at {}: {}", path, err);
            ModMetadata::fallback(fallback_id)
        }
    }
}
