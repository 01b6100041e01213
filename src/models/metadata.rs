use serde::{Deserialize, Serialize};

/// Resolved identity of one mod, as recorded in the manifest.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ModMetadata {
    pub name: String,
    pub version: String,
}

impl ModMetadata {
    /// Identity used when a mod ships no readable metadata file.
    pub fn fallback(mod_id: &str) -> Self {
        Self {
            name: mod_id.to_string(),
            version: "unknown".to_string(),
        }
    }
}

/// On-disk shape of `ServerData.json`. Every field is optional and unknown
/// fields are ignored.
#[derive(Deserialize, Clone, Debug, Default)]
pub struct ServerData {
    pub id: Option<String>,
    pub name: Option<String>,
    pub revision: Option<Revision>,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct Revision {
    pub version: Option<String>,
}
