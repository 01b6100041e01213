use crate::models::error::SyncError;
use crate::utils::json::Json;
use camino::Utf8Path;
use serde::Deserialize;

/// Desired-mods document: `{"game": {"mods": [{"modId": "..."}]}}`.
///
/// `game` and `mods` are required; a document missing either is rejected
/// before the engine touches any folder. Individual entries may omit
/// `modId`, which reads as an empty identifier and is skipped at sync time.
#[derive(Deserialize, Clone, Debug)]
pub struct SyncConfig {
    pub game: GameSection,
}

#[derive(Deserialize, Clone, Debug)]
pub struct GameSection {
    pub mods: Vec<ModRef>,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct ModRef {
    #[serde(rename = "modId", default)]
    pub mod_id: String,
}

impl SyncConfig {
    pub fn parse(text: &str) -> Result<Self, SyncError> {
        serde_json::from_str(Json::strip_bom(text))
            .map_err(|e| SyncError::ConfigParse(e.to_string()))
    }

    pub fn load(path: &Utf8Path) -> Result<Self, SyncError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| SyncError::ConfigParse(format!("{}: {}", path, e)))?;
        Self::parse(&text)
    }

    /// Identifiers in declaration order, empty ones included.
    pub fn mod_ids(&self) -> impl Iterator<Item = &str> {
        self.game.mods.iter().map(|m| m.mod_id.as_str())
    }

    pub fn mod_count(&self) -> usize {
        self.game.mods.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_document() {
        let config = SyncConfig::parse(
            r#"{"game": {"mods": [{"modId": "alpha"}, {"modId": "beta"}]}}"#,
        )
        .unwrap();

        assert_eq!(config.mod_count(), 2);
        assert_eq!(config.mod_ids().collect::<Vec<_>>(), vec!["alpha", "beta"]);
    }

    #[test]
    fn missing_game_key_is_a_config_error() {
        let err = SyncConfig::parse(r#"{"mods": []}"#).unwrap_err();
        assert!(matches!(err, SyncError::ConfigParse(_)));
    }

    #[test]
    fn missing_mods_key_is_a_config_error() {
        let err = SyncConfig::parse(r#"{"game": {}}"#).unwrap_err();
        assert!(matches!(err, SyncError::ConfigParse(_)));
    }

    #[test]
    fn entry_without_mod_id_reads_as_empty() {
        let config = SyncConfig::parse(r#"{"game": {"mods": [{}]}}"#).unwrap();
        assert_eq!(config.mod_ids().collect::<Vec<_>>(), vec![""]);
    }

    #[test]
    fn tolerates_byte_order_mark() {
        let config =
            SyncConfig::parse("\u{feff}{\"game\": {\"mods\": []}}").unwrap();
        assert_eq!(config.mod_count(), 0);
    }
}
