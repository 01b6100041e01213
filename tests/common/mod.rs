use camino::{Utf8Path, Utf8PathBuf};
use indexmap::IndexMap;
use modferry::models::metadata::ModMetadata;
use modferry::SyncConfig;
use std::fs;
use tempfile::TempDir;

/// Scratch tree with separate source and target roots.
pub fn setup_roots() -> (TempDir, Utf8PathBuf, Utf8PathBuf) {
    let tmp = tempfile::tempdir().unwrap();
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).unwrap();

    let source_root = root.join("source");
    let target_root = root.join("target");
    fs::create_dir_all(&source_root).unwrap();
    fs::create_dir_all(&target_root).unwrap();

    (tmp, source_root, target_root)
}

/// Mocks a mod folder: a ServerData.json plus one payload file.
pub fn create_mod(root: &Utf8Path, folder_name: &str, id: &str, version: &str) -> Utf8PathBuf {
    let mod_dir = root.join(folder_name);
    fs::create_dir_all(&mod_dir).unwrap();
    write_server_data(&mod_dir, id, version);
    fs::write(mod_dir.join("content.txt"), folder_name).unwrap();
    mod_dir
}

pub fn write_server_data(mod_dir: &Utf8Path, id: &str, version: &str) {
    let data =
        format!(r#"{{"id": "{id}", "name": "{id}", "revision": {{"version": "{version}"}}}}"#);
    fs::write(mod_dir.join("ServerData.json"), data).unwrap();
}

/// Desired-mods document requesting the given identifiers.
pub fn config_for(ids: &[&str]) -> SyncConfig {
    let mods: Vec<String> = ids
        .iter()
        .map(|id| format!(r#"{{"modId": "{id}"}}"#))
        .collect();
    let doc = format!(r#"{{"game": {{"mods": [{}]}}}}"#, mods.join(", "));
    SyncConfig::parse(&doc).unwrap()
}

/// Pins a folder's own mtime so the timestamp rule fires deterministically.
pub fn set_folder_mtime(path: &Utf8Path, unix_secs: i64) {
    let mtime = filetime::FileTime::from_unix_time(unix_secs, 0);
    filetime::set_file_mtime(path.as_std_path(), mtime).unwrap();
}

/// Reads a written manifest back, preserving its key order.
pub fn read_manifest(dir: &Utf8Path) -> IndexMap<String, ModMetadata> {
    let text = fs::read_to_string(dir.join("mod_info.json")).unwrap();
    serde_json::from_str(&text).unwrap()
}
