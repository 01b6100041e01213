mod common;

use common::{create_mod, set_folder_mtime, setup_roots};
use modferry::core::decision::evaluate;
use modferry::core::metadata::read_mod_metadata;
use modferry::{SyncDecision, UpdateReason};
use std::fs;

const PAST: i64 = 1_000_000_000;
const LATER: i64 = 2_000_000_000;

#[test]
fn test_missing_target_is_needs_add() {
    let (_tmp, source_root, target_root) = setup_roots();
    let source = create_mod(&source_root, "mod1", "mod1", "1.0");

    let decision = evaluate(&source, &target_root.join("mod1_1.0"));

    assert_eq!(decision, SyncDecision::NeedsAdd);
}

#[test]
fn test_missing_source_metadata_forces_update() {
    let (_tmp, source_root, target_root) = setup_roots();
    let source = source_root.join("mod1");
    fs::create_dir_all(&source).unwrap();
    let target = create_mod(&target_root, "mod1_1.0", "mod1", "1.0");

    let decision = evaluate(&source, &target);

    assert_eq!(
        decision,
        SyncDecision::NeedsUpdate(UpdateReason::SourceMetadataMissing)
    );
}

#[test]
fn test_missing_target_metadata_forces_update() {
    let (_tmp, source_root, target_root) = setup_roots();
    let source = create_mod(&source_root, "mod1", "mod1", "1.0");
    let target = target_root.join("mod1_1.0");
    fs::create_dir_all(&target).unwrap();

    let decision = evaluate(&source, &target);

    assert_eq!(
        decision,
        SyncDecision::NeedsUpdate(UpdateReason::TargetMetadataMissing)
    );
}

#[test]
fn test_directory_posing_as_metadata_counts_as_missing() {
    let (_tmp, source_root, target_root) = setup_roots();
    let source = source_root.join("mod1");
    // A folder named like the metadata file is not metadata.
    fs::create_dir_all(source.join("ServerData.json")).unwrap();
    let target = create_mod(&target_root, "mod1_1.0", "mod1", "1.0");

    let decision = evaluate(&source, &target);

    assert_eq!(
        decision,
        SyncDecision::NeedsUpdate(UpdateReason::SourceMetadataMissing)
    );
}

#[test]
fn test_version_mismatch_wins_over_timestamps() {
    let (_tmp, source_root, target_root) = setup_roots();
    let source = create_mod(&source_root, "mod1", "mod1", "2.0");
    let target = create_mod(&target_root, "mod1_1.5", "mod1", "1.5");

    // Target folder is newer than the source; the version rule must still
    // fire first.
    set_folder_mtime(&source, PAST);
    set_folder_mtime(&target, LATER);

    let decision = evaluate(&source, &target);

    assert_eq!(
        decision,
        SyncDecision::NeedsUpdate(UpdateReason::VersionMismatch {
            source: "2.0".to_string(),
            target: "1.5".to_string(),
        })
    );
    assert!(decision.to_string().contains("version differs"));
}

#[test]
fn test_same_version_newer_source_folder_forces_update() {
    let (_tmp, source_root, target_root) = setup_roots();
    let source = create_mod(&source_root, "mod1", "mod1", "1.0");
    let target = create_mod(&target_root, "mod1_1.0", "mod1", "1.0");

    set_folder_mtime(&source, LATER);
    set_folder_mtime(&target, PAST);

    let decision = evaluate(&source, &target);

    assert_eq!(decision, SyncDecision::NeedsUpdate(UpdateReason::SourceNewer));
}

#[test]
fn test_same_version_and_older_source_is_up_to_date() {
    let (_tmp, source_root, target_root) = setup_roots();
    let source = create_mod(&source_root, "mod1", "mod1", "1.0");
    let target = create_mod(&target_root, "mod1_1.0", "mod1", "1.0");

    set_folder_mtime(&source, PAST);
    set_folder_mtime(&target, LATER);

    let decision = evaluate(&source, &target);

    assert_eq!(
        decision,
        SyncDecision::UpToDate {
            version: "1.0".to_string()
        }
    );
}

#[test]
fn test_malformed_source_metadata_is_check_failed() {
    let (_tmp, source_root, target_root) = setup_roots();
    let source = source_root.join("mod1");
    fs::create_dir_all(&source).unwrap();
    fs::write(source.join("ServerData.json"), "{not valid json").unwrap();
    let target = create_mod(&target_root, "mod1_1.0", "mod1", "1.0");

    let decision = evaluate(&source, &target);

    match &decision {
        SyncDecision::NeedsUpdate(UpdateReason::CheckFailed(_)) => {}
        other => panic!("Expected CheckFailed, got {:?}", other),
    }
    assert!(decision.to_string().starts_with("error during check:"));
}

#[test]
fn test_bom_prefixed_metadata_is_readable() {
    let (_tmp, source_root, target_root) = setup_roots();
    let source = source_root.join("mod1");
    let target = target_root.join("mod1_1.0");
    fs::create_dir_all(&source).unwrap();
    fs::create_dir_all(&target).unwrap();
    let data = "\u{feff}{\"id\": \"mod1\", \"revision\": {\"version\": \"1.0\"}}";
    fs::write(source.join("ServerData.json"), data).unwrap();
    fs::write(target.join("ServerData.json"), data).unwrap();

    set_folder_mtime(&source, PAST);
    set_folder_mtime(&target, LATER);

    // A BOM must not push the comparison into the CheckFailed branch.
    let decision = evaluate(&source, &target);

    assert_eq!(
        decision,
        SyncDecision::UpToDate {
            version: "1.0".to_string()
        }
    );
}

#[test]
fn test_metadata_falls_back_when_file_is_absent() {
    let (_tmp, source_root, _target_root) = setup_roots();
    let mod_dir = source_root.join("bare_mod");
    fs::create_dir_all(&mod_dir).unwrap();

    let meta = read_mod_metadata(&mod_dir, "bare_mod");

    assert_eq!(meta.name, "bare_mod");
    assert_eq!(meta.version, "unknown");
}

#[test]
fn test_metadata_name_precedence() {
    let (_tmp, source_root, _target_root) = setup_roots();

    let named = source_root.join("named");
    fs::create_dir_all(&named).unwrap();
    fs::write(
        named.join("ServerData.json"),
        r#"{"id": "the-id", "name": "The Name", "revision": {"version": "1.0"}}"#,
    )
    .unwrap();
    assert_eq!(read_mod_metadata(&named, "fallback").name, "The Name");

    let id_only = source_root.join("id_only");
    fs::create_dir_all(&id_only).unwrap();
    fs::write(
        id_only.join("ServerData.json"),
        r#"{"id": "the-id", "revision": {"version": "1.0"}}"#,
    )
    .unwrap();
    assert_eq!(read_mod_metadata(&id_only, "fallback").name, "the-id");

    let neither = source_root.join("neither");
    fs::create_dir_all(&neither).unwrap();
    fs::write(neither.join("ServerData.json"), r#"{"revision": {}}"#).unwrap();
    assert_eq!(read_mod_metadata(&neither, "fallback").name, "fallback");
}

#[test]
fn test_metadata_missing_version_reads_as_empty() {
    let (_tmp, source_root, _target_root) = setup_roots();
    let mod_dir = source_root.join("versionless");
    fs::create_dir_all(&mod_dir).unwrap();
    fs::write(mod_dir.join("ServerData.json"), r#"{"name": "Versionless"}"#).unwrap();

    let meta = read_mod_metadata(&mod_dir, "versionless");

    assert_eq!(meta.version, "");
}

#[test]
fn test_metadata_parse_error_falls_back() {
    let (_tmp, source_root, _target_root) = setup_roots();
    let mod_dir = source_root.join("broken");
    fs::create_dir_all(&mod_dir).unwrap();
    fs::write(mod_dir.join("ServerData.json"), "}{").unwrap();

    let meta = read_mod_metadata(&mod_dir, "broken");

    assert_eq!(meta.name, "broken");
    assert_eq!(meta.version, "unknown");
}
