use crate::core::metadata::SERVER_DATA_FILE;
use crate::models::decision::{SyncDecision, UpdateReason};
use crate::models::error::SyncError;
use crate::models::metadata::ServerData;
use crate::utils::json::Json;
use camino::Utf8Path;
use std::time::SystemTime;

/// Decides whether the deployed copy of a mod needs refreshing.
///
/// Rules are checked in order, first match wins:
/// 1. target folder missing,
/// 2. source `ServerData.json` missing,
/// 3. target `ServerData.json` missing,
/// 4. version strings differ,
/// 5. source folder mtime strictly newer than the target's.
///
/// Total: any I/O or JSON error during the check collapses into
/// `NeedsUpdate(CheckFailed)`, so a broken deployment is repaired rather
/// than silently kept.
pub fn evaluate(source: &Utf8Path, target: &Utf8Path) -> SyncDecision {
    match try_evaluate(source, target) {
        Ok(decision) => decision,
        Err(err) => SyncDecision::NeedsUpdate(UpdateReason::CheckFailed(err.to_string())),
    }
}

fn try_evaluate(source: &Utf8Path, target: &Utf8Path) -> Result<SyncDecision, SyncError> {
    if !target.exists() {
        return Ok(SyncDecision::NeedsAdd);
    }

    if !source.join(SERVER_DATA_FILE).is_file() {
        return Ok(SyncDecision::NeedsUpdate(UpdateReason::SourceMetadataMissing));
    }
    if !target.join(SERVER_DATA_FILE).is_file() {
        return Ok(SyncDecision::NeedsUpdate(UpdateReason::TargetMetadataMissing));
    }

    let source_version = read_version(source)?;
    let target_version = read_version(target)?;
    if source_version != target_version {
        return Ok(SyncDecision::NeedsUpdate(UpdateReason::VersionMismatch {
            source: source_version,
            target: target_version,
        }));
    }

    // Same version: fall back to the folders' own timestamps.
    if folder_mtime(source)? > folder_mtime(target)? {
        return Ok(SyncDecision::NeedsUpdate(UpdateReason::SourceNewer));
    }

    Ok(SyncDecision::UpToDate {
        version: source_version,
    })
}

/// Version under `revision.version`; an absent field reads as "". Unlike
/// the manifest path, parse errors here are real errors: a deployment whose
/// metadata cannot be compared must be re-synced.
fn read_version(mod_root: &Utf8Path) -> Result<String, SyncError> {
    let data: ServerData = Json::read(&mod_root.join(SERVER_DATA_FILE))?;
    Ok(data.revision.and_then(|r| r.version).unwrap_or_default())
}

fn folder_mtime(path: &Utf8Path) -> Result<SystemTime, SyncError> {
    Ok(std::fs::metadata(path)?.modified()?)
}
