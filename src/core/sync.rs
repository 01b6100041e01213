use crate::core::decision;
use crate::core::locate::DirIndex;
use crate::core::manifest::{self, ManifestMap};
use crate::core::metadata;
use crate::core::naming;
use crate::models::config::SyncConfig;
use crate::models::decision::{SyncDecision, UpdateReason};
use crate::models::error::SyncError;
use crate::models::metadata::ModMetadata;
use crate::models::report::{SyncAction, SyncOutcome, SyncReport};
use crate::utils::file::FileUtils;
use camino::{Utf8Path, Utf8PathBuf};
use tracing::{debug, error, info, warn};

/// Folder under the target root that receives bundle-sync output. Reset on
/// every bundle run.
pub const UPDATE_BUNDLE_DIR: &str = "mods_update";

/// How a legacy-named deployment reached its standardized name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LegacyRename {
    Renamed,
    /// The rename failed; the copy step merges into the standardized path
    /// instead and the legacy folder stays behind.
    FellBackToCopy,
}

/// One configured mod resolved against the source root.
struct LocatedMod {
    source_path: Utf8PathBuf,
    meta: ModMetadata,
    standardized_name: String,
}

/// Entry point for in-place synchronization.
///
/// Every configured mod is refreshed directly inside `target_root`: stale
/// deployments are merged over, legacy-named folders are renamed onto the
/// standardized scheme first, and files only present in the target survive.
/// The manifest is written into `target_root` at the end of the run, even
/// when nothing changed.
pub fn sync_in_place(
    config: &SyncConfig,
    source_root: &Utf8Path,
    target_root: &Utf8Path,
) -> Result<SyncReport, SyncError> {
    std::fs::create_dir_all(target_root)?;

    let source_index = DirIndex::scan(source_root);
    let mut report = SyncReport::new(config.mod_count());
    let mut manifest = ManifestMap::new();

    info!(
        "syncing {} mods from {} into {}",
        report.total_mods, source_root, target_root
    );

    for mod_id in config.mod_ids() {
        if mod_id.is_empty() {
            continue;
        }

        let Some(found) = locate_source_mod(&source_index, mod_id) else {
            warn!("mod {} not found under {}", mod_id, source_root);
            report.record(source_missing_outcome(mod_id, source_root));
            continue;
        };

        // Earlier iterations may have renamed or created folders here, so
        // the target is indexed fresh for every mod.
        let target_index = DirIndex::scan(target_root);
        let standardized_path = target_root.join(&found.standardized_name);
        let legacy_path = target_index
            .resolve(mod_id)
            .filter(|path| path != &standardized_path);

        if let Some(legacy) = &legacy_path {
            if !standardized_path.exists() {
                if promote_legacy_folder(legacy, &standardized_path) == LegacyRename::Renamed {
                    info!("renamed legacy folder {} -> {}", legacy, standardized_path);
                }
            }
        }

        let effective_target = if standardized_path.exists() {
            standardized_path.clone()
        } else {
            legacy_path.unwrap_or_else(|| standardized_path.clone())
        };
        let existed_before = effective_target.exists();

        let verdict = decision::evaluate(&found.source_path, &effective_target);
        debug!("{}: {}", mod_id, verdict);

        let outcome = if verdict.is_up_to_date() {
            SyncOutcome {
                mod_id: mod_id.to_string(),
                action: SyncAction::Skipped,
                reason: verdict.to_string(),
                decision: Some(verdict),
                standardized_name: Some(found.standardized_name.clone()),
            }
        } else {
            match FileUtils::copy_recursive(&found.source_path, &standardized_path) {
                Ok(()) => {
                    let action = if existed_before {
                        SyncAction::Updated
                    } else {
                        SyncAction::Added
                    };
                    info!("{} {} at {}", action, mod_id, standardized_path);
                    debug!(
                        "{} now holds {} bytes",
                        standardized_path,
                        FileUtils::folder_size(&standardized_path)
                    );
                    SyncOutcome {
                        mod_id: mod_id.to_string(),
                        action,
                        reason: verdict.to_string(),
                        decision: Some(verdict),
                        standardized_name: Some(found.standardized_name.clone()),
                    }
                }
                Err(err) => {
                    error!("copy failed for {}: {}", mod_id, err);
                    SyncOutcome {
                        mod_id: mod_id.to_string(),
                        action: SyncAction::Failed,
                        reason: err.to_string(),
                        decision: Some(verdict),
                        standardized_name: Some(found.standardized_name.clone()),
                    }
                }
            }
        };
        report.record(outcome);

        // Manifest entries depend only on the source lookup, never on
        // whether the copy succeeded.
        manifest.insert(mod_id.to_string(), found.meta);
    }

    report.manifest_path = write_manifest_soft(&manifest, target_root);
    Ok(report)
}

/// Entry point for bundle synchronization.
///
/// Nothing under `target_root` is modified except the bundle folder, which
/// is reset and then filled with only the mods that are new or carry a
/// different version string. Timestamp drift and unreadable metadata never
/// qualify a mod for the bundle.
pub fn sync_update_bundle(
    config: &SyncConfig,
    source_root: &Utf8Path,
    target_root: &Utf8Path,
) -> Result<SyncReport, SyncError> {
    let bundle_dir = target_root.join(UPDATE_BUNDLE_DIR);
    reset_bundle_dir(&bundle_dir)?;

    let source_index = DirIndex::scan(source_root);
    let mut report = SyncReport::new(config.mod_count());
    let mut manifest = ManifestMap::new();

    info!(
        "collecting updates for {} mods into {}",
        report.total_mods, bundle_dir
    );

    for mod_id in config.mod_ids() {
        if mod_id.is_empty() {
            continue;
        }

        let Some(found) = locate_source_mod(&source_index, mod_id) else {
            warn!("mod {} not found under {}", mod_id, source_root);
            report.record(source_missing_outcome(mod_id, source_root));
            continue;
        };

        // The bundle lives inside the target root but must never be
        // matched as an existing deployment.
        let target_index = DirIndex::scan_excluding(target_root, UPDATE_BUNDLE_DIR);
        let deployed = target_index
            .resolve(mod_id)
            .unwrap_or_else(|| target_root.join(&found.standardized_name));

        let verdict = decision::evaluate(&found.source_path, &deployed);
        debug!("{}: {}", mod_id, verdict);

        let outcome = match &verdict {
            SyncDecision::NeedsAdd => copy_into_bundle(
                mod_id,
                &found,
                &bundle_dir,
                SyncAction::Added,
                "new mod, needs adding".to_string(),
                verdict.clone(),
            ),
            SyncDecision::NeedsUpdate(UpdateReason::VersionMismatch { .. }) => copy_into_bundle(
                mod_id,
                &found,
                &bundle_dir,
                SyncAction::Updated,
                verdict.to_string(),
                verdict.clone(),
            ),
            _ => SyncOutcome {
                mod_id: mod_id.to_string(),
                action: SyncAction::Skipped,
                reason: "same version, no update needed".to_string(),
                decision: Some(verdict),
                standardized_name: Some(found.standardized_name.clone()),
            },
        };
        report.record(outcome);

        manifest.insert(mod_id.to_string(), found.meta);
    }

    report.manifest_path = write_manifest_soft(&manifest, &bundle_dir);
    report.bundle_dir = Some(bundle_dir);
    Ok(report)
}

/// Resolves and records metadata for every configured mod without copying
/// anything. The manifest lands in the source root itself.
pub fn export_manifest(
    config: &SyncConfig,
    source_root: &Utf8Path,
) -> Result<Utf8PathBuf, SyncError> {
    let source_index = DirIndex::scan(source_root);
    let mut manifest = ManifestMap::new();

    for mod_id in config.mod_ids() {
        if mod_id.is_empty() {
            continue;
        }
        let Some(found) = locate_source_mod(&source_index, mod_id) else {
            warn!("mod {} not found under {}", mod_id, source_root);
            continue;
        };
        manifest.insert(mod_id.to_string(), found.meta);
    }

    manifest::write_manifest(&manifest, source_root)
}

/// Moves a legacy-named deployment onto its standardized name so repeated
/// runs converge on one folder per mod. Best effort: on failure the later
/// copy merges into the standardized path and the legacy folder stays
/// behind as an orphan.
pub fn promote_legacy_folder(legacy: &Utf8Path, standardized: &Utf8Path) -> LegacyRename {
    match std::fs::rename(legacy, standardized) {
        Ok(()) => LegacyRename::Renamed,
        Err(err) => {
            warn!("could not rename {} to {}: {}", legacy, standardized, err);
            LegacyRename::FellBackToCopy
        }
    }
}

fn locate_source_mod(source_index: &DirIndex, mod_id: &str) -> Option<LocatedMod> {
    let source_path = source_index.resolve(mod_id)?;
    let meta = metadata::read_mod_metadata(&source_path, mod_id);
    let folder_name = source_path.file_name().unwrap_or(mod_id);
    let standardized_name = naming::standardized_folder_name(folder_name, &meta.version);
    Some(LocatedMod {
        source_path,
        meta,
        standardized_name,
    })
}

fn copy_into_bundle(
    mod_id: &str,
    found: &LocatedMod,
    bundle_dir: &Utf8Path,
    action: SyncAction,
    reason: String,
    verdict: SyncDecision,
) -> SyncOutcome {
    let bundle_path = bundle_dir.join(&found.standardized_name);
    match FileUtils::copy_recursive(&found.source_path, &bundle_path) {
        Ok(()) => {
            info!("{} {} staged at {}", action, mod_id, bundle_path);
            SyncOutcome {
                mod_id: mod_id.to_string(),
                action,
                reason,
                decision: Some(verdict),
                standardized_name: Some(found.standardized_name.clone()),
            }
        }
        Err(err) => {
            error!("copy failed for {}: {}", mod_id, err);
            SyncOutcome {
                mod_id: mod_id.to_string(),
                action: SyncAction::Failed,
                reason: err.to_string(),
                decision: Some(verdict),
                standardized_name: Some(found.standardized_name.clone()),
            }
        }
    }
}

fn source_missing_outcome(mod_id: &str, source_root: &Utf8Path) -> SyncOutcome {
    SyncOutcome {
        mod_id: mod_id.to_string(),
        action: SyncAction::SourceMissing,
        reason: format!("not found under {}", source_root),
        decision: None,
        standardized_name: None,
    }
}

/// A failed manifest write never invalidates completed copies; the report
/// just carries no manifest path.
fn write_manifest_soft(manifest: &ManifestMap, dir: &Utf8Path) -> Option<Utf8PathBuf> {
    match manifest::write_manifest(manifest, dir) {
        Ok(path) => Some(path),
        Err(err) => {
            warn!("{}", err);
            None
        }
    }
}

fn reset_bundle_dir(bundle_dir: &Utf8Path) -> Result<(), SyncError> {
    if bundle_dir.exists() {
        std::fs::remove_dir_all(bundle_dir)?;
    }
    std::fs::create_dir_all(bundle_dir)?;
    Ok(())
}
