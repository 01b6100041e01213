use crate::models::error::SyncError;
use camino::Utf8Path;
use walkdir::WalkDir;

pub struct FileUtils;

impl FileUtils {
    /// Recursively copies a directory tree into `dst`, merging with whatever
    /// is already there: directories are created as needed, files at the
    /// same relative path are overwritten, and files that exist only in
    /// `dst` are left untouched. An entry that cannot be enumerated fails
    /// the whole copy rather than producing a silently partial one.
    pub fn copy_recursive(src: &Utf8Path, dst: &Utf8Path) -> Result<(), SyncError> {
        std::fs::create_dir_all(dst)?;

        for entry in WalkDir::new(src) {
            let entry = entry?;
            let entry_path = Utf8Path::from_path(entry.path()).ok_or_else(|| {
                SyncError::ParseError(format!("Invalid UTF-8 path: {:?}", entry.path()))
            })?;
            let rel = entry_path.strip_prefix(src)?;
            let target = dst.join(rel);

            if entry.file_type().is_dir() {
                std::fs::create_dir_all(&target)?;
            } else {
                if let Some(parent) = target.parent() {
                    if !parent.exists() {
                        std::fs::create_dir_all(parent)?;
                    }
                }
                std::fs::copy(entry_path, &target)?;
            }
        }

        Ok(())
    }

    /// Total size in bytes of the regular files under `root`. Symlinks are
    /// neither followed nor counted.
    pub fn folder_size(root: &Utf8Path) -> u64 {
        WalkDir::new(root)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter_map(|e| e.metadata().ok())
            .map(|m| m.len())
            .sum()
    }
}
