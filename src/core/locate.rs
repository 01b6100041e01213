use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;

/// Snapshot of the immediate subdirectories of one root folder.
///
/// Built once per root and queried per mod. An unreadable or missing root
/// yields an empty index: a failed lookup is the caller's situation to
/// handle, not an error here.
#[derive(Clone, Debug)]
pub struct DirIndex {
    root: Utf8PathBuf,
    names: Vec<String>,
}

impl DirIndex {
    pub fn scan(root: &Utf8Path) -> Self {
        Self::build(root, None)
    }

    /// Like [`DirIndex::scan`], but skips one well-known entry name. The
    /// update bundle lives inside the target root and must never be matched
    /// as a mod deployment.
    pub fn scan_excluding(root: &Utf8Path, excluded: &str) -> Self {
        Self::build(root, Some(excluded))
    }

    fn build(root: &Utf8Path, excluded: Option<&str>) -> Self {
        let mut names = Vec::new();
        match std::fs::read_dir(root) {
            Ok(entries) => {
                for entry in entries.flatten() {
                    let Ok(path) = Utf8PathBuf::from_path_buf(entry.path()) else {
                        continue;
                    };
                    if !path.is_dir() {
                        continue;
                    }
                    let Some(name) = path.file_name() else {
                        continue;
                    };
                    if excluded == Some(name) {
                        continue;
                    }
                    names.push(name.to_string());
                }
            }
            Err(err) => debug!("cannot index {}: {}", root, err),
        }
        // Directory enumeration order is platform-dependent; sort so
        // resolution never depends on it.
        names.sort();
        Self {
            root: root.to_path_buf(),
            names,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Resolves a mod identifier to the folder most plausibly holding it.
    ///
    /// Match tiers, strongest first: exact name, name starting with the
    /// identifier, name containing it anywhere. Within a tier the candidate
    /// sharing the longest common prefix with the identifier wins, and any
    /// remaining tie goes to the lexicographically smallest name. Empty
    /// identifiers never match.
    pub fn resolve(&self, mod_id: &str) -> Option<Utf8PathBuf> {
        if mod_id.is_empty() {
            return None;
        }
        if self.names.iter().any(|n| n == mod_id) {
            return Some(self.root.join(mod_id));
        }
        self.best_match(mod_id, |name| name.starts_with(mod_id))
            .or_else(|| self.best_match(mod_id, |name| name.contains(mod_id)))
            .map(|name| self.root.join(name))
    }

    fn best_match(&self, mod_id: &str, tier: impl Fn(&str) -> bool) -> Option<&str> {
        self.names
            .iter()
            .map(String::as_str)
            .filter(|name| tier(name))
            .max_by(|a, b| {
                common_prefix_len(a, mod_id)
                    .cmp(&common_prefix_len(b, mod_id))
                    .then_with(|| b.cmp(a))
            })
    }
}

fn common_prefix_len(a: &str, b: &str) -> usize {
    a.bytes().zip(b.bytes()).take_while(|(x, y)| x == y).count()
}
