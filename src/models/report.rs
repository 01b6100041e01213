use crate::models::decision::SyncDecision;
use camino::Utf8PathBuf;
use derive_more::Display;
use indexmap::IndexMap;
use serde::Serialize;

/// What the engine did for one configured mod.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq, Display)]
#[serde(rename_all = "snake_case")]
pub enum SyncAction {
    #[display("added")]
    Added,
    #[display("updated")]
    Updated,
    #[display("skipped")]
    Skipped,
    #[display("failed")]
    Failed,
    /// The identifier matched no folder under the source root.
    #[display("not found in source")]
    SourceMissing,
}

/// Per-mod record of a sync run.
///
/// `decision` is the raw classification where one was computed (`None` when
/// the mod never got that far, i.e. source missing); `reason` is the final
/// human-readable explanation, which bundle sync may replace with a narrower
/// one than the decision's own text.
#[derive(Serialize, Clone, Debug)]
pub struct SyncOutcome {
    pub mod_id: String,
    pub action: SyncAction,
    pub decision: Option<SyncDecision>,
    pub reason: String,
    pub standardized_name: Option<String>,
}

/// Aggregate result of one sync run.
#[derive(Serialize, Clone, Debug, Default)]
pub struct SyncReport {
    pub total_mods: usize,
    pub new_mods: usize,
    pub updated_mods: usize,
    pub skipped_mods: usize,
    pub outcomes: IndexMap<String, SyncOutcome>,
    pub manifest_path: Option<Utf8PathBuf>,
    /// Set only by bundle sync.
    pub bundle_dir: Option<Utf8PathBuf>,
}

impl SyncReport {
    pub fn new(total_mods: usize) -> Self {
        Self {
            total_mods,
            ..Self::default()
        }
    }

    /// Records one outcome and bumps the matching counter. Failed and
    /// source-missing mods are listed but counted by none of the three.
    pub fn record(&mut self, outcome: SyncOutcome) {
        match outcome.action {
            SyncAction::Added => self.new_mods += 1,
            SyncAction::Updated => self.updated_mods += 1,
            SyncAction::Skipped => self.skipped_mods += 1,
            SyncAction::Failed | SyncAction::SourceMissing => {}
        }
        self.outcomes.insert(outcome.mod_id.clone(), outcome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(mod_id: &str, action: SyncAction) -> SyncOutcome {
        SyncOutcome {
            mod_id: mod_id.to_string(),
            action,
            decision: None,
            reason: String::new(),
            standardized_name: None,
        }
    }

    #[test]
    fn counters_track_only_the_three_sync_actions() {
        let mut report = SyncReport::new(5);
        report.record(outcome("a", SyncAction::Added));
        report.record(outcome("b", SyncAction::Updated));
        report.record(outcome("c", SyncAction::Skipped));
        report.record(outcome("d", SyncAction::Failed));
        report.record(outcome("e", SyncAction::SourceMissing));

        assert_eq!(report.new_mods, 1);
        assert_eq!(report.updated_mods, 1);
        assert_eq!(report.skipped_mods, 1);
        assert_eq!(report.outcomes.len(), 5);
        assert!(report.new_mods + report.updated_mods + report.skipped_mods <= report.total_mods);
    }

    #[test]
    fn outcomes_keep_processing_order() {
        let mut report = SyncReport::new(3);
        report.record(outcome("zeta", SyncAction::Added));
        report.record(outcome("alpha", SyncAction::Skipped));

        let keys: Vec<_> = report.outcomes.keys().cloned().collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
    }
}
