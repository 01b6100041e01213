use derive_more::Display;
use serde::Serialize;

/// Outcome of comparing one source mod against its deployed copy.
///
/// Computed fresh per mod per run and never persisted. The rendered text is
/// the human-readable reason shown in reports and logs.
#[derive(Serialize, Clone, Debug, PartialEq, Eq, Display)]
pub enum SyncDecision {
    /// No deployment of this mod exists yet.
    #[display("target mod missing")]
    NeedsAdd,
    #[display("{_0}")]
    NeedsUpdate(UpdateReason),
    #[display("already latest version")]
    UpToDate { version: String },
}

/// Why a deployed mod must be copied again.
#[derive(Serialize, Clone, Debug, PartialEq, Eq, Display)]
pub enum UpdateReason {
    /// The source's version cannot be trusted, so sync conservatively.
    #[display("source ServerData.json missing")]
    SourceMetadataMissing,
    #[display("target ServerData.json missing")]
    TargetMetadataMissing,
    #[display("version differs (source: {source}, target: {target})")]
    VersionMismatch { source: String, target: String },
    #[display("source folder newer")]
    SourceNewer,
    /// The check itself failed; fail toward re-syncing.
    #[display("error during check: {_0}")]
    CheckFailed(String),
}

impl SyncDecision {
    pub fn is_up_to_date(&self) -> bool {
        matches!(self, SyncDecision::UpToDate { .. })
    }
}
