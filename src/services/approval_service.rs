//! Domain service for reviewing submissions.
//!
//! Approving or rejecting is the primary action; asset updates and
//! notifications that follow it are best-effort side effects reported on the
//! returned [`ApprovalOutcome`].

use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

use crate::clients::BackendError;
use crate::domain::{ApprovalStatus, RecordId, TabelRef};
use crate::models::{ApprovalDetail, ApprovalRecord, AssetUpdate};

#[derive(Debug, Error)]
pub enum ApprovalError {
    #[error("A rejection reason is required")]
    EmptyReason,

    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Secondary steps run after the backend accepts a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideEffect {
    SubmitterLookup,
    AssetUpdate,
    SubmitterNotification,
    PendingNotificationCleanup,
}

impl fmt::Display for SideEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::SubmitterLookup => "submitter lookup",
            Self::AssetUpdate => "asset update",
            Self::SubmitterNotification => "submitter notification",
            Self::PendingNotificationCleanup => "pending notification cleanup",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepResult {
    Done,
    Skipped(String),
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct ApprovalOutcome {
    pub tabel_ref: TabelRef,
    pub record_id: RecordId,
    pub status: ApprovalStatus,
    pub steps: Vec<(SideEffect, StepResult)>,
}

impl ApprovalOutcome {
    #[must_use]
    pub const fn new(tabel_ref: TabelRef, record_id: RecordId, status: ApprovalStatus) -> Self {
        Self {
            tabel_ref,
            record_id,
            status,
            steps: Vec::new(),
        }
    }

    pub fn record(&mut self, step: SideEffect, result: StepResult) {
        self.steps.push((step, result));
    }

    #[must_use]
    pub fn result_of(&self, step: SideEffect) -> Option<&StepResult> {
        self.steps.iter().find(|(s, _)| *s == step).map(|(_, r)| r)
    }

    /// Human-readable lines for every step that did not complete.
    #[must_use]
    pub fn warnings(&self) -> Vec<String> {
        self.steps
            .iter()
            .filter_map(|(step, result)| match result {
                StepResult::Done => None,
                StepResult::Skipped(why) => Some(format!("{step} skipped: {why}")),
                StepResult::Failed(why) => Some(format!("{step} failed: {why}")),
            })
            .collect()
    }
}

#[async_trait::async_trait]
pub trait ApprovalService: Send + Sync {
    /// Records still waiting for review.
    async fn list_pending(&self) -> Result<Vec<ApprovalRecord>, ApprovalError>;

    async fn list_pending_grouped(
        &self,
    ) -> Result<BTreeMap<TabelRef, Vec<ApprovalRecord>>, ApprovalError> {
        Ok(group_by_table(self.list_pending().await?))
    }

    async fn detail(
        &self,
        tabel_ref: TabelRef,
        record_id: &RecordId,
    ) -> Result<ApprovalDetail, ApprovalError>;

    /// Approves a record.
    ///
    /// # Errors
    ///
    /// Only a failure of the approve call itself is returned; side-effect
    /// failures end up in [`ApprovalOutcome::warnings`].
    async fn approve(
        &self,
        tabel_ref: TabelRef,
        record_id: &RecordId,
    ) -> Result<ApprovalOutcome, ApprovalError>;

    /// Rejects a record.
    ///
    /// # Errors
    ///
    /// Returns [`ApprovalError::EmptyReason`] before touching the backend if
    /// `reason` is blank.
    async fn reject(
        &self,
        tabel_ref: TabelRef,
        record_id: &RecordId,
        reason: &str,
    ) -> Result<ApprovalOutcome, ApprovalError>;
}

#[must_use]
pub fn group_by_table(records: Vec<ApprovalRecord>) -> BTreeMap<TabelRef, Vec<ApprovalRecord>> {
    let mut groups: BTreeMap<TabelRef, Vec<ApprovalRecord>> = BTreeMap::new();
    for record in records {
        groups.entry(record.tabel_ref).or_default().push(record);
    }
    groups
}

pub fn validate_reason(reason: &str) -> Result<&str, ApprovalError> {
    let trimmed = reason.trim();
    if trimmed.is_empty() {
        return Err(ApprovalError::EmptyReason);
    }
    Ok(trimmed)
}

/// Asset change that follows approval of a record from `tabel_ref`.
#[must_use]
pub fn asset_effect(tabel_ref: TabelRef) -> Option<AssetUpdate> {
    match tabel_ref {
        TabelRef::Perbaikan => Some(AssetUpdate::repaired()),
        TabelRef::Dijual => Some(AssetUpdate::sold()),
        _ => None,
    }
}
