//! Backend-driven implementation of the `ApprovalService` trait.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::domain::{ApprovalStatus, RecordId, TabelRef};
use crate::models::{ApprovalDetail, ApprovalRecord, NewNotification};
use crate::services::approval_service::{
    ApprovalError, ApprovalOutcome, ApprovalService, SideEffect, StepResult, asset_effect,
    validate_reason,
};
use crate::services::backend::{ApprovalApi, AssetApi, NotificationApi};

pub struct DefaultApprovalService<B> {
    backend: Arc<B>,
}

impl<B> DefaultApprovalService<B>
where
    B: ApprovalApi + AssetApi + NotificationApi,
{
    #[must_use]
    pub const fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }

    async fn lookup_detail(&self, outcome: &mut ApprovalOutcome) -> Option<ApprovalDetail> {
        match self
            .backend
            .approval_detail(outcome.tabel_ref, &outcome.record_id)
            .await
        {
            Ok(detail) => {
                outcome.record(SideEffect::SubmitterLookup, StepResult::Done);
                Some(detail)
            }
            Err(e) => {
                warn!(
                    tabel_ref = %outcome.tabel_ref,
                    record_id = %outcome.record_id,
                    error = %e,
                    "Could not load submission detail"
                );
                outcome.record(SideEffect::SubmitterLookup, StepResult::Failed(e.to_string()));
                None
            }
        }
    }

    async fn apply_asset_effect(
        &self,
        detail: Option<&ApprovalDetail>,
        outcome: &mut ApprovalOutcome,
    ) {
        let Some(update) = asset_effect(outcome.tabel_ref) else {
            return;
        };

        let Some(aset_id) = detail.and_then(ApprovalDetail::asset_id) else {
            warn!(
                tabel_ref = %outcome.tabel_ref,
                record_id = %outcome.record_id,
                "Submission carries no asset id; asset left unchanged"
            );
            outcome.record(
                SideEffect::AssetUpdate,
                StepResult::Skipped("no asset id on submission".to_string()),
            );
            return;
        };

        match self.backend.update_asset(&aset_id, &update).await {
            Ok(()) => {
                info!(aset_id = %aset_id, ?update, "Asset updated after approval");
                outcome.record(SideEffect::AssetUpdate, StepResult::Done);
            }
            Err(e) => {
                warn!(aset_id = %aset_id, error = %e, "Asset update after approval failed");
                outcome.record(SideEffect::AssetUpdate, StepResult::Failed(e.to_string()));
            }
        }
    }

    async fn notify_submitter(
        &self,
        notification: Option<NewNotification>,
        outcome: &mut ApprovalOutcome,
    ) {
        let Some(notification) = notification else {
            outcome.record(
                SideEffect::SubmitterNotification,
                StepResult::Skipped("submitter unknown".to_string()),
            );
            return;
        };

        match self.backend.create_notification(&notification).await {
            Ok(()) => {
                debug!(username = %notification.username, kind = %notification.kind, "Submitter notified");
                outcome.record(SideEffect::SubmitterNotification, StepResult::Done);
            }
            Err(e) => {
                warn!(username = %notification.username, error = %e, "Could not notify submitter");
                outcome.record(
                    SideEffect::SubmitterNotification,
                    StepResult::Failed(e.to_string()),
                );
            }
        }
    }

    /// Deletes every `approval` notification still pointing at the record.
    async fn clear_pending_notifications(&self, outcome: &mut ApprovalOutcome) {
        let notifications = match self.backend.list_notifications(false).await {
            Ok(list) => list,
            Err(e) => {
                warn!(error = %e, "Could not load notifications for cleanup");
                outcome.record(
                    SideEffect::PendingNotificationCleanup,
                    StepResult::Failed(e.to_string()),
                );
                return;
            }
        };

        let mut failures = Vec::new();
        for notification in notifications
            .iter()
            .filter(|n| n.is_pending_approval_for(outcome.tabel_ref, &outcome.record_id))
        {
            if let Err(e) = self.backend.delete_notification(&notification.id).await {
                warn!(notification_id = %notification.id, error = %e, "Could not delete pending notification");
                failures.push(format!("#{}: {e}", notification.id));
            }
        }

        let result = if failures.is_empty() {
            StepResult::Done
        } else {
            StepResult::Failed(failures.join("; "))
        };
        outcome.record(SideEffect::PendingNotificationCleanup, result);
    }
}

#[async_trait]
impl<B> ApprovalService for DefaultApprovalService<B>
where
    B: ApprovalApi + AssetApi + NotificationApi,
{
    async fn list_pending(&self) -> Result<Vec<ApprovalRecord>, ApprovalError> {
        let records = self.backend.list_pending_approvals().await?;
        Ok(records.into_iter().filter(ApprovalRecord::is_pending).collect())
    }

    async fn detail(
        &self,
        tabel_ref: TabelRef,
        record_id: &RecordId,
    ) -> Result<ApprovalDetail, ApprovalError> {
        Ok(self.backend.approval_detail(tabel_ref, record_id).await?)
    }

    async fn approve(
        &self,
        tabel_ref: TabelRef,
        record_id: &RecordId,
    ) -> Result<ApprovalOutcome, ApprovalError> {
        self.backend.approve(tabel_ref, record_id).await?;
        info!(%tabel_ref, %record_id, "Submission approved");

        let mut outcome =
            ApprovalOutcome::new(tabel_ref, record_id.clone(), ApprovalStatus::Disetujui);

        let detail = self.lookup_detail(&mut outcome).await;
        self.apply_asset_effect(detail.as_ref(), &mut outcome).await;

        let notification = detail.as_ref().and_then(|d| {
            d.submitter().map(|username| {
                NewNotification::approved(username, tabel_ref, record_id.clone(), d.asset_id())
            })
        });
        self.notify_submitter(notification, &mut outcome).await;
        self.clear_pending_notifications(&mut outcome).await;

        Ok(outcome)
    }

    async fn reject(
        &self,
        tabel_ref: TabelRef,
        record_id: &RecordId,
        reason: &str,
    ) -> Result<ApprovalOutcome, ApprovalError> {
        let reason = validate_reason(reason)?;

        self.backend.reject(tabel_ref, record_id, reason).await?;
        info!(%tabel_ref, %record_id, "Submission rejected");

        let mut outcome =
            ApprovalOutcome::new(tabel_ref, record_id.clone(), ApprovalStatus::Ditolak);

        let detail = self.lookup_detail(&mut outcome).await;
        let notification = detail.as_ref().and_then(|d| {
            d.submitter().map(|username| {
                NewNotification::rejected(
                    username,
                    tabel_ref,
                    record_id.clone(),
                    d.asset_id(),
                    reason,
                )
            })
        });
        self.notify_submitter(notification, &mut outcome).await;
        self.clear_pending_notifications(&mut outcome).await;

        Ok(outcome)
    }
}
