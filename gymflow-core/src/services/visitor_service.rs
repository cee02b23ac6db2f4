//! Visitor collection service.

use std::sync::Arc;

use chrono::Utc;

use gymflow_gateway::{UpdateVisitorRequest, Visitor, VisitorStatus};

use crate::error::{CoreError, CoreResult};
use crate::selectors::{aggregate_visitors, filter_visitors, status_totals};
use crate::services::ServiceContext;
use crate::types::{StatusTotals, VisitorFilter, VisitorStats};
use crate::validation::VisitorDraft;

/// Operations on the visitor collection: loading, creation, status changes,
/// and the derived list/chart views.
pub struct VisitorService {
    ctx: Arc<ServiceContext>,
}

impl VisitorService {
    /// Creates a visitor service instance.
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// Replaces the local collection with the server's current visitor set.
    ///
    /// Idempotent and safe to call repeatedly; on failure the collection is
    /// left exactly as it was.
    pub async fn load(&self) -> CoreResult<Vec<Visitor>> {
        let visitors = self.ctx.guard(self.ctx.gateway.list_visitors()).await?;
        log::debug!("Loaded {} visitors", visitors.len());
        self.ctx.store.replace_all(visitors.clone()).await;
        Ok(visitors)
    }

    /// Validates a draft, stamps the visit date, and registers the visitor.
    ///
    /// The confirmed record from the backend is inserted into the store; a
    /// failing draft never reaches the network.
    pub async fn create_visitor(&self, draft: VisitorDraft) -> CoreResult<Visitor> {
        draft.validate()?;
        let request = draft.into_request(Utc::now());
        let created = self
            .ctx
            .guard(self.ctx.gateway.create_visitor(&request))
            .await?;
        log::info!("Visitor {} created", created.cin);
        self.ctx.store.upsert(created.clone()).await;
        Ok(created)
    }

    /// Changes one visitor's lifecycle status.
    ///
    /// `Converted` is terminal: changing the status of a converted visitor is
    /// rejected before any network call. The local record is patched only
    /// after the backend confirms the change, so a failed call leaves the
    /// collection untouched.
    pub async fn change_status(&self, cin: &str, new_status: VisitorStatus) -> CoreResult<()> {
        let current = self
            .ctx
            .store
            .get(cin)
            .await
            .ok_or_else(|| CoreError::VisitorNotFound(cin.to_string()))?;
        if current.status.is_terminal() {
            return Err(CoreError::AlreadyConverted(cin.to_string()));
        }

        self.ctx
            .guard(self.ctx.gateway.update_status(cin, new_status))
            .await?;

        self.ctx.store.patch_status(cin, new_status).await;
        log::info!("Visitor {cin} status changed to {new_status}");
        Ok(())
    }

    /// Fetches one visitor from the backend.
    pub async fn get_visitor(&self, cin: &str) -> CoreResult<Visitor> {
        self.ctx.guard(self.ctx.gateway.get_visitor(cin)).await
    }

    /// Replaces a visitor's fields and reflects the confirmed record locally.
    pub async fn update_visitor(
        &self,
        cin: &str,
        request: UpdateVisitorRequest,
    ) -> CoreResult<Visitor> {
        let updated = self
            .ctx
            .guard(self.ctx.gateway.update_visitor(cin, &request))
            .await?;
        self.ctx.store.upsert(updated.clone()).await;
        Ok(updated)
    }

    /// Deletes a visitor on the backend and drops it locally.
    ///
    /// No workflow invokes this; it exists because the backend endpoint does.
    pub async fn delete_visitor(&self, cin: &str) -> CoreResult<()> {
        self.ctx
            .guard(self.ctx.gateway.delete_visitor(cin))
            .await?;
        self.ctx.store.remove(cin).await;
        Ok(())
    }

    /// Filtered view of the loaded collection.
    pub async fn derive(&self, filter: &VisitorFilter) -> Vec<Visitor> {
        filter_visitors(&self.ctx.store.snapshot().await, filter)
    }

    /// Chart groupings of the loaded collection.
    pub async fn aggregate(&self) -> VisitorStats {
        aggregate_visitors(&self.ctx.store.snapshot().await)
    }

    /// Headline status counts of the loaded collection.
    pub async fn totals(&self) -> StatusTotals {
        status_totals(&self.ctx.store.snapshot().await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GatewayError;
    use crate::test_utils::{sample_visitor, test_service};
    use crate::types::StatusFilter;

    #[tokio::test]
    async fn load_replaces_collection() {
        let (service, gateway) = test_service();
        gateway
            .seed_visitors(vec![sample_visitor("AB12", VisitorStatus::New)])
            .await;

        let loaded = service.load().await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(service.derive(&VisitorFilter::default()).await.len(), 1);
    }

    #[tokio::test]
    async fn load_failure_leaves_collection_untouched() {
        let (service, gateway) = test_service();
        gateway
            .seed_visitors(vec![sample_visitor("AB12", VisitorStatus::New)])
            .await;
        service.load().await.unwrap();

        gateway
            .fail_list(GatewayError::Network {
                detail: "down".to_string(),
            })
            .await;
        let result = service.load().await;
        assert!(matches!(result, Err(CoreError::Gateway(_))));
        assert_eq!(service.derive(&VisitorFilter::default()).await.len(), 1);
    }

    #[tokio::test]
    async fn create_validates_before_network() {
        let (service, gateway) = test_service();
        let result = service.create_visitor(VisitorDraft::default()).await;
        assert!(matches!(result, Err(CoreError::Validation(_))));
        assert_eq!(gateway.create_calls(), 0);
    }

    #[tokio::test]
    async fn create_inserts_confirmed_record() {
        let (service, gateway) = test_service();
        let draft = VisitorDraft {
            cin: "AB12".to_string(),
            name: "Ali".to_string(),
            surname: "Sara".to_string(),
            phone: "0611223344".to_string(),
            source: "Instagram".to_string(),
            interest: "Musculation".to_string(),
            note: None,
        };

        let created = service.create_visitor(draft).await.unwrap();
        assert_eq!(created.status, VisitorStatus::New);
        assert!(created.visit_date.is_some());
        assert_eq!(gateway.create_calls(), 1);
        assert_eq!(service.derive(&VisitorFilter::default()).await.len(), 1);
    }

    #[tokio::test]
    async fn change_status_patches_after_confirmation() {
        let (service, gateway) = test_service();
        gateway
            .seed_visitors(vec![sample_visitor("AB12", VisitorStatus::New)])
            .await;
        service.load().await.unwrap();

        service
            .change_status("AB12", VisitorStatus::Converted)
            .await
            .unwrap();

        // The scenario from the list view: AB12 left the "Nouveau" bucket.
        let new_filter = VisitorFilter {
            status: StatusFilter::from_raw("Nouveau"),
            ..VisitorFilter::default()
        };
        assert!(service.derive(&new_filter).await.is_empty());

        let converted_filter = VisitorFilter {
            status: StatusFilter::from_raw("Converti"),
            ..VisitorFilter::default()
        };
        assert_eq!(service.derive(&converted_filter).await.len(), 1);
    }

    #[tokio::test]
    async fn change_status_failure_leaves_status_unchanged() {
        let (service, gateway) = test_service();
        gateway
            .seed_visitors(vec![sample_visitor("AB12", VisitorStatus::New)])
            .await;
        service.load().await.unwrap();

        gateway
            .fail_status(GatewayError::Network {
                detail: "down".to_string(),
            })
            .await;
        let result = service.change_status("AB12", VisitorStatus::Lost).await;
        assert!(result.is_err());

        let snapshot = service.derive(&VisitorFilter::default()).await;
        assert_eq!(snapshot[0].status, VisitorStatus::New);
    }

    #[tokio::test]
    async fn change_status_rejects_terminal_without_network_call() {
        let (service, gateway) = test_service();
        gateway
            .seed_visitors(vec![sample_visitor("AB12", VisitorStatus::Converted)])
            .await;
        service.load().await.unwrap();

        let result = service.change_status("AB12", VisitorStatus::New).await;
        assert!(matches!(result, Err(CoreError::AlreadyConverted(_))));
        assert_eq!(gateway.status_calls(), 0);
    }

    #[tokio::test]
    async fn change_status_unknown_visitor() {
        let (service, _gateway) = test_service();
        let result = service.change_status("ZZ99", VisitorStatus::Lost).await;
        assert!(matches!(result, Err(CoreError::VisitorNotFound(_))));
    }

    #[tokio::test]
    async fn shutdown_cancels_pending_work() {
        let (service, gateway) = test_service();
        gateway
            .seed_visitors(vec![sample_visitor("AB12", VisitorStatus::New)])
            .await;
        service.load().await.unwrap();

        service.ctx.shutdown();
        let result = service.load().await;
        assert!(matches!(result, Err(CoreError::Cancelled)));
        // The store still holds the last confirmed state.
        assert_eq!(service.derive(&VisitorFilter::default()).await.len(), 1);
    }

    #[tokio::test]
    async fn delete_removes_locally_after_confirmation() {
        let (service, gateway) = test_service();
        gateway
            .seed_visitors(vec![sample_visitor("AB12", VisitorStatus::New)])
            .await;
        service.load().await.unwrap();

        service.delete_visitor("AB12").await.unwrap();
        assert!(service.derive(&VisitorFilter::default()).await.is_empty());
    }
}
