//! Business logic service layer

mod conversion_service;
mod visitor_service;

pub use conversion_service::{ConversionOutcome, ConversionState, ConversionWorkflow};
pub use visitor_service::VisitorService;

use std::future::Future;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use gymflow_gateway::{GatewayError, VisitorGateway};

use crate::error::{CoreError, CoreResult};
use crate::store::VisitorStore;

/// Service context - holds the shared dependencies.
///
/// The embedding platform creates this once, injecting its gateway
/// implementation, and tears it down with [`ServiceContext::shutdown`] when
/// the owning view goes away.
pub struct ServiceContext {
    /// Remote persistence gateway.
    pub gateway: Arc<dyn VisitorGateway>,
    /// Owned visitor collection.
    pub store: Arc<VisitorStore>,
    cancel: CancellationToken,
}

impl ServiceContext {
    /// Creates a context with an empty store.
    #[must_use]
    pub fn new(gateway: Arc<dyn VisitorGateway>) -> Self {
        Self {
            gateway,
            store: Arc::new(VisitorStore::new()),
            cancel: CancellationToken::new(),
        }
    }

    /// Cancels every in-flight gateway call issued through this context.
    ///
    /// Called on teardown so a pending completion can never mutate the store
    /// after the owning view is gone.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    /// Whether [`shutdown`](Self::shutdown) has been called.
    #[must_use]
    pub fn is_shut_down(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Runs a gateway call, racing it against the context's cancellation
    /// token and funneling failures into [`CoreError`] with level-appropriate
    /// logging.
    pub(crate) async fn guard<T>(
        &self,
        fut: impl Future<Output = Result<T, GatewayError>>,
    ) -> CoreResult<T> {
        if self.cancel.is_cancelled() {
            return Err(CoreError::Cancelled);
        }
        tokio::select! {
            () = self.cancel.cancelled() => Err(CoreError::Cancelled),
            result = fut => result.map_err(|e| {
                if e.is_expected() {
                    log::warn!("Gateway call failed: {e}");
                } else {
                    log::error!("Gateway call failed: {e}");
                }
                CoreError::Gateway(e)
            }),
        }
    }
}
