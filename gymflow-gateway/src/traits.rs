use async_trait::async_trait;

use crate::error::Result;
use crate::types::{
    Club, ConversionPayload, ConversionReceipt, CreateVisitorRequest, UpdateVisitorRequest,
    Visitor, VisitorStatus,
};

/// Remote persistence surface for visitors and clubs.
///
/// One method per backend endpoint. The core layer consumes this as
/// `Arc<dyn VisitorGateway>` so tests can substitute an in-memory mock.
#[async_trait]
pub trait VisitorGateway: Send + Sync {
    /// `POST /visiteurs`: registers a new visitor.
    async fn create_visitor(&self, req: &CreateVisitorRequest) -> Result<Visitor>;

    /// `GET /visiteurs`: lists all visitors.
    async fn list_visitors(&self) -> Result<Vec<Visitor>>;

    /// `GET /visiteurs/{cin}`: fetches one visitor.
    async fn get_visitor(&self, cin: &str) -> Result<Visitor>;

    /// `PUT /visiteurs/{cin}`: replaces a visitor's fields.
    async fn update_visitor(&self, cin: &str, req: &UpdateVisitorRequest) -> Result<Visitor>;

    /// `DELETE /visiteurs/{cin}`: removes a visitor.
    ///
    /// Exposed because the backend exposes it; no workflow in this codebase
    /// calls it.
    async fn delete_visitor(&self, cin: &str) -> Result<()>;

    /// `PATCH /visiteurs/{cin}/status`: updates only the lifecycle status.
    async fn update_status(&self, cin: &str, status: VisitorStatus) -> Result<()>;

    /// `GET /clubs`: lists the clubs available for conversion.
    async fn list_clubs(&self) -> Result<Vec<Club>>;

    /// `POST /visiteurs/{cin}/convert`: converts a visitor into a client.
    async fn convert_visitor(
        &self,
        cin: &str,
        payload: &ConversionPayload,
    ) -> Result<ConversionReceipt>;
}
