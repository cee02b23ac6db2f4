//! Test helpers.
//!
//! Provides an in-memory mock gateway with injectable failures and call
//! counters, plus factory functions for wired-up services.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;

use gymflow_gateway::{
    ClientType, Club, ConversionPayload, ConversionReceipt, CreateVisitorRequest, GatewayError,
    Result as GatewayResult, Sex, UpdateVisitorRequest, Visitor, VisitorGateway, VisitorStatus,
};

use crate::services::{ConversionWorkflow, ServiceContext, VisitorService};
use crate::validation::ConversionForm;

// ===== MockVisitorGateway =====

/// In-memory stand-in for the backend. Failures injected via `fail_*` stay
/// armed until cleared; call counters let tests assert that guarded paths
/// never reach the network.
pub struct MockVisitorGateway {
    visitors: RwLock<Vec<Visitor>>,
    clubs: RwLock<Vec<Club>>,
    list_error: RwLock<Option<GatewayError>>,
    status_error: RwLock<Option<GatewayError>>,
    clubs_error: RwLock<Option<GatewayError>>,
    convert_error: RwLock<Option<GatewayError>>,
    create_count: AtomicUsize,
    status_count: AtomicUsize,
    convert_count: AtomicUsize,
}

impl MockVisitorGateway {
    pub fn new() -> Self {
        Self {
            visitors: RwLock::new(Vec::new()),
            clubs: RwLock::new(Vec::new()),
            list_error: RwLock::new(None),
            status_error: RwLock::new(None),
            clubs_error: RwLock::new(None),
            convert_error: RwLock::new(None),
            create_count: AtomicUsize::new(0),
            status_count: AtomicUsize::new(0),
            convert_count: AtomicUsize::new(0),
        }
    }

    pub async fn seed_visitors(&self, visitors: Vec<Visitor>) {
        self.visitors.write().await.extend(visitors);
    }

    pub async fn seed_clubs(&self, clubs: Vec<Club>) {
        self.clubs.write().await.extend(clubs);
    }

    pub async fn fail_list(&self, err: GatewayError) {
        *self.list_error.write().await = Some(err);
    }

    pub async fn fail_status(&self, err: GatewayError) {
        *self.status_error.write().await = Some(err);
    }

    pub async fn fail_clubs(&self, err: GatewayError) {
        *self.clubs_error.write().await = Some(err);
    }

    pub async fn fail_convert(&self, err: GatewayError) {
        *self.convert_error.write().await = Some(err);
    }

    pub fn create_calls(&self) -> usize {
        self.create_count.load(Ordering::SeqCst)
    }

    pub fn status_calls(&self) -> usize {
        self.status_count.load(Ordering::SeqCst)
    }

    pub fn convert_calls(&self) -> usize {
        self.convert_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VisitorGateway for MockVisitorGateway {
    async fn create_visitor(&self, req: &CreateVisitorRequest) -> GatewayResult<Visitor> {
        self.create_count.fetch_add(1, Ordering::SeqCst);
        let visitor = Visitor {
            cin: req.cin.clone(),
            name: req.name.clone(),
            surname: req.surname.clone(),
            phone: req.phone.clone(),
            visit_date: Some(req.visit_date),
            source: req.source.clone(),
            interest: req.interest.clone(),
            note: req.note.clone(),
            status: req.status,
            club: None,
        };
        self.visitors.write().await.push(visitor.clone());
        Ok(visitor)
    }

    async fn list_visitors(&self) -> GatewayResult<Vec<Visitor>> {
        if let Some(err) = self.list_error.read().await.clone() {
            return Err(err);
        }
        Ok(self.visitors.read().await.clone())
    }

    async fn get_visitor(&self, cin: &str) -> GatewayResult<Visitor> {
        self.visitors
            .read()
            .await
            .iter()
            .find(|v| v.cin == cin)
            .cloned()
            .ok_or_else(|| GatewayError::VisitorNotFound {
                cin: cin.to_string(),
                raw_message: None,
            })
    }

    async fn update_visitor(
        &self,
        cin: &str,
        req: &UpdateVisitorRequest,
    ) -> GatewayResult<Visitor> {
        let mut visitors = self.visitors.write().await;
        let visitor = visitors
            .iter_mut()
            .find(|v| v.cin == cin)
            .ok_or_else(|| GatewayError::VisitorNotFound {
                cin: cin.to_string(),
                raw_message: None,
            })?;
        visitor.name = req.name.clone();
        visitor.surname = req.surname.clone();
        visitor.phone = req.phone.clone();
        visitor.source = req.source.clone();
        visitor.interest = req.interest.clone();
        visitor.note = req.note.clone();
        visitor.status = req.status;
        Ok(visitor.clone())
    }

    async fn delete_visitor(&self, cin: &str) -> GatewayResult<()> {
        self.visitors.write().await.retain(|v| v.cin != cin);
        Ok(())
    }

    async fn update_status(&self, cin: &str, status: VisitorStatus) -> GatewayResult<()> {
        self.status_count.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.status_error.read().await.clone() {
            return Err(err);
        }
        let mut visitors = self.visitors.write().await;
        match visitors.iter_mut().find(|v| v.cin == cin) {
            Some(visitor) => {
                visitor.status = status;
                Ok(())
            }
            None => Err(GatewayError::VisitorNotFound {
                cin: cin.to_string(),
                raw_message: None,
            }),
        }
    }

    async fn list_clubs(&self) -> GatewayResult<Vec<Club>> {
        if let Some(err) = self.clubs_error.read().await.clone() {
            return Err(err);
        }
        Ok(self.clubs.read().await.clone())
    }

    async fn convert_visitor(
        &self,
        cin: &str,
        payload: &ConversionPayload,
    ) -> GatewayResult<ConversionReceipt> {
        self.convert_count.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.convert_error.read().await.clone() {
            return Err(err);
        }
        let mut visitors = self.visitors.write().await;
        if let Some(visitor) = visitors.iter_mut().find(|v| v.cin == cin) {
            visitor.status = VisitorStatus::Converted;
            visitor.club = Some(payload.club_name.clone());
        }
        Ok(ConversionReceipt {
            message: Some("Visiteur converti avec succès".to_string()),
            client: Some(serde_json::json!({ "codeClient": payload.code })),
        })
    }
}

// ===== Factory helpers =====

/// A visitor record with plausible defaults.
pub fn sample_visitor(cin: &str, status: VisitorStatus) -> Visitor {
    Visitor {
        cin: cin.to_string(),
        name: "Ali".to_string(),
        surname: "Sara".to_string(),
        phone: "0611223344".to_string(),
        visit_date: None,
        source: "Instagram".to_string(),
        interest: "Musculation".to_string(),
        note: None,
        status,
        club: None,
    }
}

/// A club record.
pub fn sample_club(id: i64, name: &str) -> Club {
    Club {
        id,
        name: name.to_string(),
    }
}

/// A conversion form that passes validation, selecting `club_id`.
pub fn valid_form(club_id: i64) -> ConversionForm {
    ConversionForm {
        club_id: Some(club_id),
        email: "sara@example.com".to_string(),
        sex: Some(Sex::Female),
        client_type: Some(ClientType::Standard),
        address: "12 rue des Fleurs".to_string(),
        birth_date: NaiveDate::from_ymd_opt(1995, 6, 14),
        status: None,
        notes: None,
    }
}

/// A `VisitorService` wired to a fresh mock gateway.
pub fn test_service() -> (VisitorService, Arc<MockVisitorGateway>) {
    let gateway = Arc::new(MockVisitorGateway::new());
    let ctx = Arc::new(ServiceContext::new(gateway.clone()));
    (VisitorService::new(ctx), gateway)
}

/// A `ConversionWorkflow` and `VisitorService` sharing one context, with a
/// visitor `AB12` (status `Nouveau`) pre-seeded on the mock backend.
pub async fn test_workflow() -> (
    ConversionWorkflow,
    VisitorService,
    Arc<MockVisitorGateway>,
) {
    let gateway = Arc::new(MockVisitorGateway::new());
    gateway
        .seed_visitors(vec![sample_visitor("AB12", VisitorStatus::New)])
        .await;
    let ctx = Arc::new(ServiceContext::new(gateway.clone()));
    let workflow = ConversionWorkflow::new(ctx.clone());
    (workflow, VisitorService::new(ctx), gateway)
}
