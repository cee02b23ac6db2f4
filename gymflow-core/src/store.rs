//! Owned in-memory visitor collection.
//!
//! One store instance is the single source of truth for the loaded visitor
//! set. Readers take cloned snapshots; every mutation goes through an
//! explicit method, and the service layer only calls those methods after the
//! backend has confirmed the corresponding change.

use gymflow_gateway::{Visitor, VisitorStatus};
use tokio::sync::RwLock;

/// Single owned collection of visitors, keyed by CIN.
#[derive(Default)]
pub struct VisitorStore {
    visitors: RwLock<Vec<Visitor>>,
}

impl VisitorStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole collection with the server's current set.
    pub async fn replace_all(&self, visitors: Vec<Visitor>) {
        *self.visitors.write().await = visitors;
    }

    /// Cloned read view of the collection, in load order.
    pub async fn snapshot(&self) -> Vec<Visitor> {
        self.visitors.read().await.clone()
    }

    /// The visitor with the given CIN, if loaded.
    pub async fn get(&self, cin: &str) -> Option<Visitor> {
        self.visitors.read().await.iter().find(|v| v.cin == cin).cloned()
    }

    /// Number of loaded visitors.
    pub async fn len(&self) -> usize {
        self.visitors.read().await.len()
    }

    /// Whether the collection is empty.
    pub async fn is_empty(&self) -> bool {
        self.visitors.read().await.is_empty()
    }

    /// Inserts a server-confirmed visitor, replacing any record with the
    /// same CIN.
    pub async fn upsert(&self, visitor: Visitor) {
        let mut visitors = self.visitors.write().await;
        match visitors.iter_mut().find(|v| v.cin == visitor.cin) {
            Some(slot) => *slot = visitor,
            None => visitors.push(visitor),
        }
    }

    /// Patches the status of exactly one record. Returns whether the record
    /// was found; no other record is touched.
    pub async fn patch_status(&self, cin: &str, status: VisitorStatus) -> bool {
        let mut visitors = self.visitors.write().await;
        if let Some(visitor) = visitors.iter_mut().find(|v| v.cin == cin) {
            visitor.status = status;
            true
        } else {
            false
        }
    }

    /// Marks one record as converted and attaches the chosen club name.
    /// Returns whether the record was found.
    pub async fn apply_conversion(&self, cin: &str, club_name: &str) -> bool {
        let mut visitors = self.visitors.write().await;
        if let Some(visitor) = visitors.iter_mut().find(|v| v.cin == cin) {
            visitor.status = VisitorStatus::Converted;
            visitor.club = Some(club_name.to_string());
            true
        } else {
            false
        }
    }

    /// Removes one record. Returns whether the record was found.
    pub async fn remove(&self, cin: &str) -> bool {
        let mut visitors = self.visitors.write().await;
        let before = visitors.len();
        visitors.retain(|v| v.cin != cin);
        visitors.len() < before
    }
}
