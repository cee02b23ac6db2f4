//! Wire types for the gym-management backend.
//!
//! Field names follow the backend's French JSON contract (`nom`, `prenom`,
//! `dateVisite`, ...). Rust-side names are English; serde renames bridge the
//! two. List endpoints wrap their payload in a nested paginator envelope
//! (`{ "data": { "data": [...] } }`).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::datetime;

// ============ Visitor ============

/// Lifecycle status of a visitor.
///
/// `Converted` is terminal: a converted visitor is never moved back to any
/// other status through this gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VisitorStatus {
    /// Freshly registered prospect.
    #[serde(rename = "Nouveau")]
    New,
    /// Follow-up in progress.
    #[serde(rename = "En cours")]
    InProgress,
    /// Converted into a paying client. Terminal.
    #[serde(rename = "Converti")]
    Converted,
    /// Prospect lost.
    #[serde(rename = "Perdu")]
    Lost,
}

impl VisitorStatus {
    /// Whether this status admits no further transitions.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Converted)
    }

    /// The backend wire string for this status.
    #[must_use]
    pub fn as_wire(self) -> &'static str {
        match self {
            Self::New => "Nouveau",
            Self::InProgress => "En cours",
            Self::Converted => "Converti",
            Self::Lost => "Perdu",
        }
    }

    /// Parses a backend wire string.
    #[must_use]
    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "Nouveau" => Some(Self::New),
            "En cours" => Some(Self::InProgress),
            "Converti" => Some(Self::Converted),
            "Perdu" => Some(Self::Lost),
            _ => None,
        }
    }
}

impl std::fmt::Display for VisitorStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_wire())
    }
}

/// A prospect tracked before becoming a paying client.
///
/// Identified by CIN (national identity number), which the backend uses as
/// the resource key in every `/visiteurs/{cin}` path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Visitor {
    /// Unique national-ID-like key.
    pub cin: String,
    /// Family name.
    #[serde(rename = "nom")]
    pub name: String,
    /// Given name.
    #[serde(rename = "prenom")]
    pub surname: String,
    /// Contact phone number.
    #[serde(rename = "telephone")]
    pub phone: String,
    /// When the prospect visited. Missing on some legacy records.
    #[serde(rename = "dateVisite", with = "datetime::option", default)]
    pub visit_date: Option<DateTime<Utc>>,
    /// How the prospect heard about the club.
    pub source: String,
    /// Primary interest (activity the prospect asked about).
    #[serde(rename = "interet")]
    pub interest: String,
    /// Free-text note.
    #[serde(rename = "remarque", default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Lifecycle status.
    #[serde(rename = "statut")]
    pub status: VisitorStatus,
    /// Name of the club the visitor was converted into, once converted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub club: Option<String>,
}

/// Request body for `POST /visiteurs`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateVisitorRequest {
    /// Unique national-ID-like key.
    pub cin: String,
    /// Family name.
    #[serde(rename = "nom")]
    pub name: String,
    /// Given name.
    #[serde(rename = "prenom")]
    pub surname: String,
    /// Contact phone number.
    #[serde(rename = "telephone")]
    pub phone: String,
    /// Visit timestamp, stamped at creation time.
    #[serde(rename = "dateVisite", with = "datetime")]
    pub visit_date: DateTime<Utc>,
    /// How the prospect heard about the club.
    pub source: String,
    /// Primary interest.
    #[serde(rename = "interet")]
    pub interest: String,
    /// Free-text note.
    #[serde(rename = "remarque", skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Initial lifecycle status.
    #[serde(rename = "statut")]
    pub status: VisitorStatus,
}

/// Request body for `PUT /visiteurs/{cin}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateVisitorRequest {
    /// Family name.
    #[serde(rename = "nom")]
    pub name: String,
    /// Given name.
    #[serde(rename = "prenom")]
    pub surname: String,
    /// Contact phone number.
    #[serde(rename = "telephone")]
    pub phone: String,
    /// How the prospect heard about the club.
    pub source: String,
    /// Primary interest.
    #[serde(rename = "interet")]
    pub interest: String,
    /// Free-text note.
    #[serde(rename = "remarque", skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Lifecycle status.
    #[serde(rename = "statut")]
    pub status: VisitorStatus,
}

// ============ Club ============

/// A physical business location offered to a converting visitor.
///
/// Read-only reference data; never mutated through this gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Club {
    /// Backend identifier.
    pub id: i64,
    /// Display name.
    #[serde(rename = "nom")]
    pub name: String,
}

// ============ Conversion ============

/// Sex, wire-encoded as `0` (male) / `1` (female).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Sex {
    /// Wire value `0`.
    Male,
    /// Wire value `1`.
    Female,
}

impl From<Sex> for u8 {
    fn from(sex: Sex) -> Self {
        match sex {
            Sex::Male => 0,
            Sex::Female => 1,
        }
    }
}

impl TryFrom<u8> for Sex {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Male),
            1 => Ok(Self::Female),
            other => Err(format!("Invalid sex encoding: {other}")),
        }
    }
}

/// Membership tier assigned to a converted client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClientType {
    /// Base membership.
    Standard,
    /// Premium membership.
    Premium,
    /// Top-tier membership.
    #[serde(rename = "VIP")]
    Vip,
}

/// Request body for `POST /visiteurs/{cin}/convert`.
///
/// Ephemeral: built once during conversion, sent, and discarded. The code is
/// the club-scoped display code generated client-side; the backend owns the
/// actual primary key of the created client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionPayload {
    /// Generated club-scoped client code.
    #[serde(rename = "codeClient")]
    pub code: String,
    /// Name of the chosen club.
    #[serde(rename = "nomClub")]
    pub club_name: String,
    /// Client email address.
    pub email: String,
    /// Sex, wire-encoded 0/1.
    #[serde(rename = "sexe")]
    pub sex: Sex,
    /// Membership tier.
    #[serde(rename = "typeClient")]
    pub client_type: ClientType,
    /// Postal address.
    #[serde(rename = "adresse")]
    pub address: String,
    /// Birth date.
    #[serde(rename = "dateNaissance")]
    pub birth_date: NaiveDate,
    /// Client account status, `"pending"` unless overridden.
    #[serde(rename = "statut")]
    pub status: String,
    /// Free-text notes.
    #[serde(rename = "remarques", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// What the backend reports back after a successful conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionReceipt {
    /// Backend confirmation message, when one is provided.
    pub message: Option<String>,
    /// Raw created-client payload, shape owned by the backend.
    pub client: Option<serde_json::Value>,
}

// ============ Response envelopes ============

/// Single-resource envelope: `{ "data": T }`.
#[derive(Debug, Deserialize)]
pub(crate) struct DataEnvelope<T> {
    pub data: T,
}

/// Paginator page: the inner `{ "data": [...] }` of a list response.
#[derive(Debug, Deserialize)]
pub(crate) struct Page<T> {
    pub data: Vec<T>,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self { data: Vec::new() }
    }
}

/// List envelope: `{ "data": { "data": [...] } }`.
#[derive(Debug, Deserialize)]
pub(crate) struct ListEnvelope<T> {
    pub data: Page<T>,
}

/// Flagged envelope: `{ "success": bool, "message"?: ..., "data"?: ... }`.
#[derive(Debug, Deserialize)]
pub(crate) struct FlaggedEnvelope<T> {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<T>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_wire_round_trip() {
        for status in [
            VisitorStatus::New,
            VisitorStatus::InProgress,
            VisitorStatus::Converted,
            VisitorStatus::Lost,
        ] {
            let json = serde_json::to_string(&status).unwrap();
            let back: VisitorStatus = serde_json::from_str(&json).unwrap();
            assert_eq!(back, status);
            assert_eq!(VisitorStatus::from_wire(status.as_wire()), Some(status));
        }
    }

    #[test]
    fn status_in_progress_wire_string() {
        assert_eq!(
            serde_json::to_string(&VisitorStatus::InProgress).unwrap(),
            "\"En cours\""
        );
    }

    #[test]
    fn only_converted_is_terminal() {
        assert!(VisitorStatus::Converted.is_terminal());
        assert!(!VisitorStatus::New.is_terminal());
        assert!(!VisitorStatus::InProgress.is_terminal());
        assert!(!VisitorStatus::Lost.is_terminal());
    }

    #[test]
    fn deserialize_visitor_french_fields() {
        let json = r#"{
            "cin": "AB12",
            "nom": "Ali",
            "prenom": "Sara",
            "telephone": "0611223344",
            "dateVisite": "2024-03-01 09:30:00",
            "source": "Instagram",
            "interet": "Musculation",
            "remarque": "Rappeler lundi",
            "statut": "Nouveau"
        }"#;
        let v: Visitor = serde_json::from_str(json).unwrap();
        assert_eq!(v.cin, "AB12");
        assert_eq!(v.name, "Ali");
        assert_eq!(v.surname, "Sara");
        assert_eq!(v.status, VisitorStatus::New);
        assert_eq!(v.note.as_deref(), Some("Rappeler lundi"));
        assert!(v.visit_date.is_some());
        assert!(v.club.is_none());
    }

    #[test]
    fn deserialize_visitor_missing_optionals() {
        let json = r#"{
            "cin": "CD34",
            "nom": "Ben",
            "prenom": "Omar",
            "telephone": "0655667788",
            "source": "Bouche à oreille",
            "interet": "Cardio",
            "statut": "Perdu"
        }"#;
        let v: Visitor = serde_json::from_str(json).unwrap();
        assert!(v.visit_date.is_none());
        assert!(v.note.is_none());
    }

    #[test]
    fn deserialize_list_envelope() {
        let json = r#"{"data":{"data":[{"id":3,"nom":"Club Centre"}]}}"#;
        let envelope: ListEnvelope<Club> = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.data.data.len(), 1);
        assert_eq!(envelope.data.data[0].name, "Club Centre");
    }

    #[test]
    fn sex_wire_encoding() {
        assert_eq!(serde_json::to_string(&Sex::Male).unwrap(), "0");
        assert_eq!(serde_json::to_string(&Sex::Female).unwrap(), "1");
        let back: Sex = serde_json::from_str("1").unwrap();
        assert_eq!(back, Sex::Female);
        assert!(serde_json::from_str::<Sex>("2").is_err());
    }

    #[test]
    fn client_type_vip_rename() {
        assert_eq!(serde_json::to_string(&ClientType::Vip).unwrap(), "\"VIP\"");
        let back: ClientType = serde_json::from_str("\"Premium\"").unwrap();
        assert_eq!(back, ClientType::Premium);
    }

    #[test]
    fn conversion_payload_wire_keys() {
        let payload = ConversionPayload {
            code: "CLUBCENTRE123456".to_string(),
            club_name: "Club Centre".to_string(),
            email: "sara@example.com".to_string(),
            sex: Sex::Female,
            client_type: ClientType::Standard,
            address: "12 rue des Fleurs".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1995, 6, 14).unwrap(),
            status: "pending".to_string(),
            notes: None,
        };
        let value = serde_json::to_value(&payload).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj["codeClient"], "CLUBCENTRE123456");
        assert_eq!(obj["nomClub"], "Club Centre");
        assert_eq!(obj["sexe"], 1);
        assert_eq!(obj["typeClient"], "Standard");
        assert_eq!(obj["adresse"], "12 rue des Fleurs");
        assert_eq!(obj["dateNaissance"], "1995-06-14");
        assert_eq!(obj["statut"], "pending");
        assert!(!obj.contains_key("remarques"));
    }

    #[test]
    fn flagged_envelope_defaults() {
        let json = r#"{"success":false}"#;
        let envelope: FlaggedEnvelope<serde_json::Value> = serde_json::from_str(json).unwrap();
        assert!(!envelope.success);
        assert!(envelope.message.is_none());
        assert!(envelope.data.is_none());
    }
}
