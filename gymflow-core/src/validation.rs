//! Client-side form validation.
//!
//! Both submission forms are validated entirely client-side; a failing form
//! never reaches the network. Errors are field-level so the UI can attach a
//! message to the offending input.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use serde::Serialize;

use gymflow_gateway::{ClientType, CreateVisitorRequest, Sex, VisitorStatus};

/// Maximum length of the free-text note on a visitor.
pub const NOTE_MAX_LEN: usize = 255;

/// Client status used when the conversion form leaves it unset.
pub const DEFAULT_CLIENT_STATUS: &str = "pending";

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid"));

// ============ Field errors ============

/// What is wrong with a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind")]
pub enum FieldErrorKind {
    /// Required field missing or empty (whitespace-only counts as empty).
    Missing,
    /// Value exceeds the allowed length.
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// Value is present but malformed.
    InvalidFormat {
        /// What is wrong with the format.
        reason: String,
    },
}

/// A validation failure attached to one form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Machine-readable field key.
    pub field: &'static str,
    /// Human-readable field label (shown next to the input).
    pub label: &'static str,
    /// Failure kind.
    pub kind: FieldErrorKind,
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            FieldErrorKind::Missing => write!(f, "{} : champ requis", self.label),
            FieldErrorKind::TooLong { max } => {
                write!(f, "{} : trop long (max {max} caractères)", self.label)
            }
            FieldErrorKind::InvalidFormat { reason } => write!(f, "{} : {reason}", self.label),
        }
    }
}

/// All field errors produced by one validation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    /// The error attached to `field`, if any.
    #[must_use]
    pub fn for_field(&self, field: &str) -> Option<&FieldError> {
        self.0.iter().find(|e| e.field == field)
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let joined = self
            .0
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ; ");
        f.write_str(&joined)
    }
}

impl std::error::Error for ValidationErrors {}

fn required(field: &'static str, label: &'static str, value: &str, errors: &mut Vec<FieldError>) {
    if value.trim().is_empty() {
        errors.push(FieldError {
            field,
            label,
            kind: FieldErrorKind::Missing,
        });
    }
}

// ============ Visitor creation ============

/// User input for registering a new visitor.
///
/// The visit date is not part of the draft: it is stamped with the current
/// time when the request is built, and the corresponding form input is
/// rendered read-only.
#[derive(Debug, Clone, Default)]
pub struct VisitorDraft {
    /// Unique national-ID-like key.
    pub cin: String,
    /// Family name.
    pub name: String,
    /// Given name.
    pub surname: String,
    /// Contact phone number.
    pub phone: String,
    /// How the prospect heard about the club.
    pub source: String,
    /// Primary interest.
    pub interest: String,
    /// Optional free-text note.
    pub note: Option<String>,
}

impl VisitorDraft {
    /// Validates the draft against the visitor-creation schema.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = Vec::new();
        required("cin", "CIN", &self.cin, &mut errors);
        required("nom", "Nom", &self.name, &mut errors);
        required("prenom", "Prénom", &self.surname, &mut errors);
        required("telephone", "Téléphone", &self.phone, &mut errors);
        required("source", "Source", &self.source, &mut errors);
        required("interet", "Intérêt", &self.interest, &mut errors);

        if let Some(note) = &self.note {
            if note.len() > NOTE_MAX_LEN {
                errors.push(FieldError {
                    field: "remarque",
                    label: "Remarque",
                    kind: FieldErrorKind::TooLong { max: NOTE_MAX_LEN },
                });
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(errors))
        }
    }

    /// Builds the creation request, stamping the visit date and the initial
    /// `New` status.
    #[must_use]
    pub fn into_request(self, visit_date: DateTime<Utc>) -> CreateVisitorRequest {
        CreateVisitorRequest {
            cin: self.cin.trim().to_string(),
            name: self.name.trim().to_string(),
            surname: self.surname.trim().to_string(),
            phone: self.phone.trim().to_string(),
            visit_date,
            source: self.source.trim().to_string(),
            interest: self.interest.trim().to_string(),
            note: self.note.filter(|n| !n.trim().is_empty()),
            status: VisitorStatus::New,
        }
    }
}

// ============ Client conversion ============

/// User input for the conversion form, before validation.
#[derive(Debug, Clone, Default)]
pub struct ConversionForm {
    /// Selected club, if one is selected.
    pub club_id: Option<i64>,
    /// Client email address.
    pub email: String,
    /// Sex.
    pub sex: Option<Sex>,
    /// Membership tier.
    pub client_type: Option<ClientType>,
    /// Postal address.
    pub address: String,
    /// Birth date.
    pub birth_date: Option<NaiveDate>,
    /// Client status; defaults to [`DEFAULT_CLIENT_STATUS`] when unset.
    pub status: Option<String>,
    /// Optional free-text notes.
    pub notes: Option<String>,
}

/// The conversion form after validation: every required field present.
#[derive(Debug, Clone)]
pub struct ConversionFields {
    /// Client email address.
    pub email: String,
    /// Sex.
    pub sex: Sex,
    /// Membership tier.
    pub client_type: ClientType,
    /// Postal address.
    pub address: String,
    /// Birth date.
    pub birth_date: NaiveDate,
    /// Client status.
    pub status: String,
    /// Optional free-text notes.
    pub notes: Option<String>,
}

impl ConversionForm {
    /// Validates against the client-conversion schema and returns the
    /// validated field set.
    ///
    /// Club selection is a workflow precondition, not a schema field, and is
    /// checked separately by the conversion workflow.
    pub fn validate(&self) -> Result<ConversionFields, ValidationErrors> {
        let mut errors = Vec::new();

        let email = self.email.trim();
        if email.is_empty() {
            errors.push(FieldError {
                field: "email",
                label: "Email",
                kind: FieldErrorKind::Missing,
            });
        } else if !EMAIL_RE.is_match(email) {
            errors.push(FieldError {
                field: "email",
                label: "Email",
                kind: FieldErrorKind::InvalidFormat {
                    reason: "format invalide".to_string(),
                },
            });
        }

        if self.sex.is_none() {
            errors.push(FieldError {
                field: "sexe",
                label: "Sexe",
                kind: FieldErrorKind::Missing,
            });
        }
        if self.client_type.is_none() {
            errors.push(FieldError {
                field: "typeClient",
                label: "Type de client",
                kind: FieldErrorKind::Missing,
            });
        }
        required("adresse", "Adresse", &self.address, &mut errors);
        if self.birth_date.is_none() {
            errors.push(FieldError {
                field: "dateNaissance",
                label: "Date de naissance",
                kind: FieldErrorKind::Missing,
            });
        }

        match (self.sex, self.client_type, self.birth_date) {
            (Some(sex), Some(client_type), Some(birth_date)) if errors.is_empty() => {
                Ok(ConversionFields {
                    email: email.to_string(),
                    sex,
                    client_type,
                    address: self.address.trim().to_string(),
                    birth_date,
                    status: self
                        .status
                        .clone()
                        .filter(|s| !s.trim().is_empty())
                        .unwrap_or_else(|| DEFAULT_CLIENT_STATUS.to_string()),
                    notes: self.notes.clone().filter(|n| !n.trim().is_empty()),
                })
            }
            _ => Err(ValidationErrors(errors)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> VisitorDraft {
        VisitorDraft {
            cin: "AB12".to_string(),
            name: "Ali".to_string(),
            surname: "Sara".to_string(),
            phone: "0611223344".to_string(),
            source: "Instagram".to_string(),
            interest: "Musculation".to_string(),
            note: None,
        }
    }

    fn valid_form() -> ConversionForm {
        ConversionForm {
            club_id: Some(3),
            email: "sara@example.com".to_string(),
            sex: Some(Sex::Female),
            client_type: Some(ClientType::Standard),
            address: "12 rue des Fleurs".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1995, 6, 14),
            status: None,
            notes: None,
        }
    }

    #[test]
    fn valid_draft_passes() {
        assert!(valid_draft().validate().is_ok());
    }

    #[test]
    fn empty_draft_reports_every_required_field() {
        let errors = VisitorDraft::default().validate().unwrap_err();
        for field in ["cin", "nom", "prenom", "telephone", "source", "interet"] {
            assert!(errors.for_field(field).is_some(), "missing error for {field}");
        }
    }

    #[test]
    fn whitespace_only_counts_as_missing() {
        let mut draft = valid_draft();
        draft.phone = "   ".to_string();
        let errors = draft.validate().unwrap_err();
        assert_eq!(
            errors.for_field("telephone").unwrap().kind,
            FieldErrorKind::Missing
        );
    }

    #[test]
    fn oversized_note_rejected() {
        let mut draft = valid_draft();
        draft.note = Some("x".repeat(NOTE_MAX_LEN + 1));
        let errors = draft.validate().unwrap_err();
        assert_eq!(
            errors.for_field("remarque").unwrap().kind,
            FieldErrorKind::TooLong { max: NOTE_MAX_LEN }
        );
    }

    #[test]
    fn note_at_limit_accepted() {
        let mut draft = valid_draft();
        draft.note = Some("x".repeat(NOTE_MAX_LEN));
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn into_request_stamps_date_and_new_status() {
        let now = Utc::now();
        let request = valid_draft().into_request(now);
        assert_eq!(request.visit_date, now);
        assert_eq!(request.status, VisitorStatus::New);
    }

    #[test]
    fn valid_form_passes_with_default_status() {
        let fields = valid_form().validate().unwrap();
        assert_eq!(fields.status, DEFAULT_CLIENT_STATUS);
        assert_eq!(fields.sex, Sex::Female);
    }

    #[test]
    fn explicit_status_kept() {
        let mut form = valid_form();
        form.status = Some("actif".to_string());
        assert_eq!(form.validate().unwrap().status, "actif");
    }

    #[test]
    fn bad_email_rejected() {
        let mut form = valid_form();
        form.email = "not-an-email".to_string();
        let errors = form.validate().unwrap_err();
        assert!(matches!(
            errors.for_field("email").unwrap().kind,
            FieldErrorKind::InvalidFormat { .. }
        ));
    }

    #[test]
    fn missing_email_is_missing_not_invalid() {
        let mut form = valid_form();
        form.email = String::new();
        let errors = form.validate().unwrap_err();
        assert_eq!(
            errors.for_field("email").unwrap().kind,
            FieldErrorKind::Missing
        );
    }

    #[test]
    fn empty_form_reports_required_fields() {
        let errors = ConversionForm::default().validate().unwrap_err();
        for field in ["email", "sexe", "typeClient", "adresse", "dateNaissance"] {
            assert!(errors.for_field(field).is_some(), "missing error for {field}");
        }
    }

    #[test]
    fn field_error_messages_are_localized() {
        let errors = ConversionForm::default().validate().unwrap_err();
        let msg = errors.to_string();
        assert!(msg.contains("Email : champ requis"));
        assert!(msg.contains("Date de naissance : champ requis"));
    }
}
