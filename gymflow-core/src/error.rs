//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export the gateway error type
pub use gymflow_gateway::GatewayError;

use crate::validation::ValidationErrors;

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Visitor not present in the local collection
    #[error("Visitor not found: {0}")]
    VisitorNotFound(String),

    /// The visitor is already converted; Converted is terminal
    #[error("Visitor already converted: {0}")]
    AlreadyConverted(String),

    /// Form validation errors (structured, field level)
    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    /// Conversion submitted without a selected club
    #[error("No club selected")]
    NoClubSelected,

    /// The selected club is not in the fetched club list
    #[error("Unknown club: {0}")]
    UnknownClub(i64),

    /// A workflow action was invoked outside the state that allows it
    #[error("Conversion workflow is not open")]
    WorkflowClosed,

    /// The owning context was torn down while the call was in flight
    #[error("Operation cancelled")]
    Cancelled,

    /// Gateway error (converting from library)
    #[error("{0}")]
    Gateway(#[from] GatewayError),
}

impl CoreError {
    /// Whether this is expected behavior (user input, missing resource,
    /// teardown), used for log level selection.
    ///
    /// Level `warn` should be used when returning `true` and level `error`
    /// when returning `false`.
    /// **Please update this method simultaneously when new variants are added.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::VisitorNotFound(_)
            | Self::AlreadyConverted(_)
            | Self::Validation(_)
            | Self::NoClubSelected
            | Self::UnknownClub(_)
            | Self::WorkflowClosed
            | Self::Cancelled => true,
            Self::Gateway(e) => e.is_expected(),
        }
    }

    /// The message to surface to the user for this error.
    ///
    /// Validation errors and gateway errors carry their own localized text;
    /// workflow guards map to short localized strings.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::VisitorNotFound(_) => "Visiteur introuvable.".to_string(),
            Self::AlreadyConverted(_) => "Ce visiteur est déjà converti.".to_string(),
            Self::Validation(errors) => errors.to_string(),
            Self::NoClubSelected | Self::UnknownClub(_) => {
                "Veuillez sélectionner un club.".to_string()
            }
            Self::WorkflowClosed | Self::Cancelled => {
                "Une erreur est survenue. Veuillez réessayer.".to_string()
            }
            Self::Gateway(e) => e.user_message(),
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gateway_error_converts() {
        let e: CoreError = GatewayError::Network {
            detail: "refused".to_string(),
        }
        .into();
        assert!(matches!(e, CoreError::Gateway(_)));
        assert!(!e.is_expected());
    }

    #[test]
    fn expected_classification() {
        assert!(CoreError::AlreadyConverted("AB12".into()).is_expected());
        assert!(CoreError::Cancelled.is_expected());
        assert!(
            CoreError::Gateway(GatewayError::Api {
                message: "rejet".into()
            })
            .is_expected()
        );
    }

    #[test]
    fn user_message_delegates_to_gateway() {
        let e = CoreError::Gateway(GatewayError::Api {
            message: "CIN déjà utilisé".into(),
        });
        assert_eq!(e.user_message(), "CIN déjà utilisé");
    }
}
