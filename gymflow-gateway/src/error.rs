use serde::{Deserialize, Serialize};

/// Generic localized fallback shown when the backend gives us nothing better.
pub(crate) const GENERIC_FAILURE_MSG: &str = "Une erreur est survenue. Veuillez réessayer.";
/// Localized fallback for transport-level failures.
pub(crate) const NETWORK_FAILURE_MSG: &str =
    "Erreur de connexion au serveur. Veuillez réessayer.";

/// Unified error type for all backend gateway operations.
///
/// All variants are serializable for structured error reporting toward the
/// UI layer. [`GatewayError::user_message`] maps any variant to the string a
/// user should see: the server-provided message when one exists, otherwise a
/// generic localized fallback.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum GatewayError {
    /// A network-level error occurred (DNS resolution failure, connection
    /// refused, unreachable host, etc.).
    Network {
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    Timeout {
        /// Error details.
        detail: String,
    },

    /// The requested visitor does not exist on the backend.
    VisitorNotFound {
        /// CIN of the visitor that was not found.
        cin: String,
        /// Original error message from the backend, if available.
        raw_message: Option<String>,
    },

    /// The backend reported a business failure (explicit `success: false`
    /// flag or an error status with a message body).
    Api {
        /// Message reported by the backend.
        message: String,
    },

    /// Failed to parse the backend's response.
    Parse {
        /// Details about the parse failure.
        detail: String,
    },

    /// Failed to serialize a request body.
    Serialization {
        /// Details about the serialization failure.
        detail: String,
    },
}

impl GatewayError {
    /// Whether the error is expected behavior (user input, missing resource,
    /// backend-reported rejection), used for log level selection.
    ///
    /// `true` means `warn` level, `false` means `error` level.
    /// **Update this method when adding variants.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(self, Self::VisitorNotFound { .. } | Self::Api { .. })
    }

    /// The message to surface to the user for this error.
    ///
    /// Server-reported messages are passed through verbatim; transport and
    /// decoding failures collapse to a generic localized fallback.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Network { .. } | Self::Timeout { .. } => NETWORK_FAILURE_MSG.to_string(),
            Self::VisitorNotFound { raw_message, .. } => raw_message
                .clone()
                .unwrap_or_else(|| "Visiteur introuvable.".to_string()),
            Self::Api { message } => message.clone(),
            Self::Parse { .. } | Self::Serialization { .. } => GENERIC_FAILURE_MSG.to_string(),
        }
    }
}

impl std::fmt::Display for GatewayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Network { detail } => write!(f, "Network error: {detail}"),
            Self::Timeout { detail } => write!(f, "Request timeout: {detail}"),
            Self::VisitorNotFound { cin, raw_message } => {
                if let Some(msg) = raw_message {
                    write!(f, "Visitor '{cin}' not found: {msg}")
                } else {
                    write!(f, "Visitor '{cin}' not found")
                }
            }
            Self::Api { message } => write!(f, "API error: {message}"),
            Self::Parse { detail } => write!(f, "Parse error: {detail}"),
            Self::Serialization { detail } => write!(f, "Serialization error: {detail}"),
        }
    }
}

impl std::error::Error for GatewayError {}

/// Convenience type alias for `Result<T, GatewayError>`.
pub type Result<T> = std::result::Result<T, GatewayError>;
