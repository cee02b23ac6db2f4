//! # gymflow-gateway
//!
//! HTTP gateway to the gym-management backend: visitor CRUD, club reference
//! data, and the visitor-to-client conversion endpoint.
//!
//! All persistence lives server-side; this crate only speaks the backend's
//! JSON contract and maps its failure modes onto [`GatewayError`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use gymflow_gateway::{GatewayConfig, HttpVisitorGateway, VisitorGateway};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let gateway = HttpVisitorGateway::new(&GatewayConfig::new("https://api.example.com/api"));
//!
//! let visitors = gateway.list_visitors().await?;
//! for visitor in &visitors {
//!     println!("{} {} [{}]", visitor.name, visitor.surname, visitor.status);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every operation returns [`Result<T, GatewayError>`](GatewayError):
//!
//! - [`GatewayError::Network`] / [`GatewayError::Timeout`] — transport
//!   failures, surfaced to the user as a generic localized message
//! - [`GatewayError::Api`] — the backend rejected the operation; its own
//!   message is preserved
//! - [`GatewayError::VisitorNotFound`] — 404 on a visitor-keyed path
//!
//! Nothing is retried automatically: each call is a user-triggered one-shot
//! and the caller decides whether to resubmit.

mod client;
mod error;
mod http;
mod traits;
mod types;
mod utils;

// Re-export error types
pub use error::{GatewayError, Result};

// Re-export the gateway surface
pub use client::{GatewayConfig, HttpVisitorGateway};
pub use traits::VisitorGateway;

// Re-export wire types
pub use types::{
    ClientType, Club, ConversionPayload, ConversionReceipt, CreateVisitorRequest, Sex,
    UpdateVisitorRequest, Visitor, VisitorStatus,
};

// Re-export utils module
pub use utils::datetime;
