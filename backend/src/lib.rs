//! Civic platform backend: fund read API over a document store.
//!
//! Layout follows ports and adapters:
//! - [`domain`]: accounts, funds, the fund filter builder, and ports.
//! - [`inbound`]: actix-web handlers for the funds and health routes.
//! - [`outbound`]: in-memory and PostgreSQL implementations of the ports.
//! - [`server`]: settings, startup wiring, and the HTTP server.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
