//! Synchronous client for a handle (persistent identifier) server.
//!
//! # Overview
//! Turns read / upsert / delete calls into HTTP requests against a handle
//! server's REST API and hands back the raw `HttpResponse`. Status codes are
//! not interpreted: a 404 from the server is a successful call carrying a
//! 404 response.
//!
//! # Design
//! - `HandleClient` holds an immutable `ClientConfig`, an `AuthScheme` and a
//!   `Transport`. `BasicAuthHandleClient` is the same type with `BasicAuth`.
//! - Every operation has a pure `build_*` step that produces an
//!   `HttpRequest`, so request shaping is testable without a network.
//! - `UreqTransport` executes requests with a blocking `ureq` agent.

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod types;
pub mod util;

pub use auth::{AuthScheme, BasicAuth, NoAuth};
pub use client::{BasicAuthHandleClient, Client, HandleClient, MintedHandle};
pub use config::{ClientConfig, Credentials};
pub use error::ClientError;
pub use http::{Headers, HttpMethod, HttpRequest, HttpResponse, Transport, UreqTransport};
pub use types::{HandleDocument, HandleEntry};
