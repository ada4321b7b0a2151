//! Handle server client.
//!
//! # Design
//! `Client` holds an immutable `ClientConfig`, an `AuthScheme` and a
//! `Transport`, and carries no mutable state between calls. Each operation
//! is split into a `build_*` method that produces an `HttpRequest` and an
//! executing method that sends it and returns the raw `HttpResponse`.
//! Response status and body are never interpreted here.
//!
//! `HandleClient` and `BasicAuthHandleClient` are the two concrete
//! flavours, differing only in the headers their auth scheme contributes.

use std::path::Path;

use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use crate::auth::{AuthScheme, BasicAuth, NoAuth};
use crate::config::{read_config_file, ClientConfig, Credentials};
use crate::error::{ClientError, Result};
use crate::http::{Headers, HttpMethod, HttpRequest, HttpResponse, Transport, UreqTransport};
use crate::types::HandleDocument;
use crate::util::{assemble_pid_url, create_entry};

/// Anonymous client over the default `ureq` transport.
pub type HandleClient = Client<NoAuth>;

/// Basic-auth client over the default `ureq` transport.
pub type BasicAuthHandleClient = Client<BasicAuth>;

/// Synchronous client for a handle server's REST API.
#[derive(Debug, Clone)]
pub struct Client<A = NoAuth, T = UreqTransport> {
    config: ClientConfig,
    auth: A,
    transport: T,
}

/// Result of `create_from_url_set`: the handle that was minted and the
/// server's response to storing it.
#[derive(Debug, Clone)]
pub struct MintedHandle {
    pub handle: String,
    pub response: HttpResponse,
}

impl Client<NoAuth, UreqTransport> {
    pub fn new(base_url: impl Into<String>, prefix: impl Into<String>, verify_tls: bool) -> Self {
        Self::from_config(ClientConfig::new(base_url, prefix, verify_tls))
    }

    pub fn from_config(config: ClientConfig) -> Self {
        let transport = UreqTransport::new(config.verify_tls);
        Self::with_transport(config, NoAuth, transport)
    }

    /// Build a client from `handle_server_url`, `prefix` and `HTTPS_verify`.
    pub fn load_from_config(config: &Value) -> Result<Self> {
        Ok(Self::from_config(ClientConfig::from_value(config)?))
    }

    pub fn load_from_config_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_from_config(&read_config_file(path)?)
    }
}

impl Client<BasicAuth, UreqTransport> {
    pub fn new(
        base_url: impl Into<String>,
        prefix: impl Into<String>,
        verify_tls: bool,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self::from_config(
            ClientConfig::new(base_url, prefix, verify_tls),
            Credentials::new(username, password),
        )
    }

    pub fn from_config(config: ClientConfig, credentials: Credentials) -> Self {
        let transport = UreqTransport::new(config.verify_tls);
        Self::with_transport(config, BasicAuth::new(credentials), transport)
    }

    /// Build a client from `handle_server_url`, `prefix`, `HTTPS_verify`,
    /// `username` and `password`.
    pub fn load_from_config(config: &Value) -> Result<Self> {
        let client_config = ClientConfig::from_value(config)?;
        let credentials = Credentials::from_value(config)?;
        Ok(Self::from_config(client_config, credentials))
    }

    pub fn load_from_config_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_from_config(&read_config_file(path)?)
    }
}

impl<A, T> Client<A, T> {
    /// Assemble a client around a caller-supplied transport.
    ///
    /// The transport owns TLS behaviour: `config.verify_tls` is only
    /// reported back by `verify_tls()` and is not applied to `transport`.
    /// The `new` / `from_config` / `load_from_config` constructors build a
    /// `UreqTransport` from the config, so the two always agree there.
    pub fn with_transport(config: ClientConfig, auth: A, transport: T) -> Self {
        Self {
            config,
            auth,
            transport,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    pub fn prefix(&self) -> &str {
        &self.config.prefix
    }

    /// The configured verification flag. See `with_transport` for when the
    /// transport may differ.
    pub fn verify_tls(&self) -> bool {
        self.config.verify_tls
    }

    pub fn auth(&self) -> &A {
        &self.auth
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// A fresh `prefix/uuid` identifier. Never returns the same value twice.
    pub fn mint_handle(&self) -> String {
        format!("{}/{}", self.config.prefix, Uuid::new_v4())
    }

    /// Build a document under a freshly minted handle with one entry per
    /// `(type, url)` pair, indexed from 1 in iteration order.
    pub fn url_set_document<I, K, V>(&self, urls: I) -> HandleDocument
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let values = urls
            .into_iter()
            .zip(1..)
            .map(|((entry_type, url), index)| create_entry(index, entry_type, url))
            .collect();
        HandleDocument::new(self.mint_handle(), values)
    }
}

impl<A: AuthScheme, T: Transport> Client<A, T> {
    pub fn auth_header(&self) -> Headers {
        self.auth.auth_header()
    }

    pub fn build_read(&self, pid: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: assemble_pid_url(&self.config.base_url, pid),
            query: Vec::new(),
            headers: self.auth_header(),
            body: None,
        }
    }

    pub fn build_read_by_type(&self, pid: &str, entry_type: &str) -> HttpRequest {
        let mut req = self.build_read(pid);
        req.query.push(("type".to_string(), entry_type.to_string()));
        req
    }

    pub fn build_upsert(&self, document: &HandleDocument) -> Result<HttpRequest> {
        if document.handle.trim().is_empty() {
            return Err(ClientError::MissingHandle);
        }
        let body = serde_json::to_string(document)?;

        let mut headers = vec![("Content-Type".to_string(), "application/json".to_string())];
        headers.extend(self.auth_header());

        Ok(HttpRequest {
            method: HttpMethod::Put,
            url: assemble_pid_url(&self.config.base_url, &document.handle),
            query: Vec::new(),
            headers,
            body: Some(body),
        })
    }

    pub fn build_delete(&self, pid: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            url: assemble_pid_url(&self.config.base_url, pid),
            query: Vec::new(),
            headers: self.auth_header(),
            body: None,
        }
    }

    /// Fetch every entry of `pid`.
    pub fn read(&self, pid: &str) -> Result<HttpResponse> {
        self.transport.execute(&self.build_read(pid))
    }

    /// Fetch only the entries of `pid` whose type is `entry_type`.
    pub fn read_by_type(&self, pid: &str, entry_type: &str) -> Result<HttpResponse> {
        self.transport.execute(&self.build_read_by_type(pid, entry_type))
    }

    /// Create or replace the handle named by `document.handle`.
    pub fn upsert(&self, document: &HandleDocument) -> Result<HttpResponse> {
        self.transport.execute(&self.build_upsert(document)?)
    }

    /// Mint a new handle under the configured prefix and store `urls` as its
    /// entries.
    pub fn create_from_url_set<I, K, V>(&self, urls: I) -> Result<MintedHandle>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let document = self.url_set_document(urls);
        debug!(handle = %document.handle, entries = document.values.len(), "minting handle");
        let response = self.upsert(&document)?;
        Ok(MintedHandle {
            handle: document.handle,
            response,
        })
    }

    pub fn delete(&self, pid: &str) -> Result<HttpResponse> {
        self.transport.execute(&self.build_delete(pid))
    }
}
