//! Authentication strategies for `HandleClient`.
//!
//! The client asks its `AuthScheme` for headers on every request. `NoAuth`
//! contributes nothing; `BasicAuth` contributes an `Authorization: Basic`
//! header built from a username and password.

use base64::{engine::general_purpose, Engine as _};

use crate::config::Credentials;
use crate::http::Headers;

/// Produces the authentication headers attached to every request.
pub trait AuthScheme {
    /// Headers to add to the request. Anonymous access by default.
    fn auth_header(&self) -> Headers {
        Vec::new()
    }
}

impl<S: AuthScheme + ?Sized> AuthScheme for Box<S> {
    fn auth_header(&self) -> Headers {
        (**self).auth_header()
    }
}

/// Anonymous access.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoAuth;

impl AuthScheme for NoAuth {}

/// HTTP Basic authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicAuth {
    credentials: Credentials,
}

impl BasicAuth {
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// `Basic <base64(username:password)>`.
    pub fn token(&self) -> String {
        let raw = format!("{}:{}", self.credentials.username, self.credentials.password);
        format!("Basic {}", general_purpose::STANDARD.encode(raw))
    }
}

impl AuthScheme for BasicAuth {
    fn auth_header(&self) -> Headers {
        vec![("Authorization".to_string(), self.token())]
    }
}
