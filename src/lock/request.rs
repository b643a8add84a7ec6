use crate::consts::{CSRF_FIELD, CSRF_HEADER};

/// Refresh request payload, captured once at activation and reused
/// unchanged on every tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LockRequest {
    /// Lock-refresh URL relative to the server root
    pub(crate) url: String,
    token: String,
}

impl LockRequest {
    pub(crate) fn new(url: String, token: String) -> Self {
        Self { url, token }
    }

    /// The anti-forgery header sent with every request.
    pub(crate) fn header(&self) -> (&'static str, &str) {
        (CSRF_HEADER, &self.token)
    }

    /// The form body: a single field carrying the token.
    pub(crate) fn body(&self) -> String {
        format!("{CSRF_FIELD}={}", self.token)
    }
}
