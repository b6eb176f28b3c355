/// Decides whether a raw `Authorization` header value grants access.
///
/// The gate only sees the boolean, so a signed-token or per-client scheme can
/// replace `StaticSecret` without touching the middleware.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, header: Option<&str>) -> bool;
}

/// Accepts exactly one shared secret, compared byte for byte.
#[derive(Debug, Clone)]
pub struct StaticSecret {
    secret: String,
}

impl StaticSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }
}

impl CredentialVerifier for StaticSecret {
    fn verify(&self, header: Option<&str>) -> bool {
        matches!(header, Some(value) if value.as_bytes() == self.secret.as_bytes())
    }
}
