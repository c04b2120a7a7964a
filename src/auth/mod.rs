use sha2::{Digest, Sha256};

/// Header carrying the shared secret on every product API request.
pub const API_KEY_HEADER: &str = "x-api-key";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid or missing API key")]
    InvalidApiKey,
}

/// Static shared-secret check. Holds no state beyond the configured key.
#[derive(Debug, Clone)]
pub struct ApiKeyGate {
    secret: Option<String>,
}

impl ApiKeyGate {
    pub fn new(secret: Option<String>) -> Self {
        Self { secret }
    }

    /// Passes only when a non-empty credential equals the configured secret.
    /// With no secret configured every credential is rejected.
    pub fn check(&self, credential: Option<&str>) -> Result<(), AuthError> {
        let credential = credential
            .filter(|c| !c.is_empty())
            .ok_or(AuthError::InvalidApiKey)?;
        let secret = self.secret.as_deref().ok_or(AuthError::InvalidApiKey)?;

        // Compare digests so the comparison time does not track the common prefix.
        if Sha256::digest(credential.as_bytes()) == Sha256::digest(secret.as_bytes()) {
            Ok(())
        } else {
            Err(AuthError::InvalidApiKey)
        }
    }
}
