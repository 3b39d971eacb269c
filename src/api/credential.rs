//! PAT-based credential adapter for the Azure DevOps API.
//!
//! Azure DevOps authenticates provider requests with a Personal Access Token
//! (PAT); this adapter presents the PAT through the azure_core
//! `TokenCredential` interface the generated clients expect.

use azure_core::credentials::{AccessToken, Secret, TokenCredential, TokenRequestOptions};
use secrecy::{ExposeSecret, SecretString};

/// PAT-based credential for Azure DevOps authentication.
///
/// The PAT is stored in a `SecretString` so it never appears in Debug output
/// or accidental logging.
#[derive(Clone)]
pub struct PatCredential {
    pat: SecretString,
}

impl PatCredential {
    /// Creates a new PAT credential from a SecretString.
    pub fn new(pat: SecretString) -> Self {
        Self { pat }
    }

    /// Creates a new PAT credential from a plain string.
    pub fn from_string(pat: String) -> Self {
        Self {
            pat: SecretString::from(pat),
        }
    }
}

impl std::fmt::Debug for PatCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PatCredential")
            .field("pat", &"[REDACTED]")
            .finish()
    }
}

#[async_trait::async_trait]
impl TokenCredential for PatCredential {
    /// Returns the PAT as an access token.
    ///
    /// The azure_devops_rust_api crate expects the raw PAT and performs the
    /// Basic auth encoding internally.
    async fn get_token(
        &self,
        _scopes: &[&str],
        _options: Option<TokenRequestOptions<'_>>,
    ) -> azure_core::error::Result<AccessToken> {
        // PATs do not expire through an OAuth flow, so report a far-future expiry.
        Ok(AccessToken::new(
            Secret::new(self.pat.expose_secret().to_string()),
            time::OffsetDateTime::now_utc() + time::Duration::days(365),
        ))
    }
}
