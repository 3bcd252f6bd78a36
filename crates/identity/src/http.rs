// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

use async_trait::async_trait;
use fls_data_model::{UserId, VerifiedUser};
use serde::Deserialize;
use url::Url;

use crate::IdentityError;

/// The user object returned by the identity provider
#[derive(Deserialize)]
struct UserResponse {
    id: String,
    email: Option<String>,
}

/// An [`IdentityVerifier`] backed by the identity provider's HTTP API
///
/// Resolution is a single `GET <issuer>/user` with the bearer credential
/// forwarded; a 2xx with a user object resolves, a 401/403 rejects.
///
/// [`IdentityVerifier`]: crate::IdentityVerifier
#[derive(Debug, Clone)]
pub struct HttpIdentityVerifier {
    client: reqwest::Client,
    user_endpoint: Url,
}

impl HttpIdentityVerifier {
    /// Create a new [`HttpIdentityVerifier`] talking to the given issuer
    ///
    /// # Errors
    ///
    /// Returns an error if the issuer URL cannot be a base URL
    pub fn new(client: reqwest::Client, issuer: &Url) -> Result<Self, url::ParseError> {
        let user_endpoint = issuer.join("user")?;
        Ok(Self {
            client,
            user_endpoint,
        })
    }
}

#[async_trait]
impl crate::IdentityVerifier for HttpIdentityVerifier {
    #[tracing::instrument(name = "identity.verify_token", skip_all)]
    async fn verify_token(&self, token: &str) -> Result<VerifiedUser, IdentityError> {
        let response = self
            .client
            .get(self.user_endpoint.clone())
            .bearer_auth(token)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(IdentityError::CredentialRejected);
        }

        if !status.is_success() {
            return Err(IdentityError::UnexpectedStatus(status));
        }

        let user: UserResponse = response.json().await?;

        Ok(VerifiedUser {
            id: UserId::new(user.id),
            email: user.email,
        })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use url::Url;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{header, method, path},
    };

    use super::HttpIdentityVerifier;
    use crate::{IdentityError, IdentityVerifier};

    fn http_client() -> reqwest::Client {
        let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();
        reqwest::Client::new()
    }

    #[tokio::test]
    async fn resolves_a_valid_credential() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/user"))
            .and(header("authorization", "Bearer valid-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "user-1",
                "email": "john@example.com",
            })))
            .mount(&server)
            .await;

        let issuer = Url::parse(&server.uri()).unwrap();
        let verifier = HttpIdentityVerifier::new(http_client(), &issuer).unwrap();

        let user = verifier.verify_token("valid-token").await.unwrap();
        assert_eq!(user.id.as_str(), "user-1");
        assert_eq!(user.email.as_deref(), Some("john@example.com"));
    }

    #[tokio::test]
    async fn rejects_an_invalid_credential() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/user"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let issuer = Url::parse(&server.uri()).unwrap();
        let verifier = HttpIdentityVerifier::new(http_client(), &issuer).unwrap();

        let error = verifier.verify_token("expired-token").await.unwrap_err();
        assert_matches!(error, IdentityError::CredentialRejected);
    }

    #[tokio::test]
    async fn surfaces_provider_failures() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/user"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let issuer = Url::parse(&server.uri()).unwrap();
        let verifier = HttpIdentityVerifier::new(http_client(), &issuer).unwrap();

        let error = verifier.verify_token("valid-token").await.unwrap_err();
        assert_matches!(error, IdentityError::UnexpectedStatus(_));
    }
}
