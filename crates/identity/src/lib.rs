// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

//! The identity-provider capability: resolve a bearer credential to a user
//! identity, or reject it.
//!
//! The service never authenticates users itself; it trusts the platform's
//! identity provider and consumes it behind the [`IdentityVerifier`] trait.
//! An HTTP implementation talks to the real provider, and a mock
//! implementation backs the test suites.

mod http;
mod mock;

use async_trait::async_trait;
use fls_data_model::VerifiedUser;
use thiserror::Error;

pub use self::{http::HttpIdentityVerifier, mock::IdentityVerifier as MockIdentityVerifier};

/// Error returned when a bearer credential could not be resolved
#[derive(Debug, Error)]
pub enum IdentityError {
    /// The provider understood the request and rejected the credential:
    /// expired, malformed or revoked.
    #[error("credential rejected by the identity provider")]
    CredentialRejected,

    /// The provider answered with something other than a user or a
    /// rejection. The credential may well be valid.
    #[error("unexpected response status {0} from the identity provider")]
    UnexpectedStatus(reqwest::StatusCode),

    /// The provider could not be reached.
    #[error("failed to reach the identity provider")]
    Transport(#[from] reqwest::Error),
}

/// Resolves bearer credentials against the platform's identity provider
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    /// Resolve a bearer credential to the user it belongs to
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::CredentialRejected`] when the credential
    /// does not resolve to a user, and other variants when the provider
    /// could not give an answer either way.
    async fn verify_token(&self, token: &str) -> Result<VerifiedUser, IdentityError>;
}
