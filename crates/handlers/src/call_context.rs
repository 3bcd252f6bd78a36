// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

use std::{convert::Infallible, sync::Arc};

use axum::{
    Json,
    extract::{FromRef, FromRequestParts, State},
    response::{IntoResponse, Response},
};
use axum_extra::TypedHeader;
use fls_axum_utils::record_error;
use fls_data_model::VerifiedUser;
use fls_identity::{IdentityError, IdentityVerifier};
use fls_storage::{BoxClock, BoxRepository};
use headers::{Authorization, authorization::Bearer};
use hyper::StatusCode;

use crate::response::ErrorResponse;

#[derive(Debug, thiserror::Error)]
pub enum Rejection {
    /// The authorization header is missing
    #[error("Missing authorization header")]
    MissingAuthorizationHeader,

    /// The authorization header is invalid
    #[error("Invalid authorization header")]
    InvalidAuthorizationHeader,

    /// The identity provider rejected the bearer credential
    #[error("Invalid bearer credential")]
    CredentialRejected,

    /// The identity provider could not answer
    #[error("Failed to verify the bearer credential")]
    IdentityProvider(#[source] IdentityError),

    /// Couldn't set up a repository on the storage backend
    #[error("Couldn't load the account repository")]
    RepositorySetup(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl IntoResponse for Rejection {
    fn into_response(self) -> Response {
        let response = ErrorResponse::from_error(&self);
        let sentry_event_id = record_error!(
            self,
            Self::IdentityProvider(_) | Self::RepositorySetup(_)
        );

        let status = match &self {
            Self::MissingAuthorizationHeader
            | Self::InvalidAuthorizationHeader
            | Self::CredentialRejected => StatusCode::UNAUTHORIZED,

            Self::IdentityProvider(_) | Self::RepositorySetup(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, sentry_event_id, Json(response)).into_response()
    }
}

/// An extractor which authenticates the request
///
/// Verifying the bearer credential is the first thing every action does;
/// nothing downstream runs, and the store is never touched, unless the
/// caller resolved to a user.
#[non_exhaustive]
pub struct CallContext {
    pub repo: BoxRepository,
    pub clock: BoxClock,
    pub user: VerifiedUser,
}

impl<S> FromRequestParts<S> for CallContext
where
    S: Send + Sync,
    BoxClock: FromRequestParts<S, Rejection = Infallible>,
    BoxRepository: FromRequestParts<S>,
    <BoxRepository as FromRequestParts<S>>::Rejection:
        Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
    Arc<dyn IdentityVerifier>: FromRef<S>,
{
    type Rejection = Rejection;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let Ok(clock) = BoxClock::from_request_parts(parts, state).await;
        let Ok(State(verifier)) =
            State::<Arc<dyn IdentityVerifier>>::from_request_parts(parts, state).await;

        // Extract the bearer credential from the authorization header
        let token = TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                if e.is_missing() {
                    Rejection::MissingAuthorizationHeader
                } else {
                    Rejection::InvalidAuthorizationHeader
                }
            })?;

        let user = verifier
            .verify_token(token.token())
            .await
            .map_err(|e| match e {
                IdentityError::CredentialRejected => Rejection::CredentialRejected,
                e => Rejection::IdentityProvider(e),
            })?;

        // Only touch the storage backend once the caller is authenticated
        let repo = BoxRepository::from_request_parts(parts, state)
            .await
            .map_err(Into::into)
            .map_err(Rejection::RepositorySetup)?;

        Ok(Self { repo, clock, user })
    }
}
