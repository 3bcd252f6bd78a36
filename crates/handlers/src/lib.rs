// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

//! The HTTP surface of the link service
//!
//! Everything here is a stateless request/response transform: the identity
//! verifier, the account store and the upstream HTTP client are capabilities
//! injected through the router state, never reached through ambient globals,
//! so the whole surface can be driven in tests without a real network or
//! database.

#![allow(clippy::module_name_repetitions)]

use std::{convert::Infallible, sync::Arc};

use axum::{
    Router,
    extract::{FromRef, FromRequestParts},
    routing::get,
};
use fls_config::{HttpConfig, ProviderConfig};
use fls_graph_client::types::ClientCredentials;
use fls_identity::IdentityVerifier;
use fls_storage::{BoxClock, BoxRepository, BoxRng};
use http::header::{AUTHORIZATION, CONTENT_TYPE, HeaderName};
use tower_http::cors::{Any, CorsLayer};
use url::Url;

mod accounts;
mod call_context;
mod health;
mod link;
mod response;

#[cfg(test)]
mod test_utils;

pub use self::{call_context::CallContext, link::state::StateSigner};

/// Implement `From<$from>` for the `RouteError` type in scope, wrapping the
/// error in its `Internal` variant
macro_rules! impl_from_error_for_route {
    ($from:ty) => {
        impl From<$from> for RouteError {
            fn from(e: $from) -> Self {
                Self::Internal(Box::new(e))
            }
        }
    };
}

pub(crate) use impl_from_error_for_route;

/// Everything the linking handlers need to know about the outside world:
/// the provider's endpoints and app credentials, and the public base URL the
/// redirect target is derived from.
#[derive(Debug, Clone)]
pub struct LinkConfig {
    /// The app identifier registered with the provider, if configured
    pub client_id: Option<String>,

    /// The app secret registered with the provider, if configured
    pub client_secret: Option<String>,

    /// The provider's authorization dialog endpoint
    pub authorization_endpoint: Url,

    /// The base URL of the provider's Graph API
    pub graph_endpoint: Url,

    /// The public base URL of the application
    pub public_base: Url,

    /// Scope-list override; the client's default set applies when absent
    pub scopes: Option<Vec<String>>,
}

impl LinkConfig {
    /// Assemble a [`LinkConfig`] out of the loaded configuration sections
    #[must_use]
    pub fn from_config(http: &HttpConfig, provider: &ProviderConfig) -> Self {
        Self {
            client_id: provider.client_id.clone(),
            client_secret: provider.client_secret.clone(),
            authorization_endpoint: provider.authorization_endpoint.clone(),
            graph_endpoint: provider.graph_endpoint.clone(),
            public_base: http.public_base.clone(),
            scopes: provider.scopes.clone(),
        }
    }

    /// The redirect target of the authorization round trip.
    ///
    /// Both the connect and the callback leg go through here: the provider
    /// rejects the code exchange if the two legs ever disagree on this
    /// value.
    pub(crate) fn callback_redirect_uri(&self) -> Result<Url, url::ParseError> {
        self.public_base.join("oauth/facebook/callback")
    }

    /// The client credentials, when both halves are configured
    pub(crate) fn client_credentials(&self) -> Option<ClientCredentials> {
        Some(ClientCredentials {
            client_id: self.client_id.clone()?,
            client_secret: self.client_secret.clone()?,
        })
    }
}

/// Build the service router.
///
/// Every response, error or not, carries the permissive CORS header set, and
/// cross-origin preflights are answered before authentication is even
/// attempted.
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
    BoxClock: FromRequestParts<S, Rejection = Infallible>,
    BoxRng: FromRequestParts<S, Rejection = Infallible>,
    BoxRepository: FromRequestParts<S>,
    <BoxRepository as FromRequestParts<S>>::Rejection:
        Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
    Arc<dyn IdentityVerifier>: FromRef<S>,
    reqwest::Client: FromRef<S>,
    LinkConfig: FromRef<S>,
    StateSigner: FromRef<S>,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers([
            AUTHORIZATION,
            CONTENT_TYPE,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
        ]);

    Router::new()
        .route("/health", get(self::health::get))
        .route(
            "/api/v1/social/link",
            get(self::link::handler)
                .post(self::link::handler)
                .options(self::link::preflight),
        )
        .route("/api/v1/social/accounts", get(self::accounts::handler))
        .layer(cors)
}
