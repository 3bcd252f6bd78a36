// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

//! Building the URL the end-user is sent to for authorization

use serde::Serialize;
use url::Url;

use crate::error::AuthorizationError;

/// The permissions requested on every authorization: read access to the
/// user's pages, and publish access for the linked Instagram accounts.
pub const DEFAULT_SCOPES: [&str; 4] = [
    "pages_show_list",
    "pages_read_engagement",
    "instagram_basic",
    "instagram_content_publish",
];

/// The data necessary to build an authorization request.
#[derive(Debug, Clone)]
pub struct AuthorizationRequestData {
    /// The app identifier obtained when registering with the provider.
    pub client_id: String,

    /// The URI the provider redirects back to after authorization.
    pub redirect_uri: Url,

    /// The scopes to request. Joined with commas, as the provider expects.
    pub scopes: Vec<String>,

    /// The anti-forgery state carried through the redirect round trip.
    pub state: String,
}

impl AuthorizationRequestData {
    /// Constructs a new [`AuthorizationRequestData`] with the default scope
    /// list.
    #[must_use]
    pub fn new(client_id: String, redirect_uri: Url, state: String) -> Self {
        Self {
            client_id,
            redirect_uri,
            scopes: DEFAULT_SCOPES.iter().map(|&s| s.to_owned()).collect(),
            state,
        }
    }

    /// Set the `scopes` field of this `AuthorizationRequestData`.
    #[must_use]
    pub fn with_scopes(mut self, scopes: Vec<String>) -> Self {
        self.scopes = scopes;
        self
    }
}

#[derive(Serialize)]
struct AuthorizationRequest<'a> {
    client_id: &'a str,
    redirect_uri: &'a str,
    scope: String,
    state: &'a str,
    response_type: &'static str,
}

/// Build the URL for authorizing at the provider's dialog endpoint.
///
/// This is a deterministic string build with no side effects: the same
/// inputs always produce the same URL.
///
/// # Errors
///
/// Returns an error if the query string cannot be serialized.
pub fn build_authorization_url(
    authorization_endpoint: Url,
    data: &AuthorizationRequestData,
) -> Result<Url, AuthorizationError> {
    let request = AuthorizationRequest {
        client_id: &data.client_id,
        redirect_uri: data.redirect_uri.as_str(),
        scope: data.scopes.join(","),
        state: &data.state,
        response_type: "code",
    };

    let authorization_query = serde_urlencoded::to_string(request)?;

    let mut authorization_url = authorization_endpoint;

    // Add our parameters to the query, because the URL might already have one.
    let mut full_query = authorization_url
        .query()
        .map(ToOwned::to_owned)
        .unwrap_or_default();
    if !full_query.is_empty() {
        full_query.push('&');
    }
    full_query.push_str(&authorization_query);

    authorization_url.set_query(Some(&full_query));

    Ok(authorization_url)
}
