// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

//! Requests for the token endpoint

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use url::Url;

use crate::{
    error::{TokenExchangeError, error_for_response},
    http::RequestBuilderExt,
    types::{AccessGrant, ClientCredentials},
};

#[derive(Serialize)]
struct AccessTokenRequest<'a> {
    client_id: &'a str,
    client_secret: &'a str,
    redirect_uri: &'a str,
    code: &'a str,
}

/// Exchange an authorization code for an access token.
///
/// The `redirect_uri` must be the exact value used when building the
/// authorization URL; the provider rejects the exchange otherwise.
///
/// # Arguments
///
/// * `http_client` - The reqwest client to use for making HTTP requests.
///
/// * `client_credentials` - The credentials obtained when registering the
///   application.
///
/// * `graph_endpoint` - The base URL of the provider's Graph API.
///
/// * `redirect_uri` - The redirect URI used on the authorization leg.
///
/// * `code` - The authorization code returned by the authorization dialog.
///
/// * `now` - The current time, used to anchor the credential's expiry.
///
/// # Errors
///
/// Returns an error if the request fails or if the provider does not hand
/// back a usable credential. The call is attempted exactly once.
#[tracing::instrument(skip_all, fields(graph_endpoint = %graph_endpoint))]
pub async fn exchange_authorization_code(
    http_client: &reqwest::Client,
    client_credentials: &ClientCredentials,
    graph_endpoint: &Url,
    redirect_uri: &Url,
    code: &str,
    now: DateTime<Utc>,
) -> Result<AccessGrant, TokenExchangeError> {
    tracing::debug!("Exchanging authorization code for access token...");

    let token_endpoint = graph_endpoint.join("oauth/access_token")?;

    let request = AccessTokenRequest {
        client_id: &client_credentials.client_id,
        client_secret: &client_credentials.client_secret,
        redirect_uri: redirect_uri.as_str(),
        code,
    };

    let response = http_client
        .post(token_endpoint)
        .form(&request)
        .send_traced()
        .await?;

    if !response.status().is_success() {
        return Err(TokenExchangeError::Rejected(
            error_for_response(response).await,
        ));
    }

    let body: serde_json::Value = response.json().await?;

    let Some(access_token) = body.get("access_token").and_then(serde_json::Value::as_str) else {
        return Err(TokenExchangeError::MissingCredential);
    };

    let expires_at = body
        .get("expires_in")
        .and_then(serde_json::Value::as_i64)
        .and_then(Duration::try_seconds)
        .map(|ttl| now + ttl);

    Ok(AccessGrant {
        access_token: access_token.to_owned(),
        expires_at,
    })
}
