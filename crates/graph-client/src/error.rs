// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

//! Error types returned by the request functions

use serde::Deserialize;
use thiserror::Error;

/// An error object as returned by the Graph API itself
#[derive(Debug, Clone, Deserialize, Error)]
#[error("{message}")]
pub struct GraphApiError {
    /// Human-readable description of the failure
    pub message: String,

    /// The error class, e.g. `OAuthException`
    #[serde(rename = "type")]
    pub kind: Option<String>,

    /// The provider's numeric error code
    pub code: Option<i64>,
}

#[derive(Deserialize)]
pub(crate) struct GraphErrorBody {
    pub(crate) error: GraphApiError,
}

/// Error when building an authorization URL
#[derive(Debug, Error)]
pub enum AuthorizationError {
    /// The query string could not be serialized
    #[error(transparent)]
    UrlEncode(#[from] serde_urlencoded::ser::Error),
}

/// Error when exchanging an authorization code for an access token
#[derive(Debug, Error)]
pub enum TokenExchangeError {
    /// The token endpoint could not be reached, or the response body could
    /// not be read
    #[error("failed to reach the token endpoint")]
    Transport(#[from] reqwest::Error),

    /// The token endpoint rejected the authorization code
    #[error("token endpoint rejected the authorization code")]
    Rejected(#[source] GraphApiError),

    /// The token endpoint answered without a usable credential
    #[error("token endpoint returned no usable credential")]
    MissingCredential,

    /// The token endpoint URL could not be derived
    #[error(transparent)]
    Url(#[from] url::ParseError),
}

/// Error when reading from the resource graph
#[derive(Debug, Error)]
pub enum GraphRequestError {
    /// The Graph API could not be reached, or the response body could not be
    /// read
    #[error("failed to reach the Graph API")]
    Transport(#[from] reqwest::Error),

    /// The Graph API answered with an error object
    #[error("Graph API request failed")]
    Api(#[source] GraphApiError),

    /// The request URL could not be derived
    #[error(transparent)]
    Url(#[from] url::ParseError),
}

/// Turn a non-2xx response into the Graph API error it carries.
///
/// Falls back to a synthesized [`GraphApiError`] when the body is not the
/// documented error shape.
pub(crate) async fn error_for_response(response: reqwest::Response) -> GraphApiError {
    let status = response.status();
    match response.json::<GraphErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => GraphApiError {
            message: format!("unexpected response status {status}"),
            kind: None,
            code: None,
        },
    }
}
