// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

use axum::{
    Json,
    response::{IntoResponse, Response},
};
use fls_axum_utils::record_error;
use fls_data_model::VerifiedUser;
use fls_graph_client::requests::authorization::{
    AuthorizationRequestData, build_authorization_url,
};
use hyper::StatusCode;
use serde::Serialize;
use url::Url;

use super::state::StateSigner;
use crate::{LinkConfig, impl_from_error_for_route, response::ErrorResponse};

#[derive(Debug, thiserror::Error)]
pub(crate) enum RouteError {
    #[error("Provider client id is not configured")]
    MissingClientId,

    #[error(transparent)]
    Internal(Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl_from_error_for_route!(fls_graph_client::error::AuthorizationError);
impl_from_error_for_route!(url::ParseError);

impl IntoResponse for RouteError {
    fn into_response(self) -> Response {
        let response = ErrorResponse::from_error(&self);
        let sentry_event_id = record_error!(self, Self::MissingClientId | Self::Internal(_));
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            sentry_event_id,
            Json(response),
        )
            .into_response()
    }
}

#[derive(Serialize)]
pub(crate) struct ConnectResponse {
    #[serde(rename = "oauthUrl")]
    oauth_url: Url,
}

/// Build the authorization URL the end-user is sent to.
///
/// A deterministic string build: no upstream call, no storage access. The
/// caller's identity rides along as the signed state parameter, which the
/// callback leg checks on the way back.
#[tracing::instrument(name = "handlers.link.connect", skip_all)]
pub(crate) fn handle(
    user: &VerifiedUser,
    link_config: &LinkConfig,
    signer: &StateSigner,
) -> Result<Json<ConnectResponse>, RouteError> {
    let client_id = link_config
        .client_id
        .clone()
        .ok_or(RouteError::MissingClientId)?;

    let redirect_uri = link_config.callback_redirect_uri()?;
    let state = signer.sign(&user.id);

    let mut data = AuthorizationRequestData::new(client_id, redirect_uri, state);
    if let Some(scopes) = &link_config.scopes {
        data = data.with_scopes(scopes.clone());
    }

    let oauth_url = build_authorization_url(link_config.authorization_endpoint.clone(), &data)?;

    Ok(Json(ConnectResponse { oauth_url }))
}
