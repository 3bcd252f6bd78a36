// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

use axum::{
    Json,
    response::{IntoResponse, Response},
};
use fls_axum_utils::record_error;
use fls_graph_client::{
    error::{GraphRequestError, TokenExchangeError},
    requests::token::exchange_authorization_code,
};
use fls_storage::RepositoryError;
use hyper::StatusCode;
use serde::{Deserialize, Serialize};

use super::{discovery, state::StateSigner};
use crate::{CallContext, LinkConfig, impl_from_error_for_route, response::ErrorResponse};

#[derive(Deserialize)]
pub(crate) struct CallbackPayload {
    code: String,
    state: String,
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum RouteError {
    #[error("State parameter mismatch")]
    StateMismatch,

    #[error("Provider client credentials are not configured")]
    MissingClientCredentials,

    #[error("Failed to exchange the authorization code")]
    TokenExchange(#[source] TokenExchangeError),

    #[error("Failed to fetch the authorized profile")]
    ProfileFetch(#[source] GraphRequestError),

    #[error(transparent)]
    Internal(Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl_from_error_for_route!(RepositoryError);
impl_from_error_for_route!(url::ParseError);

impl IntoResponse for RouteError {
    fn into_response(self) -> Response {
        let response = ErrorResponse::from_error(&self);
        let sentry_event_id = record_error!(
            self,
            Self::MissingClientCredentials | Self::ProfileFetch(_) | Self::Internal(_)
        );

        let status = match &self {
            Self::StateMismatch | Self::TokenExchange(_) => StatusCode::BAD_REQUEST,

            Self::MissingClientCredentials | Self::ProfileFetch(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, sentry_event_id, Json(response)).into_response()
    }
}

#[derive(Serialize)]
pub(crate) struct CallbackResponse {
    success: bool,

    /// How many accounts were written
    linked: usize,

    /// What was skipped along the way, one summary per skipped item
    #[serde(skip_serializing_if = "Vec::is_empty")]
    failures: Vec<String>,
}

/// Complete the authorization round trip.
///
/// The state binding is checked before anything leaves the process: a
/// mismatched callback costs no upstream call. Then the code is exchanged,
/// the resource graph walked, and every discovered account upserted under
/// its owner. The primary account's write decides the overall outcome;
/// secondary failures are logged and reported, not fatal.
#[tracing::instrument(name = "handlers.link.callback", skip_all)]
pub(crate) async fn handle(
    mut rng: fls_storage::BoxRng,
    ctx: CallContext,
    http_client: &reqwest::Client,
    link_config: &LinkConfig,
    signer: &StateSigner,
    payload: CallbackPayload,
) -> Result<Json<CallbackResponse>, RouteError> {
    let CallContext {
        mut repo,
        clock,
        user,
    } = ctx;

    signer
        .verify(&payload.state, &user.id)
        .map_err(|_| RouteError::StateMismatch)?;

    let client_credentials = link_config
        .client_credentials()
        .ok_or(RouteError::MissingClientCredentials)?;
    let redirect_uri = link_config.callback_redirect_uri()?;

    let grant = exchange_authorization_code(
        http_client,
        &client_credentials,
        &link_config.graph_endpoint,
        &redirect_uri,
        &payload.code,
        clock.now(),
    )
    .await
    .map_err(RouteError::TokenExchange)?;

    let discovered =
        discovery::discover_accounts(http_client, &link_config.graph_endpoint, &grant)
            .await
            .map_err(RouteError::ProfileFetch)?;

    let mut failures = discovered.failures;
    let mut linked = 0;

    // The primary account is the success criterion: a failed write here
    // fails the whole callback
    repo.connected_account()
        .upsert(&mut rng, &clock, &user.id, discovered.primary)
        .await?;
    linked += 1;

    for candidate in discovered.secondaries {
        let account_id = candidate.platform_account_id.clone();
        match repo
            .connected_account()
            .upsert(&mut rng, &clock, &user.id, candidate)
            .await
        {
            Ok(_) => linked += 1,
            Err(e) => {
                tracing::warn!(
                    error = &e as &dyn std::error::Error,
                    instagram.id = %account_id,
                    "Failed to save an Instagram account, skipping it"
                );
                failures.push(format!("could not save instagram account {account_id}"));
            }
        }
    }

    repo.save().await?;

    Ok(Json(CallbackResponse {
        success: true,
        linked,
        failures,
    }))
}
