// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

use axum::{
    Json,
    response::{IntoResponse, Response},
};
use fls_axum_utils::record_error;
use fls_data_model::SocialPlatform;
use fls_storage::RepositoryError;
use hyper::StatusCode;
use serde::{Deserialize, Serialize};
use ulid::Ulid;

use crate::{CallContext, impl_from_error_for_route, response::ErrorResponse};

#[derive(Deserialize)]
pub(crate) struct DisconnectPayload {
    platform: SocialPlatform,

    #[serde(rename = "accountId")]
    account_id: String,
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum RouteError {
    #[error("Invalid account id")]
    InvalidAccountId,

    #[error(transparent)]
    Internal(Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl_from_error_for_route!(RepositoryError);

impl IntoResponse for RouteError {
    fn into_response(self) -> Response {
        let response = ErrorResponse::from_error(&self);
        let sentry_event_id = record_error!(self, Self::Internal(_));
        let status = match &self {
            Self::InvalidAccountId => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, sentry_event_id, Json(response)).into_response()
    }
}

#[derive(Serialize)]
pub(crate) struct DisconnectResponse {
    success: bool,
}

/// Remove one linked account.
///
/// The removal is scoped to the caller: the row has to match owner,
/// platform and id all at once, so knowing another user's row id gets an
/// attacker nowhere. A removal that matches nothing is still a success;
/// the account not being connected is the state the caller asked for.
#[tracing::instrument(name = "handlers.link.disconnect", skip_all)]
pub(crate) async fn handle(
    ctx: CallContext,
    payload: DisconnectPayload,
) -> Result<Json<DisconnectResponse>, RouteError> {
    let CallContext { mut repo, user, .. } = ctx;

    let id: Ulid = payload
        .account_id
        .parse()
        .map_err(|_| RouteError::InvalidAccountId)?;

    let removed = repo
        .connected_account()
        .remove(&user.id, payload.platform, id)
        .await?;

    if !removed {
        tracing::info!(
            account.id = %id,
            "No matching account to disconnect"
        );
    }

    repo.save().await?;

    Ok(Json(DisconnectResponse { success: true }))
}
