// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

//! Listing the caller's linked accounts

use axum::{
    Json,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use fls_axum_utils::record_error;
use fls_data_model::{ConnectedAccount, SocialPlatform};
use fls_storage::RepositoryError;
use hyper::StatusCode;
use serde::Serialize;
use ulid::Ulid;

use crate::{CallContext, impl_from_error_for_route, response::ErrorResponse};

#[derive(Debug, thiserror::Error)]
pub(crate) enum RouteError {
    #[error(transparent)]
    Internal(Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl_from_error_for_route!(RepositoryError);

impl IntoResponse for RouteError {
    fn into_response(self) -> Response {
        let response = ErrorResponse::from_error(&self);
        let sentry_event_id = record_error!(self, Self::Internal(_));
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            sentry_event_id,
            Json(response),
        )
            .into_response()
    }
}

/// What an account looks like to the UI. Deliberately not the storage row:
/// the credential never crosses this boundary.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AccountView {
    id: Ulid,
    platform: SocialPlatform,
    platform_account_id: String,
    display_name: Option<String>,
    metadata: serde_json::Value,
    token_expires_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl From<ConnectedAccount> for AccountView {
    fn from(account: ConnectedAccount) -> Self {
        Self {
            id: account.id,
            platform: account.platform,
            platform_account_id: account.platform_account_id,
            display_name: account.display_name,
            metadata: account.metadata,
            token_expires_at: account.token_expires_at,
            created_at: account.created_at,
        }
    }
}

#[derive(Serialize)]
pub(crate) struct AccountsResponse {
    accounts: Vec<AccountView>,
}

/// List the caller's active linked accounts, newest first.
#[tracing::instrument(name = "handlers.accounts.list", skip_all)]
pub(crate) async fn handler(ctx: CallContext) -> Result<Json<AccountsResponse>, RouteError> {
    let CallContext { mut repo, user, .. } = ctx;

    let accounts = repo
        .connected_account()
        .list_active(&user.id)
        .await?
        .into_iter()
        .map(AccountView::from)
        .collect();

    Ok(Json(AccountsResponse { accounts }))
}
