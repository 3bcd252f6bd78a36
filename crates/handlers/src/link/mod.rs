// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

//! The action-routed linking endpoint
//!
//! One HTTP entry point serves the whole flow, selected by an `action`
//! parameter: `connect` builds the authorization URL, `callback` exchanges
//! the returned code and persists the discovered accounts, `disconnect`
//! removes one. The selector comes from the query string or, failing that,
//! from an `action` field in the JSON body.

use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use fls_storage::BoxRng;
use hyper::StatusCode;
use serde::{Deserialize, de::DeserializeOwned};

use crate::{CallContext, LinkConfig, response::ErrorResponse};

mod callback;
mod connect;
mod disconnect;
mod discovery;
pub(crate) mod state;

use self::state::StateSigner;

#[derive(Deserialize)]
pub(crate) struct ActionParams {
    action: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Connect,
    Callback,
    Disconnect,
}

impl Action {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Connect => "connect",
            Self::Callback => "callback",
            Self::Disconnect => "disconnect",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum RouteError {
    #[error("Missing action selector")]
    MissingAction,

    #[error("Unknown action {0:?}")]
    UnknownAction(String),

    #[error("Missing request payload")]
    MissingPayload,

    #[error("Invalid request payload")]
    InvalidPayload(#[source] serde_json::Error),
}

impl IntoResponse for RouteError {
    fn into_response(self) -> Response {
        // All of these are caused by the caller; nothing to report upstream
        let response = ErrorResponse::from_error(&self);
        (StatusCode::BAD_REQUEST, Json(response)).into_response()
    }
}

fn resolve_action(
    params: &ActionParams,
    body: Option<&serde_json::Value>,
) -> Result<Action, RouteError> {
    // The query parameter wins over the body field
    let selector = params
        .action
        .as_deref()
        .or_else(|| body.and_then(|b| b.get("action")).and_then(|v| v.as_str()));

    match selector {
        None => Err(RouteError::MissingAction),
        Some("connect") => Ok(Action::Connect),
        Some("callback") => Ok(Action::Callback),
        Some("disconnect") => Ok(Action::Disconnect),
        Some(other) => Err(RouteError::UnknownAction(other.to_owned())),
    }
}

fn payload<T: DeserializeOwned>(body: Option<Json<serde_json::Value>>) -> Result<T, RouteError> {
    let Json(body) = body.ok_or(RouteError::MissingPayload)?;
    serde_json::from_value(body).map_err(RouteError::InvalidPayload)
}

fn respond<T: IntoResponse, E: IntoResponse>(result: Result<T, E>) -> Response {
    match result {
        Ok(response) => response.into_response(),
        Err(error) => error.into_response(),
    }
}

/// Cross-origin preflights succeed unconditionally: no auth, no action
/// parsing.
pub(crate) async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

#[tracing::instrument(
    name = "handlers.link.dispatch",
    skip_all,
    fields(action = tracing::field::Empty),
)]
pub(crate) async fn handler(
    rng: BoxRng,
    ctx: CallContext,
    State(http_client): State<reqwest::Client>,
    State(link_config): State<LinkConfig>,
    State(signer): State<StateSigner>,
    Query(params): Query<ActionParams>,
    body: Option<Json<serde_json::Value>>,
) -> Response {
    let action = match resolve_action(&params, body.as_ref().map(|Json(b)| b)) {
        Ok(action) => action,
        Err(e) => return e.into_response(),
    };

    tracing::Span::current().record("action", action.as_str());

    match action {
        Action::Connect => respond(connect::handle(&ctx.user, &link_config, &signer)),

        Action::Callback => {
            let payload = match payload(body) {
                Ok(payload) => payload,
                Err(e) => return e.into_response(),
            };
            respond(callback::handle(rng, ctx, &http_client, &link_config, &signer, payload).await)
        }

        Action::Disconnect => {
            let payload = match payload(body) {
                Ok(payload) => payload,
                Err(e) => return e.into_response(),
            };
            respond(disconnect::handle(ctx, payload).await)
        }
    }
}
