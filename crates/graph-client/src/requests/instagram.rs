// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

//! Requests for Instagram business account details

use url::Url;

use crate::{
    error::{GraphRequestError, error_for_response},
    http::RequestBuilderExt,
    types::InstagramAccount,
};

/// Fetch the identifying details of an Instagram business account.
///
/// # Errors
///
/// Returns an error if the request fails or the response is invalid.
#[tracing::instrument(skip_all, fields(graph_endpoint = %graph_endpoint, instagram.id = account_id))]
pub async fn fetch_instagram_account(
    http_client: &reqwest::Client,
    graph_endpoint: &Url,
    access_token: &str,
    account_id: &str,
) -> Result<InstagramAccount, GraphRequestError> {
    let mut endpoint = graph_endpoint.join(account_id)?;
    endpoint.set_query(Some("fields=id,username"));

    let response = http_client
        .get(endpoint)
        .bearer_auth(access_token)
        .send_traced()
        .await?;

    if !response.status().is_success() {
        return Err(GraphRequestError::Api(error_for_response(response).await));
    }

    Ok(response.json().await?)
}
