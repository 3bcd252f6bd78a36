// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

//! Requests for the pages the credential can act on

use serde::Deserialize;
use url::Url;

use crate::{
    error::{GraphRequestError, error_for_response},
    http::RequestBuilderExt,
    types::DelegatedPage,
};

#[derive(Deserialize)]
struct PagesResponse {
    #[serde(default)]
    data: Vec<DelegatedPage>,
}

/// Fetch the pages the access credential can act on, along with the
/// Instagram business account each one is linked to, if any.
///
/// # Errors
///
/// Returns an error if the request fails or the response is invalid.
#[tracing::instrument(skip_all, fields(graph_endpoint = %graph_endpoint))]
pub async fn fetch_delegated_pages(
    http_client: &reqwest::Client,
    graph_endpoint: &Url,
    access_token: &str,
) -> Result<Vec<DelegatedPage>, GraphRequestError> {
    let mut endpoint = graph_endpoint.join("me/accounts")?;
    endpoint.set_query(Some("fields=id,name,instagram_business_account"));

    let response = http_client
        .get(endpoint)
        .bearer_auth(access_token)
        .send_traced()
        .await?;

    if !response.status().is_success() {
        return Err(GraphRequestError::Api(error_for_response(response).await));
    }

    let body: PagesResponse = response.json().await?;
    Ok(body.data)
}
