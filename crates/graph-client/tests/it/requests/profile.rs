// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

use assert_matches::assert_matches;
use fls_graph_client::{error::GraphRequestError, requests::profile::fetch_profile};
use wiremock::{
    Mock, ResponseTemplate,
    matchers::{header, method, path, query_param},
};

use crate::{ACCESS_TOKEN, init_test};

#[tokio::test]
async fn pass_fetch_profile() {
    let (http_client, mock_server, graph_endpoint) = init_test().await;

    Mock::given(method("GET"))
        .and(path("/me"))
        .and(query_param("fields", "id,name"))
        .and(header("authorization", format!("Bearer {ACCESS_TOKEN}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "100001",
            "name": "John Doe",
        })))
        .mount(&mock_server)
        .await;

    let profile = fetch_profile(&http_client, &graph_endpoint, ACCESS_TOKEN)
        .await
        .unwrap();

    assert_eq!(profile.id, "100001");
    assert_eq!(profile.name.as_deref(), Some("John Doe"));
}

#[tokio::test]
async fn fail_fetch_profile_expired_token() {
    let (http_client, mock_server, graph_endpoint) = init_test().await;

    Mock::given(method("GET"))
        .and(path("/me"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "error": {
                "message": "Error validating access token: Session has expired",
                "type": "OAuthException",
                "code": 190,
            }
        })))
        .mount(&mock_server)
        .await;

    let error = fetch_profile(&http_client, &graph_endpoint, ACCESS_TOKEN)
        .await
        .unwrap_err();

    let api_error = assert_matches!(error, GraphRequestError::Api(e) => e);
    assert_eq!(api_error.code, Some(190));
}
