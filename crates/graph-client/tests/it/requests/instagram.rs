// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

use assert_matches::assert_matches;
use fls_graph_client::{error::GraphRequestError, requests::instagram::fetch_instagram_account};
use wiremock::{
    Mock, ResponseTemplate,
    matchers::{method, path, query_param},
};

use crate::{ACCESS_TOKEN, init_test};

#[tokio::test]
async fn pass_fetch_instagram_account() {
    let (http_client, mock_server, graph_endpoint) = init_test().await;

    Mock::given(method("GET"))
        .and(path("/17841400000000001"))
        .and(query_param("fields", "id,username"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "17841400000000001",
            "username": "johndoe",
        })))
        .mount(&mock_server)
        .await;

    let account = fetch_instagram_account(
        &http_client,
        &graph_endpoint,
        ACCESS_TOKEN,
        "17841400000000001",
    )
    .await
    .unwrap();

    assert_eq!(account.id, "17841400000000001");
    assert_eq!(account.username.as_deref(), Some("johndoe"));
}

#[tokio::test]
async fn fail_fetch_instagram_account() {
    let (http_client, mock_server, graph_endpoint) = init_test().await;

    Mock::given(method("GET"))
        .and(path("/17841400000000001"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": {
                "message": "Unsupported get request.",
                "type": "GraphMethodException",
                "code": 100,
            }
        })))
        .mount(&mock_server)
        .await;

    let error = fetch_instagram_account(
        &http_client,
        &graph_endpoint,
        ACCESS_TOKEN,
        "17841400000000001",
    )
    .await
    .unwrap_err();

    assert_matches!(error, GraphRequestError::Api(_));
}
